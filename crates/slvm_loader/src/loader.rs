use crate::error::LoadError;
use slvm_core::{FastHashMap, VarClass, VarType, fast_map_new};
use slvm_ir::{
    Label, LocalDecl, OperandKind, Program, ProgramElement, Segment, SegmentKind, ShaderKind,
    StdVar, UsesMask, VarRef, lookup_opcode, mnemonics,
};
use slvm_lexer::{Lexer, normalize_source};
use slvm_syntax::{DiagnosticKind, SourceText, Span, Token, TokenKind, find_best_match, unquote};

type LoadResult<T> = Result<T, LoadError>;

/// Single-use program loader.
pub struct Loader {
    source: SourceText,
    tokens: Vec<Token>,
    i: usize,
    local_names: FastHashMap<String, usize>,
    /// Label placeholders awaiting the second pass: element index and token span.
    pending: Vec<(usize, Span)>,
}

impl Loader {
    pub fn new(text: &str) -> Self {
        let normalized = normalize_source(text);
        for diag in &normalized.diagnostics {
            log::warn!("{}", diag.message);
        }
        Self {
            source: SourceText::new(normalized.text),
            tokens: Vec::new(),
            i: 0,
            local_names: fast_map_new(),
            pending: Vec::new(),
        }
    }

    pub fn load(mut self) -> LoadResult<Program> {
        let lex = Lexer::new(self.source.as_str()).lex();
        if let Some(diag) = lex.diagnostics.iter().find(|d| d.is_error()) {
            let span = diag.span.unwrap_or_default();
            return Err(self.error_at(DiagnosticKind::Raw(diag.message.clone()), span));
        }
        self.tokens = lex.tokens;

        let mut program = self.header()?;
        self.segments(&mut program)?;
        log::debug!(
            "loaded {} program: {} locals, {} init and {} code instructions",
            program.kind,
            program.locals.len(),
            program.init.instruction_count(),
            program.code.instruction_count()
        );
        Ok(program)
    }

    fn header(&mut self) -> LoadResult<Program> {
        let kind_tok = self.expect(TokenKind::Word, "shader kind")?;
        let word = self.text(kind_tok);
        let kind = match ShaderKind::parse(word) {
            Some(kind) => kind,
            None => {
                let suggestion = find_best_match(word, ShaderKind::ALL.iter().map(|k| k.keyword()))
                    .map(str::to_string);
                let kind = DiagnosticKind::UnknownShaderKind(word.to_string());
                return Err(self.error_tok(kind, kind_tok).with_suggestion(suggestion));
            }
        };
        let mut program = Program::new(kind);

        self.expect_keyword("AQSIS_V")?;
        program.version = self.rest_of_line()?;

        self.expect_keyword("USES")?;
        let mask_tok = self.expect(TokenKind::Number, "USES bit-mask")?;
        let text = self.text(mask_tok);
        let mask = text
            .parse::<u32>()
            .map_err(|_| self.error_tok(DiagnosticKind::InvalidUsesMask(text.to_string()), mask_tok))?;
        program.uses = UsesMask(mask);
        if program.uses.unknown_bits() != 0 {
            log::warn!(
                "USES mask {mask:#x} sets bits beyond the standard variables; they are ignored"
            );
        }
        Ok(program)
    }

    /// Version token: the raw text after `AQSIS_V` up to the end of its line.
    fn rest_of_line(&mut self) -> LoadResult<String> {
        let start = self.prev_end();
        let text = self.source.as_str();
        let end = text[start as usize..]
            .find('\n')
            .map_or(text.len(), |off| start as usize + off);
        let version = text[start as usize..end]
            .split('#')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if version.is_empty() {
            return Err(self.error_at(
                DiagnosticKind::ExpectedToken("version after AQSIS_V".into()),
                Span::point(start),
            ));
        }
        while self.peek().kind != TokenKind::Eof && (self.peek().span.start.0 as usize) < end {
            self.i += 1;
        }
        Ok(version)
    }

    fn segments(&mut self, program: &mut Program) -> LoadResult<()> {
        const ORDER: [&str; 3] = ["Data", "Init", "Code"];
        let mut next = 0;
        while self.peek().kind != TokenKind::Eof {
            self.expect_keyword("segment")?;
            let name_tok = self.expect(TokenKind::Word, "segment name")?;
            let name = self.text(name_tok);
            let Some(idx) = ORDER.iter().position(|s| *s == name) else {
                let suggestion = find_best_match(name, ORDER.into_iter()).map(str::to_string);
                let kind = DiagnosticKind::UnknownSegment(name.to_string());
                return Err(self.error_tok(kind, name_tok).with_suggestion(suggestion));
            };
            if idx < next {
                return Err(self.error_tok(DiagnosticKind::SegmentOutOfOrder(name.to_string()), name_tok));
            }
            next = idx + 1;
            match idx {
                0 => self.data_segment(program)?,
                1 => self.code_segment(program, SegmentKind::Init)?,
                _ => self.code_segment(program, SegmentKind::Code)?,
            }
        }
        Ok(())
    }

    fn at_segment_end(&self) -> bool {
        let tok = self.peek();
        tok.kind == TokenKind::Eof || (tok.kind == TokenKind::Word && self.text(tok) == "segment")
    }

    fn data_segment(&mut self, program: &mut Program) -> LoadResult<()> {
        while !self.at_segment_end() {
            let decl = self.declaration()?;
            log::trace!("declare {} {} {}", decl.class, decl.ty, decl.name);
            self.local_names.insert(decl.name.clone(), program.locals.len());
            program.locals.push(decl);
        }
        Ok(())
    }

    fn declaration(&mut self) -> LoadResult<LocalDecl> {
        let (mut param, mut output) = (false, false);
        let class_tok = loop {
            let tok = self.expect(TokenKind::Word, "declaration")?;
            match self.text(tok) {
                "param" => param = true,
                "output" => output = true,
                _ => break tok,
            }
        };
        let word = self.text(class_tok);
        let class = VarClass::parse(word)
            .ok_or_else(|| self.error_tok(DiagnosticKind::UnknownStorageClass(word.to_string()), class_tok))?;

        let ty_tok = self.expect(TokenKind::Word, "variable type")?;
        let word = self.text(ty_tok);
        let Some(ty) = VarType::parse(word) else {
            let suggestion =
                find_best_match(word, VarType::ALL.iter().map(|t| t.keyword())).map(str::to_string);
            let kind = DiagnosticKind::UnknownType(word.to_string());
            return Err(self.error_tok(kind, ty_tok).with_suggestion(suggestion));
        };

        let name_tok = self.expect(TokenKind::Word, "variable name")?;
        let name = self.text(name_tok).to_string();
        if self.local_names.contains_key(&name) {
            return Err(self.error_tok(DiagnosticKind::DuplicateVariable(name), name_tok));
        }

        let mut array_len = None;
        if self.peek().kind == TokenKind::LBracket {
            self.i += 1;
            let len_tok = self.expect(TokenKind::Number, "array length")?;
            let text = self.text(len_tok);
            match text.parse::<usize>() {
                Ok(len) if len > 0 => array_len = Some(len),
                _ => {
                    return Err(self.error_tok(DiagnosticKind::InvalidArrayLength(text.to_string()), len_tok));
                }
            }
            self.expect(TokenKind::RBracket, "']'")?;
        }

        Ok(LocalDecl {
            name,
            ty,
            class,
            param,
            output,
            array_len,
        })
    }

    fn code_segment(&mut self, program: &mut Program, kind: SegmentKind) -> LoadResult<()> {
        let mut segment = Segment::default();
        self.pending.clear();
        while !self.at_segment_end() {
            let tok = self.bump();
            match tok.kind {
                TokenKind::Colon => {
                    let id_tok = self.expect(TokenKind::Number, "label id")?;
                    let id = self.label_id(id_tok)?;
                    if segment.label(id).is_some() {
                        return Err(self.error_tok(DiagnosticKind::DuplicateLabel(id), id_tok));
                    }
                    segment.labels.push(Label {
                        id,
                        position: segment.elements.len(),
                    });
                }
                TokenKind::Word => self.instruction(program, &mut segment, tok)?,
                _ => {
                    return Err(self.error_tok(DiagnosticKind::ExpectedToken("opcode or label".into()), tok));
                }
            }
        }
        self.resolve_labels(&mut segment)?;
        log::debug!(
            "segment {}: {} elements, {} labels",
            kind.name(),
            segment.len(),
            segment.labels.len()
        );
        *program.segment_mut(kind) = segment;
        Ok(())
    }

    fn instruction(&mut self, program: &Program, segment: &mut Segment, op_tok: Token) -> LoadResult<()> {
        let word = self.text(op_tok);
        let Some((name, info)) = lookup_opcode(word) else {
            let suggestion = find_best_match(word, mnemonics()).map(str::to_string);
            let kind = DiagnosticKind::UnknownOpcode(word.to_string());
            return Err(self.error_tok(kind, op_tok).with_suggestion(suggestion));
        };
        segment.elements.push(ProgramElement::Op { name, info });

        for operand in info.operands {
            let tok = self.peek();
            if self.at_segment_end() || tok.kind == TokenKind::Colon {
                let kind = DiagnosticKind::MissingOperand {
                    op: name.to_string(),
                    expected: operand.describe(),
                };
                return Err(self.error_tok(kind, tok));
            }
            self.i += 1;
            let element = match (operand, tok.kind) {
                (OperandKind::Float, TokenKind::Number) => {
                    let text = self.text(tok);
                    let value = text
                        .parse::<f32>()
                        .map_err(|_| self.error_tok(DiagnosticKind::InvalidNumber(text.to_string()), tok))?;
                    ProgramElement::Float(value)
                }
                (OperandKind::Str, TokenKind::Str) => ProgramElement::Str(unquote(self.text(tok))),
                (OperandKind::Var, TokenKind::Word) => {
                    let var = self.variable(program, tok, info.code.needs_array(), name)?;
                    ProgramElement::Var(var)
                }
                (OperandKind::Label, TokenKind::Number) => {
                    let id = self.label_id(tok)?;
                    self.pending.push((segment.elements.len(), tok.span));
                    ProgramElement::UnresolvedLabel(id)
                }
                _ => return Err(self.invalid_operand(name, *operand, tok)),
            };
            segment.elements.push(element);
        }
        Ok(())
    }

    fn variable(&self, program: &Program, tok: Token, needs_array: bool, op: &str) -> LoadResult<VarRef> {
        let name = self.text(tok);
        if let Some(&idx) = self.local_names.get(name) {
            let is_array = program.locals[idx].array_len.is_some();
            if needs_array && !is_array {
                return Err(self.error_tok(DiagnosticKind::ArrayRequired(name.to_string()), tok));
            }
            if !needs_array && is_array {
                let kind = DiagnosticKind::InvalidOperand {
                    op: op.to_string(),
                    expected: "non-array variable",
                    found: format!("array '{name}'"),
                };
                return Err(self.error_tok(kind, tok));
            }
            return Ok(VarRef::Local(idx));
        }
        if let Some(var) = StdVar::parse(name) {
            if needs_array {
                return Err(self.error_tok(DiagnosticKind::ArrayRequired(name.to_string()), tok));
            }
            return Ok(VarRef::Std(var));
        }
        let candidates = self
            .local_names
            .keys()
            .map(String::as_str)
            .chain(StdVar::ALL.iter().map(|v| v.name()));
        let suggestion = find_best_match(name, candidates).map(str::to_string);
        Err(self
            .error_tok(DiagnosticKind::UndefinedVariable(name.to_string()), tok)
            .with_suggestion(suggestion))
    }

    /// Label ids are written as floats (`:3`, `jmp 3.0`) but must be whole
    /// and non-negative.
    fn label_id(&self, tok: Token) -> LoadResult<u32> {
        let text = self.text(tok);
        match text.parse::<f64>() {
            Ok(id) if id.is_finite() && id >= 0.0 && id.fract() == 0.0 && id <= f64::from(u32::MAX) => {
                Ok(id as u32)
            }
            _ => {
                let kind = DiagnosticKind::InvalidOperand {
                    op: ":".into(),
                    expected: "label",
                    found: format!("number '{text}'"),
                };
                Err(self.error_tok(kind, tok))
            }
        }
    }

    fn resolve_labels(&self, segment: &mut Segment) -> LoadResult<()> {
        for &(idx, span) in &self.pending {
            let Some(&ProgramElement::UnresolvedLabel(id)) = segment.elements.get(idx) else {
                continue;
            };
            let label = segment
                .label(id)
                .ok_or_else(|| self.error_at(DiagnosticKind::UndefinedLabel(id), span))?;
            segment.elements[idx] = ProgramElement::Label(label);
        }
        Ok(())
    }

    fn invalid_operand(&self, op: &str, expected: OperandKind, tok: Token) -> LoadError {
        let found = match tok.kind {
            TokenKind::Word | TokenKind::Number => format!("{} '{}'", tok.kind.describe(), self.text(tok)),
            other => other.describe().to_string(),
        };
        self.error_tok(
            DiagnosticKind::InvalidOperand {
                op: op.to_string(),
                expected: expected.describe(),
                found,
            },
            tok,
        )
    }

    fn peek(&self) -> Token {
        self.tokens.get(self.i).or(self.tokens.last()).copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            span: Span::point(self.source.as_str().len() as u32),
        })
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.i += 1;
        }
        tok
    }

    fn prev_end(&self) -> u32 {
        self.i
            .checked_sub(1)
            .and_then(|p| self.tokens.get(p))
            .map_or(0, |t| t.span.end.0)
    }

    fn text(&self, tok: Token) -> &str {
        self.source.slice(tok.span)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> LoadResult<Token> {
        let tok = self.peek();
        if tok.kind != kind {
            return Err(self.error_tok(DiagnosticKind::ExpectedToken(what.to_string()), tok));
        }
        self.i += 1;
        Ok(tok)
    }

    fn expect_keyword(&mut self, keyword: &str) -> LoadResult<Token> {
        let tok = self.peek();
        if tok.kind != TokenKind::Word || self.text(tok) != keyword {
            return Err(self.error_tok(DiagnosticKind::ExpectedToken(format!("'{keyword}'")), tok));
        }
        self.i += 1;
        Ok(tok)
    }

    fn error_tok(&self, kind: DiagnosticKind, tok: Token) -> LoadError {
        self.error_at(kind, tok.span)
    }

    fn error_at(&self, kind: DiagnosticKind, span: Span) -> LoadError {
        let (line, col) = self.source.line_col(span.start.0);
        LoadError {
            kind,
            token: self.source.slice(span).to_string(),
            span,
            line: line + 1,
            col: col + 1,
            suggestion: None,
        }
    }
}

impl LoadError {
    fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }
}
