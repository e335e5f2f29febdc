use slvm_lexer::{Lexer, normalize_source};
use slvm_syntax::TokenKind;

fn kinds(src: &str) -> Vec<TokenKind> {
    let lex = Lexer::new(src).lex();
    assert!(lex.diagnostics.is_empty(), "{:?}", lex.diagnostics);
    lex.tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn header_and_declarations() {
    let src = "surface\nAQSIS_V 1.8.0\nUSES 460557\nsegment Data\nparam uniform float Ka\nvarying point arr[4]\n";
    let lex = Lexer::new(src).lex();
    assert!(lex.diagnostics.is_empty());
    let words: Vec<&str> = lex
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| &src[t.span.start.0 as usize..t.span.end.0 as usize])
        .collect();
    assert_eq!(
        words,
        [
            "surface", "AQSIS_V", "USES", "segment", "Data", "param", "uniform", "float", "Ka",
            "varying", "point", "arr"
        ]
    );
    assert!(lex.tokens.iter().any(|t| t.kind == TokenKind::LBracket));
    assert!(lex.tokens.iter().any(|t| t.kind == TokenKind::RBracket));
}

#[test]
fn version_token_is_number_then_words() {
    // The version is consumed as raw text by the loader; the lexer must not fail on it.
    let lex = Lexer::new("AQSIS_V 1.8.0").lex();
    assert!(lex.diagnostics.is_empty(), "{:?}", lex.diagnostics);
}

#[test]
fn label_markers_and_signed_numbers() {
    assert_eq!(
        kinds(":12 pushif -2.5 pushif .5 pushif +1e-3"),
        [
            TokenKind::Colon,
            TokenKind::Number,
            TokenKind::Word,
            TokenKind::Number,
            TokenKind::Word,
            TokenKind::Number,
            TokenKind::Word,
            TokenKind::Number,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn strings_keep_escapes_inside_one_token() {
    let src = r#"pushis "a \"quoted\" word""#;
    let lex = Lexer::new(src).lex();
    assert!(lex.diagnostics.is_empty());
    let s = lex.tokens[1];
    assert_eq!(s.kind, TokenKind::Str);
    assert_eq!(&src[s.span.start.0 as usize..], r#""a \"quoted\" word""#);
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("# header comment\nnop # trailing\n"),
        [TokenKind::Word, TokenKind::Eof]
    );
}

#[test]
fn unterminated_string_is_reported() {
    let lex = Lexer::new("pushis \"oops\n").lex();
    assert!(
        lex.diagnostics
            .iter()
            .any(|d| d.message.contains("Unterminated string"))
    );
}

#[test]
fn number_glued_to_letters_is_reported() {
    let lex = Lexer::new("pushif 3abc").lex();
    assert!(
        lex.diagnostics
            .iter()
            .any(|d| d.message.contains("Invalid number")),
        "{:?}",
        lex.diagnostics
    );
}

#[test]
fn unexpected_character_is_reported() {
    let lex = Lexer::new("nop @").lex();
    assert_eq!(lex.diagnostics.len(), 1);
    assert!(lex.diagnostics[0].message.contains("Unexpected character"));
}

#[test]
fn normalize_folds_line_endings() {
    let n = normalize_source("\u{feff}a\r\nb\rc");
    assert_eq!(n.text, "a\nb\nc");
    assert!(n.diagnostics.is_empty());
}
