use std::fmt;

use crate::codes;

/// Everything that can make a program text fail to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    // Lexer
    UnterminatedString,
    UnexpectedChar(char),
    InvalidNumber(String),

    // Header and segments
    UnknownShaderKind(String),
    ExpectedToken(String),
    InvalidUsesMask(String),
    UnknownSegment(String),
    SegmentOutOfOrder(String),

    // Data segment
    UnknownType(String),
    UnknownStorageClass(String),
    DuplicateVariable(String),
    InvalidArrayLength(String),

    // Init / Code segments
    UnknownOpcode(String),
    MissingOperand {
        op: String,
        expected: &'static str,
    },
    InvalidOperand {
        op: String,
        expected: &'static str,
        found: String,
    },
    UndefinedVariable(String),
    ArrayRequired(String),
    DuplicateLabel(u32),
    UndefinedLabel(u32),

    // Custom
    Raw(String),
}

impl DiagnosticKind {
    pub fn code(&self) -> Option<&'static str> {
        let code = match self {
            DiagnosticKind::UnterminatedString
            | DiagnosticKind::UnexpectedChar(_)
            | DiagnosticKind::InvalidNumber(_) => codes::LEX_ERROR,
            DiagnosticKind::UnknownShaderKind(_)
            | DiagnosticKind::ExpectedToken(_)
            | DiagnosticKind::InvalidUsesMask(_)
            | DiagnosticKind::UnknownSegment(_)
            | DiagnosticKind::SegmentOutOfOrder(_) => codes::MALFORMED_HEADER,
            DiagnosticKind::UnknownType(_)
            | DiagnosticKind::UnknownStorageClass(_)
            | DiagnosticKind::InvalidArrayLength(_) => codes::MALFORMED_DECLARATION,
            DiagnosticKind::UnknownOpcode(_) => codes::UNKNOWN_OPCODE,
            DiagnosticKind::MissingOperand { .. }
            | DiagnosticKind::InvalidOperand { .. }
            | DiagnosticKind::ArrayRequired(_) => codes::BAD_OPERAND,
            DiagnosticKind::UndefinedVariable(_) => codes::UNDEFINED_VARIABLE,
            DiagnosticKind::UndefinedLabel(_) => codes::UNDEFINED_LABEL,
            DiagnosticKind::DuplicateVariable(_) | DiagnosticKind::DuplicateLabel(_) => {
                codes::DUPLICATE_DEFINITION
            }
            DiagnosticKind::Raw(_) => return None,
        };
        Some(code)
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DiagnosticsFormatter::format(self))
    }
}

pub struct DiagnosticsFormatter;

impl DiagnosticsFormatter {
    pub fn format(kind: &DiagnosticKind) -> String {
        match kind {
            DiagnosticKind::UnterminatedString => "Unterminated string literal".into(),
            DiagnosticKind::UnexpectedChar(c) => format!("Unexpected character: {:?}", c),
            DiagnosticKind::InvalidNumber(s) => format!("Invalid number: {}", s),

            DiagnosticKind::UnknownShaderKind(s) => format!("Unknown shader kind: {}", s),
            DiagnosticKind::ExpectedToken(s) => format!("Expected {}", s),
            DiagnosticKind::InvalidUsesMask(s) => format!("Invalid USES mask: {}", s),
            DiagnosticKind::UnknownSegment(s) => format!("Unknown segment: {}", s),
            DiagnosticKind::SegmentOutOfOrder(s) => {
                format!("Segment {} is out of order or repeated", s)
            }

            DiagnosticKind::UnknownType(s) => format!("Unknown variable type: {}", s),
            DiagnosticKind::UnknownStorageClass(s) => {
                format!("Expected 'uniform' or 'varying' but found {}", s)
            }
            DiagnosticKind::DuplicateVariable(s) => format!("Variable '{}' is declared twice", s),
            DiagnosticKind::InvalidArrayLength(s) => format!("Invalid array length: {}", s),

            DiagnosticKind::UnknownOpcode(s) => format!("Unknown opcode: {}", s),
            DiagnosticKind::MissingOperand { op, expected } => {
                format!("Opcode '{}' expects a {} operand", op, expected)
            }
            DiagnosticKind::InvalidOperand {
                op,
                expected,
                found,
            } => format!(
                "Opcode '{}' expects a {} operand but found {}",
                op, expected, found
            ),
            DiagnosticKind::UndefinedVariable(s) => format!("Undefined variable: {}", s),
            DiagnosticKind::ArrayRequired(s) => {
                format!("Indexed access needs an array variable, '{}' is not one", s)
            }
            DiagnosticKind::DuplicateLabel(id) => format!("Label {} is defined twice", id),
            DiagnosticKind::UndefinedLabel(id) => format!("Jump to undefined label {}", id),

            DiagnosticKind::Raw(s) => s.clone(),
        }
    }
}
