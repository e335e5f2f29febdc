use crate::{DiagnosticKind, DiagnosticsFormatter, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub code: Option<&'static str>,
    pub suggestion: Option<String>,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(severity: Severity, kind: &DiagnosticKind, span: Option<Span>) -> Self {
        Self {
            severity,
            message: DiagnosticsFormatter::format(kind),
            code: kind.code(),
            suggestion: None,
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            code: None,
            suggestion: None,
            span,
        }
    }

    pub fn error_kind(kind: &DiagnosticKind, span: Option<Span>) -> Self {
        Self::new(Severity::Error, kind, span)
    }

    pub fn warning(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message, span)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub mod codes {
    pub const LEX_ERROR: &str = "L0001";
    pub const MALFORMED_HEADER: &str = "L0002";
    pub const MALFORMED_DECLARATION: &str = "L0003";
    pub const UNKNOWN_OPCODE: &str = "L0004";
    pub const BAD_OPERAND: &str = "L0005";
    pub const UNDEFINED_VARIABLE: &str = "L0006";
    pub const UNDEFINED_LABEL: &str = "L0007";
    pub const DUPLICATE_DEFINITION: &str = "L0008";
}
