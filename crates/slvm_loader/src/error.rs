use slvm_syntax::{Diagnostic, DiagnosticKind, Span};
use thiserror::Error;

/// A structured load failure. `line` and `col` are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{line}:{col}: {kind}")]
pub struct LoadError {
    pub kind: DiagnosticKind,
    pub token: String,
    pub span: Span,
    pub line: u32,
    pub col: u32,
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error_kind(&self.kind, Some(self.span));
        match &self.suggestion {
            Some(s) => diag.with_suggestion(format!("did you mean '{s}'?")),
            None => diag,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}
