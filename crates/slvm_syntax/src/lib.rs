//! Shared syntax-level types for the shading VM toolchain.
//!
//! Spans, source text, diagnostics and the token kinds produced by `slvm_lexer`.
mod diagnostic;
mod loc;
mod render;
mod source;
mod span;
mod str_util;
mod token;
mod util;

pub use diagnostic::{Diagnostic, Severity, codes};
pub use loc::{DiagnosticKind, DiagnosticsFormatter};
pub use render::render_diagnostic;
pub use source::{SourceFile, SourceId, SourceText};
pub use span::{ByteIndex, Span};
pub use str_util::{unescape, unquote};
pub use token::{Token, TokenKind};
pub use util::{find_best_match, is_ident_continue, is_ident_start, levenshtein_distance};
