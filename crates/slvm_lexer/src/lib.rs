//! slvm_lexer: tokenizer for compiled shader program text.
//!
//! Entry points: `Lexer::new(input).lex()` and `normalize_source`.
mod lexer;
mod normalize;

pub use lexer::{LexResult, Lexer};
pub use normalize::{NormalizedSource, normalize_source};
