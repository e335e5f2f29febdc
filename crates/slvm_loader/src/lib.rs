//! Program loader.
//!
//! Reads the textual program format (header, `Data`, `Init` and `Code`
//! segments) into a `slvm_ir::Program`. Labels are resolved in a second pass
//! once each segment is complete. Loading stops at the first error.

mod error;
mod loader;

pub use error::{LoadError, LoadFileError};
pub use loader::Loader;

use slvm_ir::Program;
use std::path::Path;

pub fn load_program(text: &str) -> Result<Program, LoadError> {
    Loader::new(text).load()
}

pub fn load_program_file(path: impl AsRef<Path>) -> Result<Program, LoadFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("loading program from {}", path.display());
    Ok(load_program(&text)?)
}
