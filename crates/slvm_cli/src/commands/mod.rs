use slvm_ir::Program;
use slvm_loader::{LoadFileError, load_program};
use slvm_syntax::{SourceFile, SourceId, render_diagnostic};

use crate::args::CliArgs;

pub(crate) mod check;
pub(crate) mod disasm;
pub(crate) mod run;

/// The single `<file>` argument, or exit 2.
pub(crate) fn input_path(args: &CliArgs) -> &str {
    match args.positional.as_slice() {
        [path] => path.as_str(),
        [] => {
            eprintln!("Missing <file>");
            std::process::exit(2);
        }
        _ => {
            eprintln!("Expected one <file>, got {}", args.positional.len());
            std::process::exit(2);
        }
    }
}

/// Load `path`, rendering the diagnostic and exiting on failure: 2 when the
/// file cannot be read, 1 when it does not load.
pub(crate) fn load_or_exit(path: &str) -> Program {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}", LoadFileError::Io { path: path.to_string(), source: e });
            std::process::exit(2);
        }
    };
    match load_program(&text) {
        Ok(program) => program,
        Err(e) => {
            let source = SourceFile::new(SourceId(0), path, text);
            eprintln!("{}", render_diagnostic(&source, &e.to_diagnostic()));
            std::process::exit(1);
        }
    }
}

pub(crate) fn millis(d: std::time::Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
