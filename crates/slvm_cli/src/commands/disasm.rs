use std::io::Write;

use slvm_ir::disassemble;

use crate::args::CliArgs;
use crate::commands::{input_path, load_or_exit};

pub(crate) fn run(args: &CliArgs) {
    let path = input_path(args);
    let program = load_or_exit(path);
    let mut out = std::io::stdout().lock();
    if let Err(e) = write!(out, "{}", disassemble(&program)) {
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            return;
        }
        eprintln!("stdout error: {e}");
        std::process::exit(2);
    }
}
