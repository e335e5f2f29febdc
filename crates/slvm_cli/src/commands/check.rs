use slvm_ir::SegmentKind;

use crate::args::CliArgs;
use crate::commands::{input_path, load_or_exit};

pub(crate) fn run(args: &CliArgs) {
    let path = input_path(args);
    let program = load_or_exit(path);
    if args.verbose {
        println!(
            "{} shader: {} locals, {} init and {} code instructions",
            program.kind,
            program.locals.len(),
            program.segment(SegmentKind::Init).instruction_count(),
            program.segment(SegmentKind::Code).instruction_count(),
        );
        for p in program.params() {
            let output = if p.output { "output " } else { "" };
            match p.array_len {
                Some(len) => println!("  param {output}{} {} {}[{len}]", p.class, p.ty, p.name),
                None => println!("  param {output}{} {} {}", p.class, p.ty, p.name),
            }
        }
    }
}
