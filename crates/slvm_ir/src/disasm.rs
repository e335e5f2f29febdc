use crate::program::{LocalDecl, Program, ProgramElement, Segment, VarRef};
use std::fmt::Write as _;

/// Render a program in the textual format the loader reads.
pub fn disassemble(program: &Program) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", program.kind);
    let _ = writeln!(out, "AQSIS_V {}", program.version);
    let _ = writeln!(out, "USES {}", program.uses.0);
    out.push_str("\nsegment Data\n");
    for decl in &program.locals {
        write_decl(&mut out, decl);
    }
    out.push_str("\nsegment Init\n");
    write_segment(&mut out, program, &program.init);
    out.push_str("\nsegment Code\n");
    write_segment(&mut out, program, &program.code);
    out
}

fn write_decl(out: &mut String, decl: &LocalDecl) {
    if decl.param {
        out.push_str("param ");
    }
    if decl.output {
        out.push_str("output ");
    }
    let _ = write!(out, "{} {} {}", decl.class, decl.ty, decl.name);
    if let Some(len) = decl.array_len {
        let _ = write!(out, "[{len}]");
    }
    out.push('\n');
}

fn write_segment(out: &mut String, program: &Program, segment: &Segment) {
    let mut line_open = false;
    for (pos, element) in segment.elements.iter().enumerate() {
        for label in segment.labels.iter().filter(|l| l.position == pos) {
            if line_open {
                out.push('\n');
                line_open = false;
            }
            let _ = writeln!(out, ":{}", label.id);
        }
        match element {
            ProgramElement::Op { name, .. } => {
                if line_open {
                    out.push('\n');
                }
                out.push('\t');
                out.push_str(name);
                line_open = true;
            }
            operand => {
                out.push(' ');
                write_operand(out, program, operand);
            }
        }
    }
    if line_open {
        out.push('\n');
    }
    let end = segment.elements.len();
    for label in segment.labels.iter().filter(|l| l.position == end) {
        let _ = writeln!(out, ":{}", label.id);
    }
}

fn write_operand(out: &mut String, program: &Program, element: &ProgramElement) {
    match element {
        ProgramElement::Float(v) => {
            let mut buf = ryu::Buffer::new();
            out.push_str(buf.format(*v));
        }
        ProgramElement::Str(s) => write_quoted(out, s),
        ProgramElement::Var(VarRef::Local(idx)) => match program.locals.get(*idx) {
            Some(decl) => out.push_str(&decl.name),
            None => {
                let _ = write!(out, "<local {idx}>");
            }
        },
        ProgramElement::Var(VarRef::Std(var)) => out.push_str(var.name()),
        ProgramElement::Label(label) => {
            let _ = write!(out, "{}", label.id);
        }
        ProgramElement::UnresolvedLabel(id) => {
            let _ = write!(out, "{id}");
        }
        ProgramElement::Op { name, .. } => out.push_str(name),
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}
