//! Program representation shared by the loader and the runtime.
//!
//! - `ShaderKind`, `StdVar`, `UsesMask` - header data
//! - `Opcode`, `OpInfo`, `OPCODES` - the opcode catalogue and mnemonic table
//! - `Program`, `Segment`, `ProgramElement` - the loaded program store
//! - `disassemble` - renders a program back to its textual form

mod disasm;
mod kind;
mod opcode;
mod program;
mod stdvar;
mod table;

pub use disasm::disassemble;
pub use kind::ShaderKind;
pub use opcode::{
    ArithOp, BridgeFn, CmpOp, FlowOp, GeomFn, IllumFn, MathFn, OpInfo, Opcode, OperandKind,
    Shape, StrFn,
};
pub use program::{Label, LocalDecl, Program, ProgramElement, Segment, SegmentKind, VarRef};
pub use stdvar::{StdVar, UsesMask};
pub use table::{OPCODES, lookup_opcode, mnemonics};
