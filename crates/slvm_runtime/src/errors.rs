//! Fatal execution errors.
//!
//! These are contract violations of the program or the environment. Recoverable
//! conditions (assignment mismatches, failed external lookups) are logged and
//! execution continues.

use slvm_core::{Storage, VarType};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("stack underflow in '{op}' at pc {pc}")]
    StackUnderflow { op: &'static str, pc: usize },
    #[error("{depth} entries left on the stack at the end of the {segment} segment")]
    StackImbalance { segment: &'static str, depth: usize },
    #[error("{ty} temporaries: {now} in use after execution, {entry} before")]
    PoolImbalance { ty: String, entry: usize, now: usize },
    #[error("running-state stack underflow in '{op}' at pc {pc}")]
    StateUnderflow { op: &'static str, pc: usize },
    #[error("jump through unresolved label {id} at pc {pc}")]
    UnresolvedLabel { id: u32, pc: usize },
    #[error("malformed program at pc {pc}: expected {expected}, found {found}")]
    MalformedElement {
        pc: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("'{op}' expects a {expected:?} operand, found {found}")]
    OperandType {
        op: &'static str,
        expected: Storage,
        found: VarType,
    },
    #[error("pc {pc} is outside the {segment} segment (length {len})")]
    PcOutOfRange {
        segment: &'static str,
        pc: usize,
        len: usize,
    },
    #[error("index {index} is outside array '{name}' (length {len})")]
    ArrayIndex { name: String, index: i64, len: usize },
    #[error("'{0}' is an array and needs an index")]
    ArrayNeedsIndex(String),
    #[error("'{0}' is not an array")]
    NotAnArray(String),
    #[error("local variable {0} does not exist")]
    UnknownLocal(usize),
    #[error("standard variable {0} is not provided by the environment")]
    MissingStdVar(&'static str),
    #[error("shader has no parameter named '{0}'")]
    UnknownArgument(String),
    #[error("argument '{name}': {reason}")]
    BadArgument { name: String, reason: String },
}
