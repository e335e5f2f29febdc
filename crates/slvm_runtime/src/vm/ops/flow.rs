//! Masked control flow.
//!
//! This module contains:
//! - running-state stack operations (`RS_*`, `S_CLEAR`, `S_GET`)
//! - branches on the current or running mask (`S_JZ`, `S_JNZ`, `RS_JZ`, `RS_JNZ`)
//! - branches on a popped condition (`jz`, `jnz`) and `jmp`

use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use slvm_ir::{FlowOp, ProgramElement};

impl ShaderVm {
    /// Execute a flow opcode. Returns the jump target when the branch is taken.
    pub(crate) fn op_flow(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        f: FlowOp,
        operands: &[ProgramElement],
    ) -> Result<Option<usize>, ExecError> {
        let states = env.states_mut();
        match f {
            FlowOp::RsPush => states.push(),
            FlowOp::RsPop => {
                if !states.pop() {
                    return Err(ExecError::StateUnderflow {
                        op: self.op,
                        pc: self.op_pc,
                    });
                }
            }
            FlowOp::RsGet => states.get(),
            FlowOp::RsInverse => states.inverse(),
            FlowOp::SClear => states.clear_current(),
            FlowOp::SGet => {
                let id = self.pop_one()?;
                let cond = self.pools.get(id);
                env.states_mut().set_current(|i| cond.get_float(i) != 0.0);
                self.pools.release(id);
            }
            FlowOp::SJz => {
                let target = self.label_operand(operands, 0)?;
                return Ok(states.current().none().then_some(target));
            }
            FlowOp::SJnz => {
                let target = self.label_operand(operands, 0)?;
                return Ok(states.current().all().then_some(target));
            }
            FlowOp::RsJz => {
                let target = self.label_operand(operands, 0)?;
                return Ok(states.running().none().then_some(target));
            }
            FlowOp::RsJnz => {
                let target = self.label_operand(operands, 0)?;
                return Ok(states.running().all().then_some(target));
            }
            FlowOp::Jz | FlowOp::Jnz => {
                let target = self.label_operand(operands, 0)?;
                let id = self.pop_one()?;
                let cond = self.pools.get(id);
                let want = f == FlowOp::Jnz;
                // A varying condition branches only when every active point
                // agrees; with no active points only `jz` branches.
                let taken = if cond.is_varying() {
                    let mut active = self.mask.iter_ones().peekable();
                    if active.peek().is_none() {
                        !want
                    } else {
                        active.all(|i| (cond.get_float(i) != 0.0) == want)
                    }
                } else {
                    (cond.get_float(0) != 0.0) == want
                };
                self.pools.release(id);
                return Ok(taken.then_some(target));
            }
            FlowOp::Jmp => return self.label_operand(operands, 0).map(Some),
        }
        Ok(None)
    }
}
