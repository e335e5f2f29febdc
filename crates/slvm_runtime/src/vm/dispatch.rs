use super::ShaderVm;
use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use slvm_ir::{Opcode, ProgramElement};

impl ShaderVm {
    /// Execute one decoded instruction. Returns the jump target, if any.
    pub(super) fn dispatch(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        code: Opcode,
        operands: &[ProgramElement],
    ) -> Result<Option<usize>, ExecError> {
        match code {
            Opcode::Nop => {}
            Opcode::DebugBreak => log::debug!("debug_break at pc {}", self.op_pc),
            Opcode::Dup => self.op_dup()?,
            Opcode::Drop => self.op_drop()?,
            Opcode::PushF => self.op_pushf(operands)?,
            Opcode::PushS => self.op_pushs(operands)?,
            Opcode::PushP => self.op_puship(operands)?,
            Opcode::PushV => self.op_pushv(env, operands)?,
            Opcode::IPushV => self.op_ipushv(env, operands)?,
            Opcode::Pop => self.op_pop(env, operands)?,
            Opcode::IPop => self.op_ipop(env, operands)?,
            Opcode::Merge(ty) => self.op_merge(ty)?,
            Opcode::BuildTriple(ty) => self.op_build_triple(ty)?,
            Opcode::BuildColor => self.op_build_color()?,
            Opcode::BuildMatrix => self.op_build_matrix()?,
            Opcode::FromFloat(ty) => self.op_from_float(ty)?,
            Opcode::TripleToColor => self.op_triple_to_color()?,
            Opcode::ColorToTriple(ty) => self.op_color_to_triple(ty)?,
            Opcode::Arith(op, shape) => self.op_arith(op, shape)?,
            Opcode::Dot => self.op_dot()?,
            Opcode::Cross(ty) => self.op_cross(ty)?,
            Opcode::Neg(ty) => self.op_neg(ty)?,
            Opcode::Compare(op, shape) => self.op_compare(op, shape)?,
            Opcode::And | Opcode::Or | Opcode::Not => self.op_logic(code)?,
            Opcode::Math(f) => self.op_math(f)?,
            Opcode::Geom(f) => self.op_geom(env, f)?,
            Opcode::Str(f) => self.op_string(env, f)?,
            Opcode::Bridge(f) => self.op_bridge(env, f, operands)?,
            Opcode::Illum(f) => self.op_illum(env, f)?,
            Opcode::Flow(f) => return self.op_flow(env, f, operands),
        }
        Ok(None)
    }
}
