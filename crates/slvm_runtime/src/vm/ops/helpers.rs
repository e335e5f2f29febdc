//! Helper functions shared by the opcode handlers: operand tokens, stack
//! pops, result allocation and variable resolution.

use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use crate::locals::Locals;
use crate::pools::{SlotId, TempPools};
use crate::vm::ShaderVm;
use slvm_core::{BitSet, Color, Matrix4, ShaderData, ShaderVariable, Storage, VarClass, VarType, Vec3};
use slvm_ir::{ProgramElement, VarRef};

impl ShaderVm {
    pub(crate) fn underflow(&self) -> ExecError {
        ExecError::StackUnderflow {
            op: self.op,
            pc: self.op_pc,
        }
    }

    pub(crate) fn malformed(&self, expected: &'static str, found: &ProgramElement) -> ExecError {
        ExecError::MalformedElement {
            pc: self.op_pc,
            expected,
            found: found.describe(),
        }
    }

    fn operand_token<'a, T>(
        &self,
        operands: &'a [ProgramElement],
        k: usize,
        expected: &'static str,
        extract: impl Fn(&'a ProgramElement) -> Option<T>,
    ) -> Result<T, ExecError> {
        let element = operands.get(k).ok_or(ExecError::MalformedElement {
            pc: self.op_pc,
            expected,
            found: "end of segment",
        })?;
        extract(element).ok_or_else(|| self.malformed(expected, element))
    }

    pub(crate) fn float_operand(&self, operands: &[ProgramElement], k: usize) -> Result<f32, ExecError> {
        self.operand_token(operands, k, "float", |e| match e {
            ProgramElement::Float(v) => Some(*v),
            _ => None,
        })
    }

    pub(crate) fn string_operand<'a>(
        &self,
        operands: &'a [ProgramElement],
        k: usize,
    ) -> Result<&'a str, ExecError> {
        self.operand_token(operands, k, "string", |e| match e {
            ProgramElement::Str(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub(crate) fn var_operand(&self, operands: &[ProgramElement], k: usize) -> Result<VarRef, ExecError> {
        self.operand_token(operands, k, "variable", |e| match e {
            ProgramElement::Var(r) => Some(*r),
            _ => None,
        })
    }

    /// Jump target of a label operand.
    pub(crate) fn label_operand(&self, operands: &[ProgramElement], k: usize) -> Result<usize, ExecError> {
        match operands.get(k) {
            Some(ProgramElement::Label(label)) => Ok(label.position),
            Some(ProgramElement::UnresolvedLabel(id)) => Err(ExecError::UnresolvedLabel {
                id: *id,
                pc: self.op_pc,
            }),
            Some(other) => Err(self.malformed("label", other)),
            None => Err(ExecError::MalformedElement {
                pc: self.op_pc,
                expected: "label",
                found: "end of segment",
            }),
        }
    }

    /// Pop the top `N` entries, returned in push order.
    #[inline]
    pub(crate) fn pop_args<const N: usize>(&mut self) -> Result<[SlotId; N], ExecError> {
        self.stack.pop_n::<N>().ok_or_else(|| self.underflow())
    }

    #[inline]
    pub(crate) fn pop_one(&mut self) -> Result<SlotId, ExecError> {
        self.stack.pop().map(|(id, _)| id).ok_or_else(|| self.underflow())
    }

    pub(crate) fn pop_many(&mut self, n: usize) -> Result<Vec<SlotId>, ExecError> {
        self.stack.pop_many(n).ok_or_else(|| self.underflow())
    }

    /// Pop the operand count pushed on top of a variable-count opcode. A
    /// count deeper than the remaining stack is an underflow.
    pub(crate) fn pop_count(&mut self) -> Result<usize, ExecError> {
        let id = self.pop_one()?;
        let var = self.pools.get(id);
        let count = match var.data {
            ShaderData::Float(_) => Ok(var.get_float(0).max(0.0) as usize),
            _ => Err(ExecError::OperandType {
                op: self.op,
                expected: Storage::Float,
                found: var.ty,
            }),
        };
        self.pools.release(id);
        let count = count?;
        if count > self.stack.len() {
            return Err(self.underflow());
        }
        Ok(count)
    }

    pub(crate) fn release_all(&mut self, ids: &[SlotId]) {
        for &id in ids {
            self.pools.release(id);
        }
    }

    /// Allocate a result of `ty` whose class combines those of `args`, fill
    /// it, release `args` and push the result.
    pub(crate) fn produce(
        &mut self,
        ty: VarType,
        args: &[SlotId],
        fill: impl FnOnce(&TempPools, &mut ShaderVariable, &BitSet) -> Result<(), ExecError>,
    ) -> Result<(), ExecError> {
        let class = args
            .iter()
            .fold(VarClass::Uniform, |c, id| c.combine(id.class()));
        self.produce_class(ty, class, args, fill)
    }

    pub(crate) fn produce_class(
        &mut self,
        ty: VarType,
        class: VarClass,
        args: &[SlotId],
        fill: impl FnOnce(&TempPools, &mut ShaderVariable, &BitSet) -> Result<(), ExecError>,
    ) -> Result<(), ExecError> {
        let id = self.pools.alloc(ty, class, self.grid_size);
        let mut out = self.pools.take(id);
        let result = fill(&self.pools, &mut out, &self.mask);
        self.pools.restore(id, out);
        self.release_all(args);
        match result {
            Ok(()) => {
                self.stack.push(id);
                Ok(())
            }
            Err(e) => {
                self.pools.release(id);
                Err(e)
            }
        }
    }

    /// Push a uniform constant.
    pub(crate) fn push_uniform(&mut self, ty: VarType, set: impl FnOnce(&mut ShaderVariable)) {
        let id = self.pools.alloc(ty, VarClass::Uniform, self.grid_size);
        set(self.pools.get_mut(id));
        self.stack.push(id);
    }

    /// Push a copy of `var`, resized to the grid when varying.
    pub(crate) fn push_copy_of(pools: &mut TempPools, grid_size: usize, var: &ShaderVariable) -> SlotId {
        let id = pools.alloc(var.ty, var.class, grid_size);
        let slot = pools.get_mut(id);
        slot.copy_data_from(var);
        if slot.is_varying() && slot.len() != grid_size {
            slot.data.resize(grid_size);
        }
        id
    }
}

/// Borrow the variable named by `r`. Arrays need an index.
pub(crate) fn read_var<'a>(
    locals: &'a Locals,
    env: &'a dyn ShadingEnvironment,
    r: VarRef,
) -> Result<&'a ShaderVariable, ExecError> {
    match r {
        VarRef::Local(idx) => locals.scalar(idx),
        VarRef::Std(var) => env
            .std_var(var)
            .ok_or(ExecError::MissingStdVar(var.name())),
    }
}

pub(crate) fn write_var<'a>(
    locals: &'a mut Locals,
    env: &'a mut dyn ShadingEnvironment,
    r: VarRef,
) -> Result<&'a mut ShaderVariable, ExecError> {
    match r {
        VarRef::Local(idx) => locals.scalar_mut(idx),
        VarRef::Std(var) => env
            .std_var_mut(var)
            .ok_or(ExecError::MissingStdVar(var.name())),
    }
}

/// Copy the value of `src` at point `i` into `dst` at point `i`. `false` if
/// the storages differ.
pub(crate) fn copy_point(dst: &mut ShaderVariable, src: &ShaderVariable, i: usize) -> bool {
    if dst.data.storage() != src.data.storage() {
        return false;
    }
    match src.data.storage() {
        Storage::Float => dst.set(src.get::<f32>(i), i),
        Storage::String => dst.set(src.get::<String>(i), i),
        Storage::Triple => dst.set(src.get::<Vec3>(i), i),
        Storage::Color => dst.set(src.get::<Color>(i), i),
        Storage::Matrix => dst.set(src.get::<Matrix4>(i), i),
    }
    true
}

/// Boolean to the shading language's float truth value.
#[inline]
pub(crate) fn truth(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}
