//! Stack manipulation, variable access and type construction.

use super::helpers::{copy_point, read_var, write_var};
use super::promote::{lift1, lift3, lift_many};
use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use crate::pools::SlotId;
use crate::vm::ShaderVm;
use slvm_core::{Color, Element, Matrix4, ShaderVariable, Storage, VarClass, VarType, VariableArray, Vec3};
use slvm_ir::{ProgramElement, VarRef};
use smallvec::SmallVec;

fn array_element(arr: &VariableArray, index: i64) -> Result<&ShaderVariable, ExecError> {
    usize::try_from(index)
        .ok()
        .and_then(|k| arr.get(k))
        .ok_or_else(|| ExecError::ArrayIndex {
            name: arr.name.clone(),
            index,
            len: arr.len(),
        })
}

fn check_index(arr: &VariableArray, index: i64) -> Result<usize, ExecError> {
    usize::try_from(index)
        .ok()
        .filter(|&k| k < arr.len())
        .ok_or_else(|| ExecError::ArrayIndex {
            name: arr.name.clone(),
            index,
            len: arr.len(),
        })
}

impl ShaderVm {
    pub(crate) fn op_dup(&mut self) -> Result<(), ExecError> {
        let top = self.stack.peek().ok_or_else(|| self.underflow())?;
        let (ty, class) = {
            let var = self.pools.get(top);
            (var.ty, var.class)
        };
        let id = self.pools.alloc(ty, class, self.grid_size);
        let mut copy = self.pools.take(id);
        copy.copy_data_from(self.pools.get(top));
        self.pools.restore(id, copy);
        self.stack.push(id);
        Ok(())
    }

    pub(crate) fn op_drop(&mut self) -> Result<(), ExecError> {
        let id = self.pop_one()?;
        self.pools.release(id);
        Ok(())
    }

    pub(crate) fn op_pushf(&mut self, operands: &[ProgramElement]) -> Result<(), ExecError> {
        let v = self.float_operand(operands, 0)?;
        self.push_uniform(VarType::Float, |var| var.set_float(v, 0));
        Ok(())
    }

    pub(crate) fn op_pushs(&mut self, operands: &[ProgramElement]) -> Result<(), ExecError> {
        let s = self.string_operand(operands, 0)?;
        self.push_uniform(VarType::String, |var| var.set_string(s, 0));
        Ok(())
    }

    pub(crate) fn op_puship(&mut self, operands: &[ProgramElement]) -> Result<(), ExecError> {
        let p = Vec3::new(
            self.float_operand(operands, 0)?,
            self.float_operand(operands, 1)?,
            self.float_operand(operands, 2)?,
        );
        self.push_uniform(VarType::Point, |var| var.set_triple(p, 0));
        Ok(())
    }

    pub(crate) fn op_pushv(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        operands: &[ProgramElement],
    ) -> Result<(), ExecError> {
        let r = self.var_operand(operands, 0)?;
        let var = read_var(&self.locals, &*env, r)?;
        let id = Self::push_copy_of(&mut self.pools, self.grid_size, var);
        self.stack.push(id);
        Ok(())
    }

    pub(crate) fn op_ipushv(
        &mut self,
        _env: &mut dyn ShadingEnvironment,
        operands: &[ProgramElement],
    ) -> Result<(), ExecError> {
        let r = self.var_operand(operands, 0)?;
        let index = self.pop_one()?;
        let result = self.ipushv(r, index);
        self.pools.release(index);
        result
    }

    fn ipushv(&mut self, r: VarRef, index: SlotId) -> Result<(), ExecError> {
        let arr = match r {
            VarRef::Local(idx) => self.locals.array(idx)?,
            VarRef::Std(var) => return Err(ExecError::NotAnArray(var.name().to_string())),
        };
        let idx_var = self.pools.get(index);
        if !idx_var.is_varying() {
            let element = array_element(arr, idx_var.get_float(0) as i64)?;
            let id = Self::push_copy_of(&mut self.pools, self.grid_size, element);
            self.stack.push(id);
            return Ok(());
        }
        let id = self.pools.alloc(arr.ty, VarClass::Varying, self.grid_size);
        let mut out = self.pools.take(id);
        let idx_var = self.pools.get(index);
        let mut result = Ok(());
        for i in self.mask.iter_ones() {
            match array_element(arr, idx_var.get_float(i) as i64) {
                Ok(element) => {
                    copy_point(&mut out, element, i);
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        self.pools.restore(id, out);
        match result {
            Ok(()) => self.stack.push(id),
            Err(_) => self.pools.release(id),
        }
        result
    }

    pub(crate) fn op_pop(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        operands: &[ProgramElement],
    ) -> Result<(), ExecError> {
        let r = self.var_operand(operands, 0)?;
        let id = self.pop_one()?;
        let result = write_var(&mut self.locals, env, r).map(|dest| {
            if let Err(e) = dest.set_value_from(self.pools.get(id), &self.mask) {
                log::warn!("{}: {e}", self.op);
            }
        });
        self.pools.release(id);
        result
    }

    /// Stack holds the value, then the index on top.
    pub(crate) fn op_ipop(
        &mut self,
        _env: &mut dyn ShadingEnvironment,
        operands: &[ProgramElement],
    ) -> Result<(), ExecError> {
        let r = self.var_operand(operands, 0)?;
        let [value, index] = self.pop_args::<2>()?;
        let result = self.ipop(r, value, index);
        self.release_all(&[value, index]);
        result
    }

    fn ipop(&mut self, r: VarRef, value: SlotId, index: SlotId) -> Result<(), ExecError> {
        let arr = match r {
            VarRef::Local(idx) => self.locals.array_mut(idx)?,
            VarRef::Std(var) => return Err(ExecError::NotAnArray(var.name().to_string())),
        };
        let src = self.pools.get(value);
        let idx_var = self.pools.get(index);
        if !idx_var.is_varying() {
            let k = check_index(arr, idx_var.get_float(0) as i64)?;
            if let Err(e) = arr.elements[k].set_value_from(src, &self.mask) {
                log::warn!("{}: {e}", self.op);
            }
            return Ok(());
        }
        if arr.ty.storage() != src.ty.storage() {
            log::warn!(
                "{}: cannot assign {} value to {} array '{}'",
                self.op,
                src.ty,
                arr.ty,
                arr.name
            );
            return Ok(());
        }
        if !arr.class.is_varying() {
            log::warn!("{}: varying index into uniform array '{}'", self.op, arr.name);
            return Ok(());
        }
        for i in self.mask.iter_ones() {
            let k = check_index(arr, idx_var.get_float(i) as i64)?;
            copy_point(&mut arr.elements[k], src, i);
        }
        Ok(())
    }

    /// `merge`: true value, false value, then the condition on top.
    pub(crate) fn op_merge(&mut self, ty: VarType) -> Result<(), ExecError> {
        match ty.storage() {
            Storage::Float => self.merge_as::<f32>(ty),
            Storage::String => self.merge_as::<String>(ty),
            Storage::Triple => self.merge_as::<Vec3>(ty),
            Storage::Color => self.merge_as::<Color>(ty),
            Storage::Matrix => self.merge_as::<Matrix4>(ty),
        }
    }

    fn merge_as<T: Element>(&mut self, ty: VarType) -> Result<(), ExecError> {
        let ids @ [t, f, cond] = self.pop_args::<3>()?;
        let op = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            lift3::<T, T, f32, T>(op, [p.get(t), p.get(f), p.get(cond)], out, mask, |a, b, c| {
                if *c != 0.0 { a.clone() } else { b.clone() }
            })
        })
    }

    pub(crate) fn op_build_triple(&mut self, ty: VarType) -> Result<(), ExecError> {
        let ids @ [x, y, z] = self.pop_args::<3>()?;
        let op = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            lift3::<f32, f32, f32, Vec3>(op, [p.get(x), p.get(y), p.get(z)], out, mask, |x, y, z| {
                Vec3::new(*x, *y, *z)
            })
        })
    }

    pub(crate) fn op_build_color(&mut self) -> Result<(), ExecError> {
        let ids @ [r, g, b] = self.pop_args::<3>()?;
        let op = self.op;
        self.produce(VarType::Color, &ids, |p, out, mask| {
            lift3::<f32, f32, f32, Color>(op, [p.get(r), p.get(g), p.get(b)], out, mask, |r, g, b| {
                Color::new(*r, *g, *b)
            })
        })
    }

    /// `settm`: sixteen floats in row-major order.
    pub(crate) fn op_build_matrix(&mut self) -> Result<(), ExecError> {
        let ids = self.pop_many(16)?;
        let op = self.op;
        self.produce(VarType::Matrix, &ids, |p, out, mask| {
            let args: SmallVec<[&ShaderVariable; 16]> = ids.iter().map(|&id| p.get(id)).collect();
            lift_many::<f32, Matrix4>(op, &args, out, mask, |v| {
                Matrix4::from_slice(v).unwrap_or(Matrix4::IDENTITY)
            })
        })
    }

    pub(crate) fn op_from_float(&mut self, ty: VarType) -> Result<(), ExecError> {
        let ids @ [a] = self.pop_args::<1>()?;
        let op = self.op;
        self.produce(ty, &ids, |p, out, mask| match ty.storage() {
            Storage::Triple => lift1::<f32, Vec3>(op, p.get(a), out, mask, |f| Vec3::splat(*f)),
            Storage::Color => lift1::<f32, Color>(op, p.get(a), out, mask, |f| Color::splat(*f)),
            Storage::Matrix => lift1::<f32, Matrix4>(op, p.get(a), out, mask, |f| Matrix4::diagonal(*f)),
            _ => lift1::<f32, f32>(op, p.get(a), out, mask, |f| *f),
        })
    }

    pub(crate) fn op_triple_to_color(&mut self) -> Result<(), ExecError> {
        let ids @ [a] = self.pop_args::<1>()?;
        let op = self.op;
        self.produce(VarType::Color, &ids, |p, out, mask| {
            lift1::<Vec3, Color>(op, p.get(a), out, mask, |v| Color::from_vec3(*v))
        })
    }

    pub(crate) fn op_color_to_triple(&mut self, ty: VarType) -> Result<(), ExecError> {
        let ids @ [a] = self.pop_args::<1>()?;
        let op = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            lift1::<Color, Vec3>(op, p.get(a), out, mask, |c| c.to_vec3())
        })
    }
}
