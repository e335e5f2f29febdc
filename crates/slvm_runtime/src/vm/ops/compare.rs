//! Comparison and logic operations. Results are floats, 1 for true.

use super::helpers::truth;
use super::promote::{lift1, lift2};
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use slvm_core::{Color, Element, Matrix4, Storage, VarType, Vec3};
use slvm_ir::{CmpOp, Opcode, Shape};

impl ShaderVm {
    pub(crate) fn op_compare(&mut self, op: CmpOp, shape: Shape) -> Result<(), ExecError> {
        match (op, shape) {
            (CmpOp::Eq | CmpOp::Ne, Shape::TT(_)) => self.equality::<Vec3>(op),
            (CmpOp::Eq | CmpOp::Ne, Shape::CC) => self.equality::<Color>(op),
            (CmpOp::Eq | CmpOp::Ne, Shape::SS) => self.equality::<String>(op),
            (CmpOp::Eq | CmpOp::Ne, Shape::MM) => self.equality::<Matrix4>(op),
            (_, Shape::FF) => {
                let ids @ [a, b] = self.pop_args::<2>()?;
                let name = self.op;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift2::<f32, f32, f32>(name, p.get(a), p.get(b), out, mask, |x, y| {
                        truth(match op {
                            CmpOp::Ls => x < y,
                            CmpOp::Gt => x > y,
                            CmpOp::Ge => x >= y,
                            CmpOp::Le => x <= y,
                            CmpOp::Eq => x == y,
                            CmpOp::Ne => x != y,
                        })
                    })
                })
            }
            _ => {
                let ids @ [a, _] = self.pop_args::<2>()?;
                let found = self.pools.get(a).ty;
                self.release_all(&ids);
                Err(ExecError::OperandType {
                    op: self.op,
                    expected: Storage::Float,
                    found,
                })
            }
        }
    }

    fn equality<T: Element + PartialEq>(&mut self, op: CmpOp) -> Result<(), ExecError> {
        let ids @ [a, b] = self.pop_args::<2>()?;
        let name = self.op;
        let want = op == CmpOp::Eq;
        self.produce(VarType::Float, &ids, |p, out, mask| {
            lift2::<T, T, f32>(name, p.get(a), p.get(b), out, mask, |x, y| truth((x == y) == want))
        })
    }

    /// Execute `land`, `lor` and `lnot`.
    pub(crate) fn op_logic(&mut self, code: Opcode) -> Result<(), ExecError> {
        let name = self.op;
        if code == Opcode::Not {
            let ids @ [a] = self.pop_args::<1>()?;
            return self.produce(VarType::Float, &ids, |p, out, mask| {
                lift1::<f32, f32>(name, p.get(a), out, mask, |x| truth(*x == 0.0))
            });
        }
        let ids @ [a, b] = self.pop_args::<2>()?;
        let and = code == Opcode::And;
        self.produce(VarType::Float, &ids, |p, out, mask| {
            lift2::<f32, f32, f32>(name, p.get(a), p.get(b), out, mask, |x, y| {
                let (x, y) = (*x != 0.0, *y != 0.0);
                truth(if and { x && y } else { x || y })
            })
        })
    }
}
