//! Arithmetic operations for the VM.
//!
//! This module contains:
//! - add, sub, mul, div over every operand shape
//! - dot and cross products
//! - negation

use super::promote::{lift1, lift2};
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use slvm_core::{Color, Matrix4, Storage, VarType, Vec3};
use slvm_ir::{ArithOp, Shape};

#[inline]
fn float_op(op: ArithOp, a: f32, b: f32) -> f32 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
    }
}

#[inline]
fn triple_op(op: ArithOp, a: Vec3, b: Vec3) -> Vec3 {
    a.zip(b, |x, y| float_op(op, x, y))
}

#[inline]
fn color_op(op: ArithOp, a: Color, b: Color) -> Color {
    a.zip(b, |x, y| float_op(op, x, y))
}

/// `mulmm` is the matrix product; `divmm` multiplies by the inverse of the
/// right operand, leaving the left one unchanged when that is singular.
fn matrix_op(op: ArithOp, a: &Matrix4, b: &Matrix4) -> Matrix4 {
    match op {
        ArithOp::Mul => *a * *b,
        ArithOp::Div => b.inverse().map_or(*a, |inv| *a * inv),
        ArithOp::Add | ArithOp::Sub => {
            let mut m = a.m;
            for (row, other) in m.iter_mut().zip(b.m.iter()) {
                for (x, y) in row.iter_mut().zip(other.iter()) {
                    *x = float_op(op, *x, *y);
                }
            }
            Matrix4::new(m)
        }
    }
}

impl ShaderVm {
    /// Execute `add`/`sub`/`mul`/`div` for one operand shape.
    pub(crate) fn op_arith(&mut self, op: ArithOp, shape: Shape) -> Result<(), ExecError> {
        let ids @ [a, b] = self.pop_args::<2>()?;
        let name = self.op;
        match shape {
            Shape::FF => self.produce(VarType::Float, &ids, |p, out, mask| {
                lift2::<f32, f32, f32>(name, p.get(a), p.get(b), out, mask, |x, y| float_op(op, *x, *y))
            }),
            Shape::TT(ty) => self.produce(ty, &ids, |p, out, mask| {
                lift2::<Vec3, Vec3, Vec3>(name, p.get(a), p.get(b), out, mask, |x, y| triple_op(op, *x, *y))
            }),
            Shape::CC => self.produce(VarType::Color, &ids, |p, out, mask| {
                lift2::<Color, Color, Color>(name, p.get(a), p.get(b), out, mask, |x, y| color_op(op, *x, *y))
            }),
            Shape::FT(ty) => self.produce(ty, &ids, |p, out, mask| {
                lift2::<f32, Vec3, Vec3>(name, p.get(a), p.get(b), out, mask, |x, y| {
                    triple_op(op, Vec3::splat(*x), *y)
                })
            }),
            Shape::TF(ty) => self.produce(ty, &ids, |p, out, mask| {
                lift2::<Vec3, f32, Vec3>(name, p.get(a), p.get(b), out, mask, |x, y| {
                    triple_op(op, *x, Vec3::splat(*y))
                })
            }),
            Shape::FC => self.produce(VarType::Color, &ids, |p, out, mask| {
                lift2::<f32, Color, Color>(name, p.get(a), p.get(b), out, mask, |x, y| {
                    color_op(op, Color::splat(*x), *y)
                })
            }),
            Shape::CF => self.produce(VarType::Color, &ids, |p, out, mask| {
                lift2::<Color, f32, Color>(name, p.get(a), p.get(b), out, mask, |x, y| {
                    color_op(op, *x, Color::splat(*y))
                })
            }),
            Shape::MM => self.produce(VarType::Matrix, &ids, |p, out, mask| {
                lift2::<Matrix4, Matrix4, Matrix4>(name, p.get(a), p.get(b), out, mask, |x, y| {
                    matrix_op(op, x, y)
                })
            }),
            Shape::SS => {
                let found = self.pools.get(a).ty;
                self.release_all(&ids);
                Err(ExecError::OperandType {
                    op: name,
                    expected: Storage::Float,
                    found,
                })
            }
        }
    }

    /// Execute `dot` - float result over any two triples.
    pub(crate) fn op_dot(&mut self) -> Result<(), ExecError> {
        let ids @ [a, b] = self.pop_args::<2>()?;
        let name = self.op;
        self.produce(VarType::Float, &ids, |p, out, mask| {
            lift2::<Vec3, Vec3, f32>(name, p.get(a), p.get(b), out, mask, |x, y| x.dot(*y))
        })
    }

    pub(crate) fn op_cross(&mut self, ty: VarType) -> Result<(), ExecError> {
        let ids @ [a, b] = self.pop_args::<2>()?;
        let name = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            lift2::<Vec3, Vec3, Vec3>(name, p.get(a), p.get(b), out, mask, |x, y| x.cross(*y))
        })
    }

    pub(crate) fn op_neg(&mut self, ty: VarType) -> Result<(), ExecError> {
        let ids @ [a] = self.pop_args::<1>()?;
        let name = self.op;
        self.produce(ty, &ids, |p, out, mask| match ty.storage() {
            Storage::Triple => lift1::<Vec3, Vec3>(name, p.get(a), out, mask, |v| -*v),
            Storage::Color => lift1::<Color, Color>(name, p.get(a), out, mask, |c| -*c),
            Storage::Matrix => lift1::<Matrix4, Matrix4>(name, p.get(a), out, mask, |m| m.map(|x| -x)),
            _ => lift1::<f32, f32>(name, p.get(a), out, mask, |x| -x),
        })
    }
}
