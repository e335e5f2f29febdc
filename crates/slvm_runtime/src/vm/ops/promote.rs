//! Uniform/varying promotion.
//!
//! Every element-wise opcode funnels through these functions. The result
//! variable has already been allocated with the combined class of the
//! operands: when it is uniform every operand is uniform and the operator runs
//! once; otherwise it runs at each active point, reading uniform operands
//! through their single value. Inactive points of the result are not written.

use crate::errors::ExecError;
use slvm_core::{BitSet, Element, Operand, ShaderVariable};
use smallvec::SmallVec;

/// View `var` as an operand of element type `T`.
pub(crate) fn operand<'a, T: Element>(
    var: &'a ShaderVariable,
    op: &'static str,
) -> Result<Operand<'a, T>, ExecError> {
    Operand::of(var).ok_or(ExecError::OperandType {
        op,
        expected: T::STORAGE,
        found: var.ty,
    })
}

pub(crate) fn output<'a, R: Element>(out: &'a mut ShaderVariable, op: &'static str) -> Result<&'a mut Vec<R>, ExecError> {
    let found = out.ty;
    R::vec_mut(&mut out.data).ok_or(ExecError::OperandType {
        op,
        expected: R::STORAGE,
        found,
    })
}

/// Write `f(i)` at every active point of a varying result, or once at slot 0
/// of a uniform one.
pub(crate) fn write_points<R>(dst: &mut [R], varying: bool, mask: &BitSet, mut f: impl FnMut(usize) -> R) {
    if varying {
        for i in mask.iter_ones() {
            if let Some(d) = dst.get_mut(i) {
                *d = f(i);
            }
        }
    } else if let Some(d) = dst.first_mut() {
        *d = f(0);
    }
}

pub(crate) fn lift1<A: Element, R: Element>(
    op: &'static str,
    a: &ShaderVariable,
    out: &mut ShaderVariable,
    mask: &BitSet,
    f: impl Fn(&A) -> R,
) -> Result<(), ExecError> {
    let a = operand::<A>(a, op)?;
    let varying = out.is_varying();
    write_points(output::<R>(out, op)?, varying, mask, |i| f(a.at(i)));
    Ok(())
}

pub(crate) fn lift2<A: Element, B: Element, R: Element>(
    op: &'static str,
    a: &ShaderVariable,
    b: &ShaderVariable,
    out: &mut ShaderVariable,
    mask: &BitSet,
    f: impl Fn(&A, &B) -> R,
) -> Result<(), ExecError> {
    let a = operand::<A>(a, op)?;
    let b = operand::<B>(b, op)?;
    let varying = out.is_varying();
    write_points(output::<R>(out, op)?, varying, mask, |i| f(a.at(i), b.at(i)));
    Ok(())
}

pub(crate) fn lift3<A: Element, B: Element, C: Element, R: Element>(
    op: &'static str,
    [a, b, c]: [&ShaderVariable; 3],
    out: &mut ShaderVariable,
    mask: &BitSet,
    f: impl Fn(&A, &B, &C) -> R,
) -> Result<(), ExecError> {
    let a = operand::<A>(a, op)?;
    let b = operand::<B>(b, op)?;
    let c = operand::<C>(c, op)?;
    let varying = out.is_varying();
    write_points(output::<R>(out, op)?, varying, mask, |i| {
        f(a.at(i), b.at(i), c.at(i))
    });
    Ok(())
}

pub(crate) fn lift4<A: Element, B: Element, C: Element, D: Element, R: Element>(
    op: &'static str,
    [a, b, c, d]: [&ShaderVariable; 4],
    out: &mut ShaderVariable,
    mask: &BitSet,
    f: impl Fn(&A, &B, &C, &D) -> R,
) -> Result<(), ExecError> {
    let a = operand::<A>(a, op)?;
    let b = operand::<B>(b, op)?;
    let c = operand::<C>(c, op)?;
    let d = operand::<D>(d, op)?;
    let varying = out.is_varying();
    write_points(output::<R>(out, op)?, varying, mask, |i| {
        f(a.at(i), b.at(i), c.at(i), d.at(i))
    });
    Ok(())
}

/// Variable-count form: `f` receives the values of every operand at a point,
/// in push order.
pub(crate) fn lift_many<A: Element + Copy, R: Element>(
    op: &'static str,
    args: &[&ShaderVariable],
    out: &mut ShaderVariable,
    mask: &BitSet,
    f: impl Fn(&[A]) -> R,
) -> Result<(), ExecError> {
    let operands = args
        .iter()
        .map(|a| operand::<A>(a, op))
        .collect::<Result<SmallVec<[Operand<'_, A>; 16]>, _>>()?;
    let varying = out.is_varying();
    let mut values: SmallVec<[A; 16]> = SmallVec::with_capacity(operands.len());
    write_points(output::<R>(out, op)?, varying, mask, |i| {
        values.clear();
        values.extend(operands.iter().map(|o| *o.at(i)));
        f(&values)
    });
    Ok(())
}
