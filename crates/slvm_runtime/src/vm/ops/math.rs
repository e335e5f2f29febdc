//! Math library opcodes.
//!
//! Scalar functions take float operands. The `p*` and `c*` families apply the
//! same operation per component to points and colors. Splines evaluate a
//! Catmull-Rom curve through a variable number of knots.

use super::promote::{lift1, lift2, lift3, operand, output, write_points};
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use slvm_core::{Color, Element, Operand, VarType, Vec3};
use slvm_ir::MathFn;
use smallvec::SmallVec;
use std::f32::consts::PI;
use std::ops::{Add, Mul};

fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Floored modulo; zero divisor gives zero.
fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 { 0.0 } else { a - b * (a / b).floor() }
}

fn smoothstep(min: f32, max: f32, x: f32) -> f32 {
    if x < min {
        0.0
    } else if x >= max {
        1.0
    } else {
        let t = (x - min) / (max - min);
        t * t * (3.0 - 2.0 * t)
    }
}

fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

fn clamp(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}

/// Catmull-Rom spline through `knots` at `t` in [0, 1]. The curve passes
/// through the interior knots; fewer than four knots yields the second knot.
pub(crate) fn spline<T>(t: f32, knots: &[T]) -> T
where
    T: Copy + Default + Add<Output = T> + Mul<f32, Output = T>,
{
    let n = knots.len();
    if n < 4 {
        return knots.get(1).or(knots.first()).copied().unwrap_or_default();
    }
    let x = t.clamp(0.0, 1.0) * (n - 3) as f32;
    let seg = (x.floor() as usize).min(n - 4);
    let u = x - seg as f32;
    let k = &knots[seg..seg + 4];
    let c3 = k[0] * -0.5 + k[1] * 1.5 + k[2] * -1.5 + k[3] * 0.5;
    let c2 = k[0] + k[1] * -2.5 + k[2] * 2.0 + k[3] * -0.5;
    let c1 = k[0] * -0.5 + k[2] * 0.5;
    let c0 = k[1];
    ((c3 * u + c2) * u + c1) * u + c0
}

impl ShaderVm {
    pub(crate) fn op_math(&mut self, f: MathFn) -> Result<(), ExecError> {
        match f {
            MathFn::Radians => self.unary(|x| x * PI / 180.0),
            MathFn::Degrees => self.unary(|x| x * 180.0 / PI),
            MathFn::Sin => self.unary(f32::sin),
            MathFn::Asin => self.unary(f32::asin),
            MathFn::Cos => self.unary(f32::cos),
            MathFn::Acos => self.unary(f32::acos),
            MathFn::Tan => self.unary(f32::tan),
            MathFn::Atan => self.unary(f32::atan),
            MathFn::Sinh => self.unary(f32::sinh),
            MathFn::Cosh => self.unary(f32::cosh),
            MathFn::Tanh => self.unary(f32::tanh),
            MathFn::Exp => self.unary(f32::exp),
            MathFn::Sqrt => self.unary(f32::sqrt),
            MathFn::InverseSqrt => self.unary(|x| 1.0 / x.sqrt()),
            MathFn::Log => self.unary(f32::ln),
            MathFn::Abs => self.unary(f32::abs),
            MathFn::Sign => self.unary(sign),
            MathFn::Floor => self.unary(f32::floor),
            MathFn::Ceil => self.unary(f32::ceil),
            MathFn::Round => self.unary(f32::round),
            MathFn::Atan2 => self.binary(f32::atan2),
            MathFn::LogB => self.binary(|x, base| x.ln() / base.ln()),
            MathFn::Pow => self.binary(f32::powf),
            MathFn::Mod => self.binary(fmod),
            MathFn::Min => self.binary(f32::min),
            MathFn::Max => self.binary(f32::max),
            MathFn::Step => self.binary(|min, x| if x < min { 0.0 } else { 1.0 }),
            MathFn::Clamp => self.ternary(clamp),
            MathFn::SmoothStep => self.ternary(smoothstep),
            MathFn::Mix => self.ternary(mix),
            MathFn::PMin => self.componentwise2::<Vec3>(VarType::Point, |a, b| a.zip(b, f32::min)),
            MathFn::PMax => self.componentwise2::<Vec3>(VarType::Point, |a, b| a.zip(b, f32::max)),
            MathFn::CMin => self.componentwise2::<Color>(VarType::Color, |a, b| a.zip(b, f32::min)),
            MathFn::CMax => self.componentwise2::<Color>(VarType::Color, |a, b| a.zip(b, f32::max)),
            MathFn::PClamp => self.componentwise3::<Vec3, Vec3>(VarType::Point, |x, lo, hi| {
                Vec3::new(clamp(x.x, lo.x, hi.x), clamp(x.y, lo.y, hi.y), clamp(x.z, lo.z, hi.z))
            }),
            MathFn::CClamp => self.componentwise3::<Color, Color>(VarType::Color, |x, lo, hi| {
                Color::new(clamp(x.r, lo.r, hi.r), clamp(x.g, lo.g, hi.g), clamp(x.b, lo.b, hi.b))
            }),
            MathFn::PMix => self.componentwise3::<Vec3, f32>(VarType::Point, |a, b, t| {
                a.zip(b, |x, y| mix(x, y, t))
            }),
            MathFn::CMix => self.componentwise3::<Color, f32>(VarType::Color, |a, b, t| {
                a.zip(b, |x, y| mix(x, y, t))
            }),
            MathFn::FSpline => self.op_spline::<f32>(VarType::Float),
            MathFn::CSpline => self.op_spline::<Color>(VarType::Color),
            MathFn::PSpline => self.op_spline::<Vec3>(VarType::Point),
        }
    }

    fn unary(&mut self, f: impl Fn(f32) -> f32) -> Result<(), ExecError> {
        let ids @ [a] = self.pop_args::<1>()?;
        let name = self.op;
        self.produce(VarType::Float, &ids, |p, out, mask| {
            lift1::<f32, f32>(name, p.get(a), out, mask, |x| f(*x))
        })
    }

    fn binary(&mut self, f: impl Fn(f32, f32) -> f32) -> Result<(), ExecError> {
        let ids @ [a, b] = self.pop_args::<2>()?;
        let name = self.op;
        self.produce(VarType::Float, &ids, |p, out, mask| {
            lift2::<f32, f32, f32>(name, p.get(a), p.get(b), out, mask, |x, y| f(*x, *y))
        })
    }

    fn ternary(&mut self, f: impl Fn(f32, f32, f32) -> f32) -> Result<(), ExecError> {
        let ids @ [a, b, c] = self.pop_args::<3>()?;
        let name = self.op;
        self.produce(VarType::Float, &ids, |p, out, mask| {
            lift3::<f32, f32, f32, f32>(name, [p.get(a), p.get(b), p.get(c)], out, mask, |x, y, z| {
                f(*x, *y, *z)
            })
        })
    }

    fn componentwise2<T: Element + Copy>(&mut self, ty: VarType, f: impl Fn(T, T) -> T) -> Result<(), ExecError> {
        let ids @ [a, b] = self.pop_args::<2>()?;
        let name = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            lift2::<T, T, T>(name, p.get(a), p.get(b), out, mask, |x, y| f(*x, *y))
        })
    }

    /// Two operands of type `T` and a third of type `C`.
    fn componentwise3<T: Element + Copy, C: Element + Copy>(
        &mut self,
        ty: VarType,
        f: impl Fn(T, T, C) -> T,
    ) -> Result<(), ExecError> {
        let ids @ [a, b, c] = self.pop_args::<3>()?;
        let name = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            lift3::<T, T, C, T>(name, [p.get(a), p.get(b), p.get(c)], out, mask, |x, y, z| f(*x, *y, *z))
        })
    }

    /// Stack: `t`, the knots, then the knot count on top.
    fn op_spline<T>(&mut self, ty: VarType) -> Result<(), ExecError>
    where
        T: Element + Copy + Add<Output = T> + Mul<f32, Output = T>,
    {
        let n = self.pop_count()?;
        let ids = self.pop_many(n + 1)?;
        if n < 4 {
            log::warn!("{}: needs at least 4 knots, got {n}", self.op);
        }
        let name = self.op;
        self.produce(ty, &ids, |p, out, mask| {
            let t = operand::<f32>(p.get(ids[0]), name)?;
            let knots = ids[1..]
                .iter()
                .map(|&id| operand::<T>(p.get(id), name))
                .collect::<Result<SmallVec<[Operand<'_, T>; 16]>, _>>()?;
            let varying = out.is_varying();
            let mut values: SmallVec<[T; 16]> = SmallVec::with_capacity(knots.len());
            write_points(output::<T>(out, name)?, varying, mask, |i| {
                values.clear();
                values.extend(knots.iter().map(|k| *k.at(i)));
                spline(*t.at(i), &values)
            });
            Ok(())
        })
    }
}
