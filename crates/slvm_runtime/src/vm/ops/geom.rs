//! Geometry and matrix opcodes.

use super::promote::{lift1, lift2, lift3, lift4};
use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use slvm_core::{Color, Matrix4, Storage, VarType, Vec3};
use slvm_ir::{GeomFn, StdVar};

fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - n * (2.0 * i.dot(n))
}

/// Zero when total internal reflection occurs.
fn refract(i: Vec3, n: Vec3, eta: f32) -> Vec3 {
    let idotn = i.dot(n);
    let k = 1.0 - eta * eta * (1.0 - idotn * idotn);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        i * eta - n * (eta * idotn + k.sqrt())
    }
}

fn faceforward(n: Vec3, i: Vec3, nref: Vec3) -> Vec3 {
    if i.dot(nref) > 0.0 { -n } else { n }
}

/// Distance from `q` to the segment `p0`-`p1`.
fn ptlined(p0: Vec3, p1: Vec3, q: Vec3) -> f32 {
    let d = p1 - p0;
    let len2 = d.dot(d);
    if len2 == 0.0 {
        return (q - p0).length();
    }
    let t = ((q - p0).dot(d) / len2).clamp(0.0, 1.0);
    (q - (p0 + d * t)).length()
}

#[inline]
fn component(i: f32) -> usize {
    (i.max(0.0) as usize).min(2)
}

impl ShaderVm {
    pub(crate) fn op_geom(&mut self, env: &mut dyn ShadingEnvironment, f: GeomFn) -> Result<(), ExecError> {
        let name = self.op;
        match f {
            GeomFn::XComp | GeomFn::YComp | GeomFn::ZComp => {
                let k = match f {
                    GeomFn::XComp => 0,
                    GeomFn::YComp => 1,
                    _ => 2,
                };
                let ids @ [a] = self.pop_args::<1>()?;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift1::<Vec3, f32>(name, p.get(a), out, mask, |v| v.get(k))
                })
            }
            GeomFn::SetXComp | GeomFn::SetYComp | GeomFn::SetZComp => {
                let k = match f {
                    GeomFn::SetXComp => 0,
                    GeomFn::SetYComp => 1,
                    _ => 2,
                };
                let ids @ [a, b] = self.pop_args::<2>()?;
                let ty = self.pools.get(a).ty;
                self.produce(ty, &ids, |p, out, mask| {
                    lift2::<Vec3, f32, Vec3>(name, p.get(a), p.get(b), out, mask, |v, x| v.with(k, *x))
                })
            }
            GeomFn::Comp => {
                let ids @ [a, i] = self.pop_args::<2>()?;
                let storage = self.pools.get(a).ty.storage();
                self.produce(VarType::Float, &ids, |p, out, mask| match storage {
                    Storage::Color => lift2::<Color, f32, f32>(name, p.get(a), p.get(i), out, mask, |c, i| {
                        c.get(component(*i))
                    }),
                    _ => lift2::<Vec3, f32, f32>(name, p.get(a), p.get(i), out, mask, |v, i| v.get(component(*i))),
                })
            }
            GeomFn::SetComp => {
                let ids @ [a, i, x] = self.pop_args::<3>()?;
                let ty = self.pools.get(a).ty;
                self.produce(ty, &ids, |p, out, mask| {
                    let args = [p.get(a), p.get(i), p.get(x)];
                    match ty.storage() {
                        Storage::Color => lift3::<Color, f32, f32, Color>(name, args, out, mask, |c, i, x| {
                            c.with(component(*i), *x)
                        }),
                        _ => lift3::<Vec3, f32, f32, Vec3>(name, args, out, mask, |v, i, x| v.with(component(*i), *x)),
                    }
                })
            }
            GeomFn::Length => {
                let ids @ [a] = self.pop_args::<1>()?;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift1::<Vec3, f32>(name, p.get(a), out, mask, |v| v.length())
                })
            }
            GeomFn::Distance => {
                let ids @ [a, b] = self.pop_args::<2>()?;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift2::<Vec3, Vec3, f32>(name, p.get(a), p.get(b), out, mask, |x, y| (*x - *y).length())
                })
            }
            GeomFn::Normalize => {
                let ids @ [a] = self.pop_args::<1>()?;
                let ty = self.pools.get(a).ty;
                self.produce(ty, &ids, |p, out, mask| {
                    lift1::<Vec3, Vec3>(name, p.get(a), out, mask, |v| v.normalize())
                })
            }
            GeomFn::FaceForward => {
                let ids @ [n, i] = self.pop_args::<2>()?;
                let ty = self.pools.get(n).ty;
                let ng = match env.std_var(StdVar::Ng) {
                    Some(ng) => ng,
                    None => {
                        self.release_all(&ids);
                        return Err(ExecError::MissingStdVar(StdVar::Ng.name()));
                    }
                };
                let class = ids
                    .iter()
                    .fold(ng.class, |c, id| c.combine(id.class()));
                self.produce_class(ty, class, &ids, |p, out, mask| {
                    lift3::<Vec3, Vec3, Vec3, Vec3>(name, [p.get(n), p.get(i), ng], out, mask, |n, i, r| {
                        faceforward(*n, *i, *r)
                    })
                })
            }
            GeomFn::FaceForward2 => {
                let ids @ [n, i, r] = self.pop_args::<3>()?;
                let ty = self.pools.get(n).ty;
                self.produce(ty, &ids, |p, out, mask| {
                    lift3::<Vec3, Vec3, Vec3, Vec3>(name, [p.get(n), p.get(i), p.get(r)], out, mask, |n, i, r| {
                        faceforward(*n, *i, *r)
                    })
                })
            }
            GeomFn::Reflect => {
                let ids @ [i, n] = self.pop_args::<2>()?;
                self.produce(VarType::Vector, &ids, |p, out, mask| {
                    lift2::<Vec3, Vec3, Vec3>(name, p.get(i), p.get(n), out, mask, |i, n| reflect(*i, *n))
                })
            }
            GeomFn::Refract => {
                let ids @ [i, n, eta] = self.pop_args::<3>()?;
                self.produce(VarType::Vector, &ids, |p, out, mask| {
                    lift3::<Vec3, Vec3, f32, Vec3>(name, [p.get(i), p.get(n), p.get(eta)], out, mask, |i, n, eta| {
                        refract(*i, *n, *eta)
                    })
                })
            }
            GeomFn::PtLineD => {
                let ids @ [p0, p1, q] = self.pop_args::<3>()?;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift3::<Vec3, Vec3, Vec3, f32>(name, [p.get(p0), p.get(p1), p.get(q)], out, mask, |a, b, q| {
                        ptlined(*a, *b, *q)
                    })
                })
            }
            GeomFn::MComp => {
                let ids @ [m, r, c] = self.pop_args::<3>()?;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift3::<Matrix4, f32, f32, f32>(name, [p.get(m), p.get(r), p.get(c)], out, mask, |m, r, c| {
                        m.get(*r as usize, *c as usize).unwrap_or(0.0)
                    })
                })
            }
            GeomFn::SetMComp => {
                let ids @ [m, r, c, x] = self.pop_args::<4>()?;
                self.produce(VarType::Matrix, &ids, |p, out, mask| {
                    let args = [p.get(m), p.get(r), p.get(c), p.get(x)];
                    lift4::<Matrix4, f32, f32, f32, Matrix4>(name, args, out, mask, |m, r, c, x| {
                        m.with(*r as usize, *c as usize, *x)
                    })
                })
            }
            GeomFn::Determinant => {
                let ids @ [m] = self.pop_args::<1>()?;
                self.produce(VarType::Float, &ids, |p, out, mask| {
                    lift1::<Matrix4, f32>(name, p.get(m), out, mask, |m| m.determinant())
                })
            }
            GeomFn::TransformM | GeomFn::VTransformM | GeomFn::NTransformM => {
                let ids @ [m, v] = self.pop_args::<2>()?;
                let ty = match f {
                    GeomFn::TransformM => VarType::Point,
                    GeomFn::VTransformM => VarType::Vector,
                    _ => VarType::Normal,
                };
                self.produce(ty, &ids, |p, out, mask| {
                    lift2::<Matrix4, Vec3, Vec3>(name, p.get(m), p.get(v), out, mask, |m, v| match ty {
                        VarType::Point => m.transform_point(*v),
                        VarType::Vector => m.transform_vector(*v),
                        _ => m.transform_normal(*v),
                    })
                })
            }
            GeomFn::Translate | GeomFn::Scale => {
                let ids @ [m, v] = self.pop_args::<2>()?;
                let translate = f == GeomFn::Translate;
                self.produce(VarType::Matrix, &ids, |p, out, mask| {
                    lift2::<Matrix4, Vec3, Matrix4>(name, p.get(m), p.get(v), out, mask, |m, v| {
                        let t = if translate { Matrix4::translation(*v) } else { Matrix4::scaling(*v) };
                        t * *m
                    })
                })
            }
            GeomFn::Rotate => {
                let ids @ [m, angle, axis] = self.pop_args::<3>()?;
                self.produce(VarType::Matrix, &ids, |p, out, mask| {
                    let args = [p.get(m), p.get(angle), p.get(axis)];
                    lift3::<Matrix4, f32, Vec3, Matrix4>(name, args, out, mask, |m, angle, axis| {
                        Matrix4::rotation(*angle, *axis) * *m
                    })
                })
            }
        }
    }
}
