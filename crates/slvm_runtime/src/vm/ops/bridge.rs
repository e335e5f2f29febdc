//! Opcodes serviced by the shading environment.
//!
//! The VM pops the operands, allocates the result and hands both to the
//! matching `ShadingEnvironment` callback. Lighting, texture, random and
//! derivative results are always varying; the others take the combined class
//! of their operands.

use super::helpers::{read_var, truth, write_var};
use super::promote::lift1;
use crate::color;
use crate::env::{DerivKind, ShadingEnvironment, TextureKind, TextureLookup};
use crate::errors::ExecError;
use crate::pools::SlotId;
use crate::vm::ShaderVm;
use slvm_core::{BitSet, Color, Matrix4, ShaderVariable, VarClass, VarType, Vec3};
use slvm_ir::{BridgeFn, ProgramElement};
use smallvec::SmallVec;

fn apply_space(ty: VarType, m: &Matrix4, v: Vec3) -> Vec3 {
    match ty {
        VarType::Vector => m.transform_vector(v),
        VarType::Normal => m.transform_normal(v),
        _ => m.transform_point(v),
    }
}

impl ShaderVm {
    /// Allocate the result, view the popped operands in push order and run
    /// `f`. `varying` forces a varying result.
    pub(super) fn call_env(
        &mut self,
        ty: VarType,
        varying: bool,
        ids: &[SlotId],
        f: impl FnOnce(&[&ShaderVariable], &mut ShaderVariable, &BitSet) -> Result<(), ExecError>,
    ) -> Result<(), ExecError> {
        let class = if varying {
            VarClass::Varying
        } else {
            ids.iter().fold(VarClass::Uniform, |c, id| c.combine(id.class()))
        };
        self.produce_class(ty, class, ids, |p, out, mask| {
            let args: SmallVec<[&ShaderVariable; 4]> = ids.iter().map(|&id| p.get(id)).collect();
            f(&args, out, mask)
        })
    }

    /// Leading uniform string operands, e.g. space or texture names.
    fn string_args<const N: usize>(&self, ids: &[SlotId]) -> [String; N] {
        std::array::from_fn(|k| {
            ids.get(k)
                .map(|&id| self.pools.get(id).get_string(0).to_owned())
                .unwrap_or_default()
        })
    }

    pub(crate) fn op_bridge(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        f: BridgeFn,
        operands: &[ProgramElement],
    ) -> Result<(), ExecError> {
        let name = self.op;
        match f {
            BridgeFn::Transform { ty, from } => {
                let ids = self.pop_many(if from { 3 } else { 2 })?;
                let (from_space, to_space) = if from {
                    let [a, b] = self.string_args::<2>(&ids);
                    (a, b)
                } else {
                    let [b] = self.string_args::<1>(&ids);
                    ("current".to_owned(), b)
                };
                let matrix = env.space_matrix(&from_space, &to_space);
                if matrix.is_none() {
                    env.report_error(&format!(
                        "{name}: cannot transform from '{from_space}' to '{to_space}'"
                    ));
                }
                self.call_env(ty, false, &ids, |a, out, mask| {
                    let value = a[a.len() - 1];
                    lift1::<Vec3, Vec3>(name, value, out, mask, |v| match &matrix {
                        Some(m) => apply_space(ty, m, *v),
                        None => *v,
                    })
                })
            }
            BridgeFn::CTransform { from } => {
                let ids = self.pop_many(if from { 3 } else { 2 })?;
                let (from_space, to_space) = if from {
                    let [a, b] = self.string_args::<2>(&ids);
                    (a, b)
                } else {
                    let [b] = self.string_args::<1>(&ids);
                    ("rgb".to_owned(), b)
                };
                let known = color::to_rgb(&from_space, Color::BLACK).is_some()
                    && color::from_rgb(&to_space, Color::BLACK).is_some();
                if !known {
                    env.report_error(&format!(
                        "{name}: unknown color space '{from_space}' or '{to_space}'"
                    ));
                }
                self.call_env(VarType::Color, false, &ids, |a, out, mask| {
                    let value = a[a.len() - 1];
                    lift1::<Color, Color>(name, value, out, mask, |c| {
                        color::to_rgb(&from_space, *c)
                            .and_then(|rgb| color::from_rgb(&to_space, rgb))
                            .unwrap_or(*c)
                    })
                })
            }
            BridgeFn::Depth => {
                let ids = self.pop_args::<1>()?;
                self.call_env(VarType::Float, false, &ids, |a, out, mask| {
                    env.depth(a[0], out, mask);
                    Ok(())
                })
            }
            BridgeFn::CalculateNormal => {
                let ids = self.pop_args::<1>()?;
                self.call_env(VarType::Normal, false, &ids, |a, out, mask| {
                    env.calculate_normal(a[0], out, mask);
                    Ok(())
                })
            }
            BridgeFn::Area => {
                let ids = self.pop_args::<1>()?;
                self.call_env(VarType::Float, false, &ids, |a, out, mask| {
                    env.area(a[0], out, mask);
                    Ok(())
                })
            }
            BridgeFn::Du(ty) | BridgeFn::Dv(ty) => {
                let kind = if matches!(f, BridgeFn::Du(_)) { DerivKind::Du } else { DerivKind::Dv };
                let ids = self.pop_args::<1>()?;
                self.call_env(ty, true, &ids, |a, out, mask| {
                    env.derivative(kind, a[0], None, out, mask);
                    Ok(())
                })
            }
            BridgeFn::Deriv(ty) => {
                let ids = self.pop_args::<2>()?;
                self.call_env(ty, true, &ids, |a, out, mask| {
                    env.derivative(DerivKind::Deriv, a[0], Some(a[1]), out, mask);
                    Ok(())
                })
            }
            BridgeFn::Random(ty) => self.call_env(ty, true, &[], |_, out, mask| {
                env.random(out, mask);
                Ok(())
            }),
            BridgeFn::Noise { ty, dims } | BridgeFn::CellNoise { ty, dims } => {
                let cell = matches!(f, BridgeFn::CellNoise { .. });
                // 1: float, 2: two floats, 3: point, 4: point and float.
                let count = if dims % 2 == 0 { 2 } else { 1 };
                let ids = self.pop_many(count)?;
                self.call_env(ty, false, &ids, |a, out, mask| {
                    env.noise(cell, a, out, mask);
                    Ok(())
                })
            }
            BridgeFn::Ambient => self.call_env(VarType::Color, true, &[], |_, out, mask| {
                env.ambient(out, mask);
                Ok(())
            }),
            BridgeFn::Diffuse => {
                let ids = self.pop_args::<1>()?;
                self.call_env(VarType::Color, true, &ids, |a, out, mask| {
                    env.diffuse(a[0], out, mask);
                    Ok(())
                })
            }
            BridgeFn::Specular | BridgeFn::Phong => {
                let ids = self.pop_args::<3>()?;
                self.call_env(VarType::Color, true, &ids, |a, out, mask| {
                    if f == BridgeFn::Specular {
                        env.specular(a[0], a[1], a[2], out, mask);
                    } else {
                        env.phong(a[0], a[1], a[2], out, mask);
                    }
                    Ok(())
                })
            }
            BridgeFn::Texture { ty, two_coords } => {
                let ids = self.pop_many(if two_coords { 4 } else { 2 })?;
                self.texture_call(env, TextureKind::Texture, ty, &ids)
            }
            BridgeFn::Environment(ty) => {
                let ids = self.pop_many(3)?;
                self.texture_call(env, TextureKind::Environment, ty, &ids)
            }
            BridgeFn::Shadow => {
                let ids = self.pop_many(3)?;
                self.texture_call(env, TextureKind::Shadow, VarType::Float, &ids)
            }
            BridgeFn::Trace => {
                let ids = self.pop_args::<2>()?;
                self.call_env(VarType::Color, true, &ids, |a, out, mask| {
                    env.trace(a[0], a[1], out, mask);
                    Ok(())
                })
            }
            BridgeFn::Attribute | BridgeFn::Option => self.op_query(env, f == BridgeFn::Attribute, operands),
        }
    }

    /// Stack: map name, channel, then the coordinates.
    fn texture_call(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        kind: TextureKind,
        ty: VarType,
        ids: &[SlotId],
    ) -> Result<(), ExecError> {
        self.call_env(ty, true, ids, |a, out, mask| {
            let lookup = TextureLookup {
                kind,
                name: a[0],
                channel: a[1],
                coords: &a[2..],
            };
            env.texture(&lookup, out, mask);
            Ok(())
        })
    }

    /// `attribute`/`option`: pops the name, stores the value into the operand
    /// variable and pushes 1 if it was found.
    fn op_query(
        &mut self,
        env: &mut dyn ShadingEnvironment,
        attribute: bool,
        operands: &[ProgramElement],
    ) -> Result<(), ExecError> {
        let r = self.var_operand(operands, 0)?;
        let id = self.pop_one()?;
        let key = self.pools.get(id).get_string(0).to_owned();
        self.pools.release(id);
        let (ty, class) = {
            let dest = read_var(&self.locals, &*env, r)?;
            (dest.ty, dest.class)
        };
        let mut value = ShaderVariable::new(key.as_str(), ty, class);
        value.initialise(self.grid_size);
        let found = if attribute {
            env.attribute(&key, &mut value)
        } else {
            env.option(&key, &mut value)
        };
        if found {
            let dest = write_var(&mut self.locals, env, r)?;
            if let Err(e) = dest.set_value_from(&value, &self.mask) {
                log::warn!("{}: {e}", self.op);
            }
        }
        self.push_uniform(VarType::Float, |var| var.set_float(truth(found), 0));
        Ok(())
    }
}
