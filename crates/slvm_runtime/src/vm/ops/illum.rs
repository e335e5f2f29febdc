//! Illuminance loop protocol.
//!
//! A compiled `illuminance` statement runs `init_illuminance`, then loops:
//! `illuminance` leaves a varying condition that the loop body masks on, and
//! `advance_illuminance` moves to the next light until it pushes 0.

use super::helpers::truth;
use crate::env::ShadingEnvironment;
use crate::errors::ExecError;
use crate::vm::ShaderVm;
use slvm_core::VarType;
use slvm_ir::IllumFn;

impl ShaderVm {
    pub(crate) fn op_illum(&mut self, env: &mut dyn ShadingEnvironment, f: IllumFn) -> Result<(), ExecError> {
        match f {
            IllumFn::Init => {
                env.validate_illuminance_cache(None, None);
                let more = env.init_illuminance();
                self.push_uniform(VarType::Float, |var| var.set_float(truth(more), 0));
                Ok(())
            }
            IllumFn::InitCategory => {
                let id = self.pop_one()?;
                let category = self.pools.get(id).get_string(0).to_owned();
                self.pools.release(id);
                env.validate_illuminance_cache(None, Some(&category));
                let more = env.init_illuminance();
                self.push_uniform(VarType::Float, |var| var.set_float(truth(more), 0));
                Ok(())
            }
            IllumFn::Advance => {
                let more = env.advance_illuminance();
                self.push_uniform(VarType::Float, |var| var.set_float(truth(more), 0));
                Ok(())
            }
            IllumFn::Illuminance => {
                let ids = self.pop_args::<3>()?;
                self.call_env(VarType::Float, true, &ids, |a, out, mask| {
                    env.illuminance(None, a[0], a[1], a[2], out, mask);
                    Ok(())
                })
            }
            IllumFn::IlluminanceCategory => {
                let ids = self.pop_args::<4>()?;
                self.call_env(VarType::Float, true, &ids, |a, out, mask| {
                    let category = a[0].get_string(0);
                    env.illuminance(Some(category), a[1], a[2], a[3], out, mask);
                    Ok(())
                })
            }
            IllumFn::Illuminate => {
                let ids = self.pop_args::<3>()?;
                self.call_env(VarType::Float, true, &ids, |a, out, mask| {
                    env.illuminate(a[0], Some(a[1]), Some(a[2]), out, mask);
                    Ok(())
                })
            }
            IllumFn::IlluminateAll => {
                let ids = self.pop_args::<1>()?;
                self.call_env(VarType::Float, true, &ids, |a, out, mask| {
                    env.illuminate(a[0], None, None, out, mask);
                    Ok(())
                })
            }
            IllumFn::Solar => {
                let ids = self.pop_args::<2>()?;
                self.call_env(VarType::Float, true, &ids, |a, out, mask| {
                    env.solar(Some(a[0]), Some(a[1]), out, mask);
                    Ok(())
                })
            }
            IllumFn::SolarAll => self.call_env(VarType::Float, true, &[], |_, out, mask| {
                env.solar(None, None, out, mask);
                Ok(())
            }),
        }
    }
}
