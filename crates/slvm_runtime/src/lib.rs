//! Shading-language virtual machine.
//!
//! `ShaderVm` executes a loaded `slvm_ir::Program` over a grid of shading
//! points supplied by a `ShadingEnvironment`. `GridEnv` is a self-contained
//! environment for running shaders without a renderer.

pub mod color;
pub mod config;
pub mod env;
pub mod errors;
mod locals;
mod pools;
pub mod state;
pub mod vm;

pub use config::VmConfig;
pub use env::{DerivKind, GridEnv, Light, LightKind, ShadingEnvironment, TextureKind, TextureLookup};
pub use errors::ExecError;
pub use state::RunningStates;
pub use vm::{ArgValue, ShaderVm};
