//! Opcode handlers, grouped by concern. Each file adds methods to `ShaderVm`.

mod arith;
mod bridge;
mod compare;
mod data;
mod flow;
mod geom;
mod helpers;
mod illum;
mod math;
mod promote;
mod strings;
