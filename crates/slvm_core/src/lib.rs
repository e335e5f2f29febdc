//! Core types for the shading VM.
//!
//! This crate contains the value model that is independent of bytecode and
//! execution:
//! - `Vec3`, `Color`, `Matrix4` - the math types shading programs compute with
//! - `BitSet` - per-grid-point masks
//! - `VarType`, `VarClass` - the type and uniform/varying class of a value
//! - `ShaderVariable`, `VariableArray` - named, typed, classed storage
//! - `Element`, `Operand` - typed views used by the promotion engine

pub mod bitset;
pub mod element;
pub mod math;
pub mod types;
pub mod variable;

pub use bitset::BitSet;
pub use element::{Element, Operand};
pub use math::{Color, Matrix4, Vec3};
pub use types::{Storage, VarClass, VarType};
pub use variable::{AssignError, ShaderData, ShaderVariable, VariableArray};

use ahash::RandomState;
use hashbrown::HashMap;
use std::hash::Hash;

pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

pub fn fast_hasher() -> RandomState {
    RandomState::with_seeds(0, 0, 0, 0)
}

pub fn fast_map_new<K: Eq + Hash, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(fast_hasher())
}
