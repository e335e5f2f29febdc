//! Named, typed storage for shading values.

use crate::bitset::BitSet;
use crate::element::Element;
use crate::math::{Color, Matrix4, Vec3};
use crate::types::{Storage, VarClass, VarType};
use std::fmt::Write as _;
use thiserror::Error;

/// Element storage of a variable. Points, vectors and normals share `Triple`.
#[derive(Clone, Debug, PartialEq)]
pub enum ShaderData {
    Float(Vec<f32>),
    String(Vec<String>),
    Triple(Vec<Vec3>),
    Color(Vec<Color>),
    Matrix(Vec<Matrix4>),
}

impl Default for ShaderData {
    fn default() -> Self {
        ShaderData::Float(Vec::new())
    }
}

impl ShaderData {
    /// `len` default elements of the storage for `ty`. Matrices default to identity.
    pub fn filled(ty: VarType, len: usize) -> Self {
        match ty.storage() {
            Storage::Float => ShaderData::Float(vec![0.0; len]),
            Storage::String => ShaderData::String(vec![String::new(); len]),
            Storage::Triple => ShaderData::Triple(vec![Vec3::ZERO; len]),
            Storage::Color => ShaderData::Color(vec![Color::BLACK; len]),
            Storage::Matrix => ShaderData::Matrix(vec![Matrix4::IDENTITY; len]),
        }
    }

    pub fn storage(&self) -> Storage {
        match self {
            ShaderData::Float(_) => Storage::Float,
            ShaderData::String(_) => Storage::String,
            ShaderData::Triple(_) => Storage::Triple,
            ShaderData::Color(_) => Storage::Color,
            ShaderData::Matrix(_) => Storage::Matrix,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ShaderData::Float(v) => v.len(),
            ShaderData::String(v) => v.len(),
            ShaderData::Triple(v) => v.len(),
            ShaderData::Color(v) => v.len(),
            ShaderData::Matrix(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resize to `len`, filling new slots with a copy of the first element.
    pub fn resize(&mut self, len: usize) {
        fn fill<T: Clone + Default>(v: &mut Vec<T>, len: usize) {
            let first = v.first().cloned().unwrap_or_default();
            v.resize(len, first);
        }
        match self {
            ShaderData::Float(v) => fill(v, len),
            ShaderData::String(v) => fill(v, len),
            ShaderData::Triple(v) => fill(v, len),
            ShaderData::Color(v) => fill(v, len),
            ShaderData::Matrix(v) => fill(v, len),
        }
    }

    /// Copy `src` into the active points of `self`. `src` is broadcast when it
    /// holds a single element.
    fn copy_masked<T: Element>(&mut self, src: &ShaderData, mask: Option<&BitSet>) -> bool {
        let (Some(dst), Some(src)) = (T::vec_mut(self), T::slice(src)) else {
            return false;
        };
        let broadcast = src.len() == 1;
        for i in 0..dst.len() {
            if mask.is_some_and(|m| !m.get(i)) {
                continue;
            }
            let value = if broadcast { src.first() } else { src.get(i) };
            if let Some(value) = value {
                dst[i] = value.clone();
            }
        }
        true
    }
}

/// Recoverable assignment failure. The runtime logs it and skips the store.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("cannot assign {found} value to {expected} variable '{name}'")]
    TypeMismatch {
        name: String,
        expected: VarType,
        found: VarType,
    },
    #[error("cannot assign varying value to uniform variable '{name}'")]
    ClassMismatch { name: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShaderVariable {
    pub name: String,
    pub ty: VarType,
    pub class: VarClass,
    pub param: bool,
    pub output: bool,
    pub data: ShaderData,
}

impl ShaderVariable {
    /// A variable holding one default element. Varying variables grow on
    /// `initialise`.
    pub fn new(name: impl Into<String>, ty: VarType, class: VarClass) -> Self {
        Self {
            name: name.into(),
            ty,
            class,
            param: false,
            output: false,
            data: ShaderData::filled(ty, 1),
        }
    }

    pub fn uniform_float(name: impl Into<String>, value: f32) -> Self {
        let mut var = Self::new(name, VarType::Float, VarClass::Uniform);
        var.set_float(value, 0);
        var
    }

    pub fn varying_floats(name: impl Into<String>, values: &[f32]) -> Self {
        let mut var = Self::new(name, VarType::Float, VarClass::Varying);
        var.data = ShaderData::Float(values.to_vec());
        var
    }

    pub fn with_param(mut self, param: bool) -> Self {
        self.param = param;
        self
    }

    pub fn with_output(mut self, output: bool) -> Self {
        self.output = output;
        self
    }

    pub fn is_varying(&self) -> bool {
        self.class.is_varying()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size varying storage for a grid of `size` points. New slots copy the
    /// first element; uniform variables keep their single value.
    pub fn initialise(&mut self, size: usize) {
        if self.is_varying() {
            self.data.resize(size.max(1));
        }
    }

    /// Replace type, class and length in place, reusing the allocation when
    /// the storage matches.
    pub fn reshape(&mut self, ty: VarType, class: VarClass, len: usize) {
        if self.data.storage() != ty.storage() {
            self.data = ShaderData::filled(ty, len);
        } else {
            self.data.resize(len);
        }
        self.ty = ty;
        self.class = class;
    }

    #[inline]
    fn slot(&self, index: usize) -> usize {
        if self.is_varying() { index } else { 0 }
    }

    pub fn get_float(&self, index: usize) -> f32 {
        self.get::<f32>(index)
    }

    pub fn get_triple(&self, index: usize) -> Vec3 {
        self.get::<Vec3>(index)
    }

    pub fn get_color(&self, index: usize) -> Color {
        self.get::<Color>(index)
    }

    pub fn get_matrix(&self, index: usize) -> Matrix4 {
        self.get::<Matrix4>(index)
    }

    pub fn get_string(&self, index: usize) -> &str {
        match &self.data {
            ShaderData::String(v) => v.get(self.slot(index)).map_or("", String::as_str),
            _ => "",
        }
    }

    /// Element at `index`; default when out of range or the storage differs.
    pub fn get<T: Element>(&self, index: usize) -> T {
        T::slice(&self.data)
            .and_then(|v| v.get(self.slot(index)))
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_float(&mut self, value: f32, index: usize) {
        self.set(value, index);
    }

    pub fn set_triple(&mut self, value: Vec3, index: usize) {
        self.set(value, index);
    }

    pub fn set_color(&mut self, value: Color, index: usize) {
        self.set(value, index);
    }

    pub fn set_matrix(&mut self, value: Matrix4, index: usize) {
        self.set(value, index);
    }

    pub fn set_string(&mut self, value: impl Into<String>, index: usize) {
        self.set(value.into(), index);
    }

    /// Store `value` at `index`. Writes outside the storage or of the wrong
    /// element type are ignored.
    pub fn set<T: Element>(&mut self, value: T, index: usize) {
        let slot = self.slot(index);
        if let Some(v) = T::vec_mut(&mut self.data).and_then(|v| v.get_mut(slot)) {
            *v = value;
        }
    }

    /// Assign `src` at the active points of `mask`.
    ///
    /// Uniform destinations take the single source value regardless of the
    /// mask; a uniform source broadcasts across a varying destination.
    pub fn set_value_from(&mut self, src: &ShaderVariable, mask: &BitSet) -> Result<(), AssignError> {
        if self.ty.storage() != src.ty.storage() {
            return Err(AssignError::TypeMismatch {
                name: self.name.clone(),
                expected: self.ty,
                found: src.ty,
            });
        }
        if !self.is_varying() && src.is_varying() {
            return Err(AssignError::ClassMismatch {
                name: self.name.clone(),
            });
        }
        let mask = if self.is_varying() { Some(mask) } else { None };
        self.copy_from_data(&src.data, mask);
        Ok(())
    }

    /// Unmasked copy of every element of `src`, taking over its length. Used
    /// to fill temporaries.
    pub fn copy_data_from(&mut self, src: &ShaderVariable) {
        if self.data.storage() == src.data.storage() {
            self.data.clone_from(&src.data);
        } else {
            self.data = src.data.clone();
        }
    }

    fn copy_from_data(&mut self, src: &ShaderData, mask: Option<&BitSet>) {
        match src.storage() {
            Storage::Float => self.data.copy_masked::<f32>(src, mask),
            Storage::String => self.data.copy_masked::<String>(src, mask),
            Storage::Triple => self.data.copy_masked::<Vec3>(src, mask),
            Storage::Color => self.data.copy_masked::<Color>(src, mask),
            Storage::Matrix => self.data.copy_masked::<Matrix4>(src, mask),
        };
    }

    /// Text rendering of the element at `index`, as used by `printf`.
    pub fn element_to_string(&self, index: usize) -> String {
        let mut out = String::new();
        let slot = self.slot(index);
        let _ = match &self.data {
            ShaderData::Float(v) => write!(out, "{}", v.get(slot).copied().unwrap_or_default()),
            ShaderData::String(v) => write!(out, "{}", v.get(slot).map_or("", String::as_str)),
            ShaderData::Triple(v) => write!(out, "{}", v.get(slot).copied().unwrap_or_default()),
            ShaderData::Color(v) => write!(out, "{}", v.get(slot).copied().unwrap_or_default()),
            ShaderData::Matrix(v) => write!(out, "{}", v.get(slot).copied().unwrap_or_default()),
        };
        out
    }
}

/// Fixed-length array local. Elements share the array's type and class.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableArray {
    pub name: String,
    pub ty: VarType,
    pub class: VarClass,
    pub param: bool,
    pub output: bool,
    pub elements: Vec<ShaderVariable>,
}

impl VariableArray {
    pub fn new(name: impl Into<String>, ty: VarType, class: VarClass, len: usize) -> Self {
        let name = name.into();
        let elements = (0..len)
            .map(|i| ShaderVariable::new(format!("{name}[{i}]"), ty, class))
            .collect();
        Self {
            name,
            ty,
            class,
            param: false,
            output: false,
            elements,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShaderVariable> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ShaderVariable> {
        self.elements.get_mut(index)
    }

    pub fn initialise(&mut self, size: usize) {
        for element in &mut self.elements {
            element.initialise(size);
        }
    }
}
