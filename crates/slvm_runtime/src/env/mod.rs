//! The execution environment seen by a running shader.
//!
//! A `ShadingEnvironment` owns the grid's standard variables and running-state
//! stack, resolves named coordinate systems, and services every opcode that
//! needs renderer data (derivatives, noise, lighting, texture lookups). The
//! VM pops the operands, allocates the result with the right type and class,
//! and passes both to the callback together with the active-point mask.
//!
//! Callbacks with a default implementation report through `report_error` and
//! leave zeros at the active points of the result.

mod grid;
mod lights;
mod noise;

pub use grid::GridEnv;
pub use lights::{Light, LightKind};

use crate::state::RunningStates;
use slvm_core::{BitSet, Color, Matrix4, ShaderData, ShaderVariable, Vec3};
use slvm_ir::StdVar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivKind {
    /// Derivative along the grid's u direction.
    Du,
    /// Derivative along the grid's v direction.
    Dv,
    /// Derivative of the value with respect to a denominator.
    Deriv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureKind {
    Texture,
    Environment,
    Shadow,
}

/// A texture-family request. `coords` holds the popped coordinate operands:
/// empty for `texture1` forms, `s t` for `texture2`, the direction for
/// environment lookups and the point for shadow lookups.
pub struct TextureLookup<'a> {
    pub kind: TextureKind,
    pub name: &'a ShaderVariable,
    pub channel: &'a ShaderVariable,
    pub coords: &'a [&'a ShaderVariable],
}

pub trait ShadingEnvironment {
    /// Micropolygons along u; the grid has `u_grid_res() + 1` points per row.
    fn u_grid_res(&self) -> usize;
    fn v_grid_res(&self) -> usize;

    fn grid_size(&self) -> usize {
        (self.u_grid_res() + 1) * (self.v_grid_res() + 1)
    }

    fn std_var(&self, var: StdVar) -> Option<&ShaderVariable>;
    fn std_var_mut(&mut self, var: StdVar) -> Option<&mut ShaderVariable>;

    fn states(&self) -> &RunningStates;
    fn states_mut(&mut self) -> &mut RunningStates;

    fn running_state(&self) -> &BitSet {
        self.states().running()
    }

    fn current_state(&self) -> &BitSet {
        self.states().current()
    }

    /// Matrix taking points in space `from` to space `to`, row-vector
    /// convention. `None` when either space is unknown.
    fn space_matrix(&self, from: &str, to: &str) -> Option<Matrix4>;

    fn report_error(&mut self, message: &str) {
        log::error!("{message}");
    }

    /// Output of `printf`.
    fn print(&mut self, text: &str) {
        log::info!("{text}");
    }

    fn derivative(
        &mut self,
        kind: DerivKind,
        value: &ShaderVariable,
        den: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let _ = (kind, value, den);
        self.unsupported("derivatives", result, mask);
    }

    fn noise(&mut self, cell: bool, args: &[&ShaderVariable], result: &mut ShaderVariable, mask: &BitSet) {
        let _ = (cell, args);
        self.unsupported("noise", result, mask);
    }

    fn random(&mut self, result: &mut ShaderVariable, mask: &BitSet) {
        self.unsupported("random", result, mask);
    }

    fn depth(&mut self, p: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let _ = p;
        self.unsupported("depth", result, mask);
    }

    fn calculate_normal(&mut self, p: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let _ = p;
        self.unsupported("calculatenormal", result, mask);
    }

    fn area(&mut self, p: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let _ = p;
        self.unsupported("area", result, mask);
    }

    fn ambient(&mut self, result: &mut ShaderVariable, mask: &BitSet) {
        self.unsupported("ambient", result, mask);
    }

    fn diffuse(&mut self, n: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let _ = n;
        self.unsupported("diffuse", result, mask);
    }

    fn specular(
        &mut self,
        n: &ShaderVariable,
        v: &ShaderVariable,
        roughness: &ShaderVariable,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let _ = (n, v, roughness);
        self.unsupported("specular", result, mask);
    }

    fn phong(
        &mut self,
        n: &ShaderVariable,
        v: &ShaderVariable,
        size: &ShaderVariable,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let _ = (n, v, size);
        self.unsupported("phong", result, mask);
    }

    fn texture(&mut self, lookup: &TextureLookup<'_>, result: &mut ShaderVariable, mask: &BitSet) {
        let _ = lookup;
        self.unsupported("texture lookups", result, mask);
    }

    fn trace(&mut self, p: &ShaderVariable, r: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let _ = (p, r);
        self.unsupported("trace", result, mask);
    }

    /// Fill `out` with the named attribute. `false` if unknown or of another type.
    fn attribute(&mut self, name: &str, out: &mut ShaderVariable) -> bool {
        let _ = (name, out);
        false
    }

    fn option(&mut self, name: &str, out: &mut ShaderVariable) -> bool {
        let _ = (name, out);
        false
    }

    fn invalidate_illuminance_cache(&mut self) {}

    /// Prepare light iteration for an illuminance loop at `p` (the standard
    /// `P` when `None`), restricted to lights matching `category`.
    fn validate_illuminance_cache(&mut self, p: Option<&ShaderVariable>, category: Option<&str>) {
        let _ = (p, category);
    }

    /// Rewind to the first light. `false` when there are none.
    fn init_illuminance(&mut self) -> bool {
        false
    }

    /// Move to the next light. `false` when exhausted.
    fn advance_illuminance(&mut self) -> bool {
        false
    }

    /// Evaluate the current light for the surface points `p`: sets `L` and
    /// `Cl` and writes 1 into `result` where the light falls inside the cone
    /// (`axis`, `angle`).
    fn illuminance(
        &mut self,
        category: Option<&str>,
        p: &ShaderVariable,
        axis: &ShaderVariable,
        angle: &ShaderVariable,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let _ = (category, p, axis, angle);
        self.unsupported("illuminance", result, mask);
    }

    /// Light-shader emission from `p` within the cone; sets `L`.
    fn illuminate(
        &mut self,
        p: &ShaderVariable,
        axis: Option<&ShaderVariable>,
        angle: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let _ = (p, axis, angle);
        self.unsupported("illuminate", result, mask);
    }

    /// Directional light-shader emission; sets `L`.
    fn solar(
        &mut self,
        axis: Option<&ShaderVariable>,
        angle: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let _ = (axis, angle);
        self.unsupported("solar", result, mask);
    }

    #[doc(hidden)]
    fn unsupported(&mut self, what: &str, result: &mut ShaderVariable, mask: &BitSet) {
        self.report_error(&format!("{what} not supported by this environment"));
        fill_zero(result, mask);
    }
}

/// Zero the active points of `var` (every point when uniform).
pub fn fill_zero(var: &mut ShaderVariable, mask: &BitSet) {
    fn zero<T: Clone>(v: &mut [T], value: T, varying: bool, mask: &BitSet) {
        if !varying {
            if let Some(first) = v.first_mut() {
                *first = value;
            }
            return;
        }
        for i in mask.iter_ones() {
            if let Some(slot) = v.get_mut(i) {
                *slot = value.clone();
            }
        }
    }
    let varying = var.is_varying();
    match &mut var.data {
        ShaderData::Float(v) => zero(v, 0.0, varying, mask),
        ShaderData::String(v) => zero(v, String::new(), varying, mask),
        ShaderData::Triple(v) => zero(v, Vec3::ZERO, varying, mask),
        ShaderData::Color(v) => zero(v, Color::BLACK, varying, mask),
        ShaderData::Matrix(v) => zero(v, Matrix4::diagonal(0.0), varying, mask),
    }
}
