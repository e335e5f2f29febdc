//! A standalone shading environment: a flat parametric patch in front of the
//! eye with an explicit light list.
//!
//! Grid point `(ui, vi)` lives at index `vi * (u_grid_res + 1) + ui`. The
//! patch spans `P = (u - 0.5, 0.5 - v, 1)` for `u, v` in [0, 1], so the
//! geometric normal `dPdu × dPdv` faces the eye at the origin.

use super::lights::Light;
use super::noise;
use super::{DerivKind, ShadingEnvironment, TextureKind, TextureLookup, fill_zero};
use crate::state::RunningStates;
use indexmap::IndexMap;
use slvm_core::{BitSet, Color, Element, Matrix4, Operand, ShaderData, ShaderVariable, Storage, Vec3};
use slvm_ir::StdVar;
use std::f32::consts::PI;
use std::ops::{Add, Mul, Sub};

pub struct GridEnv {
    ures: usize,
    vres: usize,
    vars: Vec<ShaderVariable>,
    states: RunningStates,
    spaces: IndexMap<String, Matrix4>,
    attributes: IndexMap<String, ShaderVariable>,
    options: IndexMap<String, ShaderVariable>,
    textures: IndexMap<String, Color>,
    lights: Vec<Light>,
    illum_cache: Vec<usize>,
    illum_cursor: usize,
    clipping: (f32, f32),
    rng: u64,
    output: Vec<String>,
    errors: Vec<String>,
}

impl GridEnv {
    pub fn new(u_grid_res: usize, v_grid_res: usize) -> Self {
        let size = (u_grid_res + 1) * (v_grid_res + 1);
        let mut spaces = IndexMap::new();
        for name in ["current", "camera", "world", "object", "shader"] {
            spaces.insert(name.to_string(), Matrix4::IDENTITY);
        }
        let mut env = Self {
            ures: u_grid_res,
            vres: v_grid_res,
            vars: StdVar::ALL
                .iter()
                .map(|&v| {
                    let mut var = ShaderVariable::new(v.name(), v.ty(), v.class());
                    var.initialise(size);
                    var
                })
                .collect(),
            states: RunningStates::new(size),
            spaces,
            attributes: IndexMap::new(),
            options: IndexMap::new(),
            textures: IndexMap::new(),
            lights: Vec::new(),
            illum_cache: Vec::new(),
            illum_cursor: 0,
            clipping: (0.0, 1.0),
            rng: 0x853c_49e6_748f_ea9b,
            output: Vec::new(),
            errors: Vec::new(),
        };
        env.fill_geometry();
        env
    }

    fn fill_geometry(&mut self) {
        let step = |res: usize| if res == 0 { 1.0 } else { 1.0 / res as f32 };
        let (du, dv) = (step(self.ures), step(self.vres));
        let row = self.ures + 1;
        let size = self.grid_size();
        for i in 0..size {
            let u = (i % row) as f32 * du;
            let v = (i / row) as f32 * dv;
            let u = if self.ures == 0 { 0.0 } else { u };
            let v = if self.vres == 0 { 0.0 } else { v };
            let p = Vec3::new(u - 0.5, 0.5 - v, 1.0);
            self.var_mut(StdVar::U).set_float(u, i);
            self.var_mut(StdVar::V).set_float(v, i);
            self.var_mut(StdVar::S).set_float(u, i);
            self.var_mut(StdVar::T).set_float(v, i);
            self.var_mut(StdVar::P).set_triple(p, i);
            self.var_mut(StdVar::Ps).set_triple(p, i);
            self.var_mut(StdVar::I).set_triple(p, i);
            self.var_mut(StdVar::DPdu).set_triple(Vec3::new(1.0, 0.0, 0.0), i);
            self.var_mut(StdVar::DPdv).set_triple(Vec3::new(0.0, -1.0, 0.0), i);
            for n in [StdVar::N, StdVar::Ng, StdVar::Ns] {
                self.var_mut(n).set_triple(Vec3::new(0.0, 0.0, -1.0), i);
            }
            self.var_mut(StdVar::Cs).set_color(Color::WHITE, i);
            self.var_mut(StdVar::Os).set_color(Color::WHITE, i);
            self.var_mut(StdVar::Alpha).set_float(1.0, i);
        }
        self.var_mut(StdVar::Du).set_float(du, 0);
        self.var_mut(StdVar::Dv).set_float(dv, 0);
        self.var_mut(StdVar::NComps).set_float(3.0, 0);
    }

    pub fn var(&self, var: StdVar) -> &ShaderVariable {
        &self.vars[var.index()]
    }

    pub fn var_mut(&mut self, var: StdVar) -> &mut ShaderVariable {
        &mut self.vars[var.index()]
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Register a coordinate system by its matrix into `"current"` space.
    pub fn set_space(&mut self, name: impl Into<String>, to_current: Matrix4) {
        self.spaces.insert(name.into(), to_current);
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: ShaderVariable) {
        self.attributes.insert(name.into(), value);
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: ShaderVariable) {
        self.options.insert(name.into(), value);
    }

    /// Constant-color map returned by texture, environment and shadow lookups
    /// of `name`.
    pub fn set_texture(&mut self, name: impl Into<String>, value: Color) {
        self.textures.insert(name.into(), value);
    }

    pub fn set_clipping(&mut self, near: f32, far: f32) {
        self.clipping = (near, far);
    }

    /// Lines written by `printf`.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Messages passed to `report_error`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    fn next_random(&mut self) -> f32 {
        self.rng = self
            .rng
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.rng >> 40) as f32 / (1u64 << 24) as f32
    }

    fn point(&self, i: usize) -> (usize, usize) {
        let row = self.ures + 1;
        (i % row, i / row)
    }

    // Forward difference along u or v, backward on the last row or column.
    fn difference<T>(&self, values: &[T], i: usize, along_u: bool) -> T
    where
        T: Element + Copy + Sub<Output = T> + Mul<f32, Output = T>,
    {
        let (ui, vi) = self.point(i);
        let (pos, res, stride) = if along_u {
            (ui, self.ures, 1)
        } else {
            (vi, self.vres, self.ures + 1)
        };
        if res == 0 {
            return T::default();
        }
        let scale = res as f32;
        let (a, b) = if pos < res { (i, i + stride) } else { (i - stride, i) };
        match (values.get(a), values.get(b)) {
            (Some(&a), Some(&b)) => (b - a) * scale,
            _ => T::default(),
        }
    }

    fn derive<T>(
        &self,
        kind: DerivKind,
        value: &ShaderVariable,
        den: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) where
        T: Element + Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T>,
    {
        fill_zero(result, mask);
        let Some(values) = T::slice(&value.data).filter(|_| value.is_varying()) else {
            return;
        };
        let den = den.and_then(|d| f32::slice(&d.data).filter(|_| d.is_varying()));
        for i in mask.iter_ones() {
            let v = match kind {
                DerivKind::Du => self.difference(values, i, true),
                DerivKind::Dv => self.difference(values, i, false),
                DerivKind::Deriv => {
                    let Some(den) = den else { continue };
                    let mut acc = T::default();
                    for along_u in [true, false] {
                        let d = self.difference(den, i, along_u);
                        if d != 0.0 {
                            acc = acc + self.difference(values, i, along_u) * (1.0 / d);
                        }
                    }
                    acc
                }
            };
            result.set(v, i);
        }
    }

    // Non-ambient lights at the illuminance cursor.
    fn current_light(&self) -> Option<&Light> {
        self.illum_cache
            .get(self.illum_cursor)
            .and_then(|&idx| self.lights.get(idx))
    }

    fn write_colors(&self, result: &mut ShaderVariable, mask: &BitSet, f: impl Fn(&Self, usize) -> Color) {
        for_each_point(result.is_varying(), mask, |i| {
            let c = f(self, i);
            result.set_color(c, i);
        });
    }

    fn lit_sum(&self, i: usize, term: impl Fn(Vec3, Color) -> Color) -> Color {
        let p = self.var(StdVar::P).get_triple(i);
        self.lights
            .iter()
            .filter(|l| !l.is_ambient())
            .fold(Color::BLACK, |acc, light| {
                let inc = light.incident(p);
                acc + term(-inc, light.radiance(inc))
            })
    }
}

fn for_each_point(varying: bool, mask: &BitSet, mut f: impl FnMut(usize)) {
    if varying {
        for i in mask.iter_ones() {
            f(i);
        }
    } else {
        f(0);
    }
}

fn inside_cone(axis: Vec3, angle: f32, l: Vec3) -> bool {
    if angle >= PI {
        return true;
    }
    let (a, l) = (axis.normalize(), l.normalize());
    a.dot(l) >= angle.cos()
}

fn triple_operand(var: &ShaderVariable) -> Option<Operand<'_, Vec3>> {
    Operand::of(var)
}

fn float_operand(var: &ShaderVariable) -> Option<Operand<'_, f32>> {
    Operand::of(var)
}

impl ShadingEnvironment for GridEnv {
    fn u_grid_res(&self) -> usize {
        self.ures
    }

    fn v_grid_res(&self) -> usize {
        self.vres
    }

    fn std_var(&self, var: StdVar) -> Option<&ShaderVariable> {
        self.vars.get(var.index())
    }

    fn std_var_mut(&mut self, var: StdVar) -> Option<&mut ShaderVariable> {
        self.vars.get_mut(var.index())
    }

    fn states(&self) -> &RunningStates {
        &self.states
    }

    fn states_mut(&mut self) -> &mut RunningStates {
        &mut self.states
    }

    fn space_matrix(&self, from: &str, to: &str) -> Option<Matrix4> {
        let from = self.spaces.get(from)?;
        let to = self.spaces.get(to)?.inverse()?;
        Some(*from * to)
    }

    fn report_error(&mut self, message: &str) {
        log::error!("{message}");
        self.errors.push(message.to_string());
    }

    fn print(&mut self, text: &str) {
        log::info!("{text}");
        self.output.push(text.to_string());
    }

    fn derivative(
        &mut self,
        kind: DerivKind,
        value: &ShaderVariable,
        den: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        match value.data {
            ShaderData::Float(_) => self.derive::<f32>(kind, value, den, result, mask),
            ShaderData::Triple(_) => self.derive::<Vec3>(kind, value, den, result, mask),
            ShaderData::Color(_) => self.derive::<Color>(kind, value, den, result, mask),
            _ => {
                self.report_error(&format!("cannot differentiate {} value", value.ty));
                fill_zero(result, mask);
            }
        }
    }

    fn noise(&mut self, cell: bool, args: &[&ShaderVariable], result: &mut ShaderVariable, mask: &BitSet) {
        let eval = if cell { noise::cellnoise } else { noise::noise };
        let storage = result.data.storage();
        for_each_point(result.is_varying(), mask, |i| {
            let mut coords = smallvec::SmallVec::<[f32; 4]>::new();
            for arg in args {
                match arg.data.storage() {
                    Storage::Triple => {
                        let p = arg.get_triple(i);
                        coords.extend([p.x, p.y, p.z]);
                    }
                    _ => coords.push(arg.get_float(i)),
                }
            }
            let channel = |c: usize| eval(&coords, c);
            match storage {
                Storage::Float => result.set_float(channel(0), i),
                Storage::Color => result.set_color(Color::new(channel(0), channel(1), channel(2)), i),
                _ => result.set_triple(Vec3::new(channel(0), channel(1), channel(2)), i),
            }
        });
    }

    fn random(&mut self, result: &mut ShaderVariable, mask: &BitSet) {
        let storage = result.data.storage();
        for_each_point(result.is_varying(), mask, |i| match storage {
            Storage::Float => {
                let x = self.next_random();
                result.set_float(x, i);
            }
            Storage::Color => {
                let c = Color::new(self.next_random(), self.next_random(), self.next_random());
                result.set_color(c, i);
            }
            _ => {
                let p = Vec3::new(self.next_random(), self.next_random(), self.next_random());
                result.set_triple(p, i);
            }
        });
    }

    fn depth(&mut self, p: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let (near, far) = self.clipping;
        let range = if far != near { far - near } else { 1.0 };
        for_each_point(result.is_varying(), mask, |i| {
            result.set_float((p.get_triple(i).z - near) / range, i);
        });
    }

    fn calculate_normal(&mut self, p: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let Some(values) = Vec3::slice(&p.data).filter(|_| p.is_varying()) else {
            fill_zero(result, mask);
            return;
        };
        for i in mask.iter_ones() {
            let n = self
                .difference(values, i, true)
                .cross(self.difference(values, i, false));
            result.set_triple(n, i);
        }
    }

    fn area(&mut self, p: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let Some(values) = Vec3::slice(&p.data).filter(|_| p.is_varying()) else {
            fill_zero(result, mask);
            return;
        };
        let du = self.var(StdVar::Du).get_float(0);
        let dv = self.var(StdVar::Dv).get_float(0);
        for i in mask.iter_ones() {
            let a = (self.difference(values, i, true) * du).cross(self.difference(values, i, false) * dv);
            result.set_float(a.length(), i);
        }
    }

    fn ambient(&mut self, result: &mut ShaderVariable, mask: &BitSet) {
        let total = self
            .lights
            .iter()
            .filter(|l| l.is_ambient())
            .fold(Color::BLACK, |acc, l| acc + l.color * l.intensity);
        self.write_colors(result, mask, |_, _| total);
    }

    fn diffuse(&mut self, n: &ShaderVariable, result: &mut ShaderVariable, mask: &BitSet) {
        let Some(n) = triple_operand(n) else {
            fill_zero(result, mask);
            return;
        };
        self.write_colors(result, mask, |env, i| {
            let nn = n.at(i).normalize();
            env.lit_sum(i, |l, cl| cl * nn.dot(l.normalize()).max(0.0))
        });
    }

    fn specular(
        &mut self,
        n: &ShaderVariable,
        v: &ShaderVariable,
        roughness: &ShaderVariable,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let (Some(n), Some(v), Some(r)) = (triple_operand(n), triple_operand(v), float_operand(roughness)) else {
            fill_zero(result, mask);
            return;
        };
        self.write_colors(result, mask, |env, i| {
            let nn = n.at(i).normalize();
            let vn = v.at(i).normalize();
            let exponent = 1.0 / r.at(i).max(1e-6);
            env.lit_sum(i, |l, cl| {
                let h = (l.normalize() + vn).normalize();
                cl * nn.dot(h).max(0.0).powf(exponent)
            })
        });
    }

    fn phong(
        &mut self,
        n: &ShaderVariable,
        v: &ShaderVariable,
        size: &ShaderVariable,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        let (Some(n), Some(v), Some(size)) = (triple_operand(n), triple_operand(v), float_operand(size)) else {
            fill_zero(result, mask);
            return;
        };
        self.write_colors(result, mask, |env, i| {
            let nn = n.at(i).normalize();
            let incident = -v.at(i).normalize();
            let r = incident - nn * (2.0 * nn.dot(incident));
            let exponent = *size.at(i);
            env.lit_sum(i, |l, cl| cl * r.dot(l.normalize()).max(0.0).powf(exponent))
        });
    }

    fn texture(&mut self, lookup: &TextureLookup<'_>, result: &mut ShaderVariable, mask: &BitSet) {
        let name = lookup.name.get_string(0);
        let Some(&map) = self.textures.get(name) else {
            // An unknown shadow map means unoccluded.
            if lookup.kind != TextureKind::Shadow {
                self.report_error(&format!("texture '{name}' not found"));
            }
            fill_zero(result, mask);
            return;
        };
        let channel = (lookup.channel.get_float(0).max(0.0) as usize).min(2);
        let storage = result.data.storage();
        for_each_point(result.is_varying(), mask, |i| match storage {
            Storage::Color => result.set_color(map, i),
            _ => result.set_float(map.get(channel), i),
        });
    }

    fn attribute(&mut self, name: &str, out: &mut ShaderVariable) -> bool {
        let Some(value) = self.attributes.get(name) else {
            return false;
        };
        out.set_value_from(value, &BitSet::new_full(out.len())).is_ok()
    }

    fn option(&mut self, name: &str, out: &mut ShaderVariable) -> bool {
        let Some(value) = self.options.get(name) else {
            return false;
        };
        out.set_value_from(value, &BitSet::new_full(out.len())).is_ok()
    }

    fn invalidate_illuminance_cache(&mut self) {
        self.illum_cache.clear();
        self.illum_cursor = 0;
    }

    fn validate_illuminance_cache(&mut self, _p: Option<&ShaderVariable>, category: Option<&str>) {
        self.illum_cache = self
            .lights
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_ambient())
            .filter(|(_, l)| category.is_none_or(|c| l.matches_category(c)))
            .map(|(idx, _)| idx)
            .collect();
        self.illum_cursor = 0;
    }

    fn init_illuminance(&mut self) -> bool {
        self.illum_cursor = 0;
        !self.illum_cache.is_empty()
    }

    fn advance_illuminance(&mut self) -> bool {
        self.illum_cursor += 1;
        self.illum_cursor < self.illum_cache.len()
    }

    fn illuminance(
        &mut self,
        _category: Option<&str>,
        p: &ShaderVariable,
        axis: &ShaderVariable,
        angle: &ShaderVariable,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        fill_zero(result, mask);
        let Some(light) = self.current_light().cloned() else {
            return;
        };
        for i in mask.iter_ones() {
            let inc = light.incident(p.get_triple(i));
            let l = -inc;
            self.var_mut(StdVar::L).set_triple(l, i);
            self.var_mut(StdVar::Cl).set_color(light.radiance(inc), i);
            let lit = inside_cone(axis.get_triple(i), angle.get_float(i), l);
            result.set_float(if lit { 1.0 } else { 0.0 }, i);
        }
    }

    fn illuminate(
        &mut self,
        p: &ShaderVariable,
        axis: Option<&ShaderVariable>,
        angle: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        fill_zero(result, mask);
        for i in mask.iter_ones() {
            let l = self.var(StdVar::Ps).get_triple(i) - p.get_triple(i);
            self.var_mut(StdVar::L).set_triple(l, i);
            let lit = match (axis, angle) {
                (Some(axis), Some(angle)) => inside_cone(axis.get_triple(i), angle.get_float(i), l),
                _ => true,
            };
            result.set_float(if lit { 1.0 } else { 0.0 }, i);
        }
    }

    fn solar(
        &mut self,
        axis: Option<&ShaderVariable>,
        _angle: Option<&ShaderVariable>,
        result: &mut ShaderVariable,
        mask: &BitSet,
    ) {
        fill_zero(result, mask);
        for i in mask.iter_ones() {
            if let Some(axis) = axis {
                self.var_mut(StdVar::L).set_triple(axis.get_triple(i), i);
            }
            result.set_float(1.0, i);
        }
    }
}
