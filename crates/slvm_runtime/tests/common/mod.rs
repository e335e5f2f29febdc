#![allow(dead_code)]

use slvm_core::{Color, ShaderVariable, Vec3};
use slvm_runtime::{GridEnv, ShaderVm};

/// Wrap declarations and Code segment text in a surface shader.
pub fn program(decls: &str, code: &str) -> String {
    format!("surface\nAQSIS_V 1.8\nUSES 0\nsegment Data\n{decls}\nsegment Code\n{code}\n")
}

pub fn load(decls: &str, code: &str) -> ShaderVm {
    ShaderVm::load(&program(decls, code)).expect("program loads")
}

/// Load, bind to `env` and execute the Code segment.
pub fn run(decls: &str, code: &str, env: &mut GridEnv) -> ShaderVm {
    let mut vm = load(decls, code);
    vm.initialise(env);
    vm.execute(env).expect("program runs");
    vm
}

/// Run on a 2x2 grid (u = [0, 1, 0, 1], v = [0, 0, 1, 1]).
pub fn run_grid(decls: &str, code: &str) -> (ShaderVm, GridEnv) {
    let mut env = GridEnv::new(1, 1);
    let vm = run(decls, code, &mut env);
    (vm, env)
}

pub fn floats(var: &ShaderVariable) -> Vec<f32> {
    (0..var.len()).map(|i| var.get_float(i)).collect()
}

pub fn local_floats(vm: &ShaderVm, name: &str) -> Vec<f32> {
    floats(vm.local(name).expect("local exists"))
}

pub fn local_float(vm: &ShaderVm, name: &str) -> f32 {
    vm.local(name).expect("local exists").get_float(0)
}

pub fn local_triple(vm: &ShaderVm, name: &str, i: usize) -> Vec3 {
    vm.local(name).expect("local exists").get_triple(i)
}

pub fn local_color(vm: &ShaderVm, name: &str, i: usize) -> Color {
    vm.local(name).expect("local exists").get_color(i)
}

pub fn local_string(vm: &ShaderVm, name: &str) -> String {
    vm.local(name).expect("local exists").get_string(0).to_string()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

pub fn approx_vec(a: Vec3, b: Vec3) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
}
