use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use slvm_core::{Color, Vec3};
use slvm_runtime::{ArgValue, GridEnv, Light, ShaderVm, VmConfig};

use crate::args::CliArgs;
use crate::commands::{input_path, load_or_exit, millis};

/// `set=` values: comma-separated numbers, otherwise a single string.
fn parse_value(text: &str) -> ArgValue {
    let floats: Result<Vec<f32>, _> = text.split(',').map(|s| s.trim().parse::<f32>()).collect();
    match floats {
        Ok(floats) => ArgValue::Floats(floats),
        Err(_) => ArgValue::Strings(vec![text.to_string()]),
    }
}

/// One dim ambient light and one distant light shining along +z, away from
/// the eye.
fn default_environment(args: &CliArgs) -> GridEnv {
    let (u, v) = args.grid;
    GridEnv::new(u, v)
        .with_light(Light::ambient(Color::WHITE, 0.1))
        .with_light(Light::distant(Vec3::new(0.0, 0.0, 1.0), Color::WHITE, 1.0))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

pub(crate) fn run(args: &CliArgs) {
    let path = input_path(args);
    let start = Instant::now();
    let program = load_or_exit(path);
    let load_time = start.elapsed();

    let config = VmConfig {
        strict_stack: !args.lenient,
        trace: args.trace,
    };
    let mut env = default_environment(args);
    let mut vm = ShaderVm::new(Arc::new(program)).with_config(config);
    vm.initialise(&mut env);

    let start = Instant::now();
    if let Err(e) = vm.execute_init() {
        fail(format!("ExecError: {e}"));
    }
    for (name, value) in &args.sets {
        if let Err(e) = vm.set_argument(name, &parse_value(value), None, &env) {
            eprintln!("{e}");
            std::process::exit(2);
        }
    }
    let init_time = start.elapsed();

    let start = Instant::now();
    let result = vm.execute(&mut env);
    let exec_time = start.elapsed();

    let mut out = std::io::stdout().lock();
    for line in env.output() {
        let _ = writeln!(out, "{line}");
    }
    if let Err(e) = result {
        fail(format!("ExecError: {e}"));
    }
    for decl in vm.program().locals.iter().filter(|d| d.output) {
        let Some(var) = vm.local(&decl.name) else { continue };
        if var.is_varying() {
            let _ = writeln!(out, "{} = {} ({} points)", decl.name, var.element_to_string(0), var.len());
        } else {
            let _ = writeln!(out, "{} = {}", decl.name, var.element_to_string(0));
        }
    }
    if args.timing {
        let _ = writeln!(
            out,
            "TIMING load={:.3}ms init={:.3}ms exec={:.3}ms",
            millis(load_time),
            millis(init_time),
            millis(exec_time),
        );
    }
}
