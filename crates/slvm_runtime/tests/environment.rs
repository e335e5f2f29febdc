mod common;

use common::{approx, approx_vec, load, local_color, local_float, local_floats, local_string, local_triple, run, run_grid};
use slvm_core::{Color, Matrix4, ShaderVariable, VarClass, VarType, Vec3};
use slvm_ir::StdVar;
use slvm_runtime::{ArgValue, ExecError, GridEnv, Light, RunningStates, ShadingEnvironment};

fn uniform_float(value: f32) -> ShaderVariable {
    let mut var = ShaderVariable::new("", VarType::Float, VarClass::Uniform);
    var.set_float(value, 0);
    var
}

fn white_light(direction: Vec3) -> Light {
    Light::distant(direction, Color::WHITE, 1.0)
}

const COUNT_LIGHTS: &str = "pushif 0\npop count\n\
    init_illuminance\njz 2\n\
    :1\n\
    pushv count\npushif 1\naddff\npop count\n\
    advance_illuminance\njnz 1\n\
    :2";

#[test]
fn transform_into_a_named_space() {
    let mut env = GridEnv::new(1, 1);
    env.set_space("world", Matrix4::translation(Vec3::new(1.0, 2.0, 3.0)));
    let vm = run(
        "uniform point p\nuniform point q",
        "pushis \"world\"\npuship 1 1 1\ntransform\npop p\n\
         pushis \"world\"\npushis \"current\"\npuship 0 0 0\ntransforms\npop q",
        &mut env,
    );
    assert!(approx_vec(local_triple(&vm, "p", 0), Vec3::new(0.0, -1.0, -2.0)));
    assert!(approx_vec(local_triple(&vm, "q", 0), Vec3::new(1.0, 2.0, 3.0)));
    assert!(env.errors().is_empty());
}

#[test]
fn unknown_space_leaves_the_value_and_reports() {
    let (vm, env) = run_grid(
        "uniform point p",
        "pushis \"nowhere\"\npuship 1 2 3\ntransform\npop p",
    );
    assert!(approx_vec(local_triple(&vm, "p", 0), Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(env.errors().len(), 1);
}

#[test]
fn color_space_conversion() {
    let (vm, env) = run_grid(
        "uniform color hsv\nuniform color rgb",
        "pushis \"hsv\"\npushif 1\npushif 0\npushif 0\nsettc\nctransform\npop hsv\n\
         pushis \"hsv\"\npushis \"rgb\"\npushif 0\npushif 0\npushif 1\nsettc\nctransforms\npop rgb",
    );
    assert_eq!(local_color(&vm, "hsv", 0), Color::new(0.0, 1.0, 1.0));
    assert_eq!(local_color(&vm, "rgb", 0), Color::WHITE);
    assert!(env.errors().is_empty());
}

#[test]
fn illuminance_visits_non_ambient_lights() {
    let mut env = GridEnv::new(1, 1)
        .with_light(Light::ambient(Color::WHITE, 0.1))
        .with_light(white_light(Vec3::new(0.0, 0.0, 1.0)))
        .with_light(white_light(Vec3::new(1.0, 0.0, 1.0)));
    let vm = run("uniform float count", COUNT_LIGHTS, &mut env);
    assert_eq!(local_float(&vm, "count"), 2.0);
}

#[test]
fn illuminance_category_filters_lights() {
    let mut env = GridEnv::new(1, 1)
        .with_light(white_light(Vec3::new(0.0, 0.0, 1.0)).with_category("key"))
        .with_light(white_light(Vec3::new(0.0, 0.0, 1.0)).with_category("fill"));
    let code = COUNT_LIGHTS.replace("init_illuminance", "pushis \"-fill\"\ninit_illuminance2");
    let vm = run("uniform float count", &code, &mut env);
    assert_eq!(local_float(&vm, "count"), 1.0);
}

#[test]
fn illuminance_loop_accumulates_light_color() {
    let accumulate = |axis: &str, angle: f32| {
        let mut env = GridEnv::new(1, 1)
            .with_light(white_light(Vec3::new(0.0, 0.0, 1.0)))
            .with_light(white_light(Vec3::new(0.0, 0.0, 1.0)));
        let code = format!(
            "pushif 0\nsetfc\npop C\n\
             init_illuminance\njz 2\n\
             :1\n\
             pushv P\npuship {axis}\npushif {angle}\nilluminance\n\
             S_GET\nRS_PUSH\nRS_GET\n\
             pushv C\npushv Cl\naddcc\npop C\n\
             RS_POP\n\
             advance_illuminance\njnz 1\n\
             :2"
        );
        let vm = run("varying color C", &code, &mut env);
        (0..4).map(|i| local_color(&vm, "C", i)).collect::<Vec<_>>()
    };
    assert_eq!(accumulate("0 0 -1", 3.2), vec![Color::new(2.0, 2.0, 2.0); 4]);
    assert_eq!(accumulate("0 0 1", 0.1), vec![Color::BLACK; 4]);
}

#[test]
fn ambient_and_diffuse() {
    let mut env = GridEnv::new(1, 1)
        .with_light(Light::ambient(Color::new(0.1, 0.2, 0.3), 1.0))
        .with_light(white_light(Vec3::new(0.0, 0.0, 1.0)));
    let vm = run(
        "varying color a\nvarying color d",
        "ambient\npop a\npushv N\ndiffuse\npop d",
        &mut env,
    );
    for i in 0..4 {
        assert_eq!(local_color(&vm, "a", i), Color::new(0.1, 0.2, 0.3));
        let d = local_color(&vm, "d", i);
        assert!(approx(d.r, 1.0) && approx(d.g, 1.0) && approx(d.b, 1.0));
    }
}

#[test]
fn attribute_lookup_reports_whether_found() {
    let mut env = GridEnv::new(1, 1);
    env.set_attribute("user:id", uniform_float(7.0));
    let vm = run(
        "uniform float id\nuniform float found\nuniform float missing",
        "pushif 3\npop id\n\
         pushis \"user:id\"\nattribute id\npop found\n\
         pushis \"user:other\"\noption id\npop missing",
        &mut env,
    );
    assert_eq!(local_float(&vm, "id"), 7.0);
    assert_eq!(local_float(&vm, "found"), 1.0);
    assert_eq!(local_float(&vm, "missing"), 0.0);
}

#[test]
fn option_lookup_reads_the_option_table() {
    let mut env = GridEnv::new(1, 1);
    env.set_option("shadow:bias", uniform_float(0.25));
    let vm = run(
        "uniform float bias
uniform float found",
        "pushis \"shadow:bias\"\noption bias\npop found",
        &mut env,
    );
    assert_eq!(local_float(&vm, "bias"), 0.25);
    assert_eq!(local_float(&vm, "found"), 1.0);
}

#[test]
fn texture_lookups_read_the_map() {
    let mut env = GridEnv::new(1, 1);
    env.set_texture("grid", Color::new(0.2, 0.4, 0.6));
    let vm = run(
        "varying float f\nvarying float missing\nvarying float shadowed",
        "pushis \"grid\"\npushif 1\nftexture1\npop f\n\
         pushis \"nope\"\npushif 0\npushv s\npushv t\nftexture2\npop missing\n\
         pushis \"nomap\"\npushif 0\npushv P\nshadow\npop shadowed",
        &mut env,
    );
    assert_eq!(local_floats(&vm, "f"), vec![0.4; 4]);
    assert_eq!(local_floats(&vm, "missing"), vec![0.0; 4]);
    assert_eq!(local_floats(&vm, "shadowed"), vec![0.0; 4]);
    // Only the missing texture is an error.
    assert_eq!(env.errors().len(), 1);
}

#[test]
fn noise_is_bounded_and_cellnoise_is_piecewise_constant() {
    let (vm, _) = run_grid(
        "varying float n\nuniform float a\nuniform float b\nuniform float c",
        "pushv P\nfnoise3\npop n\n\
         pushif 0.2\nfcellnoise1\npop a\n\
         pushif 0.7\nfcellnoise1\npop b\n\
         pushif 1.2\nfcellnoise1\npop c",
    );
    assert!(local_floats(&vm, "n").iter().all(|n| (0.0..=1.0).contains(n)));
    assert_eq!(local_float(&vm, "a"), local_float(&vm, "b"));
    assert!((0.0..1.0).contains(&local_float(&vm, "c")));
}

#[test]
fn derivatives_follow_the_grid() {
    let (vm, _) = run_grid(
        "varying float du\nvarying float dv\nvarying float d",
        "pushv u\nfDu\npop du\npushv u\nfDv\npop dv\n\
         pushv u\npushif 3\nmulff\npushv u\nfDeriv\npop d",
    );
    assert_eq!(local_floats(&vm, "du"), vec![1.0; 4]);
    assert_eq!(local_floats(&vm, "dv"), vec![0.0; 4]);
    assert_eq!(local_floats(&vm, "d"), vec![3.0; 4]);
}

#[test]
fn random_and_depth() {
    let mut env = GridEnv::new(1, 1);
    env.set_clipping(0.0, 2.0);
    let vm = run(
        "varying float r\nvarying float z",
        "frandom\npop r\npushv P\ndepth\npop z",
        &mut env,
    );
    let r = local_floats(&vm, "r");
    assert!(r.iter().all(|x| (0.0..1.0).contains(x)));
    assert!(r.windows(2).any(|w| w[0] != w[1]));
    assert_eq!(local_floats(&vm, "z"), vec![0.5; 4]);
}

#[test]
fn set_argument_converts_spaces_and_arrays() {
    let mut env = GridEnv::new(1, 1);
    env.set_space("world", Matrix4::translation(Vec3::new(1.0, 2.0, 3.0)));
    let mut vm = load(
        "param uniform point from\nparam uniform color tint\nparam uniform string map\nparam uniform float w[2]",
        "",
    );
    vm.initialise(&mut env);
    vm.set_argument("from", &ArgValue::Floats(vec![0.0, 0.0, 0.0]), Some("world"), &env)
        .unwrap();
    vm.set_argument("tint", &ArgValue::Floats(vec![0.0, 0.0, 1.0]), Some("hsv"), &env)
        .unwrap();
    vm.set_argument("map", &ArgValue::Strings(vec!["brick.tx".into()]), None, &env)
        .unwrap();
    vm.set_argument("w", &ArgValue::Floats(vec![0.25, 0.75]), None, &env)
        .unwrap();
    assert!(approx_vec(local_triple(&vm, "from", 0), Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(local_color(&vm, "tint", 0), Color::WHITE);
    assert_eq!(local_string(&vm, "map"), "brick.tx");
    assert_eq!(vm.local_element("w", 1).unwrap().get_float(0), 0.75);
}

#[test]
fn set_argument_rejects_bad_input() {
    let env = GridEnv::new(0, 0);
    let mut vm = load("param uniform point from", "");
    let err = vm
        .set_argument("to", &ArgValue::Floats(vec![0.0; 3]), None, &env)
        .unwrap_err();
    assert_eq!(err, ExecError::UnknownArgument("to".into()));
    let err = vm
        .set_argument("from", &ArgValue::Strings(vec!["x".into()]), None, &env)
        .unwrap_err();
    assert!(matches!(err, ExecError::BadArgument { .. }));
    let err = vm
        .set_argument("from", &ArgValue::Floats(vec![0.0; 3]), Some("nowhere"), &env)
        .unwrap_err();
    assert!(matches!(err, ExecError::BadArgument { .. }));
}

/// Single-point environment relying on the trait's default callbacks.
struct BareEnv {
    vars: Vec<ShaderVariable>,
    states: RunningStates,
    errors: usize,
}

impl BareEnv {
    fn new() -> Self {
        let vars = StdVar::ALL
            .iter()
            .map(|&v| {
                let mut var = ShaderVariable::new(v.name(), v.ty(), v.class());
                var.initialise(1);
                var
            })
            .collect();
        Self {
            vars,
            states: RunningStates::new(1),
            errors: 0,
        }
    }
}

impl ShadingEnvironment for BareEnv {
    fn u_grid_res(&self) -> usize {
        0
    }

    fn v_grid_res(&self) -> usize {
        0
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
        (from == to).then_some(Matrix4::IDENTITY)
    }

    fn report_error(&mut self, _message: &str) {
        self.errors += 1;
    }
}

#[test]
fn default_callbacks_report_and_zero() {
    let mut env = BareEnv::new();
    let mut vm = load(
        "uniform float n\nvarying color c\nuniform float count",
        &format!("pushif 0.3\nfnoise1\npop n\npushv N\ndiffuse\npop c\n{COUNT_LIGHTS}"),
    );
    vm.initialise(&mut env);
    vm.execute(&mut env).unwrap();
    assert_eq!(local_float(&vm, "n"), 0.0);
    assert_eq!(local_color(&vm, "c", 0), Color::BLACK);
    assert_eq!(local_float(&vm, "count"), 0.0);
    assert_eq!(env.errors, 2);
}

#[test]
fn std_vars_written_by_the_shader_reach_the_environment() {
    let (_, env) = run_grid("", "pushv Cs\npushif 0.5\nmulcf\npop Ci");
    let ci = env.var(StdVar::Ci);
    assert!((0..ci.len()).all(|i| ci.get_color(i) == Color::new(0.5, 0.5, 0.5)));
}
