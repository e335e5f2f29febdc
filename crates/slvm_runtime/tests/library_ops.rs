mod common;

use common::{approx, approx_vec, local_color, local_float, local_floats, local_string, local_triple, run_grid};
use slvm_core::{Color, Vec3};

fn float_result(code: &str) -> f32 {
    let (vm, _) = run_grid("uniform float r", &format!("{code}\npop r"));
    local_float(&vm, "r")
}

#[test]
fn floored_mod_and_zero_divisor() {
    assert!(approx(float_result("pushif -1\npushif 3\nmod"), 2.0));
    assert!(approx(float_result("pushif 7\npushif 3\nmod"), 1.0));
    assert_eq!(float_result("pushif 7\npushif 0\nmod"), 0.0);
}

#[test]
fn step_smoothstep_clamp_mix() {
    assert_eq!(float_result("pushif 0.5\npushif 0.2\nstep"), 0.0);
    assert_eq!(float_result("pushif 0.5\npushif 0.7\nstep"), 1.0);
    assert!(approx(float_result("pushif 0\npushif 1\npushif 0.5\nsmoothstep"), 0.5));
    assert_eq!(float_result("pushif 0\npushif 1\npushif 2\nsmoothstep"), 1.0);
    assert_eq!(float_result("pushif 5\npushif 0\npushif 2\nclamp"), 2.0);
    assert!(approx(float_result("pushif 2\npushif 4\npushif 0.25\nmix"), 2.5));
}

#[test]
fn argument_order_follows_push_order() {
    assert!(approx(float_result("pushif 2\npushif 3\npow"), 8.0));
    assert!(approx(float_result("pushif 1\npushif 0\natan2"), std::f32::consts::FRAC_PI_2));
    assert!(approx(float_result("pushif 8\npushif 2\nlogb"), 3.0));
    assert_eq!(float_result("pushif 3\npushif 5\nmin"), 3.0);
}

#[test]
fn scalar_functions_apply_per_point() {
    let (vm, _) = run_grid(
        "varying float r",
        "pushv u\npushif 2\nmulff\npushif 0.5\nsubff\nsign\npop r",
    );
    assert_eq!(local_floats(&vm, "r"), vec![-1.0, 1.0, -1.0, 1.0]);
}

#[test]
fn float_spline_passes_through_interior_knots() {
    let spline = |t: f32| {
        float_result(&format!(
            "pushif {t}\npushif 0\npushif 1\npushif 2\npushif 3\npushif 4\nfspline"
        ))
    };
    assert!(approx(spline(0.0), 1.0));
    assert!(approx(spline(0.5), 1.5));
    assert!(approx(spline(1.0), 2.0));
    assert!(approx(spline(2.0), 2.0));
}

#[test]
fn spline_with_too_few_knots_returns_the_second() {
    assert_eq!(
        float_result("pushif 0.5\npushif 7\npushif 9\npushif 2\nfspline"),
        9.0
    );
}

#[test]
fn componentwise_point_functions() {
    let (vm, _) = run_grid(
        "uniform point lo\nuniform point m",
        "puship 1 5 -2\npuship 3 0 0\npmin\npop lo\n\
         puship 0 0 0\npuship 2 4 6\npushif 0.5\npmix\npop m",
    );
    assert!(approx_vec(local_triple(&vm, "lo", 0), Vec3::new(1.0, 0.0, -2.0)));
    assert!(approx_vec(local_triple(&vm, "m", 0), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn color_clamp_works_per_channel() {
    let (vm, _) = run_grid(
        "uniform color c",
        "pushif 2\npushif -1\npushif 0.5\nsettc\n\
         pushif 0\nsetfc\n\
         pushif 1\nsetfc\n\
         cclamp\npop c",
    );
    assert_eq!(local_color(&vm, "c", 0), Color::new(1.0, 0.0, 0.5));
}

#[test]
fn length_distance_normalize() {
    assert!(approx(float_result("puship 3 4 0\nlength"), 5.0));
    assert!(approx(float_result("puship 1 1 1\npuship 1 1 3\ndistance"), 2.0));
    let (vm, _) = run_grid("uniform vector n", "puship 0 0 9\nnormalize\npop n");
    assert!(approx_vec(local_triple(&vm, "n", 0), Vec3::new(0.0, 0.0, 1.0)));
}

#[test]
fn reflect_about_a_normal() {
    let (vm, _) = run_grid(
        "uniform vector r",
        "puship 1 -1 0\npuship 0 1 0\nreflect\npop r",
    );
    assert!(approx_vec(local_triple(&vm, "r", 0), Vec3::new(1.0, 1.0, 0.0)));
}

#[test]
fn faceforward_orients_against_the_view() {
    // I . Ng < 0 everywhere on the grid, so N is kept.
    let (vm, _) = run_grid(
        "varying normal f\nuniform normal g",
        "puship 0 0 1\npushv I\nfaceforward\npop f\n\
         puship 0 0 1\npuship 0 0 1\npuship 0 0 1\nfaceforward2\npop g",
    );
    for i in 0..4 {
        assert!(approx_vec(local_triple(&vm, "f", i), Vec3::new(0.0, 0.0, 1.0)));
    }
    assert!(approx_vec(local_triple(&vm, "g", 0), Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn component_access_clamps_the_index() {
    assert_eq!(float_result("puship 1 2 3\npushif 1\ncomp"), 2.0);
    assert_eq!(float_result("puship 1 2 3\npushif 9\ncomp"), 3.0);
    assert_eq!(float_result("puship 1 2 3\nycomp"), 2.0);
    let (vm, _) = run_grid(
        "uniform point p",
        "puship 1 2 3\npushif 0\npushif 7\nsetcomp\npushif 8\nsetzcomp\npop p",
    );
    assert!(approx_vec(local_triple(&vm, "p", 0), Vec3::new(7.0, 2.0, 8.0)));
}

#[test]
fn matrix_translate_then_transform() {
    let (vm, _) = run_grid(
        "uniform point p",
        "pushif 1\nsetfm\npuship 1 2 3\ntranslate\npuship 0 0 0\ntransformm\npop p",
    );
    assert!(approx_vec(local_triple(&vm, "p", 0), Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn vectors_ignore_translation() {
    let (vm, _) = run_grid(
        "uniform vector v",
        "pushif 1\nsetfm\npuship 1 2 3\ntranslate\npuship 0 0 1\nvtransformm\npop v",
    );
    assert!(approx_vec(local_triple(&vm, "v", 0), Vec3::new(0.0, 0.0, 1.0)));
}

#[test]
fn determinant_and_matrix_components() {
    assert!(approx(float_result("pushif 2\nsetfm\ndeterminant"), 16.0));
    assert_eq!(float_result("pushif 2\nsetfm\npushif 1\npushif 1\nmcomp"), 2.0);
    assert_eq!(float_result("pushif 2\nsetfm\npushif 0\npushif 1\nmcomp"), 0.0);
    assert_eq!(float_result("pushif 2\nsetfm\npushif 5\npushif 0\nmcomp"), 0.0);
    assert_eq!(
        float_result("pushif 1\nsetfm\npushif 0\npushif 3\npushif 4\nsetmcomp\npushif 0\npushif 3\nmcomp"),
        4.0
    );
}

#[test]
fn matrix_division_by_itself_is_identity() {
    let (vm, _) = run_grid(
        "uniform matrix m",
        "pushif 1\nsetfm\npuship 1 2 3\ntranslate\ndup\ndivmm\npop m",
    );
    let m = vm.local("m").unwrap().get_matrix(0);
    assert!(approx(m.determinant(), 1.0));
    assert!(approx_vec(m.transform_point(Vec3::new(4.0, 5.0, 6.0)), Vec3::new(4.0, 5.0, 6.0)));
}

#[test]
fn concat_joins_in_push_order() {
    let (vm, _) = run_grid(
        "uniform string s",
        "pushis \"a\"\npushis \"b\"\npushis \"cd\"\npushif 3\nconcat\npop s",
    );
    assert_eq!(local_string(&vm, "s"), "abcd");
}

#[test]
fn format_expands_conversions() {
    let (vm, _) = run_grid(
        "uniform string s",
        "pushis \"%s-%d %% %q\"\npushis \"a\"\npushif 3.7\npushif 2\nformat\npop s",
    );
    assert_eq!(local_string(&vm, "s"), "a-3 % %q");
}

#[test]
fn uniform_printf_prints_once() {
    let (_, env) = run_grid("", "pushis \"x=%f\"\npushif 2.5\npushif 1\nprintf");
    assert_eq!(env.output(), ["x=2.5"]);
}

#[test]
fn varying_printf_prints_per_point() {
    let (_, env) = run_grid("", "pushis \"%f\"\npushv u\npushif 1\nprintf");
    assert_eq!(env.output(), ["0.0", "1.0", "0.0", "1.0"]);
}

#[test]
fn match_uses_regular_expressions() {
    let (vm, env) = run_grid(
        "uniform float hit\nuniform float miss\nuniform float bad",
        "pushis \"^a.c$\"\npushis \"abc\"\nmatch\npop hit\n\
         pushis \"^b\"\npushis \"abc\"\nmatch\npop miss\n\
         pushis \"(\"\npushis \"abc\"\nmatch\npop bad",
    );
    assert_eq!(local_float(&vm, "hit"), 1.0);
    assert_eq!(local_float(&vm, "miss"), 0.0);
    assert_eq!(local_float(&vm, "bad"), 0.0);
    assert_eq!(env.errors().len(), 1);
}

#[test]
fn string_equality() {
    assert_eq!(float_result("pushis \"a\"\npushis \"a\"\neqss"), 1.0);
    assert_eq!(float_result("pushis \"a\"\npushis \"b\"\neqss"), 0.0);
    assert_eq!(float_result("pushis \"a\"\npushis \"b\"\nness"), 1.0);
}

#[test]
fn mixed_arithmetic_promotes_floats() {
    let (vm, _) = run_grid(
        "uniform point p\nuniform color c",
        "puship 1 2 3\npushif 2\nmulpf\npop p\n\
         pushif 1\npushif 0.5\npushif 0.25\nsettc\npushif 2\nmulcf\npop c",
    );
    assert!(approx_vec(local_triple(&vm, "p", 0), Vec3::new(2.0, 4.0, 6.0)));
    assert_eq!(local_color(&vm, "c", 0), Color::new(2.0, 1.0, 0.5));
}

#[test]
fn dot_and_cross() {
    assert_eq!(float_result("puship 1 2 3\npuship 4 5 6\ndotpp"), 32.0);
    let (vm, _) = run_grid("uniform vector z", "puship 1 0 0\npuship 0 1 0\ncrsvv\npop z");
    assert!(approx_vec(local_triple(&vm, "z", 0), Vec3::new(0.0, 0.0, 1.0)));
}
