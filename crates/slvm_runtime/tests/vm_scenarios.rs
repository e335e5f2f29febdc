mod common;

use common::{load, local_float, local_floats, local_string, run_grid};
use slvm_core::{ShaderVariable, VarClass, VarType};
use slvm_ir::{ProgramElement, SegmentKind};
use slvm_runtime::{ExecError, GridEnv, ShaderVm, VmConfig};

#[test]
fn uniform_constants_fill_a_varying_result() {
    let (vm, _) = run_grid(
        "varying float f",
        "pushif 2.0\npushif 3.0\naddff\npop f",
    );
    assert_eq!(local_floats(&vm, "f"), vec![5.0; 4]);
}

#[test]
fn uniform_minus_varying_is_varying() {
    // varying = 1 + u + 2v = [1, 2, 3, 4]
    let (vm, _) = run_grid(
        "uniform float uni\nvarying float var\nvarying float r",
        "pushif 10\npop uni\n\
         pushif 1\npushv u\naddff\npushif 2\npushv v\nmulff\naddff\npop var\n\
         pushv uni\npushv var\nsubff\npop r",
    );
    assert_eq!(local_floats(&vm, "var"), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(local_floats(&vm, "r"), vec![9.0, 8.0, 7.0, 6.0]);
}

#[test]
fn uniform_operands_give_a_uniform_result() {
    let (vm, _) = run_grid(
        "uniform float a\nuniform float r",
        "pushif 6\npop a\npushv a\npushif 4\nmulff\npop r",
    );
    let r = vm.local("r").unwrap();
    assert_eq!(r.class, VarClass::Uniform);
    assert_eq!(r.get_float(0), 24.0);
}

#[test]
fn push_then_pop_preserves_value() {
    let (vm, _) = run_grid(
        "varying point p\nvarying point q",
        "pushv P\npop p\npushv p\npop q",
    );
    let (p, q) = (vm.local("p").unwrap(), vm.local("q").unwrap());
    assert_eq!(p.ty, q.ty);
    assert_eq!(p.class, q.class);
    assert_eq!(p.data, q.data);
}

#[test]
fn balanced_program_leaves_empty_stack() {
    let (vm, _) = run_grid(
        "varying float f",
        "pushif 1\ndup\naddff\npushif 7\ndrop\npop f",
    );
    assert_eq!(vm.stack_depth(), 0);
    assert_eq!(local_floats(&vm, "f"), vec![2.0; 4]);
}

#[test]
fn forward_jump_lands_on_label() {
    let mut vm = load("", "pushif 1\njmp 7\npushif 2\n:7\ndrop");
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    let target = vm
        .program()
        .segment(SegmentKind::Code)
        .elements
        .iter()
        .find_map(|e| match e {
            ProgramElement::Label(label) => Some(label.position),
            _ => None,
        })
        .expect("label resolved");
    vm.begin(SegmentKind::Code);
    assert!(vm.step(&mut env).unwrap());
    assert!(vm.step(&mut env).unwrap());
    assert_eq!(vm.pc(), target);
    assert_eq!(vm.stack_depth(), 1);
    assert!(!vm.step(&mut env).unwrap());
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn undefined_label_fails_the_load() {
    let text = common::program("", "jmp 3\npushif 1\ndrop");
    assert!(ShaderVm::load(&text).is_err());
}

#[test]
fn leftover_stack_is_an_error_in_strict_mode() {
    let mut vm = load("", "pushif 1");
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    let err = vm.execute(&mut env).unwrap_err();
    assert!(matches!(err, ExecError::StackImbalance { depth: 1, .. }));
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn leftover_stack_is_cleared_when_lenient() {
    let mut vm = load("", "pushif 1").with_config(VmConfig {
        strict_stack: false,
        ..VmConfig::default()
    });
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    assert!(vm.execute(&mut env).is_ok());
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn underflow_is_reported_with_the_opcode() {
    let mut vm = load("", "pushif 1\naddff");
    let mut env = GridEnv::new(0, 0);
    vm.initialise(&mut env);
    let err = vm.execute(&mut env).unwrap_err();
    assert_eq!(err, ExecError::StackUnderflow { op: "addff", pc: 2 });
    // The VM stays usable.
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn operand_type_mismatch_is_fatal() {
    let mut vm = load("", "pushis \"a\"\npushif 1\naddff\ndrop");
    let mut env = GridEnv::new(0, 0);
    vm.initialise(&mut env);
    let err = vm.execute(&mut env).unwrap_err();
    assert!(matches!(err, ExecError::OperandType { op: "addff", .. }));
}

#[test]
fn varying_into_uniform_assignment_is_skipped() {
    let (vm, _) = run_grid("uniform float y", "pushif 3\npop y\npushv u\npop y");
    assert_eq!(local_float(&vm, "y"), 3.0);
}

#[test]
fn type_mismatch_assignment_is_skipped() {
    let (vm, _) = run_grid("uniform float y", "pushif 3\npop y\npushis \"x\"\npop y");
    assert_eq!(local_float(&vm, "y"), 3.0);
}

#[test]
fn array_elements_round_trip() {
    let (vm, _) = run_grid(
        "uniform float a[3]\nuniform float y",
        "pushif 5\npushif 1\nipop a\npushif 1\nipushv a\npop y",
    );
    assert_eq!(local_float(&vm, "y"), 5.0);
    assert_eq!(vm.local_element("a", 1).unwrap().get_float(0), 5.0);
    assert_eq!(vm.local_element("a", 0).unwrap().get_float(0), 0.0);
}

#[test]
fn varying_index_gathers_per_point() {
    // index = u = [0, 1, 0, 1]
    let (vm, _) = run_grid(
        "uniform float a[2]\nvarying float y",
        "pushif 10\npushif 0\nipop a\npushif 20\npushif 1\nipop a\npushv u\nipushv a\npop y",
    );
    assert_eq!(local_floats(&vm, "y"), vec![10.0, 20.0, 10.0, 20.0]);
}

#[test]
fn array_index_out_of_range_is_fatal() {
    let mut vm = load("uniform float a[2]", "pushif 2\nipushv a\ndrop");
    let mut env = GridEnv::new(0, 0);
    vm.initialise(&mut env);
    let err = vm.execute(&mut env).unwrap_err();
    assert!(matches!(err, ExecError::ArrayIndex { index: 2, len: 2, .. }));
}

#[test]
fn merge_selects_per_point() {
    let (vm, _) = run_grid(
        "varying float y",
        "pushif 1\npushif 2\npushv u\nmergef\npop y",
    );
    assert_eq!(local_floats(&vm, "y"), vec![2.0, 1.0, 2.0, 1.0]);
}

#[test]
fn init_segment_defaults_broadcast_to_varying_locals() {
    let text = "surface\nAQSIS_V 1.8\nUSES 0\nsegment Data\nparam varying float Kd\n\
                segment Init\npushif 0.8\npop Kd\nsegment Code\npushv Kd\npushif 2\nmulff\npop Kd\n";
    let mut vm = ShaderVm::load(text).unwrap();
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    vm.execute_init().unwrap();
    assert_eq!(local_floats(&vm, "Kd"), vec![0.8; 4]);
    vm.execute(&mut env).unwrap();
    assert_eq!(local_floats(&vm, "Kd"), vec![1.6; 4]);
}

#[test]
fn get_value_copies_a_local() {
    let (vm, _) = run_grid("uniform string s", "pushis \"hello\"\npop s");
    let mut out = ShaderVariable::new("", VarType::Float, VarClass::Uniform);
    assert!(vm.get_value("s", &mut out));
    assert_eq!(out.ty, VarType::String);
    assert_eq!(out.get_string(0), "hello");
    assert!(!vm.get_value("missing", &mut out));
    assert_eq!(local_string(&vm, "s"), "hello");
}

#[test]
fn programs_are_shared_between_instances() {
    let vm = load("varying float f", "pushif 1\npop f");
    let other = ShaderVm::new(vm.program().clone());
    assert!(std::sync::Arc::ptr_eq(vm.program(), other.program()));
}

#[test]
fn oversized_operand_counts_underflow_instead_of_panicking() {
    for (code, op) in [
        ("pushis \"x\"\npushif 1e30\nformat\ndrop", "format"),
        ("pushis \"x\"\npushif 1e30\nprintf", "printf"),
        ("pushif 0.5\npushif 1e30\nfspline\ndrop", "fspline"),
        ("pushis \"x\"\npushif 3\nconcat\ndrop", "concat"),
    ] {
        let mut vm = load("", code);
        let mut env = GridEnv::new(0, 0);
        vm.initialise(&mut env);
        let err = vm.execute(&mut env).unwrap_err();
        assert_eq!(err, ExecError::StackUnderflow { op, pc: 4 });
        assert_eq!(vm.stack_depth(), 0);
    }
}
