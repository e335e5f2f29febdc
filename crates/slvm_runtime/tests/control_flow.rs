mod common;

use common::{load, local_float, local_floats, run_grid};
use slvm_runtime::{ExecError, GridEnv, ShadingEnvironment};

// u = [0, 1, 0, 1], v = [0, 0, 1, 1]

#[test]
fn masked_pop_keeps_inactive_points() {
    let (vm, env) = run_grid(
        "varying float x",
        "pushif 7\npop x\n\
         pushv u\npushif 0.5\ngtff\nS_GET\nRS_PUSH\nRS_GET\n\
         pushif 1\npop x\n\
         RS_POP",
    );
    assert_eq!(local_floats(&vm, "x"), vec![7.0, 1.0, 7.0, 1.0]);
    assert!(env.states().running().all());
    assert_eq!(env.states().depth(), 0);
}

#[test]
fn else_branch_runs_the_complement() {
    let (vm, _) = run_grid(
        "varying float x",
        "pushv u\npushif 0.5\ngtff\nS_GET\nRS_PUSH\nRS_GET\n\
         pushif 1\npop x\n\
         RS_INVERSE\n\
         pushif 2\npop x\n\
         RS_POP",
    );
    assert_eq!(local_floats(&vm, "x"), vec![2.0, 1.0, 2.0, 1.0]);
}

#[test]
fn nested_conditions_narrow_the_mask() {
    let (vm, _) = run_grid(
        "varying float x",
        "pushif 9\npop x\n\
         pushv v\npushif 0.5\nlsff\nS_GET\nRS_PUSH\nRS_GET\n\
         pushv u\npushif 0.5\ngtff\nS_GET\nRS_PUSH\nRS_GET\n\
         pushif 1\npop x\n\
         RS_INVERSE\n\
         pushif 2\npop x\n\
         RS_POP\n\
         RS_POP",
    );
    assert_eq!(local_floats(&vm, "x"), vec![2.0, 1.0, 9.0, 9.0]);
}

#[test]
fn s_jz_skips_when_no_point_is_selected() {
    let (vm, _) = run_grid(
        "varying float x",
        "pushif 0\npop x\n\
         pushv u\npushif 2\ngtff\nS_GET\n\
         S_JZ 1\n\
         pushif 5\npop x\n\
         :1",
    );
    assert_eq!(local_floats(&vm, "x"), vec![0.0; 4]);
}

#[test]
fn s_jz_falls_through_when_points_are_selected() {
    let (vm, _) = run_grid(
        "varying float x",
        "pushif 0\npop x\n\
         pushv u\npushif -1\ngtff\nS_GET\n\
         S_JZ 1\n\
         pushif 5\npop x\n\
         :1",
    );
    assert_eq!(local_floats(&vm, "x"), vec![5.0; 4]);
}

#[test]
fn varying_loop_runs_each_point_its_own_count() {
    // while (n < 3u) n += 1
    let (vm, env) = run_grid(
        "varying float n",
        "pushif 0\npop n\n\
         RS_PUSH\n\
         :1\n\
         pushv n\npushv u\npushif 3\nmulff\nlsff\n\
         S_GET\nRS_GET\n\
         RS_JZ 2\n\
         pushv n\npushif 1\naddff\npop n\n\
         jmp 1\n\
         :2\n\
         RS_POP",
    );
    assert_eq!(local_floats(&vm, "n"), vec![0.0, 3.0, 0.0, 3.0]);
    assert!(env.states().running().all());
}

#[test]
fn uniform_loop_with_jz() {
    let (vm, _) = run_grid(
        "uniform float i",
        "pushif 0\npop i\n\
         :1\n\
         pushv i\npushif 3\nlsff\n\
         jz 2\n\
         pushv i\npushif 1\naddff\npop i\n\
         jmp 1\n\
         :2",
    );
    assert_eq!(local_float(&vm, "i"), 3.0);
}

#[test]
fn jz_on_a_split_condition_falls_through() {
    let (vm, _) = run_grid(
        "varying float x",
        "pushif 0\npop x\n\
         pushv u\njz 1\n\
         pushif 1\npop x\n\
         :1",
    );
    assert_eq!(local_floats(&vm, "x"), vec![1.0; 4]);
}

#[test]
fn jnz_on_a_uniform_condition() {
    let (vm, _) = run_grid(
        "uniform float x",
        "pushif 4\npop x\n\
         pushif 1\njnz 1\n\
         pushif 8\npop x\n\
         :1",
    );
    assert_eq!(local_float(&vm, "x"), 4.0);
}

#[test]
fn logic_ops_combine_conditions() {
    let (vm, _) = run_grid(
        "varying float a\nvarying float o\nvarying float n",
        "pushv u\npushif 0.5\ngtff\npushv v\npushif 0.5\ngtff\nland\npop a\n\
         pushv u\npushif 0.5\ngtff\npushv v\npushif 0.5\ngtff\nlor\npop o\n\
         pushv u\nlnot\npop n",
    );
    assert_eq!(local_floats(&vm, "a"), vec![0.0, 0.0, 0.0, 1.0]);
    assert_eq!(local_floats(&vm, "o"), vec![0.0, 1.0, 1.0, 1.0]);
    assert_eq!(local_floats(&vm, "n"), vec![1.0, 0.0, 1.0, 0.0]);
}

#[test]
fn rs_pop_without_push_is_fatal() {
    let mut vm = load("", "RS_POP");
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    let err = vm.execute(&mut env).unwrap_err();
    assert_eq!(err, ExecError::StateUnderflow { op: "RS_POP", pc: 0 });
}

#[test]
fn initialise_resets_the_running_state() {
    let mut vm = load(
        "varying float x",
        "pushif 3\npop x",
    );
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    env.states_mut().set_current(|i| i == 0);
    env.states_mut().get();
    vm.initialise(&mut env);
    vm.execute(&mut env).unwrap();
    assert_eq!(local_floats(&vm, "x"), vec![3.0; 4]);
}

#[test]
fn s_get_narrows_current_but_not_running() {
    let (_, env) = run_grid("", "pushv u\npushif 0.5\ngtff\nS_GET");
    let current = env.current_state();
    assert_eq!(
        (0..4).map(|i| current.get(i)).collect::<Vec<_>>(),
        vec![false, true, false, true]
    );
    assert!(env.running_state().all());
}

#[test]
fn failed_execution_resets_the_running_state() {
    let mut vm = load(
        "varying float x",
        "pushv u\npushif 0.5\ngtff\nS_GET\nRS_PUSH\nRS_GET\npushif 1\npop x\naddff",
    );
    let mut env = GridEnv::new(1, 1);
    vm.initialise(&mut env);
    assert!(matches!(
        vm.execute(&mut env),
        Err(ExecError::StackUnderflow { op: "addff", .. })
    ));
    assert_eq!(env.states().depth(), 0);
    assert!(env.running_state().all());
    assert!(env.current_state().all());
}
