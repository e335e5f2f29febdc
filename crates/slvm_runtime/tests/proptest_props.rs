mod common;

use common::{approx, local_floats, run};
use proptest::prelude::*;
use slvm_ir::StdVar;
use slvm_runtime::{GridEnv, RunningStates};

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn uniform_minus_varying_matches_per_point(a in -100.0f32..100.0, s in proptest::collection::vec(-100.0f32..100.0, 4)) {
        let mut env = GridEnv::new(1, 1);
        for (i, x) in s.iter().enumerate() {
            env.var_mut(StdVar::S).set_float(*x, i);
        }
        let vm = run("varying float r", &format!("pushif {a}\npushv s\nsubff\npop r"), &mut env);
        let r = local_floats(&vm, "r");
        for i in 0..4 {
            prop_assert!(approx(r[i], a - s[i]));
        }
    }

    #[test]
    fn masked_assignment_touches_only_selected_points(bits in proptest::collection::vec(any::<bool>(), 4)) {
        let mut env = GridEnv::new(1, 1);
        for (i, b) in bits.iter().enumerate() {
            env.var_mut(StdVar::T).set_float(if *b { 1.0 } else { 0.0 }, i);
        }
        let vm = run(
            "varying float x",
            "pushif 0\npop x\npushv t\nS_GET\nRS_PUSH\nRS_GET\npushif 1\npop x\nRS_POP",
            &mut env,
        );
        let expected: Vec<f32> = bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect();
        prop_assert_eq!(local_floats(&vm, "x"), expected);
    }

    #[test]
    fn state_push_pop_restores_running(
        initial in proptest::collection::vec(any::<bool>(), 1..32),
        cond in proptest::collection::vec(any::<bool>(), 32),
    ) {
        let n = initial.len();
        let mut states = RunningStates::new(n);
        states.set_current(|i| initial[i]);
        states.get();
        let before = states.running().clone();
        states.push();
        states.set_current(|i| cond[i]);
        states.get();
        prop_assert!(states.running().iter_ones().all(|i| initial[i] && cond[i]));
        states.inverse();
        prop_assert!(states.running().iter_ones().all(|i| initial[i] && !cond[i]));
        prop_assert!(states.pop());
        prop_assert_eq!(states.running(), &before);
        prop_assert!(!states.pop());
    }

    #[test]
    fn postfix_sums_leave_a_balanced_stack(values in proptest::collection::vec(-50i32..50, 1..24)) {
        let mut code = format!("pushif {}\n", values[0]);
        for v in &values[1..] {
            code.push_str(&format!("pushif {v}\naddff\n"));
        }
        code.push_str("pop r");
        let mut env = GridEnv::new(1, 1);
        let vm = run("varying float r", &code, &mut env);
        prop_assert_eq!(vm.stack_depth(), 0);
        let total: i32 = values.iter().sum();
        prop_assert_eq!(local_floats(&vm, "r"), vec![total as f32; 4]);
    }
}
