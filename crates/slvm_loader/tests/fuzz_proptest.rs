use proptest::prelude::*;
use slvm_loader::load_program;

const HEADER: &str = "surface\nAQSIS_V 1.8\nUSES 3\nsegment Data\nvarying float x\nsegment Code\n";

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn arbitrary_text_never_panics(s in "\\PC{0,200}") {
        let _ = load_program(&s);
    }

    #[test]
    fn token_soup_never_panics(words in proptest::collection::vec(
        prop_oneof![
            Just("pushif"), Just("pushv"), Just("pop"), Just("x"), Just("Cs"), Just("1"),
            Just("-2.5"), Just(":"), Just("jmp"), Just("\"s\""), Just("addff"), Just("["),
            Just("segment"), Just("Init"), Just("S_JZ"), Just("ipushv"),
        ],
        0..40,
    )) {
        let text = format!("{HEADER}{}", words.join(" "));
        if let Err(err) = load_program(&text) {
            prop_assert!(err.line >= 1 && err.col >= 1);
        }
    }
}
