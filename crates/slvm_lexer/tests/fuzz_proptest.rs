use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use slvm_lexer::{Lexer, normalize_source};
use slvm_syntax::TokenKind;

fn any_program_like() -> impl Strategy<Value = String> {
    let ascii =
        proptest::collection::vec(any::<char>().prop_filter("ascii", |c| c.is_ascii()), 0..60)
            .prop_map(|v| v.into_iter().collect::<String>());
    let unicode = proptest::collection::vec(any::<char>(), 0..20)
        .prop_map(|v| v.into_iter().collect::<String>());
    let sym = "surface AQSIS_V 1.0 USES 3 segment Data uniform float x[2] segment Code :1 pushif -1.5e3 pushis \"s\\\"t\" jmp 1 # c\n"
        .to_string();
    (ascii, unicode, any::<bool>()).prop_map(move |(a, b, with_sym)| {
        let mut s = String::new();
        if with_sym {
            s.push_str(&sym);
        }
        s.push_str(&a);
        s.push_str(&b);
        s.chars().take(240).collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, max_shrink_iters: 200, .. ProptestConfig::default()
    })]
    #[test]
    fn lex_random_input_should_not_panic(s in any_program_like()) {
        let normalized = normalize_source(&s);
        let result = Lexer::new(&normalized.text).lex();
        prop_assert!(matches!(result.tokens.last().map(|t| t.kind), Some(TokenKind::Eof)));
        for t in &result.tokens {
            prop_assert!(t.span.start.0 <= t.span.end.0);
            prop_assert!(t.span.end.0 as usize <= normalized.text.len());
        }
    }
}
