use proptest::prelude::*;
use proptest::sample::select;
use slvm_ir::{Program, ProgramElement, ShaderKind, disassemble, lookup_opcode, mnemonics};

fn bare_mnemonics() -> Vec<&'static str> {
    let mut names: Vec<_> = mnemonics()
        .filter(|name| lookup_opcode(name).is_some_and(|(_, info)| info.operands.is_empty()))
        .collect();
    names.sort_unstable();
    names
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn code_lines_name_each_opcode_in_order(
        names in proptest::collection::vec(select(bare_mnemonics()), 1..40),
    ) {
        let mut program = Program::new(ShaderKind::Surface);
        program.code.elements = names
            .iter()
            .map(|name| {
                let (name, info) = lookup_opcode(name).unwrap();
                ProgramElement::Op { name, info }
            })
            .collect();
        let text = disassemble(&program);
        let (_, code) = text.split_once("segment Code\n").unwrap();
        let lines: Vec<&str> = code.lines().collect();
        prop_assert_eq!(lines.len(), names.len());
        for (line, name) in lines.iter().zip(&names) {
            let mnemonic = line.strip_prefix('\t').unwrap();
            prop_assert_eq!(mnemonic, *name);
            let (_, a) = lookup_opcode(mnemonic).unwrap();
            let (_, b) = lookup_opcode(name).unwrap();
            prop_assert_eq!(a.code, b.code);
        }
    }
}
