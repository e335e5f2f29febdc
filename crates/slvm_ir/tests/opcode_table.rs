use slvm_core::VarType;
use slvm_ir::{
    ArithOp, FlowOp, IllumFn, Opcode, OperandKind, Shape, StdVar, UsesMask, lookup_opcode,
    mnemonics,
};

#[test]
fn jump_opcodes_take_one_label() {
    for name in mnemonics() {
        let (_, info) = lookup_opcode(name).unwrap();
        let has_label = info.operands.contains(&OperandKind::Label);
        assert_eq!(info.code.is_jump(), has_label, "{name}");
        if has_label {
            assert_eq!(info.operands.len(), 1, "{name}");
        }
    }
}

#[test]
fn lookup_returns_static_key() {
    let (key, info) = lookup_opcode("addff").unwrap();
    assert_eq!(key, "addff");
    assert_eq!(info.code, Opcode::Arith(ArithOp::Add, Shape::FF));
    assert!(info.operands.is_empty());
    assert!(lookup_opcode("addfff").is_none());
}

#[test]
fn mixed_triple_shapes_take_left_type() {
    let (_, info) = lookup_opcode("subpv").unwrap();
    assert_eq!(info.code, Opcode::Arith(ArithOp::Sub, Shape::TT(VarType::Point)));
    let (_, info) = lookup_opcode("mulfn").unwrap();
    assert_eq!(info.code, Opcode::Arith(ArithOp::Mul, Shape::FT(VarType::Normal)));
}

#[test]
fn control_flow_mnemonics_are_present() {
    let flows = [
        ("RS_PUSH", FlowOp::RsPush),
        ("RS_POP", FlowOp::RsPop),
        ("RS_GET", FlowOp::RsGet),
        ("RS_INVERSE", FlowOp::RsInverse),
        ("S_CLEAR", FlowOp::SClear),
        ("S_GET", FlowOp::SGet),
        ("S_JZ", FlowOp::SJz),
        ("S_JNZ", FlowOp::SJnz),
        ("RS_JZ", FlowOp::RsJz),
        ("RS_JNZ", FlowOp::RsJnz),
        ("jz", FlowOp::Jz),
        ("jnz", FlowOp::Jnz),
        ("jmp", FlowOp::Jmp),
    ];
    for (name, op) in flows {
        assert_eq!(lookup_opcode(name).unwrap().1.code, Opcode::Flow(op));
    }
    assert_eq!(
        lookup_opcode("init_illuminance2").unwrap().1.code,
        Opcode::Illum(IllumFn::InitCategory)
    );
}

#[test]
fn push_operands() {
    assert_eq!(lookup_opcode("puship").unwrap().1.operands.len(), 3);
    assert_eq!(lookup_opcode("pushis").unwrap().1.operands, &[OperandKind::Str]);
    assert!(lookup_opcode("ipushv").unwrap().1.code.needs_array());
    assert!(!lookup_opcode("pushv").unwrap().1.code.needs_array());
}

#[test]
fn std_vars_follow_uses_bit_order() {
    assert_eq!(StdVar::ALL.len(), StdVar::COUNT);
    for (i, var) in StdVar::ALL.iter().enumerate() {
        assert_eq!(var.index(), i);
        assert_eq!(StdVar::parse(var.name()), Some(*var));
    }
    assert_eq!(StdVar::Cs.bit(), 1);
    assert_eq!(StdVar::P.bit(), 1 << 8);
    assert_eq!(StdVar::parse("Cq"), None);

    let uses = UsesMask(StdVar::P.bit() | StdVar::N.bit());
    assert_eq!(uses.iter().collect::<Vec<_>>(), vec![StdVar::P, StdVar::N]);
    assert_eq!(UsesMask(1 << 30).unknown_bits(), 1 << 30);
}
