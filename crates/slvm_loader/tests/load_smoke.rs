use slvm_core::{VarClass, VarType};
use slvm_ir::{
    Label, Opcode, ProgramElement, SegmentKind, ShaderKind, StdVar, VarRef, disassemble,
};
use slvm_loader::{LoadFileError, load_program, load_program_file};
use slvm_syntax::{DiagnosticKind, SourceFile, SourceId, render_diagnostic};

const MATTE: &str = r#"
surface
AQSIS_V 1.8.0
USES 393219   # Cs Os Ci Oi

segment Data
param uniform float Kd
param output varying color tint
varying float weights[3]

segment Init
	pushif 0.8
	pop Kd

segment Code
	pushv Kd
	pushv Cs
	mulfc
	pop Ci
	jmp 1
	pushif 1
	drop
:1
	pushv Os
	pop Oi
"#;

#[test]
fn loads_header_and_declarations() {
    let program = load_program(MATTE).unwrap();
    assert_eq!(program.kind, ShaderKind::Surface);
    assert_eq!(program.version, "1.8.0");
    assert!(program.uses.contains(StdVar::Ci));
    assert_eq!(program.locals.len(), 3);
    let tint = &program.locals[1];
    assert!(tint.param && tint.output);
    assert_eq!((tint.class, tint.ty), (VarClass::Varying, VarType::Color));
    assert_eq!(program.locals[2].array_len, Some(3));
    assert_eq!(program.init.instruction_count(), 2);
}

#[test]
fn operands_resolve_to_locals_then_std_vars() {
    let program = load_program(MATTE).unwrap();
    let code = &program.segment(SegmentKind::Code).elements;
    assert_eq!(code[1], ProgramElement::Var(VarRef::Local(0)));
    assert_eq!(code[3], ProgramElement::Var(VarRef::Std(StdVar::Cs)));
    match &code[4] {
        ProgramElement::Op { name, info } => {
            assert_eq!(*name, "mulfc");
            assert!(matches!(info.code, Opcode::Arith(..)));
        }
        other => panic!("expected opcode, got {other:?}"),
    }
}

#[test]
fn forward_label_resolves_to_following_element() {
    let program = load_program(MATTE).unwrap();
    let code = &program.code;
    let label = code.label(1).unwrap();
    assert_eq!(code.elements[8], ProgramElement::Label(label));
    assert_eq!(label, Label { id: 1, position: 12 });
    match &code.elements[label.position] {
        ProgramElement::Op { name, .. } => assert_eq!(*name, "pushv"),
        other => panic!("{other:?}"),
    }
}

#[test]
fn undefined_label_is_a_structured_error() {
    let src = "surface\nAQSIS_V 1\nUSES 0\nsegment Data\nsegment Init\nsegment Code\n\tjmp 4\n";
    let err = load_program(src).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UndefinedLabel(4));
    assert_eq!(err.token, "4");
    assert_eq!((err.line, err.col), (7, 6));
    assert_eq!(err.to_string(), "7:6: Jump to undefined label 4");
}

#[test]
fn labels_are_scoped_per_segment() {
    let src = "surface\nAQSIS_V 1\nUSES 0\nsegment Init\n:3\n\tnop\nsegment Code\n\tjmp 3\n";
    let err = load_program(src).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UndefinedLabel(3));
}

#[test]
fn unknown_opcode_suggests_mnemonic() {
    let src = "surface\nAQSIS_V 1\nUSES 0\nsegment Code\n\tpushiff 1\n";
    let err = load_program(src).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UnknownOpcode("pushiff".into()));
    assert_eq!(err.suggestion.as_deref(), Some("pushif"));

    let file = SourceFile::new(SourceId(0), "bad.slx", src.to_string());
    let rendered = render_diagnostic(&file, &err.to_diagnostic());
    assert!(rendered.starts_with("Error [L0004]: bad.slx:5:2: Unknown opcode: pushiff"), "{rendered}");
    assert!(rendered.contains("did you mean 'pushif'?"), "{rendered}");
}

#[test]
fn operand_errors() {
    let missing = "surface\nAQSIS_V 1\nUSES 0\nsegment Code\n\tpushif\n";
    assert!(matches!(
        load_program(missing).unwrap_err().kind,
        DiagnosticKind::MissingOperand { expected: "number", .. }
    ));

    let wrong = "surface\nAQSIS_V 1\nUSES 0\nsegment Code\n\tpushis 2\n";
    assert!(matches!(
        load_program(wrong).unwrap_err().kind,
        DiagnosticKind::InvalidOperand { expected: "string", .. }
    ));

    let undefined = "surface\nAQSIS_V 1\nUSES 0\nsegment Code\n\tpushv Kq\n";
    let err = load_program(undefined).unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UndefinedVariable("Kq".into()));

    let not_array = "surface\nAQSIS_V 1\nUSES 0\nsegment Data\nuniform float x\nsegment Code\n\tpushif 0\n\tipushv x\n";
    assert_eq!(
        load_program(not_array).unwrap_err().kind,
        DiagnosticKind::ArrayRequired("x".into())
    );
}

#[test]
fn header_and_declaration_errors() {
    let err = load_program("surfce\nAQSIS_V 1\nUSES 0\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UnknownShaderKind("surfce".into()));
    assert_eq!(err.suggestion.as_deref(), Some("surface"));

    let err = load_program("surface\nAQSIS_V\nUSES 0\n").unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::ExpectedToken(_)));

    let err = load_program("surface\nAQSIS_V 1\nUSES 1.5\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidUsesMask("1.5".into()));

    let err = load_program("surface\nAQSIS_V 1\nUSES 0\nsegment Code\nsegment Data\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::SegmentOutOfOrder("Data".into()));

    let err = load_program("surface\nAQSIS_V 1\nUSES 0\nsegment Data\nuniform flot x\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UnknownType("flot".into()));

    let err = load_program("surface\nAQSIS_V 1\nUSES 0\nsegment Data\nconstant float x\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::UnknownStorageClass("constant".into()));

    let err = load_program("surface\nAQSIS_V 1\nUSES 0\nsegment Data\nuniform float x[0]\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::InvalidArrayLength("0".into()));

    let err = load_program("surface\nAQSIS_V 1\nUSES 0\nsegment Data\nuniform float x\nvarying float x\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::DuplicateVariable("x".into()));

    let err = load_program("surface\nAQSIS_V 1\nUSES 0\nsegment Code\n:1\n:1\n").unwrap_err();
    assert_eq!(err.kind, DiagnosticKind::DuplicateLabel(1));
}

#[test]
fn disassembly_reloads_to_the_same_program() {
    let program = load_program(MATTE).unwrap();
    let text = disassemble(&program);
    let again = load_program(&text).unwrap();
    assert_eq!(again, program);
}

#[test]
fn missing_file_reports_io_error() {
    let err = load_program_file("/definitely/not/here.slx").unwrap_err();
    assert!(matches!(err, LoadFileError::Io { .. }));
}

#[test]
fn float_label_ids_resolve() {
    let src = "surface\nAQSIS_V 1\nUSES 0\nsegment Data\nsegment Code\n\
               \tpushif 1\n\tjmp 1.0\n\tpushif 2\n:1.0\n\tdrop\n\tdrop\n";
    let program = load_program(src).unwrap();
    let code = &program.code;
    let label = code.label(1).unwrap();
    assert_eq!(label, Label { id: 1, position: 6 });
    assert_eq!(code.elements[3], ProgramElement::Label(label));
}

#[test]
fn fractional_label_id_is_rejected() {
    let src = "surface\nAQSIS_V 1\nUSES 0\nsegment Code\n\tjmp 1.5\n:1.5\n\tnop\n";
    let err = load_program(src).unwrap_err();
    assert!(matches!(err.kind, DiagnosticKind::InvalidOperand { expected: "label", .. }));
    assert_eq!(err.token, "1.5");
}
