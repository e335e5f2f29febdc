use slvm_core::{AssignError, BitSet, ShaderVariable, VarClass, VarType, VariableArray, Vec3};

#[test]
fn uniform_ignores_index() {
    let mut v = ShaderVariable::uniform_float("Ka", 0.5);
    v.initialise(16);
    assert_eq!(v.len(), 1);
    assert_eq!(v.get_float(7), 0.5);
    v.set_float(2.0, 9);
    assert_eq!(v.get_float(0), 2.0);
}

#[test]
fn initialise_broadcasts_first_value() {
    let mut v = ShaderVariable::new("Kd", VarType::Color, VarClass::Varying);
    v.set_color(slvm_core::Color::new(1.0, 0.5, 0.25), 0);
    v.initialise(4);
    assert_eq!(v.len(), 4);
    for i in 0..4 {
        assert_eq!(v.get_color(i), slvm_core::Color::new(1.0, 0.5, 0.25));
    }
}

#[test]
fn uniform_source_broadcasts_under_mask() {
    let mut dst = ShaderVariable::varying_floats("x", &[0.0, 0.0, 0.0, 0.0]);
    let src = ShaderVariable::uniform_float("y", 3.0);
    let mask: BitSet = [true, false, true, false].into_iter().collect();
    dst.set_value_from(&src, &mask).unwrap();
    assert_eq!(dst.data, slvm_core::ShaderData::Float(vec![3.0, 0.0, 3.0, 0.0]));
}

#[test]
fn varying_into_uniform_is_rejected() {
    let mut dst = ShaderVariable::uniform_float("u", 1.0);
    let src = ShaderVariable::varying_floats("v", &[1.0, 2.0]);
    let err = dst.set_value_from(&src, &BitSet::new_full(2)).unwrap_err();
    assert!(matches!(err, AssignError::ClassMismatch { .. }));
    assert_eq!(dst.get_float(0), 1.0);
}

#[test]
fn point_accepts_vector_but_not_color() {
    let mut p = ShaderVariable::new("P", VarType::Point, VarClass::Uniform);
    let mut v = ShaderVariable::new("V", VarType::Vector, VarClass::Uniform);
    v.set_triple(Vec3::new(1.0, 2.0, 3.0), 0);
    p.set_value_from(&v, &BitSet::new_full(1)).unwrap();
    assert_eq!(p.get_triple(0), Vec3::new(1.0, 2.0, 3.0));

    let c = ShaderVariable::new("C", VarType::Color, VarClass::Uniform);
    let err = p.set_value_from(&c, &BitSet::new_full(1)).unwrap_err();
    assert_eq!(
        err,
        AssignError::TypeMismatch {
            name: "P".into(),
            expected: VarType::Point,
            found: VarType::Color,
        }
    );
}

#[test]
fn wrong_storage_reads_default() {
    let v = ShaderVariable::uniform_float("f", 4.0);
    assert_eq!(v.get_string(0), "");
    assert_eq!(v.get_triple(0), Vec3::ZERO);
}

#[test]
fn arrays_index_directly() {
    let mut arr = VariableArray::new("weights", VarType::Float, VarClass::Varying, 3);
    arr.initialise(4);
    arr.get_mut(1).unwrap().set_float(7.0, 2);
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.get(1).unwrap().get_float(2), 7.0);
    assert_eq!(arr.get(1).unwrap().name, "weights[1]");
    assert!(arr.get(3).is_none());
}

#[test]
fn reshape_reuses_matching_storage() {
    let mut v = ShaderVariable::new("tmp", VarType::Point, VarClass::Uniform);
    v.reshape(VarType::Normal, VarClass::Varying, 5);
    assert_eq!(v.ty, VarType::Normal);
    assert_eq!(v.len(), 5);
    v.reshape(VarType::String, VarClass::Uniform, 1);
    assert_eq!(v.get_string(0), "");
}
