use crate::{Type, union, union2};

#[test]
fn never_is_identity() {
    let ty = Type::interval(0.0, 1.0);
    assert_eq!(union2(&ty, &Type::Never), ty);
    assert_eq!(union(Vec::new()), Type::Never);
    assert_eq!(union([Type::Never, Type::Never]), Type::Never);
}

#[test]
fn any_absorbs() {
    assert_eq!(union([Type::literal(1.0), Type::Any]), Type::Any);
    assert_eq!(union([Type::Any, Type::Never]), Type::Any);
}

#[test]
fn single_member_is_not_a_union() {
    let ty = union([Type::literal(1.0), Type::literal(1.0)]);
    assert!(matches!(ty, Type::Value(_)));
}

#[test]
fn nested_unions_flatten() {
    let inner = union([Type::literal(1.0), Type::string_literal("x")]);
    let outer = union([inner, Type::literal(2.0), Type::string()]);
    assert_eq!(outer.to_string(), "int(1..2) | string");
}

#[test]
fn mixed_kinds() {
    let ty = union([
        Type::structure("null", vec![]),
        Type::interval(f64::NEG_INFINITY, 0.0),
        Type::string_literal("none"),
    ]);
    assert_eq!(ty.to_string(), r#"-inf..0 | "none" | null"#);
    assert_eq!(ty.values().len(), 3);
}
