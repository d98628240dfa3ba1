use crate::{NumberPrimitive, StructField, Type, Underlying, union};

#[test]
fn display_primitives() {
    assert_eq!(Type::Never.to_string(), "never");
    assert_eq!(Type::Any.to_string(), "any");
    assert_eq!(Type::number().to_string(), "number");
    assert_eq!(Type::string().to_string(), "string");
    assert_eq!(Type::literal(1.5).to_string(), "1.5");
    assert_eq!(Type::literal(-0.0).to_string(), "0");
    assert_eq!(Type::literal(f64::NAN).to_string(), "NaN");
    assert_eq!(Type::literal(f64::NEG_INFINITY).to_string(), "-inf");
    assert_eq!(Type::interval(0.0, f64::INFINITY).to_string(), "0..inf");
    assert_eq!(Type::int().to_string(), "int(-inf..inf)");
    assert_eq!(Type::string_literal("a\"b").to_string(), r#""a\"b""#);
}

#[test]
fn display_struct() {
    let point = Type::structure(
        "Point",
        vec![
            StructField::new("x", Type::int()),
            StructField::new("y", Type::literal(2.0)),
        ],
    );
    assert_eq!(point.to_string(), "Point { x: int(-inf..inf), y: 2 }");
    assert_eq!(Type::structure("null", vec![]).to_string(), "null");
}

#[test]
fn display_union() {
    let ty = union([Type::string_literal("b"), Type::literal(1.0), Type::string_literal("a")]);
    assert_eq!(ty.to_string(), r#"1 | "a" | "b""#);
    assert_eq!(ty.underlying(), Underlying::Union);
}

#[test]
fn degenerate_interval_is_literal() {
    assert_eq!(Type::interval(3.0, 3.0), Type::literal(3.0));
    assert_eq!(Type::int_interval(3.0, 3.0), Type::literal(3.0));
    assert_eq!(Type::int_interval(2.5, 3.5), Type::literal(3.0));
}

#[test]
fn empty_interval_is_never() {
    assert_eq!(Type::interval(2.0, 1.0), Type::Never);
    assert_eq!(Type::interval(f64::NAN, 1.0), Type::Never);
    assert_eq!(Type::int_interval(0.2, 0.8), Type::Never);
    assert_eq!(Type::int_interval(f64::INFINITY, f64::INFINITY), Type::Never);
}

#[test]
fn int_interval_narrows_fractional_bounds() {
    assert_eq!(Type::int_interval(0.5, 10.5).to_string(), "int(1..10)");
    assert_eq!(
        Type::int_interval(f64::NEG_INFINITY, 0.5).to_string(),
        "int(-inf..0)"
    );
}

#[test]
fn interval_membership() {
    let real = NumberPrimitive::interval(0.0, f64::INFINITY).unwrap();
    assert!(real.has(0.0));
    assert!(real.has(f64::INFINITY));
    assert!(!real.has(f64::NAN));

    let int = NumberPrimitive::int_interval(0.0, f64::INFINITY).unwrap();
    assert!(int.has(7.0));
    assert!(!int.has(7.5));
    assert!(!int.has(f64::INFINITY));
}

#[test]
fn nan_literals_are_equal() {
    assert_eq!(Type::literal(f64::NAN), Type::literal(f64::NAN));
    assert_ne!(Type::literal(f64::NAN), Type::literal(0.0));
}

#[test]
fn struct_with_never_field_is_never() {
    let ty = Type::structure("Box", vec![StructField::new("value", Type::Never)]);
    assert_eq!(ty, Type::Never);
}

#[test]
fn type_id_matches_display() {
    let ty = union([Type::literal(1.0), Type::string()]);
    assert_eq!(ty.type_id(), "1 | string");
}
