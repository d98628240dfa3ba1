use crate::{StructField, Type, is_disjoint_with, is_subset_of, union};

fn point(x: Type, y: Type) -> Type {
    Type::structure(
        "Point",
        vec![StructField::new("x", x), StructField::new("y", y)],
    )
}

#[test]
fn never_and_any() {
    let ty = Type::literal(1.0);
    assert!(is_subset_of(&Type::Never, &ty));
    assert!(is_subset_of(&Type::Never, &Type::Never));
    assert!(!is_subset_of(&ty, &Type::Never));
    assert!(is_subset_of(&ty, &Type::Any));
    assert!(is_subset_of(&Type::Any, &Type::Any));
    assert!(!is_subset_of(&Type::Any, &Type::number()));
}

#[test]
fn literal_in_int_interval() {
    let range = Type::int_interval(0.0, 10.0);
    assert!(is_subset_of(&Type::literal(5.0), &range));
    assert!(!is_subset_of(&range, &Type::literal(5.0)));
    assert!(!is_subset_of(&Type::literal(5.5), &range));
}

#[test]
fn interval_containment() {
    let outer = Type::interval(0.0, 10.0);
    assert!(is_subset_of(&Type::interval(2.0, 3.0), &outer));
    assert!(is_subset_of(&Type::int_interval(0.0, 10.0), &outer));
    assert!(!is_subset_of(&outer, &Type::int_interval(0.0, 10.0)));
    assert!(!is_subset_of(&Type::interval(-1.0, 3.0), &outer));
}

#[test]
fn infinite_literals() {
    let unbounded = Type::interval(0.0, f64::INFINITY);
    assert!(is_subset_of(&Type::literal(f64::INFINITY), &unbounded));
    assert!(!is_subset_of(&Type::literal(f64::INFINITY), &Type::int()));
    assert!(!is_subset_of(&Type::literal(f64::NAN), &unbounded));
    assert!(is_subset_of(&Type::literal(f64::NAN), &Type::literal(f64::NAN)));
    assert!(is_subset_of(&Type::literal(f64::NAN), &Type::number()));
}

#[test]
fn top_primitives() {
    assert!(is_subset_of(&Type::interval(0.0, 1.0), &Type::number()));
    assert!(!is_subset_of(&Type::number(), &Type::interval(0.0, 1.0)));
    assert!(is_subset_of(&Type::string_literal("a"), &Type::string()));
    assert!(!is_subset_of(&Type::string(), &Type::string_literal("a")));
}

#[test]
fn mismatched_kinds() {
    assert!(!is_subset_of(&Type::literal(1.0), &Type::string()));
    assert!(!is_subset_of(&Type::string(), &Type::number()));
    assert!(!is_subset_of(&point(Type::number(), Type::number()), &Type::number()));
}

#[test]
fn unions() {
    let left = union([Type::literal(1.0), Type::string_literal("a")]);
    let right = union([Type::int(), Type::string()]);
    assert!(is_subset_of(&left, &right));
    assert!(!is_subset_of(&right, &left));
    assert!(is_subset_of(&Type::literal(3.0), &right));
    assert!(!is_subset_of(&Type::literal(0.5), &right));
}

#[test]
fn range_spread_over_union_members() {
    let ints = Type::int_interval(0.0, 10.0);
    let split = union([ints.clone(), Type::interval(2.5, 7.5)]);
    assert_eq!(split.to_string(), "int(0..2) | 2.5..7.5 | int(8..10)");
    assert!(is_subset_of(&ints, &split));
    assert!(!is_subset_of(&Type::int_interval(0.0, 11.0), &split));

    let halves = union([
        Type::int_interval(1.0, f64::INFINITY),
        Type::interval(f64::NEG_INFINITY, 0.0),
    ]);
    assert!(is_subset_of(&Type::int(), &halves));
    assert!(!is_subset_of(&Type::interval(-1.0, 1.0), &halves));
}

#[test]
fn structs() {
    let narrow = point(Type::literal(1.0), Type::int());
    let wide = point(Type::number(), Type::number());
    assert!(is_subset_of(&narrow, &wide));
    assert!(!is_subset_of(&wide, &narrow));

    let other = Type::structure(
        "Vector",
        vec![
            StructField::new("x", Type::number()),
            StructField::new("y", Type::number()),
        ],
    );
    assert!(!is_subset_of(&narrow, &other));
}

#[test]
fn disjoint() {
    assert!(is_disjoint_with(&Type::literal(1.0), &Type::string()));
    assert!(is_disjoint_with(
        &Type::int_interval(0.0, 3.0),
        &Type::interval(3.5, 3.75)
    ));
    assert!(!is_disjoint_with(&Type::int(), &Type::interval(0.5, 1.5)));
    assert!(!is_disjoint_with(&Type::Any, &Type::string()));
    assert!(is_disjoint_with(&Type::Never, &Type::Any));
}
