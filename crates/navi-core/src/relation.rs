//! The subtype relation.

use crate::intersection::intersection;
use crate::number::same_number;
use crate::types::{NumberPrimitive, StringPrimitive, StructType, Type, ValueType};

/// Whether every value of `left` is also a value of `right`.
///
/// Decided structurally, member by member. A numeric range on the left may
/// be spread over several members of a union on the right (canonical forms
/// split int intervals around real intervals), so ranges are compared
/// against their intersection with the whole union.
pub fn is_subset_of(left: &Type, right: &Type) -> bool {
    match (left, right) {
        (Type::Never, _) => true,
        (_, Type::Any) => true,
        (_, Type::Never) => false,
        (Type::Any, _) => false,
        (Type::Union(u), _) => u.iter().all(|item| value_is_subset_of_type(item, right)),
        (Type::Value(v), _) => value_is_subset_of_type(v, right),
    }
}

/// Whether `a` and `b` share no value.
pub fn is_disjoint_with(a: &Type, b: &Type) -> bool {
    intersection(a, b).is_never()
}

fn value_is_subset_of_type(left: &ValueType, right: &Type) -> bool {
    match right {
        Type::Never => false,
        Type::Any => true,
        Type::Value(r) => value_is_subset_of(left, r),
        Type::Union(u) => {
            u.iter().any(|r| value_is_subset_of(left, r)) || range_is_covered_by(left, right)
        }
    }
}

/// Canonical forms are unique, so `left & right == left` is exact.
fn range_is_covered_by(left: &ValueType, right: &Type) -> bool {
    let ValueType::Number(n) = left else {
        return false;
    };
    if n.bounds().is_none() {
        return false;
    }
    let left = Type::Value(left.clone());
    intersection(&left, right) == left
}

pub(crate) fn value_is_subset_of(left: &ValueType, right: &ValueType) -> bool {
    match (left, right) {
        (ValueType::Number(l), ValueType::Number(r)) => number_is_subset_of(l, r),
        (ValueType::String(l), ValueType::String(r)) => string_is_subset_of(l, r),
        (ValueType::Struct(l), ValueType::Struct(r)) => is_struct_subset_of(l, r),
        _ => false,
    }
}

pub(crate) fn number_is_subset_of(left: &NumberPrimitive, right: &NumberPrimitive) -> bool {
    use NumberPrimitive::*;

    match (left, right) {
        (_, Number) => true,
        (Number, _) => false,
        (Literal(l), Literal(r)) => same_number(*l, *r),
        (Literal(l), r) => r.has(*l),
        (_, Literal(_)) => false,
        (IntInterval(l), IntInterval(r)) => r.min() <= l.min() && l.max() <= r.max(),
        (IntInterval(l), Interval(r)) => r.min() <= l.min() && l.max() <= r.max(),
        (Interval(_), IntInterval(_)) => false,
        (Interval(l), Interval(r)) => r.min() <= l.min() && l.max() <= r.max(),
    }
}

pub(crate) fn string_is_subset_of(left: &StringPrimitive, right: &StringPrimitive) -> bool {
    match (left, right) {
        (_, StringPrimitive::String) => true,
        (StringPrimitive::String, _) => false,
        (StringPrimitive::Literal(l), StringPrimitive::Literal(r)) => l == r,
    }
}

/// Same struct and every field a subset of its counterpart.
pub(crate) fn is_struct_subset_of(left: &StructType, right: &StructType) -> bool {
    left.is_same_struct(right)
        && left
            .fields()
            .iter()
            .zip(right.fields())
            .all(|(l, r)| is_subset_of(&l.ty, &r.ty))
}
