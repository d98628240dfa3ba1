//! Set difference.
//!
//! Not every difference is representable: removing a single point from a
//! real interval would need an open bound, and removing a literal from
//! `string` would need a negative type. In those cases the left side is
//! returned unchanged, which over-approximates the exact result.

use crate::relation::{is_struct_subset_of, number_is_subset_of, string_is_subset_of};
use crate::types::{NumberPrimitive, Type, ValueType};
use crate::union::union;

/// `a` minus everything `b` covers.
pub fn without(a: &Type, b: &Type) -> Type {
    match (a, b) {
        (_, Type::Never) => a.clone(),
        (Type::Never, _) | (_, Type::Any) => Type::Never,
        (Type::Any, _) => Type::Any,
        (_, Type::Value(v)) => without_value(a, v),
        (_, Type::Union(u)) => u.iter().fold(a.clone(), |acc, item| without_value(&acc, item)),
    }
}

fn without_value(a: &Type, b: &ValueType) -> Type {
    match a {
        Type::Never => Type::Never,
        Type::Any => Type::Any,
        Type::Value(x) => without_values(x, b),
        Type::Union(u) => union(u.iter().map(|item| without_values(item, b))),
    }
}

fn without_values(a: &ValueType, b: &ValueType) -> Type {
    match (a, b) {
        (ValueType::Number(x), ValueType::Number(y)) => without_numbers(x, y),
        (ValueType::String(x), ValueType::String(y)) => {
            if string_is_subset_of(x, y) {
                Type::Never
            } else {
                // `string` minus a literal stays `string`.
                Type::from(x.clone())
            }
        }
        (ValueType::Struct(x), ValueType::Struct(y)) => {
            if is_struct_subset_of(x, y) {
                Type::Never
            } else {
                Type::from(x.clone())
            }
        }
        _ => Type::Value(a.clone()),
    }
}

fn without_numbers(a: &NumberPrimitive, b: &NumberPrimitive) -> Type {
    use NumberPrimitive::*;

    if number_is_subset_of(a, b) {
        return Type::Never;
    }

    match (a, b) {
        // `number` is NaN plus every real.
        (Number, Literal(v)) if v.is_nan() => {
            Type::interval(f64::NEG_INFINITY, f64::INFINITY)
        }
        (Number, Interval(j)) => {
            let mut pieces = vec![Type::literal(f64::NAN)];
            if j.min() > f64::NEG_INFINITY {
                pieces.push(Type::interval(f64::NEG_INFINITY, j.min()));
            }
            if j.max() < f64::INFINITY {
                pieces.push(Type::interval(j.max(), f64::INFINITY));
            }
            union(pieces)
        }
        (IntInterval(i), Literal(v)) => {
            if i.has(*v) {
                remove_integers(a, i.min(), i.max(), *v, *v)
            } else {
                Type::from(*a)
            }
        }
        (IntInterval(i), Interval(j)) => {
            remove_integers(a, i.min(), i.max(), j.min().ceil(), j.max().floor())
        }
        (IntInterval(i), IntInterval(j)) => {
            remove_integers(a, i.min(), i.max(), j.min(), j.max())
        }
        (Interval(i), Interval(j)) => {
            if j.max() < i.min() || i.max() < j.min() {
                return Type::from(*a);
            }
            // The pieces keep the cut point, which was removed.
            let mut pieces = Vec::new();
            if i.min() < j.min() {
                pieces.push(Type::interval(i.min(), j.min()));
            }
            if j.max() < i.max() {
                pieces.push(Type::interval(j.max(), i.max()));
            }
            union(pieces)
        }
        _ => Type::from(*a),
    }
}

/// Removes the integers `first..=last` from the int interval `[min, max]`.
fn remove_integers(original: &NumberPrimitive, min: f64, max: f64, first: f64, last: f64) -> Type {
    if first > last || last < min || max < first {
        return Type::from(*original);
    }
    union([
        Type::int_interval(min, first - 1.0),
        Type::int_interval(last + 1.0, max),
    ])
}
