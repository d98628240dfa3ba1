use crate::number::{max_number, min_number};
use crate::types::{NumberPrimitive, StringPrimitive, StructField, StructType, Type, ValueType};
use crate::union::union;

/// The values shared by `a` and `b`.
///
/// Distributes over unions: `(A | B) & C = (A & C) | (B & C)`.
/// Values of different kinds never intersect.
pub fn intersection(a: &Type, b: &Type) -> Type {
    match (a, b) {
        (Type::Never, _) | (_, Type::Never) => Type::Never,
        (Type::Any, other) | (other, Type::Any) => other.clone(),
        (Type::Union(u), other) | (other, Type::Union(u)) => {
            union(u.iter().map(|item| intersect_value_with(item, other)))
        }
        (Type::Value(x), Type::Value(y)) => intersect_values(x, y),
    }
}

fn intersect_value_with(item: &ValueType, other: &Type) -> Type {
    match other {
        Type::Never => Type::Never,
        Type::Any => Type::Value(item.clone()),
        Type::Value(o) => intersect_values(item, o),
        Type::Union(u) => union(u.iter().map(|o| intersect_values(item, o))),
    }
}

fn intersect_values(a: &ValueType, b: &ValueType) -> Type {
    match (a, b) {
        (ValueType::Number(x), ValueType::Number(y)) => intersect_numbers(x, y),
        (ValueType::String(x), ValueType::String(y)) => intersect_strings(x, y),
        (ValueType::Struct(x), ValueType::Struct(y)) => intersect_structs(x, y),
        _ => Type::Never,
    }
}

fn intersect_numbers(a: &NumberPrimitive, b: &NumberPrimitive) -> Type {
    use NumberPrimitive::*;

    match (a, b) {
        (Number, other) | (other, Number) => Type::from(*other),
        (Literal(v), other) | (other, Literal(v)) => {
            if other.has(*v) {
                Type::literal(*v)
            } else {
                Type::Never
            }
        }
        (Interval(x), Interval(y)) => Type::interval(
            max_number(x.min(), y.min()),
            min_number(x.max(), y.max()),
        ),
        (IntInterval(x), Interval(y)) | (Interval(y), IntInterval(x)) => Type::int_interval(
            max_number(x.min(), y.min()),
            min_number(x.max(), y.max()),
        ),
        (IntInterval(x), IntInterval(y)) => Type::int_interval(
            max_number(x.min(), y.min()),
            min_number(x.max(), y.max()),
        ),
    }
}

fn intersect_strings(a: &StringPrimitive, b: &StringPrimitive) -> Type {
    match (a, b) {
        (StringPrimitive::String, other) | (other, StringPrimitive::String) => {
            Type::from(other.clone())
        }
        (StringPrimitive::Literal(x), StringPrimitive::Literal(y)) => {
            if x == y {
                Type::from(a.clone())
            } else {
                Type::Never
            }
        }
    }
}

fn intersect_structs(a: &StructType, b: &StructType) -> Type {
    if !a.is_same_struct(b) {
        return Type::Never;
    }

    let mut fields = Vec::with_capacity(a.fields().len());
    for (x, y) in a.fields().iter().zip(b.fields()) {
        let ty = intersection(&x.ty, &y.ty);
        if ty.is_never() {
            return Type::Never;
        }
        fields.push(StructField::new(x.name.clone(), ty));
    }
    Type::from(StructType::new(a.name(), fields))
}
