//! Builtin functions over number and string types.
//!
//! Each function is written against single primitives. [`wrap_unary`] and
//! [`wrap_binary`] lift it to arbitrary types: `never` in gives `never` out,
//! and unions are handled member by member (the cross product for binary
//! functions) with the results unioned.

use navi_core::number::{is_integer, min_number, round_half_up};
use navi_core::{NumberPrimitive, StringPrimitive, Type, ValueType, union};

use crate::typedef::TypeDefinitions;

/// A family of primitives that builtins operate on.
pub trait PrimitiveKind {
    type Primitive;

    /// The primitive that covers every value of the kind. Stands in for `any`.
    fn top() -> Self::Primitive;

    /// `None` for values of other kinds.
    fn extract(value: &ValueType) -> Option<Self::Primitive>;
}

pub struct NumberKind;

pub struct StringKind;

impl PrimitiveKind for NumberKind {
    type Primitive = NumberPrimitive;

    fn top() -> NumberPrimitive {
        NumberPrimitive::Number
    }

    fn extract(value: &ValueType) -> Option<NumberPrimitive> {
        match value {
            ValueType::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl PrimitiveKind for StringKind {
    type Primitive = StringPrimitive;

    fn top() -> StringPrimitive {
        StringPrimitive::String
    }

    fn extract(value: &ValueType) -> Option<StringPrimitive> {
        match value {
            ValueType::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

fn members<K: PrimitiveKind>(ty: &Type) -> Vec<K::Primitive> {
    match ty {
        Type::Never => Vec::new(),
        Type::Any => vec![K::top()],
        _ => ty.values().iter().filter_map(K::extract).collect(),
    }
}

pub fn wrap_unary<K, F>(a: &Type, f: F) -> Type
where
    K: PrimitiveKind,
    F: Fn(&K::Primitive) -> Type,
{
    union(members::<K>(a).iter().map(f))
}

pub fn wrap_binary<K, F>(a: &Type, b: &Type, f: F) -> Type
where
    K: PrimitiveKind,
    F: Fn(&K::Primitive, &K::Primitive) -> Type,
{
    let left = members::<K>(a);
    let right = members::<K>(b);
    let f = &f;
    union(
        left.iter()
            .flat_map(|x| right.iter().map(move |y| f(x, y))),
    )
}

/// Registers every builtin with its parameter types.
pub(crate) fn register(defs: &mut TypeDefinitions) {
    let numeric: [(&str, fn(&Type, &Type) -> Type); 5] = [
        ("add", add),
        ("subtract", subtract),
        ("min", minimum),
        ("max", maximum),
        ("multiply", multiply),
    ];
    for (name, f) in numeric {
        defs.define_builtin(name, vec![Type::number(); 2], binary(f));
    }
    defs.define_builtin("negate", vec![Type::number()], unary(negate));
    defs.define_builtin("round", vec![Type::number()], unary(round));
    defs.define_builtin("reciprocal", vec![Type::number()], unary(reciprocal));
    defs.define_builtin("concat", vec![Type::string(); 2], binary(concat));
}

fn unary(f: fn(&Type) -> Type) -> impl Fn(&[Type]) -> Type + Send + Sync + 'static {
    move |args: &[Type]| match args {
        [a] => f(a),
        _ => Type::Never,
    }
}

fn binary(f: fn(&Type, &Type) -> Type) -> impl Fn(&[Type]) -> Type + Send + Sync + 'static {
    move |args: &[Type]| match args {
        [a, b] => f(a, b),
        _ => Type::Never,
    }
}

// ============================================================================
// Numbers
// ============================================================================

pub fn add(a: &Type, b: &Type) -> Type {
    wrap_binary::<NumberKind, _>(a, b, add_numbers)
}

pub fn subtract(a: &Type, b: &Type) -> Type {
    add(a, &negate(b))
}

pub fn negate(a: &Type) -> Type {
    wrap_unary::<NumberKind, _>(a, |n| match *n {
        NumberPrimitive::Number => Type::number(),
        NumberPrimitive::Literal(v) => Type::literal(-v),
        NumberPrimitive::Interval(i) => Type::interval(-i.max(), -i.min()),
        NumberPrimitive::IntInterval(i) => Type::int_interval(-i.max(), -i.min()),
    })
}

pub fn round(a: &Type) -> Type {
    wrap_unary::<NumberKind, _>(a, |n| match *n {
        NumberPrimitive::Number => union([
            Type::literal(f64::NAN),
            Type::literal(f64::NEG_INFINITY),
            Type::literal(f64::INFINITY),
            Type::int(),
        ]),
        NumberPrimitive::Literal(v) => Type::literal(round_half_up(v)),
        NumberPrimitive::IntInterval(_) => Type::from(*n),
        NumberPrimitive::Interval(i) => {
            let min = round_half_up(i.min());
            let max = round_half_up(i.max());
            let mut pieces = vec![Type::int_interval(min, max)];
            if min == f64::NEG_INFINITY {
                pieces.push(Type::literal(f64::NEG_INFINITY));
            }
            if max == f64::INFINITY {
                pieces.push(Type::literal(f64::INFINITY));
            }
            union(pieces)
        }
    })
}

/// `1 / x`. Zero has no sign here, so it maps to both infinities.
pub fn reciprocal(a: &Type) -> Type {
    wrap_unary::<NumberKind, _>(a, reciprocal_number)
}

fn reciprocal_number(n: &NumberPrimitive) -> Type {
    use NumberPrimitive::*;

    // Int intervals skip the open gap around zero.
    let (min, max, gap) = match *n {
        Number => return Type::number(),
        Literal(v) if v.is_nan() => return Type::literal(f64::NAN),
        Literal(v) => (v, v, 0.0),
        Interval(i) => (i.min(), i.max(), 0.0),
        IntInterval(i) => (i.min(), i.max(), 1.0),
    };

    let mut pieces = Vec::new();
    if min <= 0.0 && 0.0 <= max {
        pieces.push(Type::literal(f64::NEG_INFINITY));
        pieces.push(Type::literal(f64::INFINITY));
    }
    if min < 0.0 {
        let upper = if max < 0.0 { max } else if gap > 0.0 { -gap } else { -0.0 };
        pieces.push(Type::interval(1.0 / upper, 1.0 / min));
    }
    if max > 0.0 {
        let lower = if min > 0.0 { min } else if gap > 0.0 { gap } else { 0.0 };
        pieces.push(Type::interval(1.0 / max, 1.0 / lower));
    }
    union(pieces)
}

pub fn minimum(a: &Type, b: &Type) -> Type {
    wrap_binary::<NumberKind, _>(a, b, minimum_numbers)
}

pub fn maximum(a: &Type, b: &Type) -> Type {
    negate(&minimum(&negate(a), &negate(b)))
}

pub fn multiply(a: &Type, b: &Type) -> Type {
    wrap_binary::<NumberKind, _>(a, b, multiply_numbers)
}

// Real intervals and `number` contain the infinities, int intervals do not.
fn contains_neg_infinity(n: &NumberPrimitive) -> bool {
    n.has(f64::NEG_INFINITY)
}

fn contains_infinity(n: &NumberPrimitive) -> bool {
    n.has(f64::INFINITY)
}

fn add_numbers(a: &NumberPrimitive, b: &NumberPrimitive) -> Type {
    use NumberPrimitive::*;

    match (a, b) {
        (Literal(x), Literal(y)) => Type::literal(x + y),
        (Literal(v), other) | (other, Literal(v)) => add_literal(*v, other),
        (Number, _) | (_, Number) => Type::number(),
        _ => {
            let (Some((a_min, a_max)), Some((b_min, b_max))) = (a.bounds(), b.bounds()) else {
                return Type::number();
            };
            let (min, max) = (a_min + b_min, a_max + b_max);
            let sum = if matches!((a, b), (IntInterval(_), IntInterval(_))) {
                Type::int_interval(min, max)
            } else {
                Type::interval(min, max)
            };
            // -inf + inf
            let nan = (contains_neg_infinity(a) && contains_infinity(b))
                || (contains_infinity(a) && contains_neg_infinity(b));
            if nan {
                union([sum, Type::literal(f64::NAN)])
            } else {
                sum
            }
        }
    }
}

fn add_literal(v: f64, other: &NumberPrimitive) -> Type {
    if v.is_nan() {
        return Type::literal(v);
    }
    if v == f64::INFINITY {
        return if contains_neg_infinity(other) {
            union([Type::literal(f64::NAN), Type::literal(f64::INFINITY)])
        } else {
            Type::literal(v)
        };
    }
    if v == f64::NEG_INFINITY {
        return if contains_infinity(other) {
            union([Type::literal(f64::NAN), Type::literal(f64::NEG_INFINITY)])
        } else {
            Type::literal(v)
        };
    }

    match *other {
        NumberPrimitive::Number => Type::number(),
        NumberPrimitive::Literal(w) => Type::literal(v + w),
        NumberPrimitive::IntInterval(i) if is_integer(v) => {
            Type::int_interval(v + i.min(), v + i.max())
        }
        NumberPrimitive::IntInterval(i) => Type::interval(v + i.min(), v + i.max()),
        NumberPrimitive::Interval(i) => Type::interval(v + i.min(), v + i.max()),
    }
}

fn minimum_numbers(a: &NumberPrimitive, b: &NumberPrimitive) -> Type {
    use NumberPrimitive::*;

    match (a, b) {
        (Literal(v), other) | (other, Literal(v)) => minimum_literal(*v, other),
        (Number, other) | (other, Number) => minimum_number(other),
        (IntInterval(i), other) | (other, IntInterval(i)) => {
            let Some((other_min, other_max)) = other.bounds() else {
                return Type::number();
            };
            minimum_int_interval(
                (i.min(), i.max()),
                (other_min, other_max),
                matches!(other, IntInterval(_)),
            )
        }
        (Interval(x), Interval(y)) => Type::interval(
            min_number(x.min(), y.min()),
            min_number(x.max(), y.max()),
        ),
    }
}

fn minimum_literal(v: f64, other: &NumberPrimitive) -> Type {
    if v.is_nan() {
        return Type::literal(v);
    }
    if v == f64::INFINITY {
        return Type::from(*other);
    }

    let (min, max) = match *other {
        NumberPrimitive::Literal(w) => return Type::literal(min_number(v, w)),
        NumberPrimitive::Number => {
            return union([
                Type::literal(f64::NAN),
                Type::interval(f64::NEG_INFINITY, v),
            ]);
        }
        NumberPrimitive::Interval(i) => (i.min(), i.max()),
        NumberPrimitive::IntInterval(i) => (i.min(), i.max()),
    };

    if v <= min {
        return Type::literal(v);
    }
    if max <= v {
        return Type::from(*other);
    }

    match other {
        NumberPrimitive::IntInterval(_) => {
            let floor = v.floor();
            if floor == v {
                Type::int_interval(min, v)
            } else {
                union([Type::int_interval(min, floor), Type::literal(v)])
            }
        }
        _ => Type::interval(min, v),
    }
}

fn minimum_number(other: &NumberPrimitive) -> Type {
    match other.bounds() {
        Some((_, max)) if max != f64::INFINITY => union([
            Type::literal(f64::NAN),
            Type::interval(f64::NEG_INFINITY, max),
        ]),
        _ => Type::number(),
    }
}

/// `min` of the integers in `ints` and the range `other`.
fn minimum_int_interval(ints: (f64, f64), other: (f64, f64), other_is_int: bool) -> Type {
    let (a_min, a_max) = ints;
    let (b_min, b_max) = other;

    if a_max <= b_min {
        return Type::int_interval(a_min, a_max);
    }
    if b_max <= a_min {
        return if other_is_int {
            Type::int_interval(b_min, b_max)
        } else {
            Type::interval(b_min, b_max)
        };
    }
    if other_is_int {
        return Type::int_interval(min_number(a_min, b_min), min_number(a_max, b_max));
    }
    if b_min <= a_min {
        return Type::interval(b_min, min_number(a_max, b_max));
    }

    // The integers reach below the real range: small results are integers,
    // the rest come from the real range.
    let int_max = if is_integer(b_min) {
        b_min - 1.0
    } else {
        b_min.floor()
    };
    union([
        Type::int_interval(a_min, int_max),
        Type::interval(b_min, min_number(a_max, b_max)),
    ])
}

fn multiply_numbers(a: &NumberPrimitive, b: &NumberPrimitive) -> Type {
    use NumberPrimitive::*;

    if let (Literal(x), Literal(y)) = (a, b) {
        return Type::literal(x * y);
    }
    if [a, b].iter().any(|n| matches!(n, Literal(v) if v.is_nan())) {
        return Type::literal(f64::NAN);
    }

    let range = |n: &NumberPrimitive| match *n {
        Literal(v) => Some((v, v)),
        _ => n.bounds(),
    };
    let (Some((a_min, a_max)), Some((b_min, b_max))) = (range(a), range(b)) else {
        return Type::number();
    };
    if ![a_min, a_max, b_min, b_max].iter().all(|v| v.is_finite()) {
        return Type::number();
    }
    if [a, b].iter().any(|n| matches!(n, Literal(v) if *v == 0.0)) {
        return Type::literal(0.0);
    }

    let corners = [a_min * b_min, a_min * b_max, a_max * b_min, a_max * b_max];
    let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let integral = |n: &NumberPrimitive| match *n {
        Literal(v) => is_integer(v),
        IntInterval(_) => true,
        _ => false,
    };
    if integral(a) && integral(b) {
        Type::int_interval(min, max)
    } else {
        Type::interval(min, max)
    }
}

// ============================================================================
// Strings
// ============================================================================

pub fn concat(a: &Type, b: &Type) -> Type {
    wrap_binary::<StringKind, _>(a, b, |x, y| match (x, y) {
        (StringPrimitive::Literal(x), StringPrimitive::Literal(y)) => {
            Type::string_literal(format!("{x}{y}"))
        }
        _ => Type::string(),
    })
}
