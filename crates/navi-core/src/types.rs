//! The Navi type lattice.
//!
//! A [`Type`] is one of:
//! - `never` (bottom) and `any` (top)
//! - a single [`ValueType`]: a number, string or struct primitive
//! - a [`UnionType`] of at least two value types in canonical form
//!
//! All types are immutable. Shared parts live behind `Arc`, so cloning a
//! type is cheap and types can be handed across threads freely.

use std::fmt;
use std::sync::Arc;

use crate::canonical::canonicalize;
use crate::number::{is_integer, normalize_zero, same_number};

/// Coarse category of a type. Operations only combine matching kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Underlying {
    Never,
    Any,
    Number,
    String,
    Struct,
    Union,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Never,
    Any,
    Value(ValueType),
    Union(UnionType),
}

/// A non-union, non-`never`, non-`any` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Number(NumberPrimitive),
    String(StringPrimitive),
    Struct(StructType),
}

/// Number primitives.
///
/// `Literal` equality treats NaN as equal to NaN; see [`same_number`].
#[derive(Debug, Clone, Copy)]
pub enum NumberPrimitive {
    /// Every double, including NaN and both infinities.
    Number,
    Literal(f64),
    Interval(Interval),
    IntInterval(IntInterval),
}

/// All non-NaN doubles in `[min, max]`.
///
/// An infinite bound includes that infinity. Always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    min: f64,
    max: f64,
}

/// All finite integers in `[min, max]`.
///
/// Bounds are integers or infinities; the infinities themselves are never
/// members. Always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntInterval {
    min: f64,
    max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringPrimitive {
    String,
    Literal(Arc<str>),
}

/// A named record. Two struct types are the same struct iff their names and
/// field names (in order) match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    name: Arc<str>,
    fields: Arc<[StructField]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: Arc<str>,
    pub ty: Type,
}

/// Canonical union of two or more value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    items: Arc<[ValueType]>,
}

// Bounds are never NaN.
impl Eq for Interval {}
impl Eq for IntInterval {}

impl Interval {
    /// Caller guarantees `min < max`.
    pub(crate) fn new_unchecked(min: f64, max: f64) -> Self {
        debug_assert!(min < max, "interval bounds out of order: {min}..{max}");
        Self {
            min: normalize_zero(min),
            max: normalize_zero(max),
        }
    }

    #[inline]
    pub fn min(self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(self) -> f64 {
        self.max
    }

    #[inline]
    pub fn has(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl IntInterval {
    /// Caller guarantees integral or infinite bounds with `min < max`.
    pub(crate) fn new_unchecked(min: f64, max: f64) -> Self {
        debug_assert!(min < max, "int interval bounds out of order: {min}..{max}");
        debug_assert!(min.trunc() == min && max.trunc() == max);
        Self {
            min: normalize_zero(min),
            max: normalize_zero(max),
        }
    }

    #[inline]
    pub fn min(self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(self) -> f64 {
        self.max
    }

    #[inline]
    pub fn has(self, value: f64) -> bool {
        is_integer(value) && self.min <= value && value <= self.max
    }
}

impl PartialEq for NumberPrimitive {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NumberPrimitive::Number, NumberPrimitive::Number) => true,
            (NumberPrimitive::Literal(a), NumberPrimitive::Literal(b)) => same_number(*a, *b),
            (NumberPrimitive::Interval(a), NumberPrimitive::Interval(b)) => a == b,
            (NumberPrimitive::IntInterval(a), NumberPrimitive::IntInterval(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for NumberPrimitive {}

impl NumberPrimitive {
    /// The real interval `[min, max]`. A degenerate interval is a literal.
    ///
    /// Returns `None` when the interval is empty.
    pub fn interval(min: f64, max: f64) -> Option<Self> {
        if !(min <= max) {
            return None;
        }
        if min == max {
            return Some(NumberPrimitive::Literal(min));
        }
        Some(NumberPrimitive::Interval(Interval::new_unchecked(min, max)))
    }

    /// The integers in `[min, max]`. Fractional bounds are narrowed inwards.
    ///
    /// Returns `None` when no integer lies in the range.
    pub fn int_interval(min: f64, max: f64) -> Option<Self> {
        let min = min.ceil();
        let max = max.floor();
        if !(min <= max) {
            return None;
        }
        if min == max {
            return min
                .is_finite()
                .then_some(NumberPrimitive::Literal(normalize_zero(min)));
        }
        Some(NumberPrimitive::IntInterval(IntInterval::new_unchecked(
            min, max,
        )))
    }

    /// Whether `value` is a member of this primitive.
    pub fn has(&self, value: f64) -> bool {
        match self {
            NumberPrimitive::Number => true,
            NumberPrimitive::Literal(v) => same_number(*v, value),
            NumberPrimitive::Interval(i) => i.has(value),
            NumberPrimitive::IntInterval(i) => i.has(value),
        }
    }

    /// Lower and upper bound of a range primitive.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            NumberPrimitive::Interval(i) => Some((i.min, i.max)),
            NumberPrimitive::IntInterval(i) => Some((i.min, i.max)),
            NumberPrimitive::Number | NumberPrimitive::Literal(_) => None,
        }
    }
}

impl StructType {
    pub fn new(name: impl Into<Arc<str>>, fields: Vec<StructField>) -> Self {
        Self {
            name: name.into(),
            fields: fields.into(),
        }
    }

    /// A struct without fields, e.g. `null`.
    pub fn unit(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields
            .iter()
            .find(|f| &*f.name == name)
            .map(|f| &f.ty)
    }

    /// Same name and same field names in the same order.
    pub fn is_same_struct(&self, other: &StructType) -> bool {
        self.name == other.name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a.name == b.name)
    }
}

impl StructField {
    pub fn new(name: impl Into<Arc<str>>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl UnionType {
    /// Caller guarantees canonical items, at least two of them.
    pub(crate) fn new_unchecked(items: Vec<ValueType>) -> Self {
        debug_assert!(items.len() >= 2);
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &[ValueType] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueType> {
        self.items.iter()
    }
}

impl ValueType {
    pub fn underlying(&self) -> Underlying {
        match self {
            ValueType::Number(_) => Underlying::Number,
            ValueType::String(_) => Underlying::String,
            ValueType::Struct(_) => Underlying::Struct,
        }
    }
}

impl Type {
    pub fn number() -> Self {
        Type::Value(ValueType::Number(NumberPrimitive::Number))
    }

    pub fn string() -> Self {
        Type::Value(ValueType::String(StringPrimitive::String))
    }

    pub fn literal(value: f64) -> Self {
        Type::Value(ValueType::Number(NumberPrimitive::Literal(value)))
    }

    pub fn string_literal(value: impl Into<Arc<str>>) -> Self {
        Type::Value(ValueType::String(StringPrimitive::Literal(value.into())))
    }

    /// Real interval, `never` when empty.
    pub fn interval(min: f64, max: f64) -> Self {
        NumberPrimitive::interval(min, max).map_or(Type::Never, Type::from)
    }

    /// Integer interval, `never` when it contains no integer.
    pub fn int_interval(min: f64, max: f64) -> Self {
        NumberPrimitive::int_interval(min, max).map_or(Type::Never, Type::from)
    }

    /// All finite integers.
    pub fn int() -> Self {
        Type::int_interval(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// A struct instance. A `never` field makes the whole struct `never`.
    pub fn structure(name: impl Into<Arc<str>>, fields: Vec<StructField>) -> Self {
        if fields.iter().any(|f| f.ty.is_never()) {
            return Type::Never;
        }
        Type::Value(ValueType::Struct(StructType::new(name, fields)))
    }

    /// Builds a type from the output of [`canonicalize`].
    pub fn from_canonical(mut items: Vec<ValueType>) -> Self {
        match items.len() {
            0 => Type::Never,
            1 => Type::Value(items.remove(0)),
            _ => Type::Union(UnionType::new_unchecked(items)),
        }
    }

    /// Union of arbitrary value types.
    pub fn from_values(items: Vec<ValueType>) -> Self {
        Type::from_canonical(canonicalize(items))
    }

    pub fn underlying(&self) -> Underlying {
        match self {
            Type::Never => Underlying::Never,
            Type::Any => Underlying::Any,
            Type::Value(v) => v.underlying(),
            Type::Union(_) => Underlying::Union,
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Type::Never)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    /// The value types this type is made of. Empty for `never` and `any`.
    pub fn values(&self) -> &[ValueType] {
        match self {
            Type::Never | Type::Any => &[],
            Type::Value(v) => std::slice::from_ref(v),
            Type::Union(u) => u.items(),
        }
    }

    /// Stable identifier: two types are equal iff their ids are equal.
    pub fn type_id(&self) -> String {
        self.to_string()
    }
}

impl From<ValueType> for Type {
    fn from(value: ValueType) -> Self {
        Type::Value(value)
    }
}

impl From<NumberPrimitive> for Type {
    fn from(value: NumberPrimitive) -> Self {
        Type::Value(ValueType::Number(value))
    }
}

impl From<StringPrimitive> for Type {
    fn from(value: StringPrimitive) -> Self {
        Type::Value(ValueType::String(value))
    }
}

impl From<StructType> for Type {
    fn from(value: StructType) -> Self {
        Type::Value(ValueType::Struct(value))
    }
}

/// Writes a number the way Navi source spells it.
pub(crate) fn fmt_number(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value == f64::INFINITY {
        f.write_str("inf")
    } else if value == f64::NEG_INFINITY {
        f.write_str("-inf")
    } else if value == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for NumberPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberPrimitive::Number => f.write_str("number"),
            NumberPrimitive::Literal(v) => fmt_number(*v, f),
            NumberPrimitive::Interval(i) => {
                fmt_number(i.min, f)?;
                f.write_str("..")?;
                fmt_number(i.max, f)
            }
            NumberPrimitive::IntInterval(i) => {
                f.write_str("int(")?;
                fmt_number(i.min, f)?;
                f.write_str("..")?;
                fmt_number(i.max, f)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for StringPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringPrimitive::String => f.write_str("string"),
            StringPrimitive::Literal(s) => write!(f, "{:?}", &**s),
        }
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.fields.is_empty() {
            return Ok(());
        }
        f.write_str(" { ")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field.name, field.ty)?;
        }
        f.write_str(" }")
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Number(n) => n.fmt(f),
            ValueType::String(s) => s.fmt(f),
            ValueType::Struct(s) => s.fmt(f),
        }
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Never => f.write_str("never"),
            Type::Any => f.write_str("any"),
            Type::Value(v) => v.fmt(f),
            Type::Union(u) => u.fmt(f),
        }
    }
}
