//! Canonical form of a set of value types.
//!
//! Every higher operation relies on this: two unions that denote the same
//! numbers and strings canonicalize to the same items in the same order, so
//! equality reduces to comparing `type_id`s.
//!
//! Kinds never merge. Output order is numbers, strings, structs.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::number::{compare_number, is_integer, normalize_zero, same_number};
use crate::relation::is_struct_subset_of;
use crate::types::{IntInterval, Interval, NumberPrimitive, StringPrimitive, StructType, ValueType};

/// Returns the unique minimal representation of the union of `items`.
pub fn canonicalize(items: Vec<ValueType>) -> Vec<ValueType> {
    let mut numbers = Vec::new();
    let mut strings = Vec::new();
    let mut structs = Vec::new();
    for item in items {
        match item {
            ValueType::Number(n) => numbers.push(n),
            ValueType::String(s) => strings.push(s),
            ValueType::Struct(s) => structs.push(s),
        }
    }

    let mut out = Vec::new();
    out.extend(canonicalize_numbers(numbers).into_iter().map(ValueType::Number));
    out.extend(canonicalize_strings(strings).into_iter().map(ValueType::String));
    out.extend(canonicalize_structs(structs).into_iter().map(ValueType::Struct));
    out
}

type Range = (f64, f64);

fn canonicalize_numbers(items: Vec<NumberPrimitive>) -> Vec<NumberPrimitive> {
    if items.len() <= 1 {
        return items;
    }

    let mut literals = Vec::new();
    let mut reals = Vec::new();
    let mut ints = Vec::new();
    for item in items {
        match item {
            NumberPrimitive::Number => return vec![NumberPrimitive::Number],
            NumberPrimitive::Literal(v) => literals.push(v),
            NumberPrimitive::Interval(i) => reals.push((i.min(), i.max())),
            NumberPrimitive::IntInterval(i) => ints.push((i.min(), i.max())),
        }
    }

    // Closed intervals: touching counts as overlapping.
    let reals = merge_ranges(reals, |end, start| start <= end);

    // NaN plus every non-NaN double is every double.
    let everything = reals
        .iter()
        .any(|&(min, max)| min == f64::NEG_INFINITY && max == f64::INFINITY);
    if everything && literals.iter().any(|v| v.is_nan()) {
        return vec![NumberPrimitive::Number];
    }

    literals.retain(|&v| !reals.iter().any(|&(min, max)| min <= v && v <= max));

    let mut int_pieces = Vec::new();
    for (min, max) in ints {
        subtract_reals(min, max, &reals, &mut int_pieces);
    }

    let mut points = Vec::new();
    for v in literals {
        if is_integer(v) {
            let v = normalize_zero(v);
            int_pieces.push((v, v));
        } else {
            points.push(v);
        }
    }

    // Integers are discrete: adjacent runs merge.
    let ints = merge_ranges(int_pieces, |end, start| start <= end + 1.0);

    let mut out: Vec<NumberPrimitive> = Vec::new();
    for (min, max) in ints {
        if min == max {
            points.push(min);
        } else {
            out.push(NumberPrimitive::IntInterval(IntInterval::new_unchecked(
                min, max,
            )));
        }
    }
    for (min, max) in reals {
        out.push(NumberPrimitive::Interval(Interval::new_unchecked(min, max)));
    }

    points.sort_by(|a, b| compare_number(*a, *b));
    points.dedup_by(|a, b| same_number(*a, *b));
    out.extend(points.into_iter().map(NumberPrimitive::Literal));

    out.sort_by(compare_number_primitive);
    out
}

/// Sorts ranges by lower bound and merges neighbours for which
/// `touches(previous_end, next_start)` holds.
fn merge_ranges(mut ranges: Vec<Range>, touches: impl Fn(f64, f64) -> bool) -> Vec<Range> {
    ranges.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut merged: Vec<Range> = Vec::with_capacity(ranges.len());
    for (min, max) in ranges {
        match merged.last_mut() {
            Some(last) if touches(last.1, min) => {
                if max > last.1 {
                    last.1 = max;
                }
            }
            _ => merged.push((min, max)),
        }
    }
    merged
}

/// Pushes the integers of `[min, max]` not covered by any of the sorted,
/// disjoint real ranges `reals`.
fn subtract_reals(min: f64, max: f64, reals: &[Range], out: &mut Vec<Range>) {
    let mut lo = min;
    for &(real_min, real_max) in reals {
        let first = real_min.ceil();
        let last = real_max.floor();
        if first > last || last < lo || first > max {
            continue;
        }
        if first > lo {
            push_int_range(out, lo, first - 1.0);
        }
        lo = last + 1.0;
        if lo > max {
            return;
        }
    }
    push_int_range(out, lo, max);
}

fn push_int_range(out: &mut Vec<Range>, min: f64, max: f64) {
    // [inf, inf] and [-inf, -inf] hold no integer.
    if min <= max && min != f64::INFINITY && max != f64::NEG_INFINITY {
        out.push((min, max));
    }
}

/// Orders number primitives by lower bound, then upper bound, using the
/// extended order of [`compare_number`].
pub(crate) fn compare_number_primitive(a: &NumberPrimitive, b: &NumberPrimitive) -> Ordering {
    fn key(n: &NumberPrimitive) -> (f64, f64, u8) {
        match n {
            NumberPrimitive::Literal(v) => (*v, *v, 0),
            NumberPrimitive::IntInterval(i) => (i.min(), i.max(), 1),
            NumberPrimitive::Interval(i) => (i.min(), i.max(), 2),
            NumberPrimitive::Number => (f64::NAN, f64::NAN, 3),
        }
    }
    let (a_min, a_max, a_rank) = key(a);
    let (b_min, b_max, b_rank) = key(b);
    compare_number(a_min, b_min)
        .then_with(|| compare_number(a_max, b_max))
        .then(a_rank.cmp(&b_rank))
}

fn canonicalize_strings(items: Vec<StringPrimitive>) -> Vec<StringPrimitive> {
    if items.contains(&StringPrimitive::String) {
        return vec![StringPrimitive::String];
    }

    let mut literals: Vec<Arc<str>> = items
        .into_iter()
        .filter_map(|s| match s {
            StringPrimitive::Literal(v) => Some(v),
            StringPrimitive::String => None,
        })
        .collect();
    literals.sort();
    literals.dedup();
    literals.into_iter().map(StringPrimitive::Literal).collect()
}

fn canonicalize_structs(items: Vec<StructType>) -> Vec<StructType> {
    if items.len() <= 1 {
        return items;
    }

    let mut keyed: Vec<(String, StructType)> =
        items.into_iter().map(|s| (s.to_string(), s)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.dedup_by(|a, b| a.0 == b.0);

    // Keep only members not covered by another member.
    let mut kept: Vec<StructType> = Vec::with_capacity(keyed.len());
    for (_, item) in keyed {
        if kept.iter().any(|k| is_struct_subset_of(&item, k)) {
            continue;
        }
        kept.retain(|k| !is_struct_subset_of(k, &item));
        kept.push(item);
    }
    kept
}
