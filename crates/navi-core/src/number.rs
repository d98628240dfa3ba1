//! Float helpers shared by the canonicalizer and the numeric builtins.
//!
//! Navi compares numbers with a few deliberate deviations from IEEE-754:
//! NaN is equal to itself, and there is a total order that gives `-0`, `0`,
//! the infinities and NaN fixed positions.

use std::cmp::Ordering;

/// Type-identity equality: `a == b`, except that NaN equals NaN.
///
/// Consequently `-0` and `0` are the same number.
#[inline]
pub fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Total order used for canonical output.
///
/// 1. negative reals
/// 2. `-0`
/// 3. `0`
/// 4. positive reals
/// 5. `-inf`
/// 6. `inf`
/// 7. `NaN`
pub fn compare_number(a: f64, b: f64) -> Ordering {
    if a == 0.0 && b == 0.0 {
        return a.is_sign_positive().cmp(&b.is_sign_positive());
    }
    if a.is_finite() && b.is_finite() {
        return a.total_cmp(&b);
    }
    if same_number(a, b) {
        return Ordering::Equal;
    }
    if a.is_finite() {
        return Ordering::Less;
    }
    if b.is_finite() {
        return Ordering::Greater;
    }
    if a.is_nan() {
        return Ordering::Greater;
    }
    if b.is_nan() {
        return Ordering::Less;
    }
    a.total_cmp(&b)
}

/// Whether `v` is a finite integer. Infinities are not integers.
#[inline]
pub fn is_integer(v: f64) -> bool {
    v.is_finite() && v.trunc() == v
}

/// Rounds to the nearest integer, ties toward positive infinity.
///
/// NaN and the infinities are returned unchanged.
pub fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Minimum that propagates NaN and orders `-0` below `0`.
pub fn min_number(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == b {
        return if a.is_sign_negative() { a } else { b };
    }
    if a < b { a } else { b }
}

/// Maximum that propagates NaN and orders `0` above `-0`.
pub fn max_number(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a == b {
        return if a.is_sign_positive() { a } else { b };
    }
    if a > b { a } else { b }
}

/// Strips the sign of a negative zero. Interval bounds are stored this way.
#[inline]
pub(crate) fn normalize_zero(v: f64) -> f64 {
    v + 0.0
}
