use std::cmp::Ordering;

use crate::number::{compare_number, is_integer, max_number, min_number, round_half_up, same_number};

#[test]
fn same_number_treats_nan_as_equal() {
    assert!(same_number(f64::NAN, f64::NAN));
    assert!(same_number(1.5, 1.5));
    assert!(same_number(-0.0, 0.0));
    assert!(!same_number(f64::NAN, 0.0));
    assert!(!same_number(f64::INFINITY, f64::NEG_INFINITY));
}

#[test]
fn compare_number_extended_order() {
    let ordered = [
        -5.0,
        -1.0,
        -0.0,
        0.0,
        2.5,
        1e300,
        f64::NEG_INFINITY,
        f64::INFINITY,
        f64::NAN,
    ];
    for (i, a) in ordered.iter().enumerate() {
        for (j, b) in ordered.iter().enumerate() {
            assert_eq!(
                compare_number(*a, *b),
                i.cmp(&j),
                "compare_number({a}, {b})"
            );
        }
    }
}

#[test]
fn compare_number_nan_is_equal_to_itself() {
    assert_eq!(compare_number(f64::NAN, f64::NAN), Ordering::Equal);
}

#[test]
fn integers_are_finite() {
    assert!(is_integer(0.0));
    assert!(is_integer(-0.0));
    assert!(is_integer(-7.0));
    assert!(!is_integer(0.5));
    assert!(!is_integer(f64::INFINITY));
    assert!(!is_integer(f64::NEG_INFINITY));
    assert!(!is_integer(f64::NAN));
}

#[test]
fn round_half_up_ties_go_up() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(2.4), 2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(round_half_up(f64::INFINITY), f64::INFINITY);
    assert!(round_half_up(f64::NAN).is_nan());
}

#[test]
fn min_max_propagate_nan() {
    assert!(min_number(f64::NAN, 1.0).is_nan());
    assert!(max_number(1.0, f64::NAN).is_nan());
    assert_eq!(min_number(1.0, 2.0), 1.0);
    assert_eq!(max_number(1.0, 2.0), 2.0);
}

#[test]
fn min_max_order_signed_zeros() {
    assert!(min_number(0.0, -0.0).is_sign_negative());
    assert!(min_number(-0.0, 0.0).is_sign_negative());
    assert!(max_number(-0.0, 0.0).is_sign_positive());
    assert!(max_number(0.0, -0.0).is_sign_positive());
}
