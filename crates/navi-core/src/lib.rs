#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! The Navi type lattice.
//!
//! Types describe sets of runtime values: numbers (literals, real and
//! integer intervals), strings and named structs, combined with unions.
//! This crate provides the types and the set algebra over them:
//! - [`union`]: join
//! - [`intersection`]: meet
//! - [`without`]: difference, approximated where not representable
//! - [`is_subset_of`] / [`is_disjoint_with`]: relations
//!
//! Every union is kept in a canonical form, so structural equality of two
//! [`Type`]s (or of their [`Type::type_id`]) is set equality.

mod canonical;
mod intersection;
pub mod number;
mod relation;
mod types;
mod union;
mod without;

pub use canonical::canonicalize;
pub use intersection::intersection;
pub use relation::{is_disjoint_with, is_subset_of};
pub use types::{
    IntInterval, Interval, NumberPrimitive, StringPrimitive, StructField, StructType, Type,
    Underlying, UnionType, ValueType,
};
pub use union::{union, union2};
pub use without::without;

#[cfg(test)]
mod number_tests;
#[cfg(test)]
mod relation_tests;
#[cfg(test)]
mod types_tests;
#[cfg(test)]
mod union_tests;
