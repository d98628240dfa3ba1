//! Navi: structural types for dataflow graphs.
//!
//! Expressions are parsed from Navi source, evaluated against a registry of
//! aliases, structs and functions, and compared with the set operations from
//! `navi-core`.
//!
//! # Example
//!
//! ```
//! use navi_lib::{TypeDefinitions, evaluate, is_subset_of, parse_expression};
//!
//! let defs = TypeDefinitions::with_builtins();
//! let expr = parse_expression("add(int(0..10), 5)").unwrap();
//! let ty = evaluate(&expr, &defs).unwrap();
//!
//! assert_eq!(ty.to_string(), "int(5..15)");
//! assert!(is_subset_of(&ty, &navi_lib::Type::number()));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builtin;
pub mod diagnostics;
pub mod evaluate;
pub mod expression;
pub mod node;
pub mod parser;
pub mod typedef;

#[cfg(test)]
mod diagnostics_tests;
#[cfg(test)]
mod node_tests;
#[cfg(test)]
mod typedef_tests;

pub use diagnostics::DiagnosticPrinter;
pub use evaluate::{EvaluationError, Evaluator, evaluate};
pub use expression::{Expression, MatchArm};
pub use node::{
    EdgeStatus, InputStatus, NodeInput, NodeOutput, NodeSchema, NodeTyping, check_edge,
    check_node,
};
pub use parser::{ParseError, parse_definitions, parse_expression};
pub use typedef::{DefinitionError, FunctionDefinition, StructDefinition, TypeDefinitions};

pub use navi_core::{
    IntInterval, Interval, NumberPrimitive, StringPrimitive, StructField, StructType, Type,
    Underlying, UnionType, ValueType, canonicalize, intersection, is_disjoint_with,
    is_subset_of, union, union2, without,
};

/// Errors from loading definitions, parsing or evaluating.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("invalid node schema: {0}")]
    Schema(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
