//! Type checking for dataflow nodes.
//!
//! A node schema declares its inputs and outputs as Navi expressions.
//! Output expressions may refer to input `N` as `InputN`, bound to the type
//! connected to that input, or to the declared input type when nothing is
//! connected.

use navi_core::{Type, is_disjoint_with, is_subset_of};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::evaluate::Evaluator;
use crate::parser::parse_expression;
use crate::typedef::TypeDefinitions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSchema {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<NodeInput>,
    #[serde(default)]
    pub outputs: Vec<NodeOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInput {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOutput {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl NodeSchema {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputStatus {
    Valid,
    /// The connected type is not a subset of the declared one.
    Invalid { expected: Type, actual: Type },
    Unconnected,
}

/// Result of [`check_node`], in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTyping {
    pub inputs: Vec<InputStatus>,
    pub outputs: Vec<Type>,
}

impl NodeTyping {
    pub fn is_valid(&self) -> bool {
        self.inputs
            .iter()
            .all(|status| !matches!(status, InputStatus::Invalid { .. }))
    }
}

/// Name under which input `index` is visible to output expressions.
pub fn input_binding(index: usize) -> String {
    format!("Input{index}")
}

/// Validates connected inputs and infers output types.
///
/// `connected[i]` is the type flowing into input `i`; missing entries count
/// as unconnected and extra entries are ignored.
pub fn check_node(
    schema: &NodeSchema,
    connected: &[Option<Type>],
    definitions: &TypeDefinitions,
) -> Result<NodeTyping> {
    let mut evaluator = Evaluator::with_cache(definitions);

    let mut inputs = Vec::with_capacity(schema.inputs.len());
    let mut bindings = Vec::with_capacity(schema.inputs.len());
    for (index, input) in schema.inputs.iter().enumerate() {
        let declared = evaluator.evaluate(&parse_expression(&input.ty)?)?;
        let status = match connected.get(index).cloned().flatten() {
            None => {
                bindings.push((input_binding(index), declared));
                InputStatus::Unconnected
            }
            Some(actual) if is_subset_of(&actual, &declared) => {
                bindings.push((input_binding(index), actual));
                InputStatus::Valid
            }
            Some(actual) => {
                tracing::debug!(
                    node = %schema.name,
                    input = %input.label,
                    %declared,
                    %actual,
                    "input type mismatch"
                );
                bindings.push((input_binding(index), actual.clone()));
                InputStatus::Invalid {
                    expected: declared,
                    actual,
                }
            }
        };
        inputs.push(status);
    }

    let outputs = schema
        .outputs
        .iter()
        .map(|output| -> Result<Type> {
            let expr = parse_expression(&output.ty)?;
            Ok(evaluator.evaluate_with(&expr, &bindings)?)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(NodeTyping { inputs, outputs })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    /// Every value the source produces is accepted.
    Compatible,
    /// Some values are accepted, some are not.
    Partial,
    /// No value is accepted.
    Incompatible,
}

/// Classifies an edge from an output of type `source` into an input of
/// type `target`.
pub fn check_edge(source: &Type, target: &Type) -> EdgeStatus {
    if is_subset_of(source, target) {
        EdgeStatus::Compatible
    } else if is_disjoint_with(source, target) {
        EdgeStatus::Incompatible
    } else {
        EdgeStatus::Partial
    }
}
