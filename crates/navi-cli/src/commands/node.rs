use std::path::PathBuf;

use navi_lib::{
    Error, InputStatus, NodeSchema, NodeTyping, Type, TypeDefinitions, check_node, evaluate,
};
use serde::Serialize;

use super::loader::{load_definitions, load_expression, read_file};

pub struct NodeArgs {
    pub schema: PathBuf,
    pub inputs: Vec<(usize, String)>,
    pub defs: Vec<PathBuf>,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: NodeArgs) {
    let defs = load_definitions(&args.defs).unwrap_or_else(|e| e.exit(args.color));
    let json = read_file(&args.schema).unwrap_or_else(|e| e.exit(args.color));
    let schema = NodeSchema::from_json(&json).unwrap_or_else(|e| fail(&e));

    let connected = connected_types(&schema, &args.inputs, &defs, args.color);
    let typing = check_node(&schema, &connected, &defs).unwrap_or_else(|e| fail(&e));
    let report = NodeReport::new(&schema, &typing);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{report}");
    }

    if !typing.is_valid() {
        std::process::exit(1);
    }
}

fn fail(e: &Error) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}

/// Evaluates `--input` expressions into one slot per schema input.
fn connected_types(
    schema: &NodeSchema,
    inputs: &[(usize, String)],
    defs: &TypeDefinitions,
    color: bool,
) -> Vec<Option<Type>> {
    let mut connected = vec![None; schema.inputs.len()];
    for (index, source) in inputs {
        let Some(slot) = connected.get_mut(*index) else {
            eprintln!(
                "error: node '{}' has {} input(s), got --input {index}",
                schema.name,
                schema.inputs.len()
            );
            std::process::exit(1);
        };
        let expr = load_expression(source).unwrap_or_else(|e| e.exit(color));
        let ty = evaluate(&expr, defs).unwrap_or_else(|e| fail(&e.into()));
        *slot = Some(ty);
    }
    connected
}

#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub node: String,
    pub valid: bool,
    pub inputs: Vec<InputReport>,
    pub outputs: Vec<OutputReport>,
}

#[derive(Debug, Serialize)]
pub struct InputReport {
    pub label: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OutputReport {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl NodeReport {
    pub fn new(schema: &NodeSchema, typing: &NodeTyping) -> Self {
        let inputs = schema
            .inputs
            .iter()
            .zip(&typing.inputs)
            .map(|(input, status)| {
                let (status, expected, actual) = match status {
                    InputStatus::Valid => ("valid", None, None),
                    InputStatus::Unconnected => ("unconnected", None, None),
                    InputStatus::Invalid { expected, actual } => (
                        "invalid",
                        Some(expected.to_string()),
                        Some(actual.to_string()),
                    ),
                };
                InputReport {
                    label: input.label.clone(),
                    status,
                    expected,
                    actual,
                }
            })
            .collect();

        let outputs = schema
            .outputs
            .iter()
            .zip(&typing.outputs)
            .map(|(output, ty)| OutputReport {
                label: output.label.clone(),
                ty: ty.to_string(),
            })
            .collect();

        Self {
            node: schema.name.clone(),
            valid: typing.is_valid(),
            inputs,
            outputs,
        }
    }
}

impl std::fmt::Display for NodeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.node)?;
        for input in &self.inputs {
            write!(f, "  input {}: {}", input.label, input.status)?;
            if let (Some(expected), Some(actual)) = (&input.expected, &input.actual) {
                write!(f, " (expected {expected}, got {actual})")?;
            }
            writeln!(f)?;
        }
        for output in &self.outputs {
            writeln!(f, "  output {}: {}", output.label, output.ty)?;
        }
        Ok(())
    }
}
