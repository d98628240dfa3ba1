use indoc::indoc;
use navi_core::Type;

use crate::Error;
use crate::evaluate::{EvaluationError, evaluate};
use crate::node::{EdgeStatus, InputStatus, NodeSchema, check_edge, check_node};
use crate::parser::{parse_definitions, parse_expression};
use crate::typedef::TypeDefinitions;

const RESIZE: &str = indoc! {r#"
    {
        "name": "Resize",
        "inputs": [
            { "label": "image", "type": "Image" },
            { "label": "scale", "type": "int(1..8)" }
        ],
        "outputs": [
            { "label": "factor", "type": "add(Input1, 1)" },
            { "label": "channels", "type": "Input0.channels" }
        ]
    }
"#};

fn definitions() -> TypeDefinitions {
    let mut defs = TypeDefinitions::with_builtins();
    parse_definitions(
        "struct Image { width: int(1..inf), height: int(1..inf), channels: int(1..4) }",
        &mut defs,
    )
    .unwrap();
    defs
}

fn ty(defs: &TypeDefinitions, source: &str) -> Type {
    evaluate(&parse_expression(source).unwrap(), defs).unwrap()
}

#[test]
fn schema_from_json() {
    let schema = NodeSchema::from_json(RESIZE).unwrap();
    assert_eq!(schema.name, "Resize");
    assert_eq!(schema.inputs[1].label, "scale");
    assert_eq!(schema.inputs[1].ty, "int(1..8)");
    assert_eq!(schema.outputs.len(), 2);
}

#[test]
fn schema_lists_default_to_empty() {
    let schema = NodeSchema::from_json(r#"{ "name": "Source" }"#).unwrap();
    assert!(schema.inputs.is_empty());
    assert!(schema.outputs.is_empty());
}

#[test]
fn malformed_schema() {
    let err = NodeSchema::from_json(r#"{ "inputs": [] }"#).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn connected_and_unconnected_inputs() {
    let defs = definitions();
    let schema = NodeSchema::from_json(RESIZE).unwrap();
    let image = ty(&defs, "Image { channels: 3 }");

    let typing = check_node(&schema, &[Some(image)], &defs).unwrap();
    assert_eq!(typing.inputs, [InputStatus::Valid, InputStatus::Unconnected]);
    assert!(typing.is_valid());

    let outputs: Vec<_> = typing.outputs.iter().map(ToString::to_string).collect();
    assert_eq!(outputs, ["int(2..9)", "3"]);
}

#[test]
fn unconnected_inputs_use_declared_types() {
    let defs = definitions();
    let schema = NodeSchema::from_json(RESIZE).unwrap();

    let typing = check_node(&schema, &[None, None], &defs).unwrap();
    let outputs: Vec<_> = typing.outputs.iter().map(ToString::to_string).collect();
    assert_eq!(outputs, ["int(2..9)", "int(1..4)"]);
}

#[test]
fn invalid_input() {
    let defs = definitions();
    let schema = NodeSchema::from_json(RESIZE).unwrap();
    let image = ty(&defs, "Image");

    let typing = check_node(&schema, &[Some(image), Some(ty(&defs, "int(0..20)"))], &defs).unwrap();
    assert!(!typing.is_valid());
    assert_eq!(typing.inputs[0], InputStatus::Valid);
    assert_eq!(
        typing.inputs[1],
        InputStatus::Invalid {
            expected: Type::int_interval(1.0, 8.0),
            actual: Type::int_interval(0.0, 20.0),
        }
    );
    // Outputs still see the connected type.
    assert_eq!(typing.outputs[0].to_string(), "int(1..21)");
}

#[test]
fn output_evaluation_error() {
    let defs = definitions();
    let schema = NodeSchema::from_json(RESIZE).unwrap();

    let err = check_node(&schema, &[Some(Type::literal(5.0))], &defs).unwrap_err();
    let Error::Evaluation(err) = err else {
        panic!("expected evaluation error, got {err:?}");
    };
    assert_eq!(
        err,
        EvaluationError::InvalidFieldAccess {
            ty: Type::literal(5.0),
            field: "channels".to_owned(),
        }
    );
}

#[test]
fn unparsable_type_in_schema() {
    let defs = definitions();
    let schema = NodeSchema::from_json(indoc! {r#"
        {
            "name": "Broken",
            "inputs": [{ "label": "x", "type": "int(5..1)" }]
        }
    "#})
    .unwrap();

    let err = check_node(&schema, &[], &defs).unwrap_err();
    insta::assert_snapshot!(err, @"range is empty at 3..9");
}

#[test]
fn edge_classification() {
    let defs = definitions();
    let edge = |source: &str, target: &str| check_edge(&ty(&defs, source), &ty(&defs, target));

    assert_eq!(edge("int(0..5)", "number"), EdgeStatus::Compatible);
    assert_eq!(edge("never", "string"), EdgeStatus::Compatible);
    assert_eq!(edge("0..10", "int(0..20)"), EdgeStatus::Partial);
    assert_eq!(edge("Image", "Image { channels: 3 }"), EdgeStatus::Partial);
    assert_eq!(edge(r#""a""#, "number"), EdgeStatus::Incompatible);
    assert_eq!(edge("int(0..5)", "10..20"), EdgeStatus::Incompatible);
}
