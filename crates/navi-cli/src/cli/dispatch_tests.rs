use std::path::PathBuf;

use super::args::parse_input_binding;
use super::commands::{build_cli, eval_command, node_command, subset_command};
use super::*;

#[test]
fn eval_params() {
    let m = eval_command()
        .try_get_matches_from(["eval", "add(1, 2)", "-d", "a.navi", "--defs", "b.navi"])
        .unwrap();
    let params = EvalParams::from_matches(&m);

    assert_eq!(params.expr, "add(1, 2)");
    assert_eq!(params.defs, [PathBuf::from("a.navi"), PathBuf::from("b.navi")]);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn eval_requires_expression() {
    let result = eval_command().try_get_matches_from(["eval"]);
    assert!(result.is_err());
}

#[test]
fn subset_params() {
    let m = subset_command()
        .try_get_matches_from(["subset", "5", "int(0..10)", "--color", "never"])
        .unwrap();
    let params = SubsetParams::from_matches(&m);

    assert_eq!(params.left, "5");
    assert_eq!(params.right, "int(0..10)");
    assert!(params.defs.is_empty());
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn subset_requires_both_sides() {
    let result = subset_command().try_get_matches_from(["subset", "5"]);
    assert!(result.is_err());
}

#[test]
fn node_params() {
    let m = node_command()
        .try_get_matches_from([
            "node",
            "resize.json",
            "-i",
            "0=Image",
            "--input",
            "1=int(1..2)",
            "--json",
            "--color",
            "always",
        ])
        .unwrap();
    let params = NodeParams::from_matches(&m);

    assert_eq!(params.schema, PathBuf::from("resize.json"));
    assert_eq!(
        params.inputs,
        [(0, "Image".to_owned()), (1, "int(1..2)".to_owned())]
    );
    assert!(params.json);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn node_rejects_malformed_input() {
    let result = node_command().try_get_matches_from(["node", "s.json", "-i", "Image"]);
    assert!(result.is_err());
}

#[test]
fn input_binding_parser() {
    assert_eq!(parse_input_binding("2=a=b"), Ok((2, "a=b".to_owned())));
    assert_eq!(parse_input_binding(" 0 =x"), Ok((0, "x".to_owned())));
    insta::assert_snapshot!(
        parse_input_binding("x=1").unwrap_err(),
        @"input index must be a number, got 'x'"
    );
    insta::assert_snapshot!(
        parse_input_binding("Image").unwrap_err(),
        @"expected N=EXPR, got 'Image'"
    );
}

#[test]
fn color_choice_explicit() {
    assert!(ColorChoice::Always.should_colorize());
    assert!(!ColorChoice::Never.should_colorize());
}

#[test]
fn cli_requires_subcommand() {
    let result = build_cli().try_get_matches_from(["navi"]);
    assert!(result.is_err());

    let m = build_cli()
        .try_get_matches_from(["navi", "eval", "number"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("eval"));
}

#[test]
fn cli_debug_assert() {
    build_cli().debug_assert();
}
