//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Definition files (-d/--defs), repeatable.
pub fn defs_arg() -> Arg {
    Arg::new("defs")
        .short('d')
        .long("defs")
        .value_name("FILE")
        .action(ArgAction::Append)
        .value_parser(value_parser!(PathBuf))
        .help("Load struct and let definitions from a file")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// A Navi type expression (positional).
pub fn expr_arg(id: &'static str, value_name: &'static str) -> Arg {
    Arg::new(id)
        .value_name(value_name)
        .required(true)
        .help("Type expression")
}

/// Node schema file (positional).
pub fn schema_arg() -> Arg {
    Arg::new("schema")
        .value_name("SCHEMA")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Node schema (JSON)")
}

/// Type connected to an input (--input N=EXPR), repeatable.
pub fn input_arg() -> Arg {
    Arg::new("input")
        .short('i')
        .long("input")
        .value_name("N=EXPR")
        .action(ArgAction::Append)
        .value_parser(parse_input_binding)
        .help("Connect input N to a value of type EXPR")
}

/// Print the result as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the result as JSON")
}

pub fn parse_input_binding(value: &str) -> Result<(usize, String), String> {
    let (index, expr) = value
        .split_once('=')
        .ok_or_else(|| format!("expected N=EXPR, got '{value}'"))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("input index must be a number, got '{}'", index.trim()))?;
    Ok((index, expr.to_owned()))
}
