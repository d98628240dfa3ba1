//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("navi")
        .about("Structural type checking for dataflow graphs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(eval_command())
        .subcommand(subset_command())
        .subcommand(node_command())
}

pub fn eval_command() -> Command {
    Command::new("eval")
        .about("Evaluate a type expression")
        .after_help(
            r#"EXAMPLES:
  navi eval 'add(int(0..10), 5)'
  navi eval 'Image { channels: 3 }' -d types.navi
  navi eval 'match 1 | "a" { number => 0, _ => 1 }'"#,
        )
        .arg(expr_arg("expr", "EXPR"))
        .arg(defs_arg())
        .arg(color_arg())
}

pub fn subset_command() -> Command {
    Command::new("subset")
        .about("Check whether every value of LEFT is a value of RIGHT")
        .after_help(
            r#"EXAMPLES:
  navi subset 5 'int(0..10)'          # true
  navi subset 'int(0..10)' 5          # false, exit status 1"#,
        )
        .arg(expr_arg("left", "LEFT"))
        .arg(expr_arg("right", "RIGHT"))
        .arg(defs_arg())
        .arg(color_arg())
}

pub fn node_command() -> Command {
    Command::new("node")
        .about("Type-check a node against connected input types")
        .after_help(
            r#"EXAMPLES:
  navi node resize.json -d types.navi
  navi node resize.json -d types.navi -i 0='Image { channels: 3 }' -i 1=2
  navi node resize.json -d types.navi --json"#,
        )
        .arg(schema_arg())
        .arg(input_arg())
        .arg(defs_arg())
        .arg(json_arg())
        .arg(color_arg())
}
