//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::eval::EvalArgs;
use crate::commands::node::NodeArgs;
use crate::commands::subset::SubsetArgs;

pub struct EvalParams {
    pub expr: String,
    pub defs: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl EvalParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            expr: m.get_one::<String>("expr").cloned().unwrap_or_default(),
            defs: parse_defs(m),
            color: parse_color(m),
        }
    }
}

impl From<EvalParams> for EvalArgs {
    fn from(p: EvalParams) -> Self {
        Self {
            expr: p.expr,
            defs: p.defs,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SubsetParams {
    pub left: String,
    pub right: String,
    pub defs: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl SubsetParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            left: m.get_one::<String>("left").cloned().unwrap_or_default(),
            right: m.get_one::<String>("right").cloned().unwrap_or_default(),
            defs: parse_defs(m),
            color: parse_color(m),
        }
    }
}

impl From<SubsetParams> for SubsetArgs {
    fn from(p: SubsetParams) -> Self {
        Self {
            left: p.left,
            right: p.right,
            defs: p.defs,
            color: p.color.should_colorize(),
        }
    }
}

pub struct NodeParams {
    pub schema: PathBuf,
    /// `(input index, expression)` in command-line order.
    pub inputs: Vec<(usize, String)>,
    pub defs: Vec<PathBuf>,
    pub json: bool,
    pub color: ColorChoice,
}

impl NodeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema: m.get_one::<PathBuf>("schema").cloned().unwrap_or_default(),
            inputs: m
                .get_many::<(usize, String)>("input")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            defs: parse_defs(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<NodeParams> for NodeArgs {
    fn from(p: NodeParams) -> Self {
        Self {
            schema: p.schema,
            inputs: p.inputs,
            defs: p.defs,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_defs(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("defs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
