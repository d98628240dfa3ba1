mod cli;
mod commands;

use cli::{EvalParams, NodeParams, SubsetParams, build_cli};
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("eval", m)) => {
            let params = EvalParams::from_matches(m);
            commands::eval::run(params.into());
        }
        Some(("subset", m)) => {
            let params = SubsetParams::from_matches(m);
            commands::subset::run(params.into());
        }
        Some(("node", m)) => {
            let params = NodeParams::from_matches(m);
            commands::node::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` overrides
/// the default filter.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,navi_lib=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
