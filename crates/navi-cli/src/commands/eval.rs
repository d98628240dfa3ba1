use std::path::PathBuf;

use navi_lib::evaluate;

use super::loader::{load_definitions, load_expression};

pub struct EvalArgs {
    pub expr: String,
    pub defs: Vec<PathBuf>,
    pub color: bool,
}

pub fn run(args: EvalArgs) {
    let defs = load_definitions(&args.defs).unwrap_or_else(|e| e.exit(args.color));
    let expr = load_expression(&args.expr).unwrap_or_else(|e| e.exit(args.color));

    match evaluate(&expr, &defs) {
        Ok(ty) => println!("{ty}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
