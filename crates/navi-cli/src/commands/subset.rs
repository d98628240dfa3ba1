use std::path::PathBuf;

use navi_lib::{Evaluator, is_subset_of};

use super::loader::{load_definitions, load_expression};

pub struct SubsetArgs {
    pub left: String,
    pub right: String,
    pub defs: Vec<PathBuf>,
    pub color: bool,
}

/// Prints `true` or `false`. A `false` result also exits with status 1.
pub fn run(args: SubsetArgs) {
    let defs = load_definitions(&args.defs).unwrap_or_else(|e| e.exit(args.color));
    let left = load_expression(&args.left).unwrap_or_else(|e| e.exit(args.color));
    let right = load_expression(&args.right).unwrap_or_else(|e| e.exit(args.color));

    let mut evaluator = Evaluator::with_cache(&defs);
    let (left, right) = match (evaluator.evaluate(&left), evaluator.evaluate(&right)) {
        (Ok(left), Ok(right)) => (left, right),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let result = is_subset_of(&left, &right);
    println!("{result}");
    if !result {
        std::process::exit(1);
    }
}
