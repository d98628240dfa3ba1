//! Loading definitions and expressions for commands.

use std::fs;
use std::path::{Path, PathBuf};

use navi_lib::{Expression, ParseError, TypeDefinitions, parse_definitions, parse_expression};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Syntax error in `source`, labelled with `origin`.
    #[error("{error}")]
    Parse {
        origin: Option<String>,
        source_text: String,
        error: ParseError,
    },
}

impl LoadError {
    /// Renders the error, with a source snippet for syntax errors.
    pub fn render(&self, color: bool) -> String {
        match self {
            LoadError::Read { .. } => format!("error: {self}"),
            LoadError::Parse {
                origin,
                source_text,
                error,
            } => {
                let printer = error.printer().source(source_text).colored(color);
                match origin {
                    Some(origin) => printer.path(origin).render(),
                    None => printer.render(),
                }
            }
        }
    }

    /// Prints the error to stderr and exits with status 1.
    pub fn exit(&self, color: bool) -> ! {
        eprintln!("{}", self.render(color));
        std::process::exit(1);
    }
}

pub fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Builtins plus the definitions from each file, in order.
pub fn load_definitions(paths: &[PathBuf]) -> Result<TypeDefinitions, LoadError> {
    let mut defs = TypeDefinitions::with_builtins();
    for path in paths {
        let source = read_file(path)?;
        if let Err(error) = parse_definitions(&source, &mut defs) {
            return Err(LoadError::Parse {
                origin: Some(path.display().to_string()),
                source_text: source,
                error,
            });
        }
        tracing::debug!(path = %path.display(), "definitions loaded");
    }
    Ok(defs)
}

/// Parses an expression given on the command line.
pub fn load_expression(source: &str) -> Result<Expression, LoadError> {
    parse_expression(source).map_err(|error| LoadError::Parse {
        origin: None,
        source_text: source.to_owned(),
        error,
    })
}
