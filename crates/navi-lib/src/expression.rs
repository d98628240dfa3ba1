//! Type expressions.
//!
//! An [`Expression`] is an unevaluated type: the evaluator resolves names,
//! calls functions and dispatches matches to turn it into a [`Type`].

use std::fmt;

use navi_core::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// An already concrete type.
    Type(Type),
    /// A binding, alias or struct reference. With `fields`, a struct
    /// instantiation narrowing the listed fields.
    Named {
        name: String,
        fields: Option<Vec<(String, Expression)>>,
    },
    Union(Vec<Expression>),
    Intersection(Vec<Expression>),
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    Match {
        of: Box<Expression>,
        arms: Vec<MatchArm>,
    },
    FieldAccess {
        of: Box<Expression>,
        field: String,
    },
}

/// `pattern as binding => to`
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Expression,
    pub binding: Option<String>,
    pub to: Expression,
}

impl Expression {
    pub fn named(name: impl Into<String>) -> Self {
        Expression::Named {
            name: name.into(),
            fields: None,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    pub fn match_of(of: Expression, arms: Vec<MatchArm>) -> Self {
        Expression::Match {
            of: Box::new(of),
            arms,
        }
    }

    pub fn field(of: Expression, field: impl Into<String>) -> Self {
        Expression::FieldAccess {
            of: Box::new(of),
            field: field.into(),
        }
    }
}

impl MatchArm {
    pub fn new(pattern: Expression, binding: Option<&str>, to: Expression) -> Self {
        Self {
            pattern,
            binding: binding.map(str::to_owned),
            to,
        }
    }
}

impl From<Type> for Expression {
    fn from(value: Type) -> Self {
        Expression::Type(value)
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expression], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "({item})")?;
    }
    Ok(())
}

/// Writes the expression in Navi source syntax. Operands of `|` and `&` are
/// parenthesized so the text is also an unambiguous cache key.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Type(ty) => write!(f, "{ty}"),
            Expression::Named { name, fields } => {
                f.write_str(name)?;
                let Some(fields) = fields else {
                    return Ok(());
                };
                f.write_str(" { ")?;
                for (i, (field, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}: {value}")?;
                }
                f.write_str(" }")
            }
            Expression::Union(items) => write_joined(f, items, " | "),
            Expression::Intersection(items) => write_joined(f, items, " & "),
            Expression::FunctionCall { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Expression::Match { of, arms } => {
                write!(f, "match {of} {{")?;
                for (i, arm) in arms.iter().enumerate() {
                    f.write_str(if i > 0 { ", " } else { " " })?;
                    write!(f, "{}", arm.pattern)?;
                    if let Some(binding) = &arm.binding {
                        write!(f, " as {binding}")?;
                    }
                    write!(f, " => {}", arm.to)?;
                }
                f.write_str(" }")
            }
            Expression::FieldAccess { of, field } => write!(f, "({of}).{field}"),
        }
    }
}
