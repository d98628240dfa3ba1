//! Expression evaluation.
//!
//! Evaluation is bottom-up and pure. Names resolve to the innermost match
//! binding, then to aliases, then to structs. Alias and struct bodies are
//! evaluated in an empty scope, so match bindings never leak into them.

use std::collections::HashMap;

use navi_core::{StructField, Type, ValueType, intersection, is_subset_of, union};

use crate::expression::{Expression, MatchArm};
use crate::typedef::{StructDefinition, TypeDefinitions};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("unknown type `{0}`")]
    UnknownType(String),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("function `{function}` takes {expected} argument(s) but {actual} were given")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of `{function}` must be `{expected}`, got `{actual}`")]
    InvalidArgument {
        function: String,
        index: usize,
        expected: Type,
        actual: Type,
    },

    #[error("struct `{struct_name}` has no field `{field}`")]
    UnknownField { struct_name: String, field: String },

    #[error("field `{field}` of `{struct_name}` is given more than once")]
    DuplicateField { struct_name: String, field: String },

    #[error("`{0}` is not a struct")]
    NotAStruct(String),

    #[error("definition of `{0}` depends on itself")]
    CyclicDefinition(String),

    #[error("no field `{field}` on `{ty}`")]
    InvalidFieldAccess { ty: Type, field: String },
}

type Result<T> = std::result::Result<T, EvaluationError>;

/// Evaluates `expr` without memoization.
pub fn evaluate(expr: &Expression, definitions: &TypeDefinitions) -> Result<Type> {
    Evaluator::new(definitions).evaluate(expr)
}

#[derive(Debug, Default)]
struct Cache {
    /// Keyed by the `Debug` text of top-level expressions.
    expressions: HashMap<String, Type>,
    /// Alias values and declared struct types, keyed by name.
    names: HashMap<String, Type>,
}

/// Evaluation context over a fixed set of definitions.
///
/// The optional cache holds results of closed evaluations (no bindings in
/// scope). Borrowing the definitions keeps them unchanged for as long as
/// the cache lives.
#[derive(Debug)]
pub struct Evaluator<'d> {
    definitions: &'d TypeDefinitions,
    cache: Option<Cache>,
    bindings: Vec<(String, Type)>,
    resolving: Vec<String>,
}

impl<'d> Evaluator<'d> {
    pub fn new(definitions: &'d TypeDefinitions) -> Self {
        Self {
            definitions,
            cache: None,
            bindings: Vec::new(),
            resolving: Vec::new(),
        }
    }

    /// An evaluator that memoizes results across calls.
    pub fn with_cache(definitions: &'d TypeDefinitions) -> Self {
        Self {
            cache: Some(Cache::default()),
            ..Self::new(definitions)
        }
    }

    pub fn definitions(&self) -> &'d TypeDefinitions {
        self.definitions
    }

    /// Number of memoized results.
    pub fn cached(&self) -> usize {
        self.cache
            .as_ref()
            .map_or(0, |c| c.expressions.len() + c.names.len())
    }

    pub fn evaluate(&mut self, expr: &Expression) -> Result<Type> {
        let key = match (&self.cache, expr) {
            (None, _) | (_, Expression::Type(_)) => None,
            (Some(cache), _) => {
                let key = format!("{expr:?}");
                if let Some(ty) = cache.expressions.get(&key) {
                    tracing::trace!(%expr, "cache hit");
                    return Ok(ty.clone());
                }
                Some(key)
            }
        };

        let ty = self.eval(expr).inspect_err(|err| {
            tracing::debug!(%expr, %err, "evaluation failed");
        })?;

        if let (Some(key), Some(cache)) = (key, &mut self.cache) {
            cache.expressions.insert(key, ty.clone());
        }
        Ok(ty)
    }

    /// Evaluates `expr` with extra names in scope. Never cached.
    pub fn evaluate_with(&mut self, expr: &Expression, bindings: &[(String, Type)]) -> Result<Type> {
        let depth = self.bindings.len();
        self.bindings.extend(bindings.iter().cloned());
        let result = self.eval(expr);
        self.bindings.truncate(depth);
        result
    }

    fn eval(&mut self, expr: &Expression) -> Result<Type> {
        match expr {
            Expression::Type(ty) => Ok(ty.clone()),
            Expression::Named { name, fields } => self.eval_named(name, fields.as_deref()),
            Expression::Union(items) => {
                let items = items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(union(items))
            }
            Expression::Intersection(items) => {
                let mut acc = Type::Any;
                for item in items {
                    let ty = self.eval(item)?;
                    acc = intersection(&acc, &ty);
                }
                Ok(acc)
            }
            Expression::FunctionCall { name, args } => self.eval_call(name, args),
            Expression::Match { of, arms } => self.eval_match(of, arms),
            Expression::FieldAccess { of, field } => {
                let of = self.eval(of)?;
                access_field(&of, field)
            }
        }
    }

    fn eval_named(&mut self, name: &str, fields: Option<&[(String, Expression)]>) -> Result<Type> {
        let defs = self.definitions;

        if fields.is_none() {
            if let Some((_, ty)) = self.bindings.iter().rev().find(|(n, _)| n == name) {
                return Ok(ty.clone());
            }
            if let Some(expr) = defs.alias(name) {
                return self.resolve(name, |this| this.eval(expr));
            }
        }

        if let Some(def) = defs.structure(name) {
            return match fields {
                None => self.resolve(name, |this| this.declared_struct(def)),
                Some(fields) => self.instantiate(def, fields),
            };
        }

        let known = self.bindings.iter().any(|(n, _)| n == name)
            || defs.alias(name).is_some()
            || primitive(name).is_some();
        match (fields, primitive(name)) {
            (Some(_), _) if known => Err(EvaluationError::NotAStruct(name.to_owned())),
            (None, Some(ty)) => Ok(ty),
            _ => Err(EvaluationError::UnknownType(name.to_owned())),
        }
    }

    /// Evaluates a named definition in an empty scope, guarding against
    /// cycles and memoizing the result.
    fn resolve(
        &mut self,
        name: &str,
        body: impl FnOnce(&mut Self) -> Result<Type>,
    ) -> Result<Type> {
        if let Some(ty) = self.cache.as_ref().and_then(|c| c.names.get(name)) {
            return Ok(ty.clone());
        }
        if self.resolving.iter().any(|n| n == name) {
            return Err(EvaluationError::CyclicDefinition(name.to_owned()));
        }

        self.resolving.push(name.to_owned());
        let outer = std::mem::take(&mut self.bindings);
        let result = body(self);
        self.bindings = outer;
        self.resolving.pop();

        let ty = result?;
        if let Some(cache) = &mut self.cache {
            cache.names.insert(name.to_owned(), ty.clone());
        }
        Ok(ty)
    }

    fn declared_fields(&mut self, def: &StructDefinition) -> Result<Vec<StructField>> {
        def.fields
            .iter()
            .map(|(name, expr)| Ok(StructField::new(name.as_str(), self.eval(expr)?)))
            .collect()
    }

    fn declared_struct(&mut self, def: &StructDefinition) -> Result<Type> {
        let fields = self.declared_fields(def)?;
        Ok(Type::structure(def.name.as_str(), fields))
    }

    /// `Name { field: expr, .. }`: each given field narrows the declared one.
    fn instantiate(&mut self, def: &StructDefinition, given: &[(String, Expression)]) -> Result<Type> {
        for (i, (field, _)) in given.iter().enumerate() {
            if !def.fields.iter().any(|(declared, _)| declared == field) {
                return Err(EvaluationError::UnknownField {
                    struct_name: def.name.clone(),
                    field: field.clone(),
                });
            }
            if given[..i].iter().any(|(other, _)| other == field) {
                return Err(EvaluationError::DuplicateField {
                    struct_name: def.name.clone(),
                    field: field.clone(),
                });
            }
        }

        let declared = self.resolve(&def.name, |this| this.declared_struct(def))?;
        let Type::Value(ValueType::Struct(declared)) = declared else {
            // A declared field is `never`, so is every instance.
            return Ok(Type::Never);
        };

        let mut fields = Vec::with_capacity(declared.fields().len());
        for field in declared.fields() {
            let ty = match given.iter().find(|(name, _)| **name == *field.name) {
                Some((_, expr)) => intersection(&self.eval(expr)?, &field.ty),
                None => field.ty.clone(),
            };
            fields.push(StructField::new(field.name.clone(), ty));
        }
        Ok(Type::structure(def.name.as_str(), fields))
    }

    fn eval_call(&mut self, name: &str, args: &[Expression]) -> Result<Type> {
        let defs = self.definitions;
        let Some(function) = defs.function(name) else {
            return Err(EvaluationError::UnknownFunction(name.to_owned()));
        };
        if function.params.len() != args.len() {
            return Err(EvaluationError::ArityMismatch {
                function: name.to_owned(),
                expected: function.params.len(),
                actual: args.len(),
            });
        }

        let mut values = Vec::with_capacity(args.len());
        for (index, (arg, param)) in args.iter().zip(&function.params).enumerate() {
            let ty = self.eval(arg)?;
            if !is_subset_of(&ty, param) {
                return Err(EvaluationError::InvalidArgument {
                    function: name.to_owned(),
                    index,
                    expected: param.clone(),
                    actual: ty,
                });
            }
            values.push(ty);
        }

        let result = function.call(&values);
        tracing::trace!(function = name, %result, "call");
        Ok(result)
    }

    /// Each member of the scrutinee goes to the first arm whose pattern
    /// covers it. Unmatched members contribute `never`.
    fn eval_match(&mut self, of: &Expression, arms: &[MatchArm]) -> Result<Type> {
        let of = self.eval(of)?;
        let patterns = arms
            .iter()
            .map(|arm| self.eval(&arm.pattern))
            .collect::<Result<Vec<_>>>()?;

        let members: Vec<Type> = match &of {
            Type::Never => Vec::new(),
            Type::Any => vec![Type::Any],
            _ => of.values().iter().cloned().map(Type::Value).collect(),
        };

        let mut results = Vec::with_capacity(members.len());
        for member in members {
            let Some(arm) = arms
                .iter()
                .zip(&patterns)
                .find_map(|(arm, pattern)| is_subset_of(&member, pattern).then_some(arm))
            else {
                tracing::trace!(%member, "no matching arm");
                continue;
            };
            tracing::trace!(%member, pattern = %arm.pattern, "arm selected");

            let ty = match &arm.binding {
                Some(binding) => {
                    self.bindings.push((binding.clone(), member));
                    let ty = self.eval(&arm.to);
                    self.bindings.pop();
                    ty?
                }
                None => self.eval(&arm.to)?,
            };
            results.push(ty);
        }
        Ok(union(results))
    }
}

/// Builtin type names, for expressions built without the parser.
fn primitive(name: &str) -> Option<Type> {
    match name {
        "never" => Some(Type::Never),
        "any" => Some(Type::Any),
        "number" => Some(Type::number()),
        "string" => Some(Type::string()),
        "int" => Some(Type::int()),
        _ => None,
    }
}

fn access_field(of: &Type, field: &str) -> Result<Type> {
    let invalid = || EvaluationError::InvalidFieldAccess {
        ty: of.clone(),
        field: field.to_owned(),
    };
    if of.is_any() {
        return Err(invalid());
    }

    let mut items = Vec::with_capacity(of.values().len());
    for value in of.values() {
        let ValueType::Struct(s) = value else {
            return Err(invalid());
        };
        items.push(s.field(field).cloned().ok_or_else(invalid)?);
    }
    Ok(union(items))
}
