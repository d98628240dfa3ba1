//! Registry of named types and functions.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use navi_core::Type;

use crate::builtin;
use crate::expression::Expression;

/// Implementation of a function over evaluated argument types.
pub type FunctionImpl = Arc<dyn Fn(&[Type]) -> Type + Send + Sync>;

/// A declared struct. Field types are expressions so they may refer to
/// aliases and other structs.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDefinition {
    pub name: String,
    pub fields: Vec<(String, Expression)>,
}

#[derive(Clone)]
pub struct FunctionDefinition {
    pub name: String,
    /// Every argument must be a subset of its parameter type.
    pub params: Vec<Type>,
    implementation: FunctionImpl,
}

impl FunctionDefinition {
    pub fn call(&self, args: &[Type]) -> Type {
        (self.implementation)(args)
    }
}

impl fmt::Debug for FunctionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDefinition")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("`{0}` is already defined")]
    AlreadyDefined(String),

    #[error("struct `{struct_name}` declares field `{field}` more than once")]
    DuplicateField { struct_name: String, field: String },
}

/// Named aliases, structs and functions, in definition order.
///
/// Aliases and structs share one namespace. Functions live in their own.
#[derive(Debug, Clone, Default)]
pub struct TypeDefinitions {
    aliases: IndexMap<String, Expression>,
    structs: IndexMap<String, StructDefinition>,
    functions: IndexMap<String, FunctionDefinition>,
}

impl TypeDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin function library plus the unit struct `null`.
    pub fn with_builtins() -> Self {
        let mut defs = Self::new();
        builtin::register(&mut defs);
        defs.structs.insert(
            "null".to_owned(),
            StructDefinition {
                name: "null".to_owned(),
                fields: Vec::new(),
            },
        );
        defs
    }

    pub fn add_alias(
        &mut self,
        name: impl Into<String>,
        expr: Expression,
    ) -> Result<(), DefinitionError> {
        let name = name.into();
        self.ensure_type_name_free(&name)?;
        tracing::debug!(%name, "alias defined");
        self.aliases.insert(name, expr);
        Ok(())
    }

    pub fn add_struct(
        &mut self,
        name: impl Into<String>,
        fields: Vec<(String, Expression)>,
    ) -> Result<(), DefinitionError> {
        let name = name.into();
        self.ensure_type_name_free(&name)?;
        for (i, (field, _)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(other, _)| other == field) {
                return Err(DefinitionError::DuplicateField {
                    struct_name: name,
                    field: field.clone(),
                });
            }
        }
        tracing::debug!(%name, fields = fields.len(), "struct defined");
        self.structs
            .insert(name.clone(), StructDefinition { name, fields });
        Ok(())
    }

    pub fn add_function<F>(
        &mut self,
        name: impl Into<String>,
        params: Vec<Type>,
        implementation: F,
    ) -> Result<(), DefinitionError>
    where
        F: Fn(&[Type]) -> Type + Send + Sync + 'static,
    {
        let name = name.into();
        if self.functions.contains_key(&name) {
            return Err(DefinitionError::AlreadyDefined(name));
        }
        tracing::debug!(%name, arity = params.len(), "function defined");
        self.functions.insert(
            name.clone(),
            FunctionDefinition {
                name,
                params,
                implementation: Arc::new(implementation),
            },
        );
        Ok(())
    }

    /// Inserts a builtin, replacing any previous function of that name.
    pub(crate) fn define_builtin<F>(&mut self, name: &str, params: Vec<Type>, implementation: F)
    where
        F: Fn(&[Type]) -> Type + Send + Sync + 'static,
    {
        self.functions.insert(
            name.to_owned(),
            FunctionDefinition {
                name: name.to_owned(),
                params,
                implementation: Arc::new(implementation),
            },
        );
    }

    fn ensure_type_name_free(&self, name: &str) -> Result<(), DefinitionError> {
        if self.aliases.contains_key(name) || self.structs.contains_key(name) {
            return Err(DefinitionError::AlreadyDefined(name.to_owned()));
        }
        Ok(())
    }

    pub fn alias(&self, name: &str) -> Option<&Expression> {
        self.aliases.get(name)
    }

    pub fn structure(&self, name: &str) -> Option<&StructDefinition> {
        self.structs.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(name)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &Expression)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn structs(&self) -> impl Iterator<Item = &StructDefinition> {
        self.structs.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.functions.values()
    }
}
