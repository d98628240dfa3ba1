use crate::types::Type;

/// Union of any number of types.
///
/// `never` arguments are dropped and any `any` argument makes the result
/// `any`. Union arguments are flattened into their members before
/// canonicalization.
pub fn union<I>(types: I) -> Type
where
    I: IntoIterator<Item = Type>,
{
    let mut items = Vec::new();
    for ty in types {
        match ty {
            Type::Never => {}
            Type::Any => return Type::Any,
            Type::Value(v) => items.push(v),
            Type::Union(u) => items.extend(u.iter().cloned()),
        }
    }
    Type::from_values(items)
}

/// Union of two borrowed types.
pub fn union2(a: &Type, b: &Type) -> Type {
    union([a.clone(), b.clone()])
}
