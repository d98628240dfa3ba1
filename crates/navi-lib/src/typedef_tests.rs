use navi_core::Type;

use crate::evaluate::evaluate;
use crate::expression::Expression;
use crate::typedef::{DefinitionError, TypeDefinitions};

#[test]
fn aliases_and_structs_share_a_namespace() {
    let mut defs = TypeDefinitions::new();
    defs.add_alias("Size", Type::int_interval(0.0, f64::INFINITY).into())
        .unwrap();

    let err = defs.add_struct("Size", Vec::new()).unwrap_err();
    assert_eq!(err, DefinitionError::AlreadyDefined("Size".to_owned()));

    let err = defs.add_alias("Size", Type::number().into()).unwrap_err();
    insta::assert_snapshot!(err, @"`Size` is already defined");
}

#[test]
fn duplicate_struct_field() {
    let mut defs = TypeDefinitions::new();
    let fields = vec![
        ("x".to_owned(), Type::number().into()),
        ("x".to_owned(), Type::string().into()),
    ];
    let err = defs.add_struct("Point", fields).unwrap_err();
    insta::assert_snapshot!(err, @"struct `Point` declares field `x` more than once");
    assert!(defs.structure("Point").is_none());
}

#[test]
fn definitions_keep_insertion_order() {
    let mut defs = TypeDefinitions::new();
    for name in ["Zeta", "Alpha", "Mid"] {
        defs.add_alias(name, Type::Never.into()).unwrap();
    }
    let names: Vec<_> = defs.aliases().map(|(name, _)| name).collect();
    assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
}

#[test]
fn builtins_include_null() {
    let defs = TypeDefinitions::with_builtins();
    let null = defs.structure("null").unwrap();
    assert!(null.fields.is_empty());
    assert!(TypeDefinitions::new().structure("null").is_none());
}

#[test]
fn custom_function() {
    let mut defs = TypeDefinitions::with_builtins();
    defs.add_function("first", vec![Type::Any, Type::Any], |args: &[Type]| {
        args.first().cloned().unwrap_or(Type::Never)
    })
    .unwrap();

    let call = Expression::call(
        "first",
        vec![Type::string().into(), Type::literal(1.0).into()],
    );
    assert_eq!(evaluate(&call, &defs).unwrap(), Type::string());
}

#[test]
fn duplicate_function() {
    let mut defs = TypeDefinitions::with_builtins();
    let err = defs
        .add_function("add", vec![Type::number()], |_: &[Type]| Type::Never)
        .unwrap_err();
    assert_eq!(err, DefinitionError::AlreadyDefined("add".to_owned()));
}

#[test]
fn functions_and_types_use_separate_namespaces() {
    let mut defs = TypeDefinitions::with_builtins();
    defs.add_alias("add", Type::literal(1.0).into()).unwrap();
    assert!(defs.function("add").is_some());
    assert!(defs.alias("add").is_some());
}
