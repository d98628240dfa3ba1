use indoc::indoc;

use crate::parser::{ParseError, parse_definitions, parse_expression};
use crate::typedef::TypeDefinitions;

#[test]
fn without_source_is_one_line() {
    let err = ParseError::new("range is empty", 0..4);
    insta::assert_snapshot!(err.printer().render(), @"range is empty at 0..4");
}

#[test]
fn renders_span() {
    let source = "1 2";
    let err = parse_expression(source).unwrap_err();
    insta::assert_snapshot!(err.printer().source(source).render(), @r"
    error: expected end of input, found number literal
      |
    1 | 1 2
      |   ^
    ");
}

#[test]
fn renders_path() {
    let source = "hello world";
    let err = ParseError::new("something went wrong", 0..5);
    let result = err.printer().source(source).path("test.navi").render();
    insta::assert_snapshot!(result, @r"
    error: something went wrong
     --> test.navi:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn renders_later_line() {
    let source = indoc! {"
        let A = 1;
        struct A;
    "};
    let mut defs = TypeDefinitions::new();
    let err = parse_definitions(source, &mut defs).unwrap_err();
    let result = err.printer().source(source).path("defs.navi").render();
    insta::assert_snapshot!(result, @r"
    error: `A` is already defined
     --> defs.navi:2:8
      |
    2 | struct A;
      |        ^
    ");
}

#[test]
fn zero_width_span() {
    let err = ParseError::new("zero width", 0..0);
    insta::assert_snapshot!(err.printer().source("hello").render(), @r"
    error: zero width
      |
    1 | hello
      | ^
    ");
}

#[test]
fn renders_multibyte_escape() {
    let source = r#""\é""#;
    let err = parse_expression(source).unwrap_err();
    insta::assert_snapshot!(err.printer().source(source).render(), @r#"
    error: unknown escape sequence
      |
    1 | "\é"
      |  ^^
    "#);
}
