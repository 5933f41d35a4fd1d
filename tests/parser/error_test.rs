//! 構文エラーのテスト

use super::*;
use monogen::error::ParserError;
use test_case::test_case;

#[test_case("type T int\n"; "missing package clause")]
#[test_case("package p\n\nfunc f(a int, string) {}\n"; "mixed named and unnamed parameters")]
#[test_case("package p\n\nfunc (a, b T) f() {}\n"; "receiver with two names")]
#[test_case("package p\n\ntype T int int\n"; "missing semicolon")]
#[test_case("package p\n\nfunc f() {\n\tselect {}\n}\n"; "select statement")]
#[test_case("package p\n\nx := 1\n"; "statement at top level")]
fn test_syntax_error(source: &str) {
    assert_parse_error(source);
}

#[test]
fn test_unclosed_block_reports_eof() {
    let err = assert_parse_error("package p\n\nfunc f() {\n\treturn\n");
    assert!(matches!(err, ParserError::UnexpectedEof { .. }));
}

#[test]
fn test_error_span_points_into_source() {
    let source = "package p\n\ntype T int int\n";
    let err = assert_parse_error(source);
    let span = err.span();
    assert_eq!(&source[span.start..span.end], "int");
    assert_eq!(span.start, source.rfind("int").unwrap());
}
