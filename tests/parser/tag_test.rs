//! `//generic` 指定の検出テスト

use super::*;
use test_case::test_case;

fn tags(source: &str) -> Vec<Option<DeclTag>> {
    assert_parse_success(source)
        .decls
        .iter()
        .map(Decl::tag)
        .collect()
}

#[test_case("//generic\ntype T int\n", true; "line comment")]
#[test_case("// generic \ntype T int\n", true; "surrounding spaces")]
#[test_case("/* generic */\ntype T int\n", true; "block comment")]
#[test_case("//go:generate monogen -t x.go\n//generic\ntype T int\n", true; "directive in group")]
#[test_case("//generic\n\ntype T int\n", false; "separated by blank line")]
#[test_case("// T is generic\ntype T int\n", false; "other text")]
#[test_case("// doc\n//generic\ntype T int\n", false; "extra lines in group")]
#[test_case("type T int //generic\n", false; "trailing comment")]
fn test_placeholder_tag(decl: &str, tagged: bool) {
    let source = format!("package p\n\n{}", decl);
    let expected = if tagged { Some(DeclTag::Placeholder) } else { None };
    assert_eq!(tags(&source), vec![expected]);
}

#[test]
fn test_trailing_comment_belongs_to_previous_declaration() {
    let source = "package p\n\ntype A int //generic\ntype B int\n";
    assert_eq!(tags(source), vec![None, None]);
}

#[test]
fn test_multiple_placeholders() {
    let source = "package p\n\n//generic\ntype KEY int\n\n//generic\ntype VALUE int\n\ntype pair struct {\n\tk KEY\n\tv VALUE\n}\n";
    assert_eq!(
        tags(source),
        vec![Some(DeclTag::Placeholder), Some(DeclTag::Placeholder), None]
    );
}

#[test]
fn test_function_can_carry_tag() {
    let source = "package p\n\n//generic\nfunc f() {}\n";
    assert_eq!(tags(source), vec![Some(DeclTag::Placeholder)]);
}
