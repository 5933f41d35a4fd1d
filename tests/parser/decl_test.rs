//! 宣言の解析テスト

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_package_and_single_import() {
    let file = assert_parse_success("package list\n\nimport \"fmt\"\n");
    assert_eq!(file.package_name(), "list");
    assert_eq!(file.imports.len(), 1);
    assert_eq!(file.imports[0].path, "\"fmt\"");
    assert!(file.imports[0].alias.is_none());
    assert!(file.decls.is_empty());
}

#[test]
fn test_grouped_imports_with_alias() {
    let file = assert_parse_success("package p\n\nimport (\n\t\"fmt\"\n\tstr \"strings\"\n\t. \"math\"\n)\n");
    let aliases: Vec<Option<&str>> = file.imports.iter().map(|i| i.alias.as_deref()).collect();
    assert_eq!(aliases, vec![None, Some("str"), Some(".")]);
}

#[test]
fn test_type_declarations() {
    let file = assert_parse_success("package p\n\ntype List []int\ntype Name = string\n");
    assert_eq!(file.decls.len(), 2);

    let Decl::Gen(list) = &file.decls[0] else {
        panic!("expected a type declaration");
    };
    assert_eq!(list.keyword, DeclKeyword::Type);
    assert!(!list.grouped);
    match &list.specs[0] {
        Spec::Type(spec) => {
            assert_eq!(file.idents.name(spec.name), "List");
            assert!(!spec.alias);
            assert!(matches!(spec.ty, TypeExpr::Slice(_)));
        }
        other => panic!("expected a type spec, got {:?}", other),
    }

    let Decl::Gen(alias) = &file.decls[1] else {
        panic!("expected a type declaration");
    };
    assert!(matches!(&alias.specs[0], Spec::Type(spec) if spec.alias));
}

#[test]
fn test_grouped_value_declaration() {
    let file = assert_parse_success("package p\n\nconst (\n\ta = iota\n\tb\n)\n");
    let Decl::Gen(decl) = &file.decls[0] else {
        panic!("expected a const declaration");
    };
    assert_eq!(decl.keyword, DeclKeyword::Const);
    assert!(decl.grouped);
    assert_eq!(decl.specs.len(), 2);
    match &decl.specs[1] {
        Spec::Value(spec) => {
            assert_eq!(spec.names.len(), 1);
            assert!(spec.ty.is_none());
            assert!(spec.values.is_empty());
        }
        other => panic!("expected a value spec, got {:?}", other),
    }
}

#[test]
fn test_method_declaration() {
    let file = assert_parse_success("package p\n\nfunc (l *List) Len() int {\n\treturn len(l.items)\n}\n");
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected a function");
    };
    assert!(func.is_method());
    let receiver = func.receiver.as_ref().unwrap();
    assert_eq!(file.idents.name(receiver.names[0]), "l");
    assert!(matches!(receiver.ty, TypeExpr::Pointer(_)));
    assert_eq!(file.idents.name(func.name), "Len");
    assert!(func.signature.bare_result());
}

#[test]
fn test_parameter_grouping() {
    let file = assert_parse_success("package p\n\nfunc f(a, b int, s ...string) (n int, err error)\n");
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected a function");
    };
    assert!(func.body.is_none());
    assert_eq!(func.signature.params.len(), 2);
    assert_eq!(func.signature.params[0].names.len(), 2);
    assert!(matches!(func.signature.params[1].ty, TypeExpr::Ellipsis(_)));
    assert_eq!(func.signature.results.len(), 2);
    assert!(!func.signature.bare_result());
}

#[test]
fn test_unnamed_parameters() {
    let file = assert_parse_success("package p\n\nfunc f(int, []string) (bool, error)\n");
    let Decl::Func(func) = &file.decls[0] else {
        panic!("expected a function");
    };
    assert!(func.signature.params.iter().all(|p| p.names.is_empty()));
    assert!(func.signature.results.iter().all(|p| p.names.is_empty()));
}

#[test]
fn test_roundtrip_declarations() {
    assert_roundtrip(
        "package p\n\nimport (\n\t\"io\"\n\t\"sync\"\n)\n\n\
type Store struct {\n\tsync.Mutex\n\titems map[string]int `json:\"items\"`\n}\n\n\
type Reader interface {\n\tio.Closer\n\tRead(p []byte) (n int, err error)\n}\n\n\
type Name = string\n\n\
var (\n\tx, y int\n\tz = 3\n)\n\n\
func apply(fn func(a, b int32) bool, a, b int32) int32 {\n\treturn a\n}\n\n\
func external() (int, error)\n",
    );
}
