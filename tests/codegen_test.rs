//! コード出力テスト
//!
//! 構文木をGoソースに戻したときの書式を確認する。

use monogen::ast::*;
use monogen::codegen::{print_decl, print_file, Printer};
use monogen::compiler::parse_template;
use pretty_assertions::assert_eq;

fn reprint(source: &str) -> String {
    print_file(&parse_template(source).expect("Parsing should succeed"))
}

#[test]
fn test_header_without_imports() {
    let file = parse_template("package list\n").unwrap();
    let mut printer = Printer::new(&file.idents);
    printer.print_header(&file, None);
    assert_eq!(printer.finish(), "package list");
}

#[test]
fn test_header_with_package_override() {
    let file = parse_template("package list\n\nimport \"fmt\"\n").unwrap();
    let mut printer = Printer::new(&file.idents);
    printer.print_header(&file, Some("main"));
    assert_eq!(printer.finish(), "package main\n\nimport \"fmt\"");
}

#[test]
fn test_spacing_is_normalized() {
    let source = "package p\n\nfunc  f( a,b int )( int ,error ){\n\treturn a+b,nil\n}\n";
    assert_eq!(
        reprint(source),
        "package p\n\nfunc f(a, b int) (int, error) {\n\treturn a + b, nil\n}\n"
    );
}

#[test]
fn test_type_forms() {
    let source = "package p

type (
	A [4]int
	B [...]string
	C map[string][]*int
	D chan<- int
	E <-chan struct{}
	F func(int) (string, bool)
	G interface{}
	H *[]func()
)
";
    assert_eq!(
        reprint(source),
        "package p

type (
	A [4]int
	B [...]string
	C map[string][]*int
	D chan<- int
	E <-chan struct{}
	F func(int) (string, bool)
	G interface{}
	H *[]func()
)
"
    );
}

#[test]
fn test_nested_indentation() {
    let source = "package p

func f(xs []int) int {
	total := 0
	for _, x := range xs {
		if x > 0 {
			switch {
			case x > 10:
				total += 10
			default:
				total += x
			}
		}
	}
	return total
}
";
    assert_eq!(reprint(source), source);
}

#[test]
fn test_function_literal_in_body() {
    let source = "package p

func f() func() int {
	n := 0
	return func() int {
		n++
		return n
	}
}
";
    assert_eq!(reprint(source), source);
}

#[test]
fn test_renamed_identifiers_are_printed() {
    let mut file = parse_template("package p\n\ntype List []int\n\nfunc (l List) Len() int {\n\treturn len(l)\n}\n").unwrap();
    let list_ids: Vec<IdentId> = file
        .idents
        .iter()
        .filter(|(_, ident)| ident.name == "List")
        .map(|(id, _)| id)
        .collect();
    for id in list_ids {
        file.idents.rename(id, "ListInt");
    }

    assert_eq!(print_decl(&file.idents, &file.decls[0]), "type ListInt []int");
    assert_eq!(
        print_decl(&file.idents, &file.decls[1]),
        "func (l ListInt) Len() int {\n\treturn len(l)\n}"
    );
}

#[test]
fn test_labels_are_outdented() {
    let source = "package p

func f(ok bool) {
outer:
	for {
		if ok {
		inner:
			for {
				break inner
			}
			continue outer
		}
		break
	}
}
";
    assert_eq!(reprint(source), source);
}
