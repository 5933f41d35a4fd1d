//! 文の解析テスト

use super::*;
use pretty_assertions::assert_eq;

fn in_function(body: &str) -> String {
    format!("package p\n\nfunc f() {{\n{}\n}}\n", body)
}

#[test]
fn test_short_variable_declaration() {
    let file = assert_parse_success(&in_function("\tx, ok := m[k]"));
    let Stmt::Assign(assign) = first_statement(&file) else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.op, AssignOp::Define);
    assert_eq!(assign.lhs.len(), 2);
    assert!(matches!(assign.rhs[0], Expr::Index { .. }));
}

#[test]
fn test_labeled_loop() {
    let file = assert_parse_success(&in_function("outer:\n\tfor {\n\t\tbreak outer\n\t}"));
    let Stmt::Labeled { label, stmt } = first_statement(&file) else {
        panic!("expected a labeled statement");
    };
    assert_eq!(file.idents.name(*label), "outer");
    assert!(matches!(**stmt, Stmt::For(_)));
}

#[test]
fn test_type_switch_binding() {
    let file = assert_parse_success(&in_function(
        "\tswitch t := v.(type) {\n\tcase int:\n\t\t_ = t\n\t}",
    ));
    let Stmt::TypeSwitch(switch) = first_statement(&file) else {
        panic!("expected a type switch");
    };
    assert_eq!(switch.binding.map(|id| file.idents.name(id)), Some("t"));
    assert_eq!(switch.clauses.len(), 1);
}

#[test]
fn test_range_over_identifier_is_not_composite_literal() {
    let file = assert_parse_success(&in_function("\tfor _, item := range items {\n\t\tuse(item)\n\t}"));
    let Stmt::Range(range) = first_statement(&file) else {
        panic!("expected a range loop");
    };
    assert!(range.define);
    assert!(matches!(range.expr, Expr::Ident(_)));
    assert_eq!(range.body.statements.len(), 1);
}

#[test]
fn test_if_header_with_struct_comparison() {
    let file = assert_parse_success(&in_function("\tif p == (Point{}) {\n\t\treturn\n\t}"));
    assert!(matches!(first_statement(&file), Stmt::If(_)));
}

#[test]
fn test_roundtrip_control_flow() {
    assert_roundtrip(&in_function(
        "\tif x := g(); x > 0 {\n\t\treturn\n\t} else if x < 0 {\n\t\tpanic(x)\n\t} else {\n\t\tx++\n\t}\n\
\tfor {\n\t\tbreak\n\t}\n\
\tfor i < n {\n\t\ti *= 2\n\t}\n\
\tfor i := 0; i < n; i++ {\n\t\tcontinue\n\t}\n\
\tfor k, v := range m {\n\t\tdelete(m, k)\n\t\t_ = v\n\t}\n\
\tswitch v {\n\tcase 1, 2:\n\t\tfallthrough\n\tdefault:\n\t}\n\
\tswitch t := v.(type) {\n\tcase int, *T:\n\t\tuse(t)\n\t}",
    ));
}

#[test]
fn test_roundtrip_simple_statements() {
    assert_roundtrip(&in_function(
        "\tvar x T\n\
\tconst limit = 10\n\
\ttype local struct{}\n\
\tch <- x\n\
\tgo worker(ch)\n\
\tdefer close(ch)\n\
\tx, y = y, x\n\
\tcount += len(xs)\n\
\t{\n\t\tx--\n\t}",
    ));
}

#[test]
fn test_select_clauses() {
    let file = assert_parse_success(&in_function(
        "\tselect {\n\tcase v, ok := <-in:\n\t\t_ = v\n\tcase out <- x:\n\tdefault:\n\t}",
    ));
    let Stmt::Select(select) = first_statement(&file) else {
        panic!("expected a select statement");
    };
    assert_eq!(select.clauses.len(), 3);
    assert!(select.clauses[2].comm.is_none());
}

#[test]
fn test_roundtrip_select_and_labels() {
    assert_roundtrip(&in_function(
        "\tselect {\n\tcase v := <-in:\n\t\tout <- v\n\tcase <-done:\n\t\treturn\n\tdefault:\n\t}\n\
outer:\n\tfor {\n\t\tswitch {\n\t\tdefault:\n\t\t\tbreak outer\n\t\t}\n\t}",
    ));
}
