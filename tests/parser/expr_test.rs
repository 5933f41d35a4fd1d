//! 式の解析テスト

use monogen::codegen::Printer;
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::*;

/// 式を解析して出力し直す
fn reprint(source: &str) -> String {
    let mut parser = Parser::new(tokenize(source).expect("Lexing should succeed"));
    let expr = parser.parse_expression().expect("Parsing should succeed");
    let mut printer = Printer::new(parser.idents());
    printer.print_expr(&expr);
    printer.finish()
}

fn parse_expr(source: &str) -> Expr {
    let mut parser = Parser::new(tokenize(source).expect("Lexing should succeed"));
    parser.parse_expression().expect("Parsing should succeed")
}

#[test]
fn test_multiplication_binds_tighter() {
    let Expr::Binary { op, right, .. } = parse_expr("a + b * c") else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn test_logical_precedence() {
    let Expr::Binary { op, right, .. } = parse_expr("a || b && c") else {
        panic!("expected a binary expression");
    };
    assert_eq!(op, BinaryOp::Or);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::And, .. }));
}

#[test]
fn test_binary_is_left_associative() {
    let Expr::Binary { left, .. } = parse_expr("a - b - c") else {
        panic!("expected a binary expression");
    };
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Sub, .. }));
}

#[test]
fn test_unary_operand() {
    let Expr::Binary { left, .. } = parse_expr("-x * y") else {
        panic!("expected a binary expression");
    };
    assert!(matches!(*left, Expr::Unary { op: UnaryOp::Neg, .. }));
}

#[test]
fn test_variadic_call() {
    let Expr::Call(call) = parse_expr("append(xs, ys...)") else {
        panic!("expected a call");
    };
    assert_eq!(call.args.len(), 2);
    assert!(call.ellipsis);
}

#[test]
fn test_receive_only_channel_type() {
    let Expr::Call(call) = parse_expr("make(<-chan int, 1)") else {
        panic!("expected a call");
    };
    assert!(matches!(
        call.args[0],
        Expr::Type(TypeExpr::Chan { dir: ChanDir::Recv, .. })
    ));
}

#[test_case("l.items[i].Value(1, 2)"; "selector index call chain")]
#[test_case("s[1:]"; "slice low")]
#[test_case("s[:n:m]"; "full slice")]
#[test_case("[]int{1, 2}"; "slice literal")]
#[test_case("Point{X: 1, Y: -2}"; "keyed struct literal")]
#[test_case("map[string][]T{\"a\": {1}}"; "nested elided literal")]
#[test_case("&List{}"; "address of literal")]
#[test_case("v.(T)"; "type assertion")]
#[test_case("[]byte(s)"; "conversion")]
#[test_case("(*T)(nil)"; "parenthesized pointer conversion")]
#[test_case("<-ch"; "receive")]
#[test_case("x &^ mask << 2"; "bit operators")]
#[test_case("func(a, b T) bool { return a < b }"; "function literal")]
#[test_case("pkg.New(0x10, 1.5, 'c', `raw`)"; "literals")]
fn test_expression_roundtrip(source: &str) {
    let expected = source.replace("{ return a < b }", "{\n\treturn a < b\n}");
    assert_eq!(reprint(source), expected);
}
