//! 式の出力

use crate::ast::*;

use super::Printer;

impl Printer<'_> {
    /// 式を出力
    pub fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(id) => self.write_ident(*id),
            Expr::Literal(lit) => self.write(&lit.raw),
            Expr::Composite(lit) => {
                if let Some(ty) = &lit.ty {
                    self.print_expr(ty);
                }
                self.write("{");
                self.print_expr_list(&lit.elements);
                self.write("}");
            }
            Expr::FuncLit(lit) => {
                self.write("func");
                self.print_signature(&lit.signature);
                self.write(" ");
                self.print_block(&lit.body);
            }
            Expr::Paren(inner) => {
                self.write("(");
                self.print_expr(inner);
                self.write(")");
            }
            Expr::Selector { expr, sel } => {
                self.print_expr(expr);
                self.write(".");
                self.write_ident(*sel);
            }
            Expr::Index { expr, index } => {
                self.print_expr(expr);
                self.write("[");
                self.print_expr(index);
                self.write("]");
            }
            Expr::Slice(slice) => {
                self.print_expr(&slice.expr);
                self.write("[");
                if let Some(low) = &slice.low {
                    self.print_expr(low);
                }
                self.write(":");
                if let Some(high) = &slice.high {
                    self.print_expr(high);
                }
                if let Some(max) = &slice.max {
                    self.write(":");
                    self.print_expr(max);
                }
                self.write("]");
            }
            Expr::TypeAssert { expr, ty } => {
                self.print_expr(expr);
                self.write(".(");
                match ty {
                    Some(ty) => self.print_type(ty),
                    None => self.write("type"),
                }
                self.write(")");
            }
            Expr::Call(call) => {
                self.print_expr(&call.func);
                self.write("(");
                self.print_expr_list(&call.args);
                if call.ellipsis {
                    self.write("...");
                }
                self.write(")");
            }
            Expr::Unary { op, expr } => {
                self.write(op.as_str());
                self.print_expr(expr);
            }
            Expr::Binary { op, left, right } => {
                self.print_expr(left);
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
                self.print_expr(right);
            }
            Expr::KeyValue { key, value } => {
                self.print_expr(key);
                self.write(": ");
                self.print_expr(value);
            }
            Expr::Type(ty) => self.print_type(ty),
        }
    }

    pub(super) fn print_expr_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expr(expr);
        }
    }
}
