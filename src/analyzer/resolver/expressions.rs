//! 式の名前解決

use crate::ast::*;

use super::Resolver;

impl Resolver<'_> {
    /// 式を解決
    pub(crate) fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(id) => self.resolve_ident(*id),
            Expr::Literal(_) => {}
            Expr::Composite(lit) => {
                if let Some(ty) = &lit.ty {
                    self.resolve_expr(ty);
                }
                for element in &lit.elements {
                    self.resolve_expr(element);
                }
            }
            Expr::FuncLit(lit) => {
                self.enter_scope();
                self.resolve_signature(&lit.signature, true);
                self.resolve_stmts(&lit.body.statements);
                self.exit_scope();
            }
            Expr::Paren(inner) => self.resolve_expr(inner),
            // セレクタ名はフィールドかメソッドなので解決しない
            Expr::Selector { expr, .. } => self.resolve_expr(expr),
            Expr::Index { expr, index } => {
                self.resolve_expr(expr);
                self.resolve_expr(index);
            }
            Expr::Slice(slice) => {
                self.resolve_expr(&slice.expr);
                for bound in [&slice.low, &slice.high, &slice.max].into_iter().flatten() {
                    self.resolve_expr(bound);
                }
            }
            Expr::TypeAssert { expr, ty } => {
                self.resolve_expr(expr);
                if let Some(ty) = ty {
                    self.resolve_type(ty);
                }
            }
            Expr::Call(call) => {
                self.resolve_expr(&call.func);
                for arg in &call.args {
                    self.resolve_expr(arg);
                }
            }
            Expr::Unary { expr, .. } => self.resolve_expr(expr),
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::KeyValue { key, value } => {
                // 構造体リテラルのキーはフィールド名の可能性がある。
                // 解決できた場合のみ束縛し、それ以外は未解決のまま残す。
                self.resolve_expr(key);
                self.resolve_expr(value);
            }
            Expr::Type(ty) => self.resolve_type(ty),
        }
    }
}
