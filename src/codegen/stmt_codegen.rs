//! 文の出力

use crate::ast::*;

use super::Printer;

impl Printer<'_> {
    /// ブロックを出力
    pub fn print_block(&mut self, block: &Block) {
        if block.statements.is_empty() {
            self.write("{}");
            return;
        }

        self.write("{");
        self.print_stmt_list(&block.statements);
        self.newline();
        self.write("}");
    }

    /// 1段深いインデントで文を並べる
    fn print_stmt_list(&mut self, stmts: &[Stmt]) {
        self.indent += 1;
        for stmt in stmts {
            // ラベルは gofmt と同じく1段浅く置く
            if matches!(stmt, Stmt::Labeled { .. }) {
                self.indent -= 1;
                self.newline();
                self.indent += 1;
            } else {
                self.newline();
            }
            self.print_stmt(stmt);
        }
        self.indent -= 1;
    }

    /// 文を出力
    pub fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.print_gen_decl(decl),
            Stmt::Labeled { label, stmt } => {
                self.write_ident(*label);
                self.write(":");
                if **stmt != Stmt::Empty {
                    self.newline();
                    self.print_stmt(stmt);
                }
            }
            Stmt::Expr(expr) => self.print_expr(expr),
            Stmt::Send { channel, value } => {
                self.print_expr(channel);
                self.write(" <- ");
                self.print_expr(value);
            }
            Stmt::IncDec { expr, increment } => {
                self.print_expr(expr);
                self.write(if *increment { "++" } else { "--" });
            }
            Stmt::Assign(assign) => {
                self.print_expr_list(&assign.lhs);
                self.write(" ");
                self.write(assign.op.as_str());
                self.write(" ");
                self.print_expr_list(&assign.rhs);
            }
            Stmt::Go(expr) => {
                self.write("go ");
                self.print_expr(expr);
            }
            Stmt::Defer(expr) => {
                self.write("defer ");
                self.print_expr(expr);
            }
            Stmt::Return(values) => {
                self.write("return");
                if !values.is_empty() {
                    self.write(" ");
                    self.print_expr_list(values);
                }
            }
            Stmt::Branch { kind, label } => {
                self.write(kind.as_str());
                if let Some(label) = label {
                    self.write(" ");
                    self.write_ident(*label);
                }
            }
            Stmt::Block(block) => self.print_block(block),
            Stmt::If(stmt) => self.print_if(stmt),
            Stmt::Switch(stmt) => {
                self.write("switch ");
                if let Some(init) = &stmt.init {
                    self.print_stmt(init);
                    self.write("; ");
                }
                if let Some(tag) = &stmt.tag {
                    self.print_expr(tag);
                    self.write(" ");
                }
                self.write("{");
                for clause in &stmt.clauses {
                    self.newline();
                    if clause.values.is_empty() {
                        self.write("default:");
                    } else {
                        self.write("case ");
                        self.print_expr_list(&clause.values);
                        self.write(":");
                    }
                    self.print_stmt_list(&clause.body);
                }
                self.newline();
                self.write("}");
            }
            Stmt::TypeSwitch(stmt) => {
                self.write("switch ");
                if let Some(init) = &stmt.init {
                    self.print_stmt(init);
                    self.write("; ");
                }
                if let Some(binding) = stmt.binding {
                    self.write_ident(binding);
                    self.write(" := ");
                }
                self.print_expr(&stmt.subject);
                self.write(".(type) {");
                for clause in &stmt.clauses {
                    self.newline();
                    if clause.types.is_empty() {
                        self.write("default:");
                    } else {
                        self.write("case ");
                        for (i, ty) in clause.types.iter().enumerate() {
                            if i > 0 {
                                self.write(", ");
                            }
                            self.print_type(ty);
                        }
                        self.write(":");
                    }
                    self.print_stmt_list(&clause.body);
                }
                self.newline();
                self.write("}");
            }
            Stmt::Select(stmt) => {
                self.write("select {");
                for clause in &stmt.clauses {
                    self.newline();
                    match &clause.comm {
                        Some(comm) => {
                            self.write("case ");
                            self.print_stmt(comm);
                            self.write(":");
                        }
                        None => self.write("default:"),
                    }
                    self.print_stmt_list(&clause.body);
                }
                self.newline();
                self.write("}");
            }
            Stmt::For(stmt) => {
                self.write("for ");
                match (&stmt.init, &stmt.condition, &stmt.post) {
                    (None, None, None) => {}
                    (None, Some(condition), None) => {
                        self.print_expr(condition);
                        self.write(" ");
                    }
                    (init, condition, post) => {
                        if let Some(init) = init {
                            self.print_stmt(init);
                        }
                        self.write("; ");
                        if let Some(condition) = condition {
                            self.print_expr(condition);
                        }
                        self.write(";");
                        if let Some(post) = post {
                            self.write(" ");
                            self.print_stmt(post);
                        }
                        self.write(" ");
                    }
                }
                self.print_block(&stmt.body);
            }
            Stmt::Range(stmt) => {
                self.write("for ");
                if let Some(key) = &stmt.key {
                    self.print_expr(key);
                    if let Some(value) = &stmt.value {
                        self.write(", ");
                        self.print_expr(value);
                    }
                    self.write(if stmt.define { " := " } else { " = " });
                }
                self.write("range ");
                self.print_expr(&stmt.expr);
                self.write(" ");
                self.print_block(&stmt.body);
            }
            Stmt::Empty => {}
        }
    }

    fn print_if(&mut self, stmt: &IfStmt) {
        self.write("if ");
        if let Some(init) = &stmt.init {
            self.print_stmt(init);
            self.write("; ");
        }
        self.print_expr(&stmt.condition);
        self.write(" ");
        self.print_block(&stmt.then_branch);

        match &stmt.else_branch {
            Some(ElseBranch::Block(block)) => {
                self.write(" else ");
                self.print_block(block);
            }
            Some(ElseBranch::If(nested)) => {
                self.write(" else ");
                self.print_if(nested);
            }
            None => {}
        }
    }
}
