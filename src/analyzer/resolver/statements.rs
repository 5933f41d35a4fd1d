//! 文の名前解決

use crate::ast::*;

use super::Resolver;

impl Resolver<'_> {
    /// ブロックを新しいスコープで解決
    pub(crate) fn resolve_block(&mut self, block: &Block) {
        self.enter_scope();
        self.resolve_stmts(&block.statements);
        self.exit_scope();
    }

    pub(crate) fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    /// 文を解決
    pub(crate) fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(decl) => self.resolve_local_decl(decl),
            // ラベルは別の名前空間
            Stmt::Labeled { stmt, .. } => self.resolve_stmt(stmt),
            Stmt::Expr(expr) | Stmt::Go(expr) | Stmt::Defer(expr) => self.resolve_expr(expr),
            Stmt::Send { channel, value } => {
                self.resolve_expr(channel);
                self.resolve_expr(value);
            }
            Stmt::IncDec { expr, .. } => self.resolve_expr(expr),
            Stmt::Assign(assign) => {
                for value in &assign.rhs {
                    self.resolve_expr(value);
                }
                if assign.op == AssignOp::Define {
                    for target in &assign.lhs {
                        match target {
                            Expr::Ident(id) => self.declare_local(*id),
                            other => self.resolve_expr(other),
                        }
                    }
                } else {
                    for target in &assign.lhs {
                        self.resolve_expr(target);
                    }
                }
            }
            Stmt::Return(values) => {
                for value in values {
                    self.resolve_expr(value);
                }
            }
            Stmt::Branch { .. } | Stmt::Empty => {}
            Stmt::Block(block) => self.resolve_block(block),
            Stmt::If(stmt) => self.resolve_if(stmt),
            Stmt::Switch(stmt) => {
                self.enter_scope();
                if let Some(init) = &stmt.init {
                    self.resolve_stmt(init);
                }
                if let Some(tag) = &stmt.tag {
                    self.resolve_expr(tag);
                }
                for clause in &stmt.clauses {
                    for value in &clause.values {
                        self.resolve_expr(value);
                    }
                    self.enter_scope();
                    self.resolve_stmts(&clause.body);
                    self.exit_scope();
                }
                self.exit_scope();
            }
            Stmt::TypeSwitch(stmt) => {
                self.enter_scope();
                if let Some(init) = &stmt.init {
                    self.resolve_stmt(init);
                }
                self.resolve_expr(&stmt.subject);
                if let Some(binding) = stmt.binding {
                    self.declare_local(binding);
                }
                for clause in &stmt.clauses {
                    for ty in &clause.types {
                        self.resolve_type(ty);
                    }
                    self.enter_scope();
                    self.resolve_stmts(&clause.body);
                    self.exit_scope();
                }
                self.exit_scope();
            }
            Stmt::Select(stmt) => {
                // 各節は独自のスコープを持ち、`:=` の受信先はその節のローカル
                for clause in &stmt.clauses {
                    self.enter_scope();
                    if let Some(comm) = &clause.comm {
                        self.resolve_stmt(comm);
                    }
                    self.resolve_stmts(&clause.body);
                    self.exit_scope();
                }
            }
            Stmt::For(stmt) => {
                self.enter_scope();
                if let Some(init) = &stmt.init {
                    self.resolve_stmt(init);
                }
                if let Some(condition) = &stmt.condition {
                    self.resolve_expr(condition);
                }
                if let Some(post) = &stmt.post {
                    self.resolve_stmt(post);
                }
                self.resolve_block(&stmt.body);
                self.exit_scope();
            }
            Stmt::Range(stmt) => {
                self.enter_scope();
                self.resolve_expr(&stmt.expr);
                for var in [&stmt.key, &stmt.value].into_iter().flatten() {
                    match var {
                        Expr::Ident(id) if stmt.define => self.declare_local(*id),
                        other => self.resolve_expr(other),
                    }
                }
                self.resolve_block(&stmt.body);
                self.exit_scope();
            }
        }
    }

    fn resolve_if(&mut self, stmt: &IfStmt) {
        self.enter_scope();
        if let Some(init) = &stmt.init {
            self.resolve_stmt(init);
        }
        self.resolve_expr(&stmt.condition);
        self.resolve_block(&stmt.then_branch);
        match &stmt.else_branch {
            Some(ElseBranch::Block(block)) => self.resolve_block(block),
            Some(ElseBranch::If(nested)) => self.resolve_if(nested),
            None => {}
        }
        self.exit_scope();
    }

    /// 関数内の宣言
    ///
    /// 型名は型式の前に、変数名は初期化式の後にスコープに入る。
    fn resolve_local_decl(&mut self, decl: &GenDecl) {
        for spec in &decl.specs {
            match spec {
                Spec::Type(spec) => {
                    self.declare_local(spec.name);
                    self.resolve_type(&spec.ty);
                }
                Spec::Value(spec) => {
                    if let Some(ty) = &spec.ty {
                        self.resolve_type(ty);
                    }
                    for value in &spec.values {
                        self.resolve_expr(value);
                    }
                    for &name in &spec.names {
                        self.declare_local(name);
                    }
                }
            }
        }
    }
}
