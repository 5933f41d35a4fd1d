//! 文の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

/// 単純文、または `for` ヘッダの range 節
enum SimpleStmt {
    Stmt(Stmt),
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        expr: Expr,
    },
}

impl Parser {
    /// ブロックを解析
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.current_span().start;
        self.expect(Token::LeftBrace)?;
        let statements = self.parse_stmt_list()?;
        self.expect(Token::RightBrace)?;

        Ok(Block {
            statements,
            span: self.span_from(start),
        })
    }

    /// `}` または次の case 節までの文の並び
    fn parse_stmt_list(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();

        while !self.at_stmt_list_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            statements.push(self.parse_statement_internal()?);
            if !self.at_stmt_list_end() {
                self.expect_semi()?;
            }
        }

        Ok(statements)
    }

    fn at_stmt_list_end(&self) -> bool {
        self.check(&Token::RightBrace)
            || self.check(&Token::Case)
            || self.check(&Token::Default)
            || self.is_at_end()
    }

    /// 文を解析（内部実装）
    pub(super) fn parse_statement_internal(&mut self) -> ParseResult<Stmt> {
        match self.current_token() {
            Some(Token::Type) | Some(Token::Var) | Some(Token::Const) => {
                Ok(Stmt::Decl(self.parse_gen_decl()?))
            }
            Some(Token::Return) => {
                self.advance();
                let values = if self.check(&Token::Semicolon) || self.check(&Token::RightBrace) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                Ok(Stmt::Return(values))
            }
            Some(Token::Break) | Some(Token::Continue) | Some(Token::Goto) => {
                let kind = match self.current_token() {
                    Some(Token::Break) => BranchKind::Break,
                    Some(Token::Continue) => BranchKind::Continue,
                    _ => BranchKind::Goto,
                };
                self.advance();
                let label = if matches!(self.current_token(), Some(Token::Identifier(_))) {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                Ok(Stmt::Branch { kind, label })
            }
            Some(Token::Fallthrough) => {
                self.advance();
                Ok(Stmt::Branch {
                    kind: BranchKind::Fallthrough,
                    label: None,
                })
            }
            Some(Token::Go) => {
                self.advance();
                Ok(Stmt::Go(self.parse_expr()?))
            }
            Some(Token::Defer) => {
                self.advance();
                Ok(Stmt::Defer(self.parse_expr()?))
            }
            Some(Token::LeftBrace) => Ok(Stmt::Block(self.parse_block()?)),
            Some(Token::If) => Ok(Stmt::If(self.parse_if_stmt()?)),
            Some(Token::For) => self.parse_for_stmt(),
            Some(Token::Switch) => self.parse_switch_stmt(),
            Some(Token::Select) => Ok(Stmt::Select(self.parse_select_stmt()?)),
            Some(Token::Identifier(_)) if self.check_at(1, &Token::Colon) => {
                let label = self.expect_identifier()?;
                self.advance();
                let stmt = if self.check(&Token::RightBrace) {
                    Stmt::Empty
                } else {
                    self.parse_statement_internal()?
                };
                Ok(Stmt::Labeled {
                    label,
                    stmt: Box::new(stmt),
                })
            }
            _ => self.parse_plain_simple_stmt(),
        }
    }

    /// range 節を許可しない単純文
    fn parse_plain_simple_stmt(&mut self) -> ParseResult<Stmt> {
        match self.parse_simple_stmt(false)? {
            SimpleStmt::Stmt(stmt) => Ok(stmt),
            SimpleStmt::Range { .. } => Err(self.error("Unexpected range clause".to_string())),
        }
    }

    /// 式文、代入、送信、インクリメント/デクリメント
    fn parse_simple_stmt(&mut self, range_ok: bool) -> ParseResult<SimpleStmt> {
        if range_ok && self.match_token(&Token::Range) {
            let expr = self.parse_expr()?;
            return Ok(SimpleStmt::Range {
                key: None,
                value: None,
                define: false,
                expr,
            });
        }

        let mut lhs = self.parse_expr_list()?;

        if let Some(op) = self.assign_op() {
            self.advance();

            let plain = matches!(op, AssignOp::Assign | AssignOp::Define);
            if range_ok && plain && self.match_token(&Token::Range) {
                if lhs.len() > 2 {
                    return Err(self.error("Range clause permits at most two variables".to_string()));
                }
                let expr = self.parse_expr()?;
                let mut vars = lhs.into_iter();
                return Ok(SimpleStmt::Range {
                    key: vars.next(),
                    value: vars.next(),
                    define: op == AssignOp::Define,
                    expr,
                });
            }

            let rhs = self.parse_expr_list()?;
            return Ok(SimpleStmt::Stmt(Stmt::Assign(AssignStmt { lhs, op, rhs })));
        }

        if lhs.len() != 1 {
            return Err(self.error("Expected assignment".to_string()));
        }
        let expr = lhs.remove(0);

        let stmt = match self.current_token() {
            Some(Token::Arrow) => {
                self.advance();
                let value = self.parse_expr()?;
                Stmt::Send {
                    channel: expr,
                    value,
                }
            }
            Some(Token::Increment) => {
                self.advance();
                Stmt::IncDec {
                    expr,
                    increment: true,
                }
            }
            Some(Token::Decrement) => {
                self.advance();
                Stmt::IncDec {
                    expr,
                    increment: false,
                }
            }
            _ => Stmt::Expr(expr),
        };

        Ok(SimpleStmt::Stmt(stmt))
    }

    fn assign_op(&self) -> Option<AssignOp> {
        let op = match self.current_token()? {
            Token::Assign => AssignOp::Assign,
            Token::Define => AssignOp::Define,
            Token::PlusAssign => AssignOp::Add,
            Token::MinusAssign => AssignOp::Sub,
            Token::StarAssign => AssignOp::Mul,
            Token::SlashAssign => AssignOp::Div,
            Token::PercentAssign => AssignOp::Rem,
            Token::AmpersandAssign => AssignOp::BitAnd,
            Token::PipeAssign => AssignOp::BitOr,
            Token::CaretAssign => AssignOp::BitXor,
            Token::ShlAssign => AssignOp::Shl,
            Token::ShrAssign => AssignOp::Shr,
            Token::AndNotAssign => AssignOp::AndNot,
            _ => return None,
        };
        Some(op)
    }

    /// 条件式として使える文から式を取り出す
    fn into_condition(&self, stmt: Stmt) -> ParseResult<Expr> {
        match stmt {
            Stmt::Expr(expr) => Ok(expr),
            _ => Err(self.error("Expected condition expression".to_string())),
        }
    }

    /// if文を解析
    fn parse_if_stmt(&mut self) -> ParseResult<IfStmt> {
        let start = self.current_span().start;
        self.expect(Token::If)?;

        let outer = self.expr_level;
        self.expr_level = -1;
        let header = self.parse_if_header();
        self.expr_level = outer;
        let (init, condition) = header?;

        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            if self.check(&Token::If) {
                Some(ElseBranch::If(Box::new(self.parse_if_stmt()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfStmt {
            init,
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    fn parse_if_header(&mut self) -> ParseResult<(Option<Box<Stmt>>, Expr)> {
        if self.match_token(&Token::Semicolon) {
            return Ok((None, self.parse_expr()?));
        }

        let first = self.parse_plain_simple_stmt()?;
        if self.match_token(&Token::Semicolon) {
            let condition = self.parse_expr()?;
            Ok((Some(Box::new(first)), condition))
        } else {
            Ok((None, self.into_condition(first)?))
        }
    }

    /// for文（3節形式、条件のみ、range、無限ループ）を解析
    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span().start;
        self.expect(Token::For)?;

        let outer = self.expr_level;
        self.expr_level = -1;
        let header = self.parse_for_header();
        self.expr_level = outer;
        let header = header?;

        let body = self.parse_block()?;
        let span = self.span_from(start);

        let stmt = match header {
            ForHeader::Range {
                key,
                value,
                define,
                expr,
            } => Stmt::Range(RangeStmt {
                key,
                value,
                define,
                expr,
                body,
                span,
            }),
            ForHeader::Loop {
                init,
                condition,
                post,
            } => Stmt::For(ForStmt {
                init,
                condition,
                post,
                body,
                span,
            }),
        };
        Ok(stmt)
    }

    fn parse_for_header(&mut self) -> ParseResult<ForHeader> {
        let mut header = ForHeader::Loop {
            init: None,
            condition: None,
            post: None,
        };
        if self.check(&Token::LeftBrace) {
            return Ok(header);
        }

        let first = if self.check(&Token::Semicolon) {
            None
        } else {
            match self.parse_simple_stmt(true)? {
                SimpleStmt::Range {
                    key,
                    value,
                    define,
                    expr,
                } => {
                    return Ok(ForHeader::Range {
                        key,
                        value,
                        define,
                        expr,
                    })
                }
                SimpleStmt::Stmt(stmt) => Some(stmt),
            }
        };

        if self.match_token(&Token::Semicolon) {
            let condition = if self.check(&Token::Semicolon) {
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.expect(Token::Semicolon)?;
            let post = if self.check(&Token::LeftBrace) {
                None
            } else {
                Some(Box::new(self.parse_plain_simple_stmt()?))
            };
            header = ForHeader::Loop {
                init: first.map(Box::new),
                condition,
                post,
            };
        } else if let Some(stmt) = first {
            header = ForHeader::Loop {
                init: None,
                condition: Some(self.into_condition(stmt)?),
                post: None,
            };
        }

        Ok(header)
    }

    /// switch文（式switchと型switch）を解析
    fn parse_switch_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span().start;
        self.expect(Token::Switch)?;

        let outer = self.expr_level;
        self.expr_level = -1;
        let header = self.parse_switch_header();
        self.expr_level = outer;
        let (init, tag) = header?;

        match tag {
            Some(Stmt::Assign(assign)) if is_type_switch_guard(&assign) => {
                let AssignStmt { lhs, rhs, .. } = assign;
                let binding = match lhs.into_iter().next() {
                    Some(Expr::Ident(id)) => Some(id),
                    _ => None,
                };
                let subject = match rhs.into_iter().next() {
                    Some(Expr::TypeAssert { expr, .. }) => *expr,
                    _ => return Err(self.error("Expected type switch guard".to_string())),
                };
                let clauses = self.parse_type_case_clauses()?;
                Ok(Stmt::TypeSwitch(TypeSwitchStmt {
                    init,
                    binding,
                    subject,
                    clauses,
                    span: self.span_from(start),
                }))
            }
            Some(Stmt::Expr(Expr::TypeAssert { expr, ty: None })) => {
                let clauses = self.parse_type_case_clauses()?;
                Ok(Stmt::TypeSwitch(TypeSwitchStmt {
                    init,
                    binding: None,
                    subject: *expr,
                    clauses,
                    span: self.span_from(start),
                }))
            }
            tag => {
                let tag = match tag {
                    Some(stmt) => Some(self.into_condition(stmt)?),
                    None => None,
                };
                let clauses = self.parse_case_clauses()?;
                Ok(Stmt::Switch(SwitchStmt {
                    init,
                    tag,
                    clauses,
                    span: self.span_from(start),
                }))
            }
        }
    }

    fn parse_switch_header(&mut self) -> ParseResult<(Option<Box<Stmt>>, Option<Stmt>)> {
        if self.check(&Token::LeftBrace) {
            return Ok((None, None));
        }

        let first = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_plain_simple_stmt()?)
        };

        if self.match_token(&Token::Semicolon) {
            let tag = if self.check(&Token::LeftBrace) {
                None
            } else {
                Some(self.parse_plain_simple_stmt()?)
            };
            Ok((first.map(Box::new), tag))
        } else {
            Ok((None, first))
        }
    }

    fn parse_case_clauses(&mut self) -> ParseResult<Vec<CaseClause>> {
        self.expect(Token::LeftBrace)?;

        let mut clauses = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let values = if self.match_token(&Token::Case) {
                self.parse_expr_list()?
            } else {
                self.expect(Token::Default)?;
                Vec::new()
            };
            self.expect(Token::Colon)?;
            let body = self.parse_stmt_list()?;
            clauses.push(CaseClause { values, body });
        }

        self.expect(Token::RightBrace)?;
        Ok(clauses)
    }

    /// select文を解析
    fn parse_select_stmt(&mut self) -> ParseResult<SelectStmt> {
        let start = self.current_span().start;
        self.expect(Token::Select)?;
        self.expect(Token::LeftBrace)?;

        let mut clauses = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let comm = if self.match_token(&Token::Case) {
                let comm = self.parse_plain_simple_stmt()?;
                if !is_comm_stmt(&comm) {
                    return Err(self.error("Expected send or receive in select case".to_string()));
                }
                Some(Box::new(comm))
            } else {
                self.expect(Token::Default)?;
                None
            };
            self.expect(Token::Colon)?;
            let body = self.parse_stmt_list()?;
            clauses.push(CommClause { comm, body });
        }

        self.expect(Token::RightBrace)?;
        Ok(SelectStmt {
            clauses,
            span: self.span_from(start),
        })
    }

    fn parse_type_case_clauses(&mut self) -> ParseResult<Vec<TypeCaseClause>> {
        self.expect(Token::LeftBrace)?;

        let mut clauses = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let types = if self.match_token(&Token::Case) {
                let mut types = vec![self.parse_type()?];
                while self.match_token(&Token::Comma) {
                    types.push(self.parse_type()?);
                }
                types
            } else {
                self.expect(Token::Default)?;
                Vec::new()
            };
            self.expect(Token::Colon)?;
            let body = self.parse_stmt_list()?;
            clauses.push(TypeCaseClause { types, body });
        }

        self.expect(Token::RightBrace)?;
        Ok(clauses)
    }
}

/// for文のヘッダ
enum ForHeader {
    Loop {
        init: Option<Box<Stmt>>,
        condition: Option<Expr>,
        post: Option<Box<Stmt>>,
    },
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        expr: Expr,
    },
}

/// 送信、受信式、または受信結果の代入
fn is_comm_stmt(stmt: &Stmt) -> bool {
    let is_recv = |expr: &Expr| matches!(expr, Expr::Unary { op: UnaryOp::Recv, .. });
    match stmt {
        Stmt::Send { .. } => true,
        Stmt::Expr(expr) => is_recv(expr),
        Stmt::Assign(assign) => {
            matches!(assign.op, AssignOp::Assign | AssignOp::Define)
                && assign.lhs.len() <= 2
                && assign.rhs.len() == 1
                && is_recv(&assign.rhs[0])
        }
        _ => false,
    }
}

/// `v := x.(type)`
fn is_type_switch_guard(assign: &AssignStmt) -> bool {
    assign.op == AssignOp::Define
        && assign.lhs.len() == 1
        && assign.rhs.len() == 1
        && matches!(assign.lhs[0], Expr::Ident(_))
        && matches!(assign.rhs[0], Expr::TypeAssert { ty: None, .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_stmt(source: &str) -> Stmt {
        let mut parser = Parser::new(tokenize(source).unwrap());
        parser.parse_statement().unwrap()
    }

    #[test]
    fn test_three_clause_for() {
        match parse_stmt("for i := 0; i < n; i++ {\n}") {
            Stmt::For(f) => {
                assert!(f.init.is_some());
                assert!(f.condition.is_some());
                assert!(matches!(f.post.as_deref(), Some(Stmt::IncDec { increment: true, .. })));
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_range_with_key_and_value() {
        match parse_stmt("for k, v := range m {\n}") {
            Stmt::Range(r) => {
                assert!(r.define);
                assert!(r.key.is_some());
                assert!(r.value.is_some());
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_if_header_does_not_take_block_as_literal() {
        match parse_stmt("if x == y {\n\treturn\n}") {
            Stmt::If(stmt) => assert_eq!(stmt.then_branch.statements, vec![Stmt::Return(vec![])]),
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_type_switch_with_binding() {
        match parse_stmt("switch v := x.(type) {\ncase int, string:\n\treturn\ndefault:\n}") {
            Stmt::TypeSwitch(stmt) => {
                assert!(stmt.binding.is_some());
                assert_eq!(stmt.clauses.len(), 2);
                assert_eq!(stmt.clauses[0].types.len(), 2);
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_select_comm_clauses() {
        let source = "select {\ncase v, ok := <-in:\n\treturn\ncase out <- x:\ncase <-done:\ndefault:\n}";
        match parse_stmt(source) {
            Stmt::Select(stmt) => {
                assert_eq!(stmt.clauses.len(), 4);
                assert!(matches!(stmt.clauses[0].comm.as_deref(), Some(Stmt::Assign(_))));
                assert!(matches!(stmt.clauses[1].comm.as_deref(), Some(Stmt::Send { .. })));
                assert!(matches!(stmt.clauses[2].comm.as_deref(), Some(Stmt::Expr(_))));
                assert!(stmt.clauses[3].comm.is_none());
                assert_eq!(stmt.clauses[0].body, vec![Stmt::Return(vec![])]);
            }
            other => panic!("unexpected statement {:?}", other),
        }
    }

    #[test]
    fn test_select_case_must_communicate() {
        let mut parser = Parser::new(tokenize("select {\ncase x + 1:\n}").unwrap());
        assert!(parser.parse_statement().is_err());
    }

    #[test]
    fn test_labeled_loop() {
        assert!(matches!(
            parse_stmt("outer:\nfor {\n\tbreak outer\n}"),
            Stmt::Labeled { .. }
        ));
    }
}
