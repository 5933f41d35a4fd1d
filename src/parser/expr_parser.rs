//! 式の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 式を解析
    pub(super) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_binary_expr(1)
    }

    /// カンマ区切りの式リスト
    pub(super) fn parse_expr_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expr()?];
        while self.match_token(&Token::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    /// 現在のトークンに対応する二項演算子
    fn binary_op(&self) -> Option<BinaryOp> {
        let op = match self.current_token()? {
            Token::OrOr => BinaryOp::Or,
            Token::AndAnd => BinaryOp::And,
            Token::EqEq => BinaryOp::Eq,
            Token::NotEq => BinaryOp::Ne,
            Token::Lt => BinaryOp::Lt,
            Token::LtEq => BinaryOp::Le,
            Token::Gt => BinaryOp::Gt,
            Token::GtEq => BinaryOp::Ge,
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            Token::Pipe => BinaryOp::BitOr,
            Token::Caret => BinaryOp::BitXor,
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            Token::Percent => BinaryOp::Rem,
            Token::Shl => BinaryOp::Shl,
            Token::Shr => BinaryOp::Shr,
            Token::Ampersand => BinaryOp::BitAnd,
            Token::AndNot => BinaryOp::AndNot,
            _ => return None,
        };
        Some(op)
    }

    /// 優先順位法による二項演算の解析（左結合）
    fn parse_binary_expr(&mut self, min_precedence: u8) -> ParseResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.binary_op() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance();
            let right = self.parse_binary_expr(precedence + 1)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// 単項演算子を解析
    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        let op = match self.current_token() {
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Caret) => UnaryOp::BitNot,
            Some(Token::Star) => UnaryOp::Deref,
            Some(Token::Ampersand) => UnaryOp::Addr,
            Some(Token::Arrow) => {
                // `<-chan T` は受信ではなく型
                if self.check_at(1, &Token::Chan) {
                    return Ok(Expr::Type(self.parse_type()?));
                }
                UnaryOp::Recv
            }
            _ => return self.parse_primary_expr(),
        };
        self.advance();

        let expr = self.parse_unary_expr()?;
        Ok(Expr::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    /// オペランドと後置要素（セレクタ、インデックス、呼び出しなど）を解析
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_operand()?;

        loop {
            match self.current_token() {
                Some(Token::Dot) => {
                    self.advance();
                    if self.match_token(&Token::LeftParen) {
                        let ty = if self.match_token(&Token::Type) {
                            None
                        } else {
                            Some(self.parse_type()?)
                        };
                        self.expect(Token::RightParen)?;
                        expr = Expr::TypeAssert {
                            expr: Box::new(expr),
                            ty,
                        };
                    } else {
                        let sel = self.expect_identifier()?;
                        expr = Expr::Selector {
                            expr: Box::new(expr),
                            sel,
                        };
                    }
                }
                Some(Token::LeftBracket) => {
                    self.advance();
                    self.expr_level += 1;
                    let result = self.parse_index_or_slice(expr);
                    self.expr_level -= 1;
                    expr = result?;
                    self.expect(Token::RightBracket)?;
                }
                Some(Token::LeftParen) => {
                    self.advance();
                    self.expr_level += 1;
                    let result = self.parse_call_args();
                    self.expr_level -= 1;
                    let (args, ellipsis) = result?;
                    self.expect(Token::RightParen)?;
                    expr = Expr::Call(CallExpr {
                        func: Box::new(expr),
                        args,
                        ellipsis,
                    });
                }
                Some(Token::LeftBrace) if is_literal_type(&expr) => {
                    // 制御構文のヘッダでは型名の後の `{` はブロック
                    if self.expr_level < 0 && is_type_name(&expr) {
                        break;
                    }
                    expr = self.parse_composite_lit(Some(Box::new(expr)))?;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// `[` の後ろを解析（`]` は呼び出し側で消費）
    fn parse_index_or_slice(&mut self, expr: Expr) -> ParseResult<Expr> {
        let low = if self.check(&Token::Colon) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        if !self.match_token(&Token::Colon) {
            return match low {
                Some(index) => Ok(Expr::Index {
                    expr: Box::new(expr),
                    index,
                }),
                None => Err(self.error("Expected index expression".to_string())),
            };
        }

        let high = if self.check(&Token::Colon) || self.check(&Token::RightBracket) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        let max = if self.match_token(&Token::Colon) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        Ok(Expr::Slice(SliceExpr {
            expr: Box::new(expr),
            low,
            high,
            max,
        }))
    }

    /// 呼び出しの引数（型引数 `make([]T, n)` を含む）
    fn parse_call_args(&mut self) -> ParseResult<(Vec<Expr>, bool)> {
        let mut args = Vec::new();
        let mut ellipsis = false;

        while !self.check(&Token::RightParen) && !self.is_at_end() {
            args.push(self.parse_expr()?);
            if self.match_token(&Token::Ellipsis) {
                ellipsis = true;
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        Ok((args, ellipsis))
    }

    /// オペランドを解析
    fn parse_operand(&mut self) -> ParseResult<Expr> {
        match self.current_token() {
            Some(Token::Identifier(_)) => Ok(Expr::Ident(self.expect_identifier()?)),
            Some(Token::Integer(raw)) => {
                let raw = raw.clone();
                self.literal(LiteralKind::Int, raw)
            }
            Some(Token::Float(raw)) => {
                let raw = raw.clone();
                self.literal(LiteralKind::Float, raw)
            }
            Some(Token::Rune(raw)) => {
                let raw = raw.clone();
                self.literal(LiteralKind::Rune, raw)
            }
            Some(Token::String(raw)) | Some(Token::RawString(raw)) => {
                let raw = raw.clone();
                self.literal(LiteralKind::String, raw)
            }
            Some(Token::LeftParen) => {
                self.advance();
                self.expr_level += 1;
                let inner = self.parse_expr();
                self.expr_level -= 1;
                let inner = inner?;
                self.expect(Token::RightParen)?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            Some(Token::Func) => {
                self.advance();
                let signature = self.parse_signature()?;
                if !self.check(&Token::LeftBrace) {
                    return Ok(Expr::Type(TypeExpr::Func(signature)));
                }

                let outer = self.expr_level;
                self.expr_level = 0;
                let body = self.parse_block();
                self.expr_level = outer;

                Ok(Expr::FuncLit(FuncLit {
                    signature,
                    body: body?,
                }))
            }
            Some(Token::LeftBracket)
            | Some(Token::Map)
            | Some(Token::Chan)
            | Some(Token::Struct)
            | Some(Token::Interface) => Ok(Expr::Type(self.parse_type()?)),
            _ => Err(self.error("Expected expression".to_string())),
        }
    }

    fn literal(&mut self, kind: LiteralKind, raw: String) -> ParseResult<Expr> {
        self.advance();
        Ok(Expr::Literal(Literal { kind, raw }))
    }

    /// `{ elements }` を解析
    fn parse_composite_lit(&mut self, ty: Option<Box<Expr>>) -> ParseResult<Expr> {
        self.expect(Token::LeftBrace)?;

        let outer = self.expr_level;
        self.expr_level = 1;
        let elements = self.parse_composite_elements();
        self.expr_level = outer;
        let elements = elements?;

        self.expect(Token::RightBrace)?;
        Ok(Expr::Composite(CompositeLit { ty, elements }))
    }

    fn parse_composite_elements(&mut self) -> ParseResult<Vec<Expr>> {
        let mut elements = Vec::new();

        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            let element = self.parse_element()?;
            if self.match_token(&Token::Colon) {
                let value = self.parse_element()?;
                elements.push(Expr::KeyValue {
                    key: Box::new(element),
                    value: Box::new(value),
                });
            } else {
                elements.push(element);
            }

            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        Ok(elements)
    }

    /// 要素の型を省略した入れ子のリテラルを許可
    fn parse_element(&mut self) -> ParseResult<Expr> {
        if self.check(&Token::LeftBrace) {
            self.parse_composite_lit(None)
        } else {
            self.parse_expr()
        }
    }
}

/// 複合リテラルの型になり得る式か
fn is_literal_type(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(_) => true,
        Expr::Selector { expr, .. } => matches!(expr.as_ref(), Expr::Ident(_)),
        Expr::Type(ty) => matches!(
            ty,
            TypeExpr::Slice(_) | TypeExpr::Array { .. } | TypeExpr::Map { .. } | TypeExpr::Struct(_)
        ),
        _ => false,
    }
}

/// 単なる型名（`T` や `pkg.T`）か
fn is_type_name(expr: &Expr) -> bool {
    match expr {
        Expr::Ident(_) => true,
        Expr::Selector { expr, .. } => matches!(expr.as_ref(), Expr::Ident(_)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_expr(source: &str) -> Expr {
        let mut parser = Parser::new(tokenize(source).unwrap());
        parser.parse_expression().unwrap()
    }

    #[test]
    fn test_precedence() {
        match parse_expr("a + b * c") {
            Expr::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOp::Add);
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            other => panic!("unexpected expression {:?}", other),
        }
    }

    #[test]
    fn test_composite_literal() {
        match parse_expr("Pair{key: k, value: v}") {
            Expr::Composite(lit) => {
                assert_eq!(lit.elements.len(), 2);
                assert!(matches!(lit.elements[0], Expr::KeyValue { .. }));
            }
            other => panic!("unexpected expression {:?}", other),
        }
    }

    #[test]
    fn test_slice_expression() {
        assert!(matches!(parse_expr("xs[1:]"), Expr::Slice(SliceExpr { high: None, .. })));
    }

    #[test]
    fn test_type_assertion() {
        assert!(matches!(parse_expr("v.(int)"), Expr::TypeAssert { ty: Some(_), .. }));
    }

    #[test]
    fn test_make_with_type_argument() {
        match parse_expr("make([]VALUE, 0, n)") {
            Expr::Call(call) => {
                assert_eq!(call.args.len(), 3);
                assert!(matches!(call.args[0], Expr::Type(TypeExpr::Slice(_))));
            }
            other => panic!("unexpected expression {:?}", other),
        }
    }
}
