//! 型とシグネチャの解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

/// パラメータリストの要素（グループ化の解決前）
struct ParamEntry {
    name: Option<IdentId>,
    ty: Option<TypeExpr>,
    span: Span,
}

impl Parser {
    /// 型を解析
    pub(super) fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        match self.current_token() {
            Some(Token::Identifier(_)) => self.parse_type_name(),
            Some(Token::Star) => {
                self.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            Some(Token::LeftBracket) => {
                self.advance();
                if self.match_token(&Token::RightBracket) {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }

                let len = if self.check(&Token::Ellipsis) && self.check_at(1, &Token::RightBracket) {
                    self.advance();
                    None
                } else {
                    self.expr_level += 1;
                    let len = self.parse_expr();
                    self.expr_level -= 1;
                    Some(Box::new(len?))
                };
                self.expect(Token::RightBracket)?;

                let elem = self.parse_type()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(elem),
                })
            }
            Some(Token::Map) => {
                self.advance();
                self.expect(Token::LeftBracket)?;
                let key = self.parse_type()?;
                self.expect(Token::RightBracket)?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            Some(Token::Chan) => {
                self.advance();
                let dir = if self.match_token(&Token::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(elem),
                })
            }
            Some(Token::Arrow) => {
                self.advance();
                self.expect(Token::Chan)?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                })
            }
            Some(Token::Func) => {
                self.advance();
                Ok(TypeExpr::Func(self.parse_signature()?))
            }
            Some(Token::Struct) => self.parse_struct_type(),
            Some(Token::Interface) => self.parse_interface_type(),
            Some(Token::LeftParen) => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(Token::RightParen)?;
                Ok(TypeExpr::Paren(Box::new(inner)))
            }
            _ => Err(self.error("Expected type".to_string())),
        }
    }

    /// `T` または `pkg.T`
    fn parse_type_name(&mut self) -> ParseResult<TypeExpr> {
        let name = self.expect_identifier()?;
        if self.check(&Token::Dot) && matches!(self.peek(1), Some(Token::Identifier(_))) {
            self.advance();
            let member = self.expect_identifier()?;
            return Ok(TypeExpr::Qualified {
                package: name,
                name: member,
            });
        }
        Ok(TypeExpr::Name(name))
    }

    /// 現在のトークンが型の開始になり得るか
    pub(super) fn can_start_type(&self) -> bool {
        matches!(
            self.current_token(),
            Some(Token::Identifier(_))
                | Some(Token::Star)
                | Some(Token::LeftBracket)
                | Some(Token::Map)
                | Some(Token::Chan)
                | Some(Token::Arrow)
                | Some(Token::Func)
                | Some(Token::Struct)
                | Some(Token::Interface)
        )
    }

    /// パラメータと戻り値を解析
    pub(super) fn parse_signature(&mut self) -> ParseResult<Signature> {
        let params = self.parse_parameters()?;

        let results = if self.check(&Token::LeftParen) {
            self.parse_parameters()?
        } else if self.can_start_type() {
            let start = self.current_span().start;
            let ty = self.parse_type()?;
            vec![Field {
                names: Vec::new(),
                ty,
                tag: None,
                span: self.span_from(start),
            }]
        } else {
            Vec::new()
        };

        Ok(Signature { params, results })
    }

    /// 括弧で囲まれたパラメータリストを解析
    ///
    /// `a, b int` のように型を共有する名前は直後の型でまとめる。
    /// 名前付きの要素が1つもなければ、すべての要素を型として扱う。
    pub(super) fn parse_parameters(&mut self) -> ParseResult<Vec<Field>> {
        self.expect(Token::LeftParen)?;

        let mut entries = Vec::new();
        while !self.check(&Token::RightParen) && !self.is_at_end() {
            entries.push(self.parse_param_entry()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RightParen)?;

        let named = entries.iter().any(|e| e.name.is_some() && e.ty.is_some());
        if !named {
            let mut fields = Vec::with_capacity(entries.len());
            for entry in entries {
                let ty = match (entry.ty, entry.name) {
                    (Some(ty), _) => ty,
                    (None, Some(name)) => TypeExpr::Name(name),
                    (None, None) => return Err(self.error("Expected parameter".to_string())),
                };
                fields.push(Field {
                    names: Vec::new(),
                    ty,
                    tag: None,
                    span: entry.span,
                });
            }
            return Ok(fields);
        }

        let mut fields = Vec::new();
        let mut pending: Vec<IdentId> = Vec::new();
        let mut pending_start = None;
        for entry in entries {
            match (entry.name, entry.ty) {
                (Some(name), None) => {
                    pending_start.get_or_insert(entry.span.start);
                    pending.push(name);
                }
                (Some(name), Some(ty)) => {
                    let start = pending_start.take().unwrap_or(entry.span.start);
                    pending.push(name);
                    fields.push(Field {
                        names: std::mem::take(&mut pending),
                        ty,
                        tag: None,
                        span: Span::new(start, entry.span.end),
                    });
                }
                _ => {
                    return Err(self.error("Mixed named and unnamed parameters".to_string()));
                }
            }
        }
        if !pending.is_empty() {
            return Err(self.error("Missing parameter type".to_string()));
        }

        Ok(fields)
    }

    fn parse_param_entry(&mut self) -> ParseResult<ParamEntry> {
        let start = self.current_span().start;

        if let Some(Token::Identifier(_)) = self.current_token() {
            match self.peek(1) {
                // pkg.T
                Some(Token::Dot) => {
                    let ty = self.parse_type()?;
                    return Ok(ParamEntry {
                        name: None,
                        ty: Some(ty),
                        span: self.span_from(start),
                    });
                }
                // 名前か型名かはリスト全体を見るまで決まらない
                Some(Token::Comma) | Some(Token::RightParen) => {
                    let name = self.expect_identifier()?;
                    return Ok(ParamEntry {
                        name: Some(name),
                        ty: None,
                        span: self.span_from(start),
                    });
                }
                _ => {
                    let name = self.expect_identifier()?;
                    let ty = if self.match_token(&Token::Ellipsis) {
                        TypeExpr::Ellipsis(Box::new(self.parse_type()?))
                    } else {
                        self.parse_type()?
                    };
                    return Ok(ParamEntry {
                        name: Some(name),
                        ty: Some(ty),
                        span: self.span_from(start),
                    });
                }
            }
        }

        let ty = if self.match_token(&Token::Ellipsis) {
            TypeExpr::Ellipsis(Box::new(self.parse_type()?))
        } else {
            self.parse_type()?
        };
        Ok(ParamEntry {
            name: None,
            ty: Some(ty),
            span: self.span_from(start),
        })
    }

    /// `struct { ... }`
    fn parse_struct_type(&mut self) -> ParseResult<TypeExpr> {
        self.expect(Token::Struct)?;
        self.expect(Token::LeftBrace)?;

        let mut fields = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            fields.push(self.parse_struct_field()?);
            if !self.check(&Token::RightBrace) {
                self.expect_semi()?;
            }
        }
        self.expect(Token::RightBrace)?;

        Ok(TypeExpr::Struct(fields))
    }

    fn parse_struct_field(&mut self) -> ParseResult<Field> {
        let start = self.current_span().start;

        let embedded = match self.current_token() {
            Some(Token::Star) => true,
            Some(Token::Identifier(_)) => matches!(
                self.peek(1),
                Some(Token::Semicolon)
                    | Some(Token::RightBrace)
                    | Some(Token::String(_))
                    | Some(Token::RawString(_))
                    | Some(Token::Dot)
            ),
            _ => false,
        };

        let (names, ty) = if embedded {
            (Vec::new(), self.parse_type()?)
        } else {
            let names = self.parse_ident_list()?;
            (names, self.parse_type()?)
        };

        let tag = match self.current_token() {
            Some(Token::String(raw)) | Some(Token::RawString(raw)) => {
                let raw = raw.clone();
                self.advance();
                Some(raw)
            }
            _ => None,
        };

        Ok(Field {
            names,
            ty,
            tag,
            span: self.span_from(start),
        })
    }

    /// `interface { ... }`
    fn parse_interface_type(&mut self) -> ParseResult<TypeExpr> {
        self.expect(Token::Interface)?;
        self.expect(Token::LeftBrace)?;

        let mut elems = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }

            let is_method = matches!(self.current_token(), Some(Token::Identifier(_)))
                && self.check_at(1, &Token::LeftParen);
            if is_method {
                let name = self.expect_identifier()?;
                let signature = self.parse_signature()?;
                elems.push(InterfaceElem::Method { name, signature });
            } else {
                elems.push(InterfaceElem::Embedded(self.parse_type()?));
            }

            if !self.check(&Token::RightBrace) {
                self.expect_semi()?;
            }
        }
        self.expect(Token::RightBrace)?;

        Ok(TypeExpr::Interface(elems))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_sig(source: &str) -> (Signature, IdentArena) {
        let mut parser = Parser::new(tokenize(source).unwrap());
        let sig = parser.parse_signature().unwrap();
        (sig, parser.idents.clone())
    }

    #[test]
    fn test_shared_parameter_type() {
        let (sig, idents) = parse_sig("(a, b int32) bool");
        assert_eq!(sig.params.len(), 1);
        let names: Vec<_> = sig.params[0].names.iter().map(|&id| idents.name(id)).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(sig.bare_result());
    }

    #[test]
    fn test_unnamed_parameters_are_types() {
        let (sig, idents) = parse_sig("(int, string)");
        assert_eq!(sig.params.len(), 2);
        assert!(sig.params.iter().all(|f| f.names.is_empty()));
        match &sig.params[1].ty {
            TypeExpr::Name(id) => assert_eq!(idents.name(*id), "string"),
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_named_results() {
        let (sig, _) = parse_sig("(x int) (n int, err error)");
        assert_eq!(sig.results.len(), 2);
        assert!(!sig.bare_result());
    }

    #[test]
    fn test_mixed_parameters_are_rejected() {
        let mut parser = Parser::new(tokenize("(a int, string)").unwrap());
        assert!(parser.parse_signature().is_err());
    }
}
