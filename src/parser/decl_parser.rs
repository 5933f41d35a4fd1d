//! パッケージ節、import、宣言の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// `package name`
    pub(super) fn parse_package_clause(&mut self) -> ParseResult<IdentId> {
        self.expect(Token::Package)?;
        let name = self.expect_identifier()?;
        self.expect_semi()?;
        Ok(name)
    }

    /// import宣言を解析
    pub(super) fn parse_imports(&mut self) -> ParseResult<Vec<ImportSpec>> {
        let mut imports = Vec::new();

        while self.match_token(&Token::Import) {
            if self.match_token(&Token::LeftParen) {
                while !self.check(&Token::RightParen) && !self.is_at_end() {
                    imports.push(self.parse_import_spec()?);
                    if !self.check(&Token::RightParen) {
                        self.expect_semi()?;
                    }
                }
                self.expect(Token::RightParen)?;
            } else {
                imports.push(self.parse_import_spec()?);
            }
            self.expect_semi()?;
        }

        Ok(imports)
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let start = self.current_span().start;

        let alias = match self.current_token() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            Some(Token::Dot) => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };

        let path = match self.current_token() {
            Some(Token::String(raw)) | Some(Token::RawString(raw)) => raw.clone(),
            _ => return Err(self.error("Expected import path".to_string())),
        };
        self.advance();

        Ok(ImportSpec {
            alias,
            path,
            span: self.span_from(start),
        })
    }

    /// トップレベル宣言を解析
    pub(super) fn parse_top_level_decl(&mut self) -> ParseResult<Decl> {
        let tag = self.leading_tag();

        match self.current_token() {
            Some(Token::Type) | Some(Token::Var) | Some(Token::Const) => {
                let mut decl = self.parse_gen_decl()?;
                decl.tag = tag;
                Ok(Decl::Gen(decl))
            }
            Some(Token::Func) => {
                let mut func = self.parse_func_decl()?;
                func.tag = tag;
                Ok(Decl::Func(func))
            }
            Some(Token::Import) => {
                Err(self.error("Imports must appear before other declarations".to_string()))
            }
            _ => Err(self.error("Expected declaration".to_string())),
        }
    }

    /// `type`/`var`/`const` 宣言（グループ化された形式を含む）
    pub(super) fn parse_gen_decl(&mut self) -> ParseResult<GenDecl> {
        let start = self.current_span().start;
        let keyword = match self.current_token() {
            Some(Token::Type) => DeclKeyword::Type,
            Some(Token::Var) => DeclKeyword::Var,
            Some(Token::Const) => DeclKeyword::Const,
            _ => return Err(self.error("Expected 'type', 'var' or 'const'".to_string())),
        };
        self.advance();

        let mut specs = Vec::new();
        let grouped = self.match_token(&Token::LeftParen);

        if grouped {
            while !self.check(&Token::RightParen) && !self.is_at_end() {
                specs.push(self.parse_spec(keyword)?);
                if !self.check(&Token::RightParen) {
                    self.expect_semi()?;
                }
            }
            self.expect(Token::RightParen)?;
        } else {
            specs.push(self.parse_spec(keyword)?);
        }

        Ok(GenDecl {
            keyword,
            specs,
            grouped,
            tag: None,
            span: self.span_from(start),
        })
    }

    fn parse_spec(&mut self, keyword: DeclKeyword) -> ParseResult<Spec> {
        let start = self.current_span().start;

        match keyword {
            DeclKeyword::Type => {
                let name = self.expect_identifier()?;
                let alias = self.match_token(&Token::Assign);
                let ty = self.parse_type()?;
                Ok(Spec::Type(TypeSpec {
                    name,
                    alias,
                    ty,
                    span: self.span_from(start),
                }))
            }
            DeclKeyword::Var | DeclKeyword::Const => {
                let names = self.parse_ident_list()?;

                // 型は省略可能（constのiotaによる繰り返しでは値も省略される）
                let ty = if self.check(&Token::Assign)
                    || self.check(&Token::Semicolon)
                    || self.check(&Token::RightParen)
                    || self.is_at_end()
                {
                    None
                } else {
                    Some(self.parse_type()?)
                };

                let values = if self.match_token(&Token::Assign) {
                    self.parse_expr_list()?
                } else {
                    Vec::new()
                };

                Ok(Spec::Value(ValueSpec {
                    names,
                    ty,
                    values,
                    span: self.span_from(start),
                }))
            }
        }
    }

    /// 関数宣言またはメソッド宣言を解析
    fn parse_func_decl(&mut self) -> ParseResult<FuncDecl> {
        let start = self.current_span().start;
        self.expect(Token::Func)?;

        let receiver = if self.check(&Token::LeftParen) {
            let mut fields = self.parse_parameters()?;
            if fields.len() != 1 || fields[0].names.len() > 1 {
                return Err(self.error("Method must have exactly one receiver".to_string()));
            }
            fields.pop()
        } else {
            None
        };

        let name = self.expect_identifier()?;
        let signature = self.parse_signature()?;

        // 本体のない宣言（アセンブリ実装など）も許可
        let body = if self.check(&Token::LeftBrace) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(FuncDecl {
            receiver,
            name,
            signature,
            body,
            tag: None,
            span: self.span_from(start),
        })
    }
}
