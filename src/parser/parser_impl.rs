//! パーサーの本体と補助メソッド

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Comment, LexOutput, Token, TokenWithPosition};

use super::{ParseError, ParseResult};

/// 型宣言をプレースホルダーとして指定するコメント
pub const PLACEHOLDER_MARKER: &str = "generic";

/// Goパーサー
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) comments: Vec<Comment>,
    pub(super) current: usize,
    pub(super) idents: IdentArena,
    /// 制御構文のヘッダ内では負になり、`T {` は複合リテラルではなくブロックの開始となる
    pub(super) expr_level: i32,
}

impl Parser {
    pub fn new(lexed: LexOutput) -> Self {
        Self {
            tokens: lexed.tokens,
            comments: lexed.comments,
            current: 0,
            idents: IdentArena::new(),
            expr_level: 0,
        }
    }

    /// ソースファイル全体を解析
    pub fn parse(&mut self) -> ParseResult<SourceFile> {
        let start = self.current_span().start;

        let package = self.parse_package_clause()?;
        let imports = self.parse_imports()?;

        let mut decls = Vec::new();
        while !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            decls.push(self.parse_top_level_decl()?);
            self.expect_semi()?;
        }

        let end = self.tokens.last().map(|t| t.span.end).unwrap_or(start);

        Ok(SourceFile {
            package,
            imports,
            decls,
            idents: std::mem::take(&mut self.idents),
            objects: Vec::new(),
            span: Span::new(start, end),
        })
    }

    /// 式を1つ解析
    pub fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_expr()
    }

    /// 文を1つ解析
    pub fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.parse_statement_internal()
    }

    /// これまでに確保した識別子
    pub fn idents(&self) -> &IdentArena {
        &self.idents
    }

    // ==================== プレースホルダー指定 ====================

    /// 現在のトークンから始まる宣言のタグ
    pub(super) fn leading_tag(&self) -> Option<DeclTag> {
        let text = self.leading_comment_text(self.current)?;
        if text.trim() == PLACEHOLDER_MARKER {
            Some(DeclTag::Placeholder)
        } else {
            None
        }
    }

    /// トークンの直前の行で終わるコメントグループのテキスト
    ///
    /// 前のトークンと同じ行にあるコメントはそのトークンに属する。
    /// `//go:generate` のようなディレクティブはテキストに含めない。
    fn leading_comment_text(&self, token_index: usize) -> Option<String> {
        let token = self.tokens.get(token_index)?;
        let previous_line = token_index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.position.line)
            .unwrap_or(0);

        let before = self
            .comments
            .partition_point(|c| c.span.end <= token.span.start);

        let mut group = Vec::new();
        let mut expected_end = token.position.line - 1;
        for comment in self.comments[..before].iter().rev() {
            if comment.end_line != expected_end || comment.line <= previous_line {
                break;
            }
            group.push(comment);
            expected_end = comment.line - 1;
        }

        if group.is_empty() {
            return None;
        }
        group.reverse();

        let text = group
            .iter()
            .filter(|c| !c.is_directive())
            .map(|c| c.body())
            .collect::<Vec<_>>()
            .join("\n");
        Some(text)
    }

    // ==================== ユーティリティメソッド ====================

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 現在位置からoffset先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    /// 現在のトークンのスパン（終端では入力末尾）
    pub(super) fn current_span(&self) -> logos::Span {
        match self.tokens.get(self.current) {
            Some(t) => t.span.clone(),
            None => {
                let end = self.tokens.last().map(|t| t.span.end).unwrap_or(0);
                end..end
            }
        }
    }

    /// `start` から直前のトークンの終わりまでのスパン
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = if self.current > 0 {
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(start)
        } else {
            self.current_span().end
        };
        Span::new(start, end.max(start))
    }

    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// トークンの種類をチェック（消費しない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// offset先のトークンの種類をチェック
    pub(super) fn check_at(&self, offset: usize, token_type: &Token) -> bool {
        self.peek(offset)
            .map(|t| std::mem::discriminant(t) == std::mem::discriminant(token_type))
            .unwrap_or(false)
    }

    /// トークンが一致すれば消費
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<()> {
        if self.check(&token_type) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("Expected {:?}, found {}", token_type, self.found())))
        }
    }

    /// 識別子を期待してアリーナに確保
    pub(super) fn expect_identifier(&mut self) -> ParseResult<IdentId> {
        match self.current_token() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                let span = self.current_span();
                self.advance();
                Ok(self.idents.alloc(name, span.into()))
            }
            _ => Err(self.error(format!("Expected identifier, found {}", self.found()))),
        }
    }

    /// `a, b, c`
    pub(super) fn parse_ident_list(&mut self) -> ParseResult<Vec<IdentId>> {
        let mut names = vec![self.expect_identifier()?];
        while self.match_token(&Token::Comma) {
            names.push(self.expect_identifier()?);
        }
        Ok(names)
    }

    /// 文の終端。閉じ括弧の直前では省略できる
    pub(super) fn expect_semi(&mut self) -> ParseResult<()> {
        if self.match_token(&Token::Semicolon)
            || self.check(&Token::RightParen)
            || self.check(&Token::RightBrace)
            || self.is_at_end()
        {
            Ok(())
        } else {
            Err(self.error(format!("Expected ';' or newline, found {}", self.found())))
        }
    }

    fn found(&self) -> String {
        self.current_token()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "EOF".to_string())
    }

    /// 現在位置でエラーを作成
    pub(super) fn error(&self, message: String) -> ParseError {
        let span = self.current_span();
        if self.is_at_end() {
            ParserError::UnexpectedEof {
                expected: message,
                span: span.into(),
            }
        } else {
            ParserError::SyntaxError {
                message,
                span: span.into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> SourceFile {
        let mut parser = Parser::new(tokenize(source).unwrap());
        parser.parse().unwrap()
    }

    #[test]
    fn test_marker_directly_above_is_a_tag() {
        let file = parse("package p\n\n//generic\ntype T int\n");
        assert_eq!(file.decls[0].tag(), Some(DeclTag::Placeholder));
    }

    #[test]
    fn test_marker_separated_by_blank_line_is_ignored() {
        let file = parse("package p\n\n//generic\n\ntype T int\n");
        assert_eq!(file.decls[0].tag(), None);
    }

    #[test]
    fn test_trailing_comment_of_previous_decl_is_ignored() {
        let file = parse("package p\n\ntype A int //generic\ntype B int\n");
        assert_eq!(file.decls[0].tag(), None);
        assert_eq!(file.decls[1].tag(), None);
    }

    #[test]
    fn test_marker_with_extra_doc_text_is_not_a_tag() {
        let file = parse("package p\n\n// Some docs\n//generic\ntype T int\n");
        assert_eq!(file.decls[0].tag(), None);
    }

    #[test]
    fn test_directive_in_group_is_ignored() {
        let file = parse("package p\n\n//go:generate monogen\n// generic \ntype T int\n");
        assert_eq!(file.decls[0].tag(), Some(DeclTag::Placeholder));
    }
}
