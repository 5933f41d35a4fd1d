//! Lexer implementation
//!
//! Wraps the logos tokenizer, applies Go's automatic semicolon insertion and
//! moves comments out of the token stream into a side table.

use logos::{Lexer as LogosLexer, Logos, Span};

use super::token::Token;
use crate::error::LexerError;

/// Line and column of a token start, both 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// A token with its position information
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub position: Position,
    pub span: Span,
}

/// A comment as written in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// Full text including the `//` or `/* */` markers
    pub text: String,
    pub span: Span,
    /// Line the comment starts on
    pub line: usize,
    /// Line the comment ends on
    pub end_line: usize,
}

impl Comment {
    pub fn is_line_comment(&self) -> bool {
        self.text.starts_with("//")
    }

    /// Comment text without markers
    pub fn body(&self) -> &str {
        if let Some(body) = self.text.strip_prefix("//") {
            body
        } else {
            self.text
                .strip_prefix("/*")
                .and_then(|s| s.strip_suffix("*/"))
                .unwrap_or(&self.text)
        }
    }

    /// `//go:generate ...` style directives, which never count as documentation
    pub fn is_directive(&self) -> bool {
        let Some(body) = self.text.strip_prefix("//") else {
            return false;
        };
        match body.split_once(':') {
            Some((prefix, rest)) => {
                !prefix.is_empty()
                    && !rest.is_empty()
                    && prefix
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                    && rest.starts_with(|c: char| c.is_ascii_alphanumeric())
            }
            None => false,
        }
    }
}

/// Result of lexing one source file
#[derive(Debug, Clone, Default)]
pub struct LexOutput {
    pub tokens: Vec<TokenWithPosition>,
    pub comments: Vec<Comment>,
}

/// Go lexer
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    input: &'a str,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            input,
            line: 1,
            line_start: 0,
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(mut self) -> Result<LexOutput, LexerError> {
        let mut output = LexOutput::default();

        while let Some(result) = self.inner.next() {
            let span = self.inner.span();
            let position = Position {
                line: self.line,
                column: span.start - self.line_start + 1,
            };

            let token = match result {
                Ok(token) => token,
                Err(()) => {
                    return Err(LexerError::UnrecognizedToken {
                        token: self.input[span.clone()].to_string(),
                        span: span.into(),
                    });
                }
            };

            match token {
                Token::Newline => {
                    Self::insert_semicolon(&mut output.tokens, position, span.clone());
                    self.newline_at(span.end);
                }
                Token::LineComment(text) => {
                    output.comments.push(Comment {
                        text,
                        span,
                        line: self.line,
                        end_line: self.line,
                    });
                }
                Token::BlockComment(text) => {
                    let start_line = self.line;
                    let newlines = text.matches('\n').count();
                    output.comments.push(Comment {
                        text,
                        span: span.clone(),
                        line: start_line,
                        end_line: start_line + newlines,
                    });
                    if newlines > 0 {
                        // A multi-line comment acts like a newline
                        Self::insert_semicolon(&mut output.tokens, position, span.clone());
                        self.advance_lines(&span);
                    }
                }
                Token::RawString(ref text) => {
                    let multiline = text.contains('\n');
                    output.tokens.push(TokenWithPosition {
                        token: token.clone(),
                        position,
                        span: span.clone(),
                    });
                    if multiline {
                        self.advance_lines(&span);
                    }
                }
                token => output.tokens.push(TokenWithPosition {
                    token,
                    position,
                    span,
                }),
            }
        }

        // The end of the input terminates the last line
        let end = self.input.len();
        let position = Position {
            line: self.line,
            column: end - self.line_start + 1,
        };
        Self::insert_semicolon(&mut output.tokens, position, end..end);

        Ok(output)
    }

    fn insert_semicolon(tokens: &mut Vec<TokenWithPosition>, position: Position, span: Span) {
        let needed = tokens
            .last()
            .map(|last| last.token.ends_statement())
            .unwrap_or(false);
        if needed {
            tokens.push(TokenWithPosition {
                token: Token::Semicolon,
                position,
                span: span.start..span.start,
            });
        }
    }

    fn newline_at(&mut self, next_line_start: usize) {
        self.line += 1;
        self.line_start = next_line_start;
    }

    fn advance_lines(&mut self, span: &Span) {
        let text = &self.input[span.clone()];
        for (offset, _) in text.match_indices('\n') {
            self.newline_at(span.start + offset + 1);
        }
    }
}

/// Tokenize Go source
pub fn tokenize(input: &str) -> Result<LexOutput, LexerError> {
    Lexer::new(input).tokenize()
}

/// Debug helper: render a token stream one token per line
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| format!("{}:{} {}", t.position.line, t.position.column, t.token))
        .collect::<Vec<_>>()
        .join("\n")
}
