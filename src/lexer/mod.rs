//! Lexical analysis module for Go templates.
//!
//! This module turns Go source into a stream of tokens. Newlines are turned
//! into semicolons following the Go specification, and comments are kept in a
//! side table so the parser can recognise placeholder markers without the
//! token stream having to carry them.

#[allow(clippy::module_inception)]
mod lexer;
mod token;

pub use lexer::{format_tokens, tokenize, Comment, LexOutput, Lexer, Position, TokenWithPosition};
pub use token::Token;
