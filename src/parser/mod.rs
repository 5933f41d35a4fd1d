//! Parser module
//!
//! Turns the token stream of a Go source file into the arena based AST.
//! Recursive descent with Go operator precedence.
//!
//! ## Placeholder markers
//!
//! A top-level declaration immediately preceded by a comment group whose text
//! is `generic` is tagged with [`DeclTag::Placeholder`](crate::ast::DeclTag):
//!
//! ```go
//! //generic
//! type VALUE int
//! ```
//!
//! The comment itself never reaches the tree, only the structured tag does.

mod decl_parser;
mod expr_parser;
mod parser_impl;
mod stmt_parser;
mod type_parser;

// Public API
pub use parser_impl::{Parser, PLACEHOLDER_MARKER};

use crate::error::ParserError;
pub type ParseError = ParserError;
pub type ParseResult<T> = Result<T, ParseError>;
