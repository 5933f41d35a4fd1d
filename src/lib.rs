//! Monogen Library
//!
//! This library turns Go templates with placeholder types into
//! type-specialized Go source.

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use analyzer::{monomorphize_source, Instances, Monomorphizer, TypeTuple};
pub use ast::{Decl, SourceFile};
pub use codegen::Printer;
pub use compiler::{generate, parse_template};
pub use config::GenerateOptions;
pub use error::{MonogenError, MonogenResult};
pub use lexer::{tokenize, Lexer, Token, TokenWithPosition};
pub use parser::{ParseError, ParseResult, Parser};
