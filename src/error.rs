//! Unified error handling module
//!
//! One error enum per pipeline stage, unified in [`MonogenError`]. Errors that
//! point into the template carry a [`Span`] and can be rendered as
//! codespan-reporting diagnostics.

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type of the generator
#[derive(Error, Debug, Clone)]
pub enum MonogenError {
    /// Lexer error
    #[error("lexical error: {0}")]
    Lexer(#[from] LexerError),

    /// Parser error
    #[error("syntax error: {0}")]
    Parser(#[from] ParserError),

    /// Malformed concrete type specification
    #[error("invalid type specification: {0}")]
    Instance(#[from] InstanceError),

    /// Template cannot be specialized
    #[error("{0}")]
    Specialize(#[from] SpecializeError),

    /// Output file cannot be written
    #[error("{0}")]
    Output(#[from] OutputError),

    /// File I/O or writer error
    #[error("i/o error: {0}")]
    Io(String),
}

/// Lexer error details
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("unrecognized token '{token}'")]
    UnrecognizedToken { token: String, span: Span },
}

/// Parser error details
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("{message}")]
    SyntaxError { message: String, span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedEof { span, .. } | ParserError::SyntaxError { span, .. } => *span,
        }
    }
}

/// Errors of the concrete type specification `a,b;c,d`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("empty concrete type")]
    EmptyType,

    #[error("no concrete type given")]
    NoTypes,

    #[error("instance {instance} has {found} types but the first instance has {expected}")]
    ArityMismatch {
        expected: usize,
        found: usize,
        instance: usize,
    },
}

/// Errors detected while preparing a template for specialization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecializeError {
    #[error("no generic types found: mark at least one type declaration with a `//generic` comment")]
    NoPlaceholdersFound,

    #[error("there are {placeholders} generic types but {types} concrete types")]
    ArityMismatch { placeholders: usize, types: usize },
}

/// Errors of output file handling
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    #[error("can not overwrite file {}: it was not created by monogen", path.display())]
    ForeignFile { path: PathBuf },

    #[error("can not derive a package name from {}", path.display())]
    InvalidPath { path: PathBuf },
}

impl From<std::io::Error> for MonogenError {
    fn from(e: std::io::Error) -> Self {
        MonogenError::Io(e.to_string())
    }
}

impl From<std::fmt::Error> for MonogenError {
    fn from(e: std::fmt::Error) -> Self {
        MonogenError::Io(e.to_string())
    }
}

/// Error together with the file it refers to
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: MonogenError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: MonogenError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// Convert into a codespan-reporting diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.error {
            MonogenError::Lexer(LexerError::UnrecognizedToken { span, .. }) => {
                vec![Label::primary(self.file_id, span.start..span.end)
                    .with_message("unrecognized input")]
            }
            MonogenError::Parser(e) => {
                let span = e.span();
                vec![Label::primary(self.file_id, span.start..span.end)]
            }
            _ => vec![],
        };

        Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(labels)
    }
}

/// Result type alias
pub type MonogenResult<T> = Result<T, MonogenError>;
