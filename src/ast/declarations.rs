//! Top-level and block-level declarations

use serde::{Deserialize, Serialize};

use super::{Block, Expr, Field, IdentId, Signature, Span, TypeExpr};

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

impl Decl {
    pub fn span(&self) -> Span {
        match self {
            Decl::Gen(decl) => decl.span,
            Decl::Func(decl) => decl.span,
        }
    }

    pub fn tag(&self) -> Option<DeclTag> {
        match self {
            Decl::Gen(decl) => decl.tag,
            Decl::Func(decl) => decl.tag,
        }
    }

    pub fn clear_tag(&mut self) {
        match self {
            Decl::Gen(decl) => decl.tag = None,
            Decl::Func(decl) => decl.tag = None,
        }
    }
}

/// Structured marker attached to a declaration by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclTag {
    /// The declared type is a placeholder to be substituted by concrete types
    Placeholder,
}

/// Keyword introducing a generic declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKeyword {
    Type,
    Var,
    Const,
}

impl DeclKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKeyword::Type => "type",
            DeclKeyword::Var => "var",
            DeclKeyword::Const => "const",
        }
    }
}

/// `type`, `var` or `const` declaration, possibly grouped in parentheses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub specs: Vec<Spec>,
    pub grouped: bool,
    pub tag: Option<DeclTag>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Spec {
    Type(TypeSpec),
    Value(ValueSpec),
}

impl Spec {
    pub fn span(&self) -> Span {
        match self {
            Spec::Type(spec) => spec.span,
            Spec::Value(spec) => spec.span,
        }
    }
}

/// `Name Type` or `Name = Type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: IdentId,
    pub alias: bool,
    pub ty: TypeExpr,
    pub span: Span,
}

/// `a, b Type = x, y`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<IdentId>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<Expr>,
    pub span: Span,
}

/// Function or method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub receiver: Option<Field>,
    pub name: IdentId,
    pub signature: Signature,
    pub body: Option<Block>,
    pub tag: Option<DeclTag>,
    pub span: Span,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}
