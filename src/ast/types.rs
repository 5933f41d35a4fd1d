//! Type expressions

use serde::{Deserialize, Serialize};

use super::{Expr, IdentId, Span};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// `T`
    Name(IdentId),
    /// `pkg.T`
    Qualified { package: IdentId, name: IdentId },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `[N]T`, or `[...]T` when `len` is `None`
    Array {
        len: Option<Box<Expr>>,
        elem: Box<TypeExpr>,
    },
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// `func(params) results`
    Func(Signature),
    /// `struct { ... }`
    Struct(Vec<Field>),
    /// `interface { ... }`
    Interface(Vec<InterfaceElem>),
    /// Variadic parameter type `...T`
    Ellipsis(Box<TypeExpr>),
    /// `(T)`
    Paren(Box<TypeExpr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Parameter, result, receiver or struct field
///
/// An empty `names` list means an anonymous parameter or an embedded field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub names: Vec<IdentId>,
    pub ty: TypeExpr,
    /// Raw struct tag literal
    pub tag: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl Signature {
    /// Results are printed without parentheses only for one unnamed result
    pub fn bare_result(&self) -> bool {
        self.results.len() == 1 && self.results[0].names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InterfaceElem {
    Method { name: IdentId, signature: Signature },
    Embedded(TypeExpr),
}
