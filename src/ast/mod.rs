//! Abstract Syntax Tree (AST) definitions for Go templates.
//!
//! The tree never stores identifier text directly. Every identifier occurrence
//! is allocated in the [`IdentArena`] owned by the [`SourceFile`] and the tree
//! keeps an [`IdentId`] handle to it. Renaming an occurrence is an indexed write
//! into the arena, so the same tree can be re-printed under different names.

use serde::{Deserialize, Serialize};
use std::ops::Index;

mod declarations;
mod expressions;
mod statements;
mod types;
mod visit;

pub use declarations::*;
pub use expressions::*;
pub use statements::*;
pub use types::*;
pub use visit::for_each_ident;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Stable handle of one identifier occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentId(pub u32);

impl IdentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a package-level object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of entity a package-level name declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Type,
    Var,
    Const,
    Func,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Type => "type",
            ObjectKind::Var => "var",
            ObjectKind::Const => "const",
            ObjectKind::Func => "func",
        }
    }
}

/// A named entity declared at package level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    pub kind: ObjectKind,
    /// The defining occurrence
    pub ident: IdentId,
}

/// What an identifier occurrence refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Binding {
    /// Field names, selectors, labels, method names, imports and predeclared names
    #[default]
    Unresolved,
    /// Parameters, results, receivers and block-scoped names
    Local,
    /// A package-level type, variable, constant or function
    Package(ObjectId),
}

/// One identifier occurrence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
    pub binding: Binding,
}

/// Storage for every identifier occurrence of a source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentArena {
    idents: Vec<Ident>,
}

impl IdentArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new, unresolved occurrence
    pub fn alloc(&mut self, name: impl Into<String>, span: Span) -> IdentId {
        let id = IdentId(self.idents.len() as u32);
        self.idents.push(Ident {
            name: name.into(),
            span,
            binding: Binding::Unresolved,
        });
        id
    }

    pub fn get(&self, id: IdentId) -> &Ident {
        &self.idents[id.index()]
    }

    pub fn name(&self, id: IdentId) -> &str {
        &self.idents[id.index()].name
    }

    pub fn binding(&self, id: IdentId) -> Binding {
        self.idents[id.index()].binding
    }

    pub fn bind(&mut self, id: IdentId, binding: Binding) {
        self.idents[id.index()].binding = binding;
    }

    /// Overwrite the text of one occurrence
    pub fn rename(&mut self, id: IdentId, name: &str) {
        let ident = &mut self.idents[id.index()];
        ident.name.clear();
        ident.name.push_str(name);
    }

    pub fn len(&self) -> usize {
        self.idents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IdentId, &Ident)> {
        self.idents
            .iter()
            .enumerate()
            .map(|(i, ident)| (IdentId(i as u32), ident))
    }
}

impl Index<IdentId> for IdentArena {
    type Output = Ident;

    fn index(&self, id: IdentId) -> &Ident {
        self.get(id)
    }
}

/// Root node of the AST representing one Go source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub package: IdentId,
    pub imports: Vec<ImportSpec>,
    pub decls: Vec<Decl>,
    pub idents: IdentArena,
    /// Package-level objects, filled by the resolver
    pub objects: Vec<Object>,
    pub span: Span,
}

impl SourceFile {
    pub fn package_name(&self) -> &str {
        self.idents.name(self.package)
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.index()]
    }

    /// The package-level object an occurrence is bound to, if any
    pub fn object_of(&self, ident: IdentId) -> Option<ObjectId> {
        match self.idents.binding(ident) {
            Binding::Package(id) => Some(id),
            _ => None,
        }
    }
}

/// Import specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// `_`, `.` or a package alias
    pub alias: Option<String>,
    /// Raw path literal, quotes included
    pub path: String,
    pub span: Span,
}
