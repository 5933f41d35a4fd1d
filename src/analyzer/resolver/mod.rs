//! 名前解決
//!
//! 識別子の各出現を、それが参照するパッケージレベルのオブジェクトに結びつける。
//! 関数内で宣言された名前はローカルとして扱い、パッケージのオブジェクトを隠す。
//! ユニバーススコープの名前（`int`、`len` など）とimportしたパッケージの
//! メンバーは未解決のまま残す。

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::ast::*;

mod expressions;
mod scope;
mod statements;

/// 名前解決器
pub struct Resolver<'a> {
    pub(crate) idents: &'a mut IdentArena,
    /// パッケージスコープ（名前 -> オブジェクト）
    pub(crate) package_scope: IndexMap<String, ObjectId>,
    /// 関数内のスコープスタック
    pub(crate) scope_stack: Vec<HashSet<String>>,
}

impl<'a> Resolver<'a> {
    pub fn new(idents: &'a mut IdentArena) -> Self {
        Self {
            idents,
            package_scope: IndexMap::new(),
            scope_stack: Vec::new(),
        }
    }

    /// パッケージレベルの宣言をオブジェクトとして登録
    ///
    /// メソッドと `init` 関数はパッケージスコープに入らない。
    pub fn declare_package_objects(&mut self, decls: &[Decl], objects: &mut Vec<Object>) {
        for decl in decls {
            match decl {
                Decl::Gen(gen_decl) => {
                    for spec in &gen_decl.specs {
                        match spec {
                            Spec::Type(spec) => {
                                self.declare_object(spec.name, ObjectKind::Type, objects);
                            }
                            Spec::Value(spec) => {
                                let kind = match gen_decl.keyword {
                                    DeclKeyword::Const => ObjectKind::Const,
                                    _ => ObjectKind::Var,
                                };
                                for &name in &spec.names {
                                    self.declare_object(name, kind, objects);
                                }
                            }
                        }
                    }
                }
                Decl::Func(func) => {
                    if !func.is_method() && self.idents.name(func.name) != "init" {
                        self.declare_object(func.name, ObjectKind::Func, objects);
                    }
                }
            }
        }
    }

    fn declare_object(&mut self, ident: IdentId, kind: ObjectKind, objects: &mut Vec<Object>) {
        let name = self.idents.name(ident).to_string();
        if name == "_" {
            return;
        }
        if self.package_scope.contains_key(&name) {
            debug!("'{}' redeclared in package scope, keeping the first declaration", name);
            return;
        }

        let id = ObjectId(objects.len() as u32);
        objects.push(Object {
            name: name.clone(),
            kind,
            ident,
        });
        self.package_scope.insert(name, id);
        self.idents.bind(ident, Binding::Package(id));
    }

    /// トップレベル宣言の内部を解決
    pub fn resolve_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Gen(gen_decl) => {
                // 宣言される名前自体はすでに束縛済み
                for spec in &gen_decl.specs {
                    match spec {
                        Spec::Type(spec) => self.resolve_type(&spec.ty),
                        Spec::Value(spec) => {
                            if let Some(ty) = &spec.ty {
                                self.resolve_type(ty);
                            }
                            for value in &spec.values {
                                self.resolve_expr(value);
                            }
                        }
                    }
                }
            }
            Decl::Func(func) => {
                self.enter_scope();
                if let Some(receiver) = &func.receiver {
                    self.resolve_field(receiver, true);
                }
                self.resolve_signature(&func.signature, true);
                if let Some(body) = &func.body {
                    // 関数本体はパラメータと同じスコープ
                    self.resolve_stmts(&body.statements);
                }
                self.exit_scope();
            }
        }
    }

    /// シグネチャの型を解決し、必要ならパラメータ名を宣言
    pub(crate) fn resolve_signature(&mut self, signature: &Signature, declare: bool) {
        for field in signature.params.iter().chain(&signature.results) {
            self.resolve_field(field, declare);
        }
    }

    fn resolve_field(&mut self, field: &Field, declare: bool) {
        self.resolve_type(&field.ty);
        if declare {
            for &name in &field.names {
                self.declare_local(name);
            }
        }
    }

    /// 型式を解決
    pub(crate) fn resolve_type(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Name(id) => self.resolve_ident(*id),
            // importしたパッケージのメンバー
            TypeExpr::Qualified { .. } => {}
            TypeExpr::Pointer(inner)
            | TypeExpr::Slice(inner)
            | TypeExpr::Ellipsis(inner)
            | TypeExpr::Paren(inner) => self.resolve_type(inner),
            TypeExpr::Array { len, elem } => {
                if let Some(len) = len {
                    self.resolve_expr(len);
                }
                self.resolve_type(elem);
            }
            TypeExpr::Map { key, value } => {
                self.resolve_type(key);
                self.resolve_type(value);
            }
            TypeExpr::Chan { elem, .. } => self.resolve_type(elem),
            TypeExpr::Func(signature) => self.resolve_signature(signature, false),
            TypeExpr::Struct(fields) => {
                // フィールド名は解決しない
                for field in fields {
                    self.resolve_type(&field.ty);
                }
            }
            TypeExpr::Interface(elems) => {
                for elem in elems {
                    match elem {
                        InterfaceElem::Method { signature, .. } => {
                            self.resolve_signature(signature, false)
                        }
                        InterfaceElem::Embedded(ty) => self.resolve_type(ty),
                    }
                }
            }
        }
    }
}

/// ソースファイル全体の名前解決を行い、パッケージオブジェクトを登録する
pub fn resolve_file(file: &mut SourceFile) {
    let SourceFile {
        decls,
        idents,
        objects,
        ..
    } = file;

    objects.clear();
    let mut resolver = Resolver::new(idents);
    resolver.declare_package_objects(decls, objects);
    for decl in decls.iter() {
        resolver.resolve_decl(decl);
    }

    debug!(
        "resolved {} identifiers against {} package objects",
        idents.len(),
        objects.len()
    );
}
