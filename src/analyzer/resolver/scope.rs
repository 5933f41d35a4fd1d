//! スコープ管理

use std::collections::HashSet;

use crate::ast::{Binding, IdentId};

use super::Resolver;

impl Resolver<'_> {
    pub fn enter_scope(&mut self) {
        self.scope_stack.push(HashSet::new());
    }

    pub fn exit_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// 名前を検索（内側のスコープから順に）
    pub fn lookup(&self, name: &str) -> Binding {
        if self.scope_stack.iter().rev().any(|scope| scope.contains(name)) {
            return Binding::Local;
        }
        match self.package_scope.get(name) {
            Some(&id) => Binding::Package(id),
            None => Binding::Unresolved,
        }
    }

    /// 現在のスコープにローカルな名前を宣言
    pub(crate) fn declare_local(&mut self, id: IdentId) {
        let name = self.idents.name(id);
        if name == "_" {
            return;
        }
        let name = name.to_string();
        if let Some(scope) = self.scope_stack.last_mut() {
            scope.insert(name);
        }
        self.idents.bind(id, Binding::Local);
    }

    /// 識別子の使用箇所を解決（見つからなければ未解決のまま）
    pub(crate) fn resolve_ident(&mut self, id: IdentId) {
        let binding = self.lookup(self.idents.name(id));
        if binding != Binding::Unresolved {
            self.idents.bind(id, binding);
        }
    }
}
