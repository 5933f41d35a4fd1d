//! 識別子の書き換え規則の作成と適用

use std::collections::HashMap;

use log::{debug, trace};

use crate::analyzer::instances::TypeTuple;
use crate::ast::*;

use super::mangling::{qualified_name, qualified_suffix};
use super::{Monomorphizer, RenameRule};

impl Monomorphizer {
    /// ジェネリック宣言を参照するすべての出現に `Qualified` 規則を作る
    ///
    /// 同時に参照元から参照先への辺を記録し、依存集合の伝播に使う。
    pub(super) fn plan_renames(&mut self) {
        let owners = self.declaration_owners();
        let idents = &self.file.idents;
        let rules = &mut self.rename_rules;
        let references = &mut self.references;

        for (from, generic) in self.generic_decls.iter().enumerate() {
            for_each_ident(&generic.decl, &mut |ident| {
                let Binding::Package(object) = idents.binding(ident) else {
                    return;
                };
                if let Some(&to) = owners.get(&object) {
                    rules.push(RenameRule::Qualified {
                        ident,
                        origin: idents.name(ident).to_string(),
                        decl: to,
                    });
                    if from != to {
                        references.push((from, to));
                    }
                }
            });
        }

        references.sort_unstable();
        references.dedup();

        debug!(
            "{} rename rules, {} references between declarations",
            self.rename_rules.len(),
            self.references.len()
        );
    }

    /// パッケージオブジェクトからそれを宣言する宣言のインデックスへの対応
    ///
    /// メソッド名はパッケージレベルのオブジェクトではないので含まれない。
    fn declaration_owners(&self) -> HashMap<ObjectId, usize> {
        let mut owners = HashMap::new();
        let idents = &self.file.idents;

        for (index, generic) in self.generic_decls.iter().enumerate() {
            let mut declare = |name: IdentId| {
                if let Binding::Package(object) = idents.binding(name) {
                    owners.insert(object, index);
                }
            };

            match &generic.decl {
                Decl::Gen(gen_decl) => {
                    for spec in &gen_decl.specs {
                        match spec {
                            Spec::Type(spec) => declare(spec.name),
                            Spec::Value(spec) => spec.names.iter().copied().for_each(&mut declare),
                        }
                    }
                }
                Decl::Func(func) if !func.is_method() => declare(func.name),
                Decl::Func(_) => {}
            }
        }

        owners
    }

    /// タプルに対してすべての規則を識別子アリーナに適用
    pub(super) fn apply_renames(&mut self, tuple: &TypeTuple) {
        // サフィックスは宣言ごとに一度だけ計算する
        let suffixes: Vec<String> = self
            .generic_decls
            .iter()
            .map(|generic| qualified_suffix(&generic.uses, tuple))
            .collect();

        for rule in &self.rename_rules {
            match rule {
                RenameRule::Direct { ident, index } => {
                    if let Some(concrete) = tuple.get(*index) {
                        self.file.idents.rename(*ident, concrete);
                    }
                }
                RenameRule::Qualified {
                    ident,
                    origin,
                    decl,
                } => {
                    let name = qualified_name(origin, &suffixes[*decl]);
                    self.file.idents.rename(*ident, &name);
                }
            }
        }

        trace!("applied {} rules for {}", self.rename_rules.len(), tuple);
    }
}
