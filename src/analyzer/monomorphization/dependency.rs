//! 依存解析
//!
//! 各宣言が直接参照するプレースホルダーを集め、宣言間の参照を辿って
//! 不動点に達するまで依存集合を伝播させる。

use std::collections::HashMap;

use log::{debug, trace};

use crate::analyzer::placeholder_set::PlaceholderSet;
use crate::ast::*;

use super::{GenericDecl, Monomorphizer, RenameRule};

impl Monomorphizer {
    /// 直接の依存を解析し、プレースホルダーの出現ごとに `Direct` 規則を作る
    pub(super) fn analyze_dependencies(&mut self, decls: Vec<Decl>) {
        let placeholder_of: HashMap<ObjectId, usize> = self
            .placeholders
            .iter()
            .map(|p| (p.object, p.index))
            .collect();

        let idents = &self.file.idents;
        let rules = &mut self.rename_rules;

        self.generic_decls = decls
            .into_iter()
            .map(|decl| {
                let mut uses = PlaceholderSet::new();
                for_each_ident(&decl, &mut |ident| {
                    if let Binding::Package(object) = idents.binding(ident) {
                        if let Some(&index) = placeholder_of.get(&object) {
                            uses.insert(index);
                            rules.push(RenameRule::Direct { ident, index });
                        }
                    }
                });
                GenericDecl::new(decl, uses)
            })
            .collect();

        debug!(
            "{} declarations, {} placeholder occurrences",
            self.generic_decls.len(),
            self.rename_rules.len()
        );
    }

    /// 参照グラフに沿って依存集合を伝播（`deps[R] |= deps[S]`）
    ///
    /// 宣言の順序に関係なく推移閉包が得られる。
    pub(super) fn propagate_dependencies(&mut self) {
        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut changed = false;
            for &(from, to) in &self.references {
                if from == to {
                    continue;
                }
                let source = self.generic_decls[to].uses.clone();
                changed |= self.generic_decls[from].uses.union_with(&source);
            }
            if !changed {
                break;
            }
        }
        trace!("dependency propagation settled after {} rounds", rounds);
    }
}
