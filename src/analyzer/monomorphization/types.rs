//! 単相化に関する型定義

use indexmap::IndexSet;

use crate::analyzer::instances::TypeTuple;
use crate::analyzer::placeholder_set::PlaceholderSet;
use crate::ast::{Decl, IdentId, ObjectId};

/// テンプレートで `//generic` 指定された型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// 発見順のインデックス（具体型タプル内の位置）
    pub index: usize,
    pub name: String,
    /// プレースホルダーを宣言するパッケージオブジェクト
    pub object: ObjectId,
}

/// 依存情報付きのトップレベル宣言
#[derive(Debug, Clone)]
pub struct GenericDecl {
    pub decl: Decl,
    /// 直接または推移的に使用するプレースホルダー
    pub uses: PlaceholderSet,
    /// 出力済みの制限タプル
    pub(crate) emitted: IndexSet<Vec<String>>,
}

impl GenericDecl {
    pub fn new(decl: Decl, uses: PlaceholderSet) -> Self {
        Self {
            decl,
            uses,
            emitted: IndexSet::new(),
        }
    }

    /// プレースホルダーに依存しない宣言は一度だけそのまま出力する
    pub fn is_static(&self) -> bool {
        self.uses.is_empty()
    }

    /// タプルを依存集合に制限した値を記録し、初出なら true を返す
    pub fn mark_emitted(&mut self, tuple: &TypeTuple) -> bool {
        let key = self
            .uses
            .restrict(tuple.types())
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        self.emitted.insert(key)
    }
}

/// 識別子の出現に対する書き換え規則
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameRule {
    /// プレースホルダーの出現をタプルの `index` 番目の具体型に置き換える
    Direct { ident: IdentId, index: usize },
    /// ジェネリック宣言の出現を `origin` + 宣言 `decl` の依存集合から作るサフィックスに置き換える
    Qualified {
        ident: IdentId,
        origin: String,
        decl: usize,
    },
}
