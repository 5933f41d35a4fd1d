//! プレースホルダーのインデックス集合

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 宣言が依存するプレースホルダーのインデックス集合
///
/// 反復は常に昇順で、サフィックスの生成順とタプルの制限順を決める。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceholderSet {
    indices: BTreeSet<usize>,
}

impl PlaceholderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// インデックスを追加（新規なら true）
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// 他の集合を取り込み、要素が増えたかどうかを返す
    pub fn union_with(&mut self, other: &PlaceholderSet) -> bool {
        let before = self.indices.len();
        self.indices.extend(other.indices.iter().copied());
        self.indices.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// タプルをこの集合のインデックスに制限する（昇順）
    pub fn restrict<'t, T>(&self, tuple: &'t [T]) -> Vec<&'t T> {
        self.iter().filter_map(|i| tuple.get(i)).collect()
    }
}

impl FromIterator<usize> for PlaceholderSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PlaceholderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "}}")
    }
}
