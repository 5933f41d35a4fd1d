//! 名前マングリング処理

use crate::analyzer::instances::TypeTuple;
use crate::analyzer::placeholder_set::PlaceholderSet;

/// 具体型の名前を識別子の一部として使える形に正規化
///
/// 区切り文字の直後の英字を大文字にしてから、`*` を `P` に置き換え `.` を取り除く。
/// `*int32` は `PInt32`、`pkg.Type` は `PkgType` になる。
pub fn normalize_type_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len() + 1);
    let mut word_start = true;

    for c in name.chars() {
        let titled = if word_start { c.to_ascii_uppercase() } else { c };
        match titled {
            '*' => normalized.push('P'),
            '.' => {}
            other => normalized.push(other),
        }
        word_start = !(c.is_alphanumeric() || c == '_');
    }

    normalized
}

/// 依存集合に含まれるインデックスの具体型を昇順に連結したサフィックス
pub fn qualified_suffix(uses: &PlaceholderSet, tuple: &TypeTuple) -> String {
    uses.iter()
        .filter_map(|index| tuple.get(index))
        .map(normalize_type_name)
        .collect()
}

/// 宣言名にサフィックスを付けて修飾
pub fn qualified_name(origin: &str, suffix: &str) -> String {
    format!("{}{}", origin, suffix)
}
