//! プレースホルダー宣言の収集と宣言の前処理

use log::{debug, warn};

use crate::ast::*;
use crate::error::{MonogenResult, SpecializeError};

use super::{Monomorphizer, Placeholder};

impl Monomorphizer {
    /// `//generic` 指定された型宣言を取り出し、残りの宣言を返す
    pub(super) fn collect_placeholders(&mut self, decls: Vec<Decl>) -> MonogenResult<Vec<Decl>> {
        let mut remaining = Vec::with_capacity(decls.len());

        for decl in decls {
            let Some(name) = placeholder_name(&decl) else {
                remaining.push(decl);
                continue;
            };

            match self.file.object_of(name) {
                Some(object) => {
                    let placeholder = Placeholder {
                        index: self.placeholders.len(),
                        name: self.file.idents.name(name).to_string(),
                        object,
                    };
                    debug!(
                        "placeholder #{} '{}'",
                        placeholder.index, placeholder.name
                    );
                    self.placeholders.push(placeholder);
                }
                None => {
                    warn!(
                        "'{}' is marked generic but is not a package-level type, ignoring the marker",
                        self.file.idents.name(name)
                    );
                    remaining.push(decl);
                }
            }
        }

        if self.placeholders.is_empty() {
            return Err(SpecializeError::NoPlaceholdersFound.into());
        }

        Ok(remaining)
    }
}

/// プレースホルダー宣言なら宣言される型名
fn placeholder_name(decl: &Decl) -> Option<IdentId> {
    let Decl::Gen(gen_decl) = decl else {
        return None;
    };
    if gen_decl.keyword != DeclKeyword::Type
        || gen_decl.tag != Some(DeclTag::Placeholder)
        || gen_decl.specs.len() != 1
    {
        return None;
    }
    match &gen_decl.specs[0] {
        Spec::Type(spec) => Some(spec.name),
        Spec::Value(_) => None,
    }
}

/// 残りの宣言からタグを取り除く
pub(super) fn strip_tags(decls: &mut [Decl]) {
    for decl in decls {
        decl.clear_tag();
    }
}

/// 複数の仕様を持つグループ宣言を1仕様ずつの宣言に分割
///
/// 仕様が1つだけのグループは括弧付きのまま残す。
pub(super) fn split_grouped_decls(decls: Vec<Decl>) -> Vec<Decl> {
    let mut result = Vec::with_capacity(decls.len());

    for decl in decls {
        match decl {
            Decl::Gen(gen_decl) if gen_decl.specs.len() > 1 => {
                let keyword = gen_decl.keyword;
                for spec in gen_decl.specs {
                    let span = spec.span();
                    result.push(Decl::Gen(GenDecl {
                        keyword,
                        specs: vec![spec],
                        grouped: false,
                        tag: None,
                        span,
                    }));
                }
            }
            other => result.push(other),
        }
    }

    result
}
