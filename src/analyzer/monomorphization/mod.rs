//! 単相化（Monomorphization）モジュール
//!
//! `//generic` 指定された型をプレースホルダーとして、具体型タプルごとに
//! ジェネリック宣言の特殊化されたコピーを生成する。

use std::fmt::Write as _;

use log::info;

use crate::analyzer::instances::Instances;
use crate::ast::*;
use crate::error::{MonogenError, MonogenResult, SpecializeError};

// サブモジュール
mod collector;
mod dependency;
mod instantiator;
pub mod mangling;
mod replacement;
mod types;

// 再エクスポート
pub use types::*;

/// 単相化エンジン
///
/// 1回の実行につき1つ作られ、`specialize` で消費される。
pub struct Monomorphizer {
    /// テンプレート（宣言は `generic_decls` に移される）
    pub(crate) file: SourceFile,
    /// 生成するインスタンス
    pub(crate) instances: Instances,
    /// 発見順のプレースホルダー
    pub(crate) placeholders: Vec<Placeholder>,
    /// プレースホルダー以外のトップレベル宣言
    pub(crate) generic_decls: Vec<GenericDecl>,
    /// 識別子の書き換え規則
    pub(crate) rename_rules: Vec<RenameRule>,
    /// 宣言間の参照（参照元 -> 参照先）
    pub(crate) references: Vec<(usize, usize)>,
}

impl Monomorphizer {
    /// テンプレートを解析し、出力の準備を整える
    ///
    /// エラーはすべてここで検出され、出力が始まってからは書き込みエラーしか起きない。
    pub fn new(mut file: SourceFile, instances: Instances) -> MonogenResult<Self> {
        let decls = std::mem::take(&mut file.decls);
        let mut monomorphizer = Self {
            file,
            instances,
            placeholders: Vec::new(),
            generic_decls: Vec::new(),
            rename_rules: Vec::new(),
            references: Vec::new(),
        };

        // ステップ1: プレースホルダーを収集
        let mut decls = monomorphizer.collect_placeholders(decls)?;

        // ステップ2: 型の数を検証
        let types = monomorphizer.instances.arity();
        if monomorphizer.placeholders.len() != types {
            return Err(SpecializeError::ArityMismatch {
                placeholders: monomorphizer.placeholders.len(),
                types,
            }
            .into());
        }

        // ステップ3: タグを取り除きグループ宣言を分割
        collector::strip_tags(&mut decls);
        let decls = collector::split_grouped_decls(decls);

        // ステップ4: 依存解析と書き換え規則の作成
        monomorphizer.analyze_dependencies(decls);
        monomorphizer.plan_renames();
        monomorphizer.propagate_dependencies();

        info!(
            "{} placeholders, {} declarations, {} instances",
            monomorphizer.placeholders.len(),
            monomorphizer.generic_decls.len(),
            monomorphizer.instances.len()
        );

        Ok(monomorphizer)
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    pub fn generic_decls(&self) -> &[GenericDecl] {
        &self.generic_decls
    }

    pub fn rename_rules(&self) -> &[RenameRule] {
        &self.rename_rules
    }

    pub fn instances(&self) -> &Instances {
        &self.instances
    }

    /// 各宣言とその依存集合の一覧
    pub fn dependency_report(&self) -> String {
        let mut report = String::new();

        let _ = writeln!(report, "placeholders:");
        for placeholder in &self.placeholders {
            let _ = writeln!(report, "  {} {}", placeholder.index, placeholder.name);
        }

        let _ = writeln!(report, "declarations:");
        for generic in &self.generic_decls {
            let _ = writeln!(
                report,
                "  {} {}",
                self.describe(&generic.decl),
                generic.uses
            );
        }

        report
    }

    /// 宣言の短い説明（`type List`、`func (List) len` など）
    fn describe(&self, decl: &Decl) -> String {
        let idents = &self.file.idents;
        match decl {
            Decl::Gen(gen_decl) => {
                let names: Vec<&str> = gen_decl
                    .specs
                    .iter()
                    .flat_map(|spec| match spec {
                        Spec::Type(spec) => vec![spec.name],
                        Spec::Value(spec) => spec.names.clone(),
                    })
                    .map(|id| idents.name(id))
                    .collect();
                format!("{} {}", gen_decl.keyword.as_str(), names.join(", "))
            }
            Decl::Func(func) => match &func.receiver {
                Some(receiver) => format!(
                    "func ({}) {}",
                    receiver_type_name(&receiver.ty, idents),
                    idents.name(func.name)
                ),
                None => format!("func {}", idents.name(func.name)),
            },
        }
    }
}

fn receiver_type_name<'a>(ty: &TypeExpr, idents: &'a IdentArena) -> &'a str {
    match ty {
        TypeExpr::Name(id) => idents.name(*id),
        TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) => receiver_type_name(inner, idents),
        _ => "?",
    }
}

/// ソースを単相化して文字列で返す
pub fn monomorphize_source(source: &str, types: &str, package: Option<&str>) -> MonogenResult<String> {
    let file = crate::compiler::parse_template(source)?;
    let instances = Instances::parse(types)?;

    let mut out = Vec::new();
    Monomorphizer::new(file, instances)?.specialize(package, &mut out)?;

    String::from_utf8(out).map_err(|e| MonogenError::Io(e.to_string()))
}
