//! インスタンス化と出力
//!
//! ヘッダと静的な宣言を一度だけ出力し、その後タプルごとに規則を適用して
//! まだ出力していない組み合わせのジェネリック宣言だけを出力する。

use std::io::Write;

use log::{debug, trace};

use crate::analyzer::instances::TypeTuple;
use crate::codegen::Printer;
use crate::error::MonogenResult;

use super::Monomorphizer;

/// 出力ブロックの区切り
const BLOCK_SEPARATOR: &str = "\n\n";

impl Monomorphizer {
    /// 特殊化したソースを書き出す
    ///
    /// `package` を指定するとパッケージ節の名前を置き換える。
    pub fn specialize<W: Write>(mut self, package: Option<&str>, out: &mut W) -> MonogenResult<()> {
        self.emit_header(package, out)?;

        let tuples: Vec<TypeTuple> = self.instances.tuples().to_vec();
        for tuple in &tuples {
            self.apply_renames(tuple);
            self.emit_instance(tuple, out)?;
        }

        Ok(())
    }

    /// パッケージ節、import、静的な宣言
    pub(super) fn emit_header<W: Write>(&self, package: Option<&str>, out: &mut W) -> MonogenResult<()> {
        let mut printer = Printer::new(&self.file.idents);
        printer.print_header(&self.file, package);
        write!(out, "{}{}", printer.finish(), BLOCK_SEPARATOR)?;

        let mut count = 0;
        for generic in self.generic_decls.iter().filter(|g| g.is_static()) {
            let mut printer = Printer::new(&self.file.idents);
            printer.print_decl(&generic.decl);
            write!(out, "{}{}", printer.finish(), BLOCK_SEPARATOR)?;
            count += 1;
        }
        debug!("emitted {} static declarations", count);

        Ok(())
    }

    /// 1つのタプルについて未出力の宣言を出力
    pub(super) fn emit_instance<W: Write>(&mut self, tuple: &TypeTuple, out: &mut W) -> MonogenResult<()> {
        let mut count = 0;

        for generic in self.generic_decls.iter_mut() {
            if generic.is_static() {
                continue;
            }
            if !generic.mark_emitted(tuple) {
                trace!("skipping declaration already emitted for {}", generic.uses);
                continue;
            }

            let mut printer = Printer::new(&self.file.idents);
            printer.print_decl(&generic.decl);
            write!(out, "{}{}", printer.finish(), BLOCK_SEPARATOR)?;
            count += 1;
        }

        debug!("emitted {} declarations for {}", count, tuple);
        Ok(())
    }
}
