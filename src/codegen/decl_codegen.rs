//! 宣言の出力

use crate::ast::*;

use super::Printer;

impl Printer<'_> {
    /// トップレベル宣言を出力
    pub fn print_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Gen(gen_decl) => self.print_gen_decl(gen_decl),
            Decl::Func(func) => self.print_func_decl(func),
        }
    }

    /// `type`/`var`/`const` 宣言（グループ化されていれば括弧付き）
    pub(super) fn print_gen_decl(&mut self, decl: &GenDecl) {
        self.write(decl.keyword.as_str());

        if !decl.grouped {
            for spec in &decl.specs {
                self.write(" ");
                self.print_spec(spec);
            }
            return;
        }

        if decl.specs.is_empty() {
            self.write(" ()");
            return;
        }

        self.write(" (");
        self.indent += 1;
        for spec in &decl.specs {
            self.newline();
            self.print_spec(spec);
        }
        self.indent -= 1;
        self.newline();
        self.write(")");
    }

    fn print_spec(&mut self, spec: &Spec) {
        match spec {
            Spec::Type(spec) => {
                self.write_ident(spec.name);
                self.write(if spec.alias { " = " } else { " " });
                self.print_type(&spec.ty);
            }
            Spec::Value(spec) => {
                self.write_ident_list(&spec.names);
                if let Some(ty) = &spec.ty {
                    self.write(" ");
                    self.print_type(ty);
                }
                if !spec.values.is_empty() {
                    self.write(" = ");
                    self.print_expr_list(&spec.values);
                }
            }
        }
    }

    fn print_func_decl(&mut self, func: &FuncDecl) {
        self.write("func ");
        if let Some(receiver) = &func.receiver {
            self.print_field_list(std::slice::from_ref(receiver));
            self.write(" ");
        }
        self.write_ident(func.name);
        self.print_signature(&func.signature);

        if let Some(body) = &func.body {
            self.write(" ");
            self.print_block(body);
        }
    }
}
