//! 型とシグネチャの出力

use crate::ast::*;

use super::Printer;

impl Printer<'_> {
    /// 型式を出力
    pub fn print_type(&mut self, ty: &TypeExpr) {
        match ty {
            TypeExpr::Name(id) => self.write_ident(*id),
            TypeExpr::Qualified { package, name } => {
                self.write_ident(*package);
                self.write(".");
                self.write_ident(*name);
            }
            TypeExpr::Pointer(inner) => {
                self.write("*");
                self.print_type(inner);
            }
            TypeExpr::Slice(elem) => {
                self.write("[]");
                self.print_type(elem);
            }
            TypeExpr::Array { len, elem } => {
                self.write("[");
                match len {
                    Some(len) => self.print_expr(len),
                    None => self.write("..."),
                }
                self.write("]");
                self.print_type(elem);
            }
            TypeExpr::Map { key, value } => {
                self.write("map[");
                self.print_type(key);
                self.write("]");
                self.print_type(value);
            }
            TypeExpr::Chan { dir, elem } => {
                match dir {
                    ChanDir::Both => self.write("chan "),
                    ChanDir::Send => self.write("chan<- "),
                    ChanDir::Recv => self.write("<-chan "),
                }
                self.print_type(elem);
            }
            TypeExpr::Func(signature) => {
                self.write("func");
                self.print_signature(signature);
            }
            TypeExpr::Struct(fields) => self.print_struct_type(fields),
            TypeExpr::Interface(elems) => self.print_interface_type(elems),
            TypeExpr::Ellipsis(elem) => {
                self.write("...");
                self.print_type(elem);
            }
            TypeExpr::Paren(inner) => {
                self.write("(");
                self.print_type(inner);
                self.write(")");
            }
        }
    }

    /// `(params) results`
    pub(super) fn print_signature(&mut self, signature: &Signature) {
        self.print_field_list(&signature.params);

        if signature.results.is_empty() {
            return;
        }
        self.write(" ");
        if signature.bare_result() {
            self.print_type(&signature.results[0].ty);
        } else {
            self.print_field_list(&signature.results);
        }
    }

    /// 括弧付きのパラメータリスト
    pub(super) fn print_field_list(&mut self, fields: &[Field]) {
        self.write("(");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_field(field);
        }
        self.write(")");
    }

    fn print_field(&mut self, field: &Field) {
        if !field.names.is_empty() {
            self.write_ident_list(&field.names);
            self.write(" ");
        }
        self.print_type(&field.ty);
    }

    fn print_struct_type(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            self.write("struct{}");
            return;
        }

        self.write("struct {");
        self.indent += 1;
        for field in fields {
            self.newline();
            self.print_field(field);
            if let Some(tag) = &field.tag {
                self.write(" ");
                self.write(tag);
            }
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    fn print_interface_type(&mut self, elems: &[InterfaceElem]) {
        if elems.is_empty() {
            self.write("interface{}");
            return;
        }

        self.write("interface {");
        self.indent += 1;
        for elem in elems {
            self.newline();
            match elem {
                InterfaceElem::Method { name, signature } => {
                    self.write_ident(*name);
                    self.print_signature(signature);
                }
                InterfaceElem::Embedded(ty) => self.print_type(ty),
            }
        }
        self.indent -= 1;
        self.newline();
        self.write("}");
    }
}
