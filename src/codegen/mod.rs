//! Code generation module.
//!
//! This module prints the (renamed) AST back to Go source. Output uses tab
//! indentation and gofmt-like spacing; column alignment of struct fields and
//! comments is not reproduced.

use crate::ast::*;

mod decl_codegen;
mod expr_codegen;
mod stmt_codegen;
mod types;

/// Go source printer
///
/// Identifier text is always read from the arena, so printing after a rename
/// pass shows the renamed names.
pub struct Printer<'a> {
    idents: &'a IdentArena,
    out: String,
    indent: usize,
}

impl<'a> Printer<'a> {
    pub fn new(idents: &'a IdentArena) -> Self {
        Self {
            idents,
            out: String::new(),
            indent: 0,
        }
    }

    /// Consume the printer and return the text
    pub fn finish(self) -> String {
        self.out
    }

    /// Package clause and imports
    ///
    /// `package` replaces the name from the template when given.
    pub fn print_header(&mut self, file: &SourceFile, package: Option<&str>) {
        let name = package.unwrap_or_else(|| self.name(file.package));
        self.write("package ");
        self.write(name);

        match file.imports.as_slice() {
            [] => {}
            [import] => {
                self.write("\n\nimport ");
                self.print_import(import);
            }
            imports => {
                self.write("\n\nimport (");
                self.indent += 1;
                for import in imports {
                    self.newline();
                    self.print_import(import);
                }
                self.indent -= 1;
                self.write("\n)");
            }
        }
    }

    fn print_import(&mut self, import: &ImportSpec) {
        if let Some(alias) = &import.alias {
            self.write(alias);
            self.write(" ");
        }
        self.write(&import.path);
    }

    // ==================== Output helpers ====================

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Line break followed by the current indentation
    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn name(&self, id: IdentId) -> &'a str {
        self.idents.name(id)
    }

    fn write_ident(&mut self, id: IdentId) {
        let name = self.name(id);
        self.write(name);
    }

    fn write_ident_list(&mut self, ids: &[IdentId]) {
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_ident(*id);
        }
    }
}

/// Print one declaration to a string
pub fn print_decl(idents: &IdentArena, decl: &Decl) -> String {
    let mut printer = Printer::new(idents);
    printer.print_decl(decl);
    printer.finish()
}

/// Print a whole source file: header followed by all declarations
pub fn print_file(file: &SourceFile) -> String {
    let mut printer = Printer::new(&file.idents);
    printer.print_header(file, None);
    for decl in &file.decls {
        printer.write("\n\n");
        printer.print_decl(decl);
    }
    printer.write("\n");
    printer.finish()
}
