//! Read-only traversal over every identifier occurrence of a declaration

use super::*;

/// Call `f` for every identifier occurrence in `decl`, in source order
pub fn for_each_ident(decl: &Decl, f: &mut impl FnMut(IdentId)) {
    match decl {
        Decl::Gen(gen_decl) => visit_gen_decl(gen_decl, f),
        Decl::Func(func) => {
            if let Some(receiver) = &func.receiver {
                visit_field(receiver, f);
            }
            f(func.name);
            visit_signature(&func.signature, f);
            if let Some(body) = &func.body {
                visit_block(body, f);
            }
        }
    }
}

fn visit_gen_decl(gen_decl: &GenDecl, f: &mut impl FnMut(IdentId)) {
    for spec in &gen_decl.specs {
        match spec {
            Spec::Type(spec) => {
                f(spec.name);
                visit_type(&spec.ty, f);
            }
            Spec::Value(spec) => {
                for name in &spec.names {
                    f(*name);
                }
                if let Some(ty) = &spec.ty {
                    visit_type(ty, f);
                }
                for value in &spec.values {
                    visit_expr(value, f);
                }
            }
        }
    }
}

fn visit_field(field: &Field, f: &mut impl FnMut(IdentId)) {
    for name in &field.names {
        f(*name);
    }
    visit_type(&field.ty, f);
}

fn visit_signature(signature: &Signature, f: &mut impl FnMut(IdentId)) {
    for field in signature.params.iter().chain(&signature.results) {
        visit_field(field, f);
    }
}

fn visit_type(ty: &TypeExpr, f: &mut impl FnMut(IdentId)) {
    match ty {
        TypeExpr::Name(name) => f(*name),
        TypeExpr::Qualified { package, name } => {
            f(*package);
            f(*name);
        }
        TypeExpr::Pointer(inner)
        | TypeExpr::Slice(inner)
        | TypeExpr::Ellipsis(inner)
        | TypeExpr::Paren(inner) => visit_type(inner, f),
        TypeExpr::Array { len, elem } => {
            if let Some(len) = len {
                visit_expr(len, f);
            }
            visit_type(elem, f);
        }
        TypeExpr::Map { key, value } => {
            visit_type(key, f);
            visit_type(value, f);
        }
        TypeExpr::Chan { elem, .. } => visit_type(elem, f),
        TypeExpr::Func(signature) => visit_signature(signature, f),
        TypeExpr::Struct(fields) => {
            for field in fields {
                visit_field(field, f);
            }
        }
        TypeExpr::Interface(elems) => {
            for elem in elems {
                match elem {
                    InterfaceElem::Method { name, signature } => {
                        f(*name);
                        visit_signature(signature, f);
                    }
                    InterfaceElem::Embedded(ty) => visit_type(ty, f),
                }
            }
        }
    }
}

fn visit_block(block: &Block, f: &mut impl FnMut(IdentId)) {
    for stmt in &block.statements {
        visit_stmt(stmt, f);
    }
}

fn visit_stmt(stmt: &Stmt, f: &mut impl FnMut(IdentId)) {
    match stmt {
        Stmt::Decl(decl) => visit_gen_decl(decl, f),
        Stmt::Labeled { label, stmt } => {
            f(*label);
            visit_stmt(stmt, f);
        }
        Stmt::Expr(expr) | Stmt::Go(expr) | Stmt::Defer(expr) => visit_expr(expr, f),
        Stmt::Send { channel, value } => {
            visit_expr(channel, f);
            visit_expr(value, f);
        }
        Stmt::IncDec { expr, .. } => visit_expr(expr, f),
        Stmt::Assign(assign) => {
            for expr in assign.lhs.iter().chain(&assign.rhs) {
                visit_expr(expr, f);
            }
        }
        Stmt::Return(values) => {
            for value in values {
                visit_expr(value, f);
            }
        }
        Stmt::Branch { label, .. } => {
            if let Some(label) = label {
                f(*label);
            }
        }
        Stmt::Block(block) => visit_block(block, f),
        Stmt::If(if_stmt) => visit_if(if_stmt, f),
        Stmt::Switch(switch) => {
            if let Some(init) = &switch.init {
                visit_stmt(init, f);
            }
            if let Some(tag) = &switch.tag {
                visit_expr(tag, f);
            }
            for clause in &switch.clauses {
                for value in &clause.values {
                    visit_expr(value, f);
                }
                for stmt in &clause.body {
                    visit_stmt(stmt, f);
                }
            }
        }
        Stmt::TypeSwitch(switch) => {
            if let Some(init) = &switch.init {
                visit_stmt(init, f);
            }
            if let Some(binding) = switch.binding {
                f(binding);
            }
            visit_expr(&switch.subject, f);
            for clause in &switch.clauses {
                for ty in &clause.types {
                    visit_type(ty, f);
                }
                for stmt in &clause.body {
                    visit_stmt(stmt, f);
                }
            }
        }
        Stmt::Select(select) => {
            for clause in &select.clauses {
                if let Some(comm) = &clause.comm {
                    visit_stmt(comm, f);
                }
                for stmt in &clause.body {
                    visit_stmt(stmt, f);
                }
            }
        }
        Stmt::For(for_stmt) => {
            if let Some(init) = &for_stmt.init {
                visit_stmt(init, f);
            }
            if let Some(condition) = &for_stmt.condition {
                visit_expr(condition, f);
            }
            if let Some(post) = &for_stmt.post {
                visit_stmt(post, f);
            }
            visit_block(&for_stmt.body, f);
        }
        Stmt::Range(range) => {
            if let Some(key) = &range.key {
                visit_expr(key, f);
            }
            if let Some(value) = &range.value {
                visit_expr(value, f);
            }
            visit_expr(&range.expr, f);
            visit_block(&range.body, f);
        }
        Stmt::Empty => {}
    }
}

fn visit_if(if_stmt: &IfStmt, f: &mut impl FnMut(IdentId)) {
    if let Some(init) = &if_stmt.init {
        visit_stmt(init, f);
    }
    visit_expr(&if_stmt.condition, f);
    visit_block(&if_stmt.then_branch, f);
    match &if_stmt.else_branch {
        Some(ElseBranch::Block(block)) => visit_block(block, f),
        Some(ElseBranch::If(nested)) => visit_if(nested, f),
        None => {}
    }
}

fn visit_expr(expr: &Expr, f: &mut impl FnMut(IdentId)) {
    match expr {
        Expr::Ident(ident) => f(*ident),
        Expr::Literal(_) => {}
        Expr::Composite(lit) => {
            if let Some(ty) = &lit.ty {
                visit_expr(ty, f);
            }
            for element in &lit.elements {
                visit_expr(element, f);
            }
        }
        Expr::FuncLit(lit) => {
            visit_signature(&lit.signature, f);
            visit_block(&lit.body, f);
        }
        Expr::Paren(inner) => visit_expr(inner, f),
        Expr::Selector { expr, sel } => {
            visit_expr(expr, f);
            f(*sel);
        }
        Expr::Index { expr, index } => {
            visit_expr(expr, f);
            visit_expr(index, f);
        }
        Expr::Slice(slice) => {
            visit_expr(&slice.expr, f);
            for bound in [&slice.low, &slice.high, &slice.max].into_iter().flatten() {
                visit_expr(bound, f);
            }
        }
        Expr::TypeAssert { expr, ty } => {
            visit_expr(expr, f);
            if let Some(ty) = ty {
                visit_type(ty, f);
            }
        }
        Expr::Call(call) => {
            visit_expr(&call.func, f);
            for arg in &call.args {
                visit_expr(arg, f);
            }
        }
        Expr::Unary { expr, .. } => visit_expr(expr, f),
        Expr::Binary { left, right, .. } => {
            visit_expr(left, f);
            visit_expr(right, f);
        }
        Expr::KeyValue { key, value } => {
            visit_expr(key, f);
            visit_expr(value, f);
        }
        Expr::Type(ty) => visit_type(ty, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visits_receiver_name_and_body() {
        let mut idents = IdentArena::new();
        let recv = idents.alloc("l", Span::dummy());
        let recv_ty = idents.alloc("List", Span::dummy());
        let name = idents.alloc("Len", Span::dummy());
        let result = idents.alloc("int", Span::dummy());
        let call = idents.alloc("len", Span::dummy());
        let decl = Decl::Func(FuncDecl {
            receiver: Some(Field {
                names: vec![recv],
                ty: TypeExpr::Pointer(Box::new(TypeExpr::Name(recv_ty))),
                tag: None,
                span: Span::dummy(),
            }),
            name,
            signature: Signature {
                params: vec![],
                results: vec![Field {
                    names: vec![],
                    ty: TypeExpr::Name(result),
                    tag: None,
                    span: Span::dummy(),
                }],
            },
            body: Some(Block {
                statements: vec![Stmt::Return(vec![Expr::Call(CallExpr {
                    func: Box::new(Expr::Ident(call)),
                    args: vec![],
                    ellipsis: false,
                })])],
                span: Span::dummy(),
            }),
            tag: None,
            span: Span::dummy(),
        });

        let mut seen = Vec::new();
        for_each_ident(&decl, &mut |id| seen.push(id));
        assert_eq!(seen, vec![recv, recv_ty, name, result, call]);
    }
}
