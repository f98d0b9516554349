//! Indented textual dump of AST nodes.
//!
//! This is a debugging aid only: the output is never re-parsed and no other
//! component depends on its exact shape. Evaluation semantics must not be
//! affected by anything in this module.

use std::fmt::Write;

use crate::ast::{Expr, Function, Module, Stmt};

/// Renders nodes as an indented bracketed tree into a `String` buffer.
pub struct AstDump<'a> {
    out: &'a mut String,
    indent: String,
    level: usize,
}

impl<'a> AstDump<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self::with_indent(out, 2)
    }

    pub fn with_indent(out: &'a mut String, indent_size: usize) -> Self {
        Self {
            out,
            indent: " ".repeat(indent_size),
            level: 0,
        }
    }

    fn pad(&mut self) {
        for _ in 0..self.level {
            self.out.push_str(&self.indent);
        }
    }

    pub fn module(&mut self, module: &Module) {
        self.out.push_str("<Module stmts=\n");
        self.level += 1;
        for stmt in &module.stmts {
            self.pad();
            self.stmt(stmt);
            self.out.push('\n');
        }
        self.level -= 1;
        self.pad();
        self.out.push('>');
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                self.out.push_str("<ExprStmt\n");
                self.level += 1;
                self.pad();
                self.out.push_str("expr=");
                self.expr(expr);
                self.out.push('\n');
                self.level -= 1;
                self.pad();
                self.out.push('>');
            }
            Stmt::Assign { target, value } => {
                self.out.push_str("<Assign\n");
                self.level += 1;
                self.pad();
                self.out.push_str("target=");
                self.expr(target);
                self.out.push('\n');
                self.pad();
                self.out.push_str("value=");
                self.expr(value);
                self.out.push('\n');
                self.level -= 1;
                self.pad();
                self.out.push('>');
            }
            Stmt::If {
                cond,
                body,
                else_body,
            } => {
                self.out.push_str("<If\n");
                self.level += 1;
                self.pad();
                self.out.push_str("cond=");
                self.expr(cond);
                self.out.push('\n');
                self.pad();
                self.out.push_str("body=\n");
                self.stmt_list(body);
                self.pad();
                self.out.push_str("else=\n");
                self.stmt_list(else_body);
                self.level -= 1;
                self.pad();
                self.out.push('>');
            }
            Stmt::FunctionDef(func) => self.function(func),
            Stmt::Return(expr) => {
                self.out.push_str("<Return\n");
                self.level += 1;
                self.pad();
                self.out.push_str("expr=");
                self.expr(expr);
                self.out.push('\n');
                self.level -= 1;
                self.pad();
                self.out.push('>');
            }
        }
    }

    pub fn function(&mut self, func: &Function) {
        let _ = write!(self.out, "<Function name='{}'\n", func.name);
        self.level += 1;
        self.pad();
        self.out.push_str("params=\n");
        self.level += 1;
        for param in &func.params {
            self.pad();
            let _ = write!(self.out, "<Ident name='{}'>\n", param);
        }
        self.level -= 1;
        self.pad();
        self.out.push_str("body=\n");
        self.stmt_list(&func.body);
        self.level -= 1;
        self.pad();
        self.out.push('>');
    }

    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Int(value) => {
                let _ = write!(self.out, "<Int val={}>", value);
            }
            Expr::Ident(name) => {
                let _ = write!(self.out, "<Ident name='{}'>", name);
            }
            Expr::BinOp { op, lhs, rhs } => {
                let _ = write!(self.out, "<BinOp op='{}'\n", op.symbol());
                self.level += 1;
                self.pad();
                self.out.push_str("lhs=");
                self.expr(lhs);
                self.out.push('\n');
                self.pad();
                self.out.push_str("rhs=");
                self.expr(rhs);
                self.out.push('\n');
                self.level -= 1;
                self.pad();
                self.out.push('>');
            }
            Expr::Paren(inner) => {
                self.out.push_str("<Paren\n");
                self.level += 1;
                self.pad();
                self.out.push_str("inner=");
                self.expr(inner);
                self.out.push('\n');
                self.level -= 1;
                self.pad();
                self.out.push('>');
            }
            Expr::Call { callee, args } => {
                self.out.push_str("<Call\n");
                self.level += 1;
                self.pad();
                self.out.push_str("callee=");
                self.expr(callee);
                self.out.push('\n');
                self.pad();
                self.out.push_str("args=\n");
                self.level += 1;
                for arg in args {
                    self.pad();
                    self.expr(arg);
                    self.out.push('\n');
                }
                self.level -= 2;
                self.pad();
                self.out.push('>');
            }
        }
    }

    fn stmt_list(&mut self, stmts: &[Stmt]) {
        self.level += 1;
        for stmt in stmts {
            self.pad();
            self.stmt(stmt);
            self.out.push('\n');
        }
        self.level -= 1;
    }
}

pub fn module_to_string(module: &Module) -> String {
    let mut out = String::new();
    AstDump::new(&mut out).module(module);
    out
}

pub fn stmt_to_string(stmt: &Stmt) -> String {
    let mut out = String::new();
    AstDump::new(&mut out).stmt(stmt);
    out
}

pub fn expr_to_string(expr: &Expr) -> String {
    let mut out = String::new();
    AstDump::new(&mut out).expr(expr);
    out
}
