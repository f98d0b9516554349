//! Scope management and semantic checks for the Tern language.
//!
//! [`ScopeStack`] is the evaluator's name environment: a stack of frames,
//! innermost last, each holding a variable table and a parallel function
//! table. Everything stored into a frame is cloned at store time, so the
//! environment never aliases the tree being executed; a binding dies with
//! the frame that holds it.
//!
//! The return-path validator lives here too: it is the static check applied
//! to a function definition before the evaluator registers it.

use std::collections::HashMap;

use tern_syntax::ast::{Expr, Function, Stmt};

/// One level of the nested name-table stack.
#[derive(Default)]
struct ScopeFrame {
    /// Variables bound in this scope
    vars: HashMap<String, Expr>,
    /// Functions defined in this scope (a separate namespace)
    funcs: HashMap<String, Function>,
}

/// An ordered stack of scope frames with lexical shadowing.
///
/// Lookups scan innermost to outermost and the first match wins. Callers
/// must pair [`ScopeStack::enter_scope`] and [`ScopeStack::exit_scope`] on
/// every exit path of the operation that entered the scope, failure paths
/// included. The root frame is never popped.
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    /// Push a fresh innermost frame.
    pub fn enter_scope(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// Pop the innermost frame, dropping every binding it holds. The root
    /// frame stays.
    pub fn exit_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of active frames, the root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn innermost(&mut self) -> &mut ScopeFrame {
        self.frames
            .last_mut()
            .expect("scope stack always holds a root frame")
    }

    /// Bind `name` in the innermost frame to a clone of `expr`, shadowing
    /// any outer binding of the same name for this frame's lifetime.
    pub fn set_var(&mut self, name: &str, expr: &Expr) {
        self.innermost().vars.insert(name.to_string(), expr.clone());
    }

    /// Look `name` up, innermost frame first.
    pub fn lookup_var(&self, name: &str) -> Option<&Expr> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.vars.get(name))
    }

    /// Register a clone of `func` in the innermost frame under its own name.
    pub fn set_func(&mut self, func: &Function) {
        self.innermost()
            .funcs
            .insert(func.name.clone(), func.clone());
    }

    /// Look a function up by name, innermost frame first.
    pub fn lookup_func(&self, name: &str) -> Option<&Function> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.funcs.get(name))
    }

    /// Names bound in the root frame, sorted. Used by the REPL listings.
    pub fn root_var_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frames[0].vars.keys().cloned().collect();
        names.sort();
        names
    }

    /// Function names registered in the root frame, sorted.
    pub fn root_func_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frames[0].funcs.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Whether every syntactic execution branch of `func`'s body reaches a
/// `return` statement.
///
/// A statement list qualifies if it contains a top-level `return`, or an
/// `if` whose then and else branches both recursively qualify. An `if`
/// without an `else` never qualifies on its own: the false case falls
/// through.
pub fn function_has_valid_return(func: &Function) -> bool {
    branch_has_valid_return(&func.body)
}

fn branch_has_valid_return(stmts: &[Stmt]) -> bool {
    for stmt in stmts {
        match stmt {
            Stmt::Return(_) => return true,
            Stmt::If {
                body, else_body, ..
            } => {
                // An empty else list vacuously fails the check, so an
                // else-less if can never satisfy the branch.
                if branch_has_valid_return(body) && branch_has_valid_return(else_body) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
