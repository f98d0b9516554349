//! Tree-walking evaluation of Tern AST nodes.

use tern_sema::{function_has_valid_return, ScopeStack};
use tern_syntax::ast::{BinOp, Expr, Function, Module, Stmt};
use tern_syntax::error::EvalError;

/// Evaluates expressions and statements against a persistent scope stack.
///
/// One evaluator instance is one evaluation context: modules can be fed to
/// it incrementally and later units see the variables and functions earlier
/// units established. Every operation reports failure through its `Result`;
/// callers stop feeding the current unit at the first error and may continue
/// with fresh input afterwards.
pub struct Evaluator {
    scopes: ScopeStack,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
        }
    }

    /// Drop all variables and functions, returning to a pristine context.
    pub fn reset(&mut self) {
        self.scopes = ScopeStack::new();
    }

    /// Names of top-level variables, sorted. Used by the REPL listings.
    pub fn var_names(&self) -> Vec<String> {
        self.scopes.root_var_names()
    }

    /// Names of top-level functions, sorted.
    pub fn func_names(&self) -> Vec<String> {
        self.scopes.root_func_names()
    }

    /// Evaluate every statement of `module` in order, stopping at the first
    /// failure. Returns the value of the last top-level expression
    /// statement, if any, for display by interactive front ends.
    pub fn eval_module(&mut self, module: &Module) -> Result<Option<i64>, EvalError> {
        let mut last = None;
        for stmt in &module.stmts {
            match stmt {
                Stmt::Expr(expr) => last = Some(self.eval_numeric(expr)?),
                other => self.eval_stmt(other)?,
            }
        }
        Ok(last)
    }

    /// Evaluate a single expression to its integer value.
    pub fn eval_numeric(&mut self, expr: &Expr) -> Result<i64, EvalError> {
        match expr {
            Expr::Int(value) => Ok(*value),
            Expr::Paren(inner) => self.eval_numeric(inner),
            Expr::BinOp { op, lhs, rhs } => {
                let lhs_val = self.eval_numeric(lhs)?;
                let rhs_val = self.eval_numeric(rhs)?;
                match op {
                    BinOp::Add => Ok(lhs_val + rhs_val),
                    BinOp::Sub => Ok(lhs_val - rhs_val),
                    BinOp::Mul => Ok(lhs_val * rhs_val),
                    BinOp::Div => {
                        if rhs_val == 0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        Ok(lhs_val / rhs_val)
                    }
                }
            }
            Expr::Ident(name) => {
                let stored = self
                    .scopes
                    .lookup_var(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UndefinedVariable(name.clone()))?;
                self.eval_numeric(&stored)
            }
            Expr::Call { callee, args } => self.eval_call(callee, args),
        }
    }

    /// Evaluate a single statement for its effect.
    ///
    /// This is the entry point for statements outside any function body, so
    /// a `return` reaching it (directly or out of a nested `if`) reports
    /// [`EvalError::ReturnOutsideFunction`].
    pub fn eval_stmt(&mut self, stmt: &Stmt) -> Result<(), EvalError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_numeric(expr)?;
                Ok(())
            }
            Stmt::Assign { target, value } => {
                let result = self.eval_numeric(value)?;
                match target.assign_target() {
                    Some(name) => {
                        self.scopes.set_var(name, &Expr::Int(result));
                        Ok(())
                    }
                    // The parser only builds Assign with an assignable target.
                    None => unreachable!("assignment target was validated by the parser"),
                }
            }
            Stmt::FunctionDef(func) => {
                if !function_has_valid_return(func) {
                    return Err(EvalError::MissingReturn(func.name.clone()));
                }
                self.scopes.set_func(func);
                Ok(())
            }
            Stmt::If {
                cond,
                body,
                else_body,
            } => match self.eval_if(cond, body, else_body)? {
                None => Ok(()),
                Some(_) => Err(EvalError::ReturnOutsideFunction),
            },
            Stmt::Return(_) => Err(EvalError::ReturnOutsideFunction),
        }
    }

    fn eval_call(&mut self, callee: &Expr, args: &[Expr]) -> Result<i64, EvalError> {
        // Calls go through plain function names only.
        let name = match callee {
            Expr::Ident(name) => name.clone(),
            _ => return Err(EvalError::CalleeNotCallable),
        };
        let func = self
            .scopes
            .lookup_func(&name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedFunction(name.clone()))?;

        if func.params.len() != args.len() {
            return Err(EvalError::ArityMismatch {
                name,
                expected: func.params.len(),
                got: args.len(),
            });
        }

        // Arguments are evaluated in the caller's scope, before any
        // parameter is bound (call by value).
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.eval_numeric(arg)?);
        }

        self.scopes.enter_scope();
        let result = self.eval_func_body(&func, &arg_values);
        self.scopes.exit_scope();
        result
    }

    /// Bind parameters and walk the body until its `return`. Runs inside
    /// the frame the caller pushed; the caller pops it on every exit path.
    fn eval_func_body(&mut self, func: &Function, arg_values: &[i64]) -> Result<i64, EvalError> {
        for (param, value) in func.params.iter().zip(arg_values) {
            self.scopes.set_var(param, &Expr::Int(*value));
        }
        match self.walk_stmts(&func.body)? {
            Some(value) => Ok(value),
            // Unregistered functions can reach this through a direct
            // ScopeStack; registration always validates the return paths.
            None => Err(EvalError::MissingReturn(func.name.clone())),
        }
    }

    /// Execute statements in order, watching for a `return`.
    ///
    /// `Some(value)` means a `return` was reached and the remaining
    /// statements were skipped; the value propagates out of every nested
    /// block up to the function-body walk that collects it.
    fn walk_stmts(&mut self, stmts: &[Stmt]) -> Result<Option<i64>, EvalError> {
        for stmt in stmts {
            match stmt {
                Stmt::Return(expr) => return Ok(Some(self.eval_numeric(expr)?)),
                Stmt::If {
                    cond,
                    body,
                    else_body,
                } => {
                    if let Some(value) = self.eval_if(cond, body, else_body)? {
                        return Ok(Some(value));
                    }
                }
                other => self.eval_stmt(other)?,
            }
        }
        Ok(None)
    }

    /// Evaluate the condition and execute the selected branch in a fresh
    /// scope. A non-zero condition is truthy.
    fn eval_if(
        &mut self,
        cond: &Expr,
        body: &[Stmt],
        else_body: &[Stmt],
    ) -> Result<Option<i64>, EvalError> {
        let cond_value = self.eval_numeric(cond)?;
        let branch = if cond_value != 0 { body } else { else_body };

        self.scopes.enter_scope();
        let result = self.walk_stmts(branch);
        self.scopes.exit_scope();
        result
    }
}
