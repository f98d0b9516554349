//! AST (abstract syntax tree) types for the Tern language.
//!
//! Every node exclusively owns its children, so the tree is strictly
//! acyclic and `Clone` produces a fully independent deep copy. Consumers
//! dispatch over the enums with exhaustive `match`es; adding a variant
//! breaks every dispatcher until it is handled.

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Expressions (literals, arithmetic, names, calls).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Ident(String),
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// An explicitly parenthesized expression. Kept as its own node so
    /// assignability propagates through the parentheses.
    Paren(Box<Expr>),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Whether this expression is a valid left-hand side of `=`.
    ///
    /// Only identifiers are assignable, and parentheses are transparent:
    /// `(x)` is as assignable as `x`.
    pub fn is_assignable(&self) -> bool {
        match self {
            Expr::Ident(_) => true,
            Expr::Paren(inner) => inner.is_assignable(),
            _ => false,
        }
    }

    /// Resolve the identifier an assignable expression names, unwrapping
    /// parentheses. `None` for non-assignable expressions.
    pub fn assign_target(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            Expr::Paren(inner) => inner.assign_target(),
            _ => None,
        }
    }
}

/// Statements (assignments, control flow, definitions).
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for effect only.
    Expr(Expr),
    /// `target = value;` where `target` satisfies [`Expr::is_assignable`].
    Assign { target: Expr, value: Expr },
    If {
        cond: Expr,
        body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    FunctionDef(Function),
    Return(Expr),
}

/// A named function definition. Parameters are plain identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

/// A parsed compilation unit: zero or more top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub stmts: Vec<Stmt>,
}
