//! Error types for the Tern language toolchain.
//!
//! Each phase reports failures through its own enum so callers can match on
//! the exact reason: [`LexError`] for character-level problems,
//! [`ParseError`] for ill-formed syntax, and [`EvalError`] for runtime
//! failures. All of these are local, recoverable conditions: a front end
//! prints the diagnosis for the current input unit and keeps accepting new
//! units.
//!
//! Parse and lex errors carry the offending token or location so a renderer
//! can point at the exact source column.
//!
//! # Examples
//!
//! ```rust
//! use tern_syntax::{EvalError, SourceLocation, LexError};
//!
//! let err = LexError::UnknownChar { ch: '$', loc: SourceLocation::new(0, 3) };
//! assert_eq!(format!("{}", err), "unknown character '$' at 0:3");
//!
//! let err = EvalError::UndefinedVariable("x".to_string());
//! assert_eq!(format!("{}", err), "Undefined variable 'x'");
//! ```

use thiserror::Error;

use crate::token::{SourceLocation, Token};

/// A failure while reading characters off the source stream.
///
/// Lexing does not recover: the first bad character aborts the current
/// input unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that starts no token.
    #[error("unknown character '{ch}' at {loc}")]
    UnknownChar { ch: char, loc: SourceLocation },

    /// A digit run that does not fit in a 64-bit signed integer.
    #[error("integer literal out of range at {loc}")]
    BadInt { loc: SourceLocation },
}

impl LexError {
    pub fn loc(&self) -> SourceLocation {
        match self {
            LexError::UnknownChar { loc, .. } => *loc,
            LexError::BadInt { loc } => *loc,
        }
    }
}

/// A failure while parsing one input unit.
///
/// Parsing is not error-recovering: the first ill-formed construct aborts
/// the whole unit and no partial AST is returned. Every variant names the
/// construct that was required; most carry the token found instead, the
/// assignability case carries only the location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The lexer failed underneath the parser.
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected a binary operator, found {0}")]
    ExpectedBinOperator(Token),

    #[error("expected a token forming a binary operand, found {0}")]
    ExpectedBinOperand(Token),

    #[error("expected an identifier, found {0}")]
    ExpectedIdent(Token),

    #[error("expected an opening '(', found {0}")]
    ExpectedLParen(Token),

    #[error("expected a closing ')', found {0}")]
    ExpectedRParen(Token),

    #[error("expected an opening '{{', found {0}")]
    ExpectedLBrace(Token),

    #[error("expected a closing '}}', found {0}")]
    ExpectedRBrace(Token),

    /// The left side of `=` was not an identifier (or a parenthesized one).
    #[error("expected an assignable expression at {0}")]
    ExpectedAssignableExpr(SourceLocation),

    #[error("expected '=', found {0}")]
    ExpectedAssignment(Token),

    #[error("expected the statement to end with ';', found {0}")]
    ExpectedStmtEnd(Token),
}

impl ParseError {
    /// The source location the failure points at.
    pub fn loc(&self) -> SourceLocation {
        match self {
            ParseError::Lex(e) => e.loc(),
            ParseError::ExpectedBinOperator(tok)
            | ParseError::ExpectedBinOperand(tok)
            | ParseError::ExpectedIdent(tok)
            | ParseError::ExpectedLParen(tok)
            | ParseError::ExpectedRParen(tok)
            | ParseError::ExpectedLBrace(tok)
            | ParseError::ExpectedRBrace(tok)
            | ParseError::ExpectedAssignment(tok)
            | ParseError::ExpectedStmtEnd(tok) => tok.loc,
            ParseError::ExpectedAssignableExpr(loc) => *loc,
        }
    }
}

/// A failure during evaluation.
///
/// Evaluation stops at the first error in the current unit; the evaluator's
/// persistent state keeps whatever the preceding statements established, so
/// the caller may continue with fresh input afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("Undefined function '{0}'")]
    UndefinedFunction(String),

    /// The callee of a call was not a plain function name.
    #[error("Call target is not a function name")]
    CalleeNotCallable,

    #[error("Function '{name}' expected {expected} args, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// A function definition whose body does not reach `return` on every
    /// branch. The function is rejected at definition time.
    #[error("Function '{0}' does not return on every branch")]
    MissingReturn(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("'return' outside of function")]
    ReturnOutsideFunction,
}
