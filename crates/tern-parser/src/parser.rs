//! Recursive-descent parser producing Tern AST nodes.

use tern_lexer::Lexer;
use tern_syntax::ast::{BinOp, Expr, Function, Module, Stmt};
use tern_syntax::error::ParseError;
use tern_syntax::token::{Token, TokenKind};

/// Parses one input unit by pulling tokens from the lexer on demand.
///
/// Parsing is all-or-nothing: the first ill-formed construct aborts the
/// current entry point with a [`ParseError`] describing the reason and the
/// offending token. No recovery is attempted and no partial tree is
/// returned.
pub struct Parser {
    lexer: Lexer,
}

/// Grammar:
///
/// ```text
/// module      := stmt*
/// stmt        := 'def' ID '(' id_list? ')' '{' stmt* '}'
///              | 'return' expr ';'
///              | 'if' expr '{' stmt* '}' ('else' '{' stmt* '}')?
///              | expr ('=' expr)? ';'
/// expr        := mul_div_expr (('+'|'-') mul_div_expr)*
/// mul_div_expr:= operand (('*'|'/') operand)*
/// operand     := INT | callable_or_call | '(' expr ')'
/// callable_or_call := (ID | '(' expr ')') ('(' arg_list? ')')?
/// id_list     := ID (',' ID)*
/// arg_list    := expr (',' expr)*
/// ```
impl Parser {
    /// Create a parser over the given source text.
    pub fn new(input: &str) -> Self {
        Self {
            lexer: Lexer::new(input),
        }
    }

    fn peek(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.peek()?)
    }

    fn bump(&mut self) -> Result<Token, ParseError> {
        Ok(self.lexer.lex()?)
    }

    /// Consume the next token, requiring `kind`. `err` wraps the offending
    /// token on mismatch.
    fn expect(
        &mut self,
        kind: TokenKind,
        err: fn(Token) -> ParseError,
    ) -> Result<Token, ParseError> {
        let tok = self.peek()?;
        if tok.kind != kind {
            return Err(err(tok));
        }
        self.bump()
    }

    /// module := stmt*
    ///
    /// Empty input is a valid module with zero statements.
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        let mut stmts = Vec::new();
        while self.peek()?.kind != TokenKind::Eof {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Module { stmts })
    }

    /// stmt := function | return | if | expr ('=' expr)? ';'
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::Def => return Ok(Stmt::FunctionDef(self.parse_function()?)),
            TokenKind::Return => return self.parse_return(),
            TokenKind::If => return self.parse_if(),
            _ => {}
        }

        let lhs = self.parse_expr()?;

        // '=' continues into an assignment, ';' ends an expression statement.
        let tok = self.bump()?;
        if tok.kind == TokenKind::Assign {
            if !lhs.is_assignable() {
                return Err(ParseError::ExpectedAssignableExpr(self.lexer.current_loc()));
            }
            let rhs = self.parse_expr()?;
            self.expect(TokenKind::Semi, ParseError::ExpectedStmtEnd)?;
            Ok(Stmt::Assign {
                target: lhs,
                value: rhs,
            })
        } else if tok.kind == TokenKind::Semi {
            Ok(Stmt::Expr(lhs))
        } else {
            Err(ParseError::ExpectedStmtEnd(tok))
        }
    }

    /// if := 'if' expr '{' stmt* '}' ('else' '{' stmt* '}')?
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.bump()?; // 'if', checked by the caller

        let cond = self.parse_expr()?;
        let body = self.parse_block()?;

        let else_body = if self.peek()?.kind == TokenKind::Else {
            self.bump()?;
            self.parse_block()?
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            cond,
            body,
            else_body,
        })
    }

    /// function := 'def' ID '(' id_list? ')' '{' stmt* '}'
    fn parse_function(&mut self) -> Result<Function, ParseError> {
        self.bump()?; // 'def', checked by the caller

        let name = self.parse_ident()?;
        self.expect(TokenKind::LParen, ParseError::ExpectedLParen)?;
        let params = self.parse_param_list()?;
        self.expect(TokenKind::RParen, ParseError::ExpectedRParen)?;
        let body = self.parse_block()?;

        Ok(Function { name, params, body })
    }

    /// return := 'return' expr ';'
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.bump()?; // 'return', checked by the caller

        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi, ParseError::ExpectedStmtEnd)?;
        Ok(Stmt::Return(expr))
    }

    /// '{' stmt* '}'
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace, ParseError::ExpectedLBrace)?;
        let mut stmts = Vec::new();
        loop {
            let tok = self.peek()?;
            match tok.kind {
                TokenKind::RBrace => {
                    self.bump()?;
                    return Ok(stmts);
                }
                TokenKind::Eof => return Err(ParseError::ExpectedRBrace(tok)),
                _ => stmts.push(self.parse_stmt()?),
            }
        }
    }

    /// id_list? := (ID (',' ID)*)?
    fn parse_param_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut params = Vec::new();
        if !matches!(self.peek()?.kind, TokenKind::Ident(_)) {
            return Ok(params);
        }
        params.push(self.parse_ident()?);
        while self.peek()?.kind == TokenKind::Comma {
            self.bump()?;
            params.push(self.parse_ident()?);
        }
        Ok(params)
    }

    /// expr := mul_div_expr (('+'|'-') mul_div_expr)*
    ///
    /// Left-associative fold; the two-tier grammar gives `*`/`/` the
    /// tighter binding.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut result = self.parse_mul_div_expr()?;
        loop {
            let op = match self.peek()?.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => return Ok(result),
            };
            self.bump()?;
            let rhs = self.parse_mul_div_expr()?;
            result = Expr::BinOp {
                op,
                lhs: Box::new(result),
                rhs: Box::new(rhs),
            };
        }
    }

    /// mul_div_expr := operand (('*'|'/') operand)*
    fn parse_mul_div_expr(&mut self) -> Result<Expr, ParseError> {
        let mut result = self.parse_operand()?;
        loop {
            let op = match self.peek()?.kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => return Ok(result),
            };
            self.bump()?;
            let rhs = self.parse_operand()?;
            result = Expr::BinOp {
                op,
                lhs: Box::new(result),
                rhs: Box::new(rhs),
            };
        }
    }

    /// operand := INT | callable_or_call
    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::Int(_) => self.parse_int_literal(),
            TokenKind::Ident(_) | TokenKind::LParen => self.parse_callable_or_call(),
            _ => Err(ParseError::ExpectedBinOperand(tok)),
        }
    }

    /// callable_or_call := (ID | '(' expr ')') ('(' arg_list? ')')?
    fn parse_callable_or_call(&mut self) -> Result<Expr, ParseError> {
        let callable = self.parse_callable()?;

        if self.peek()?.kind != TokenKind::LParen {
            return Ok(callable);
        }
        self.bump()?;

        let mut args = Vec::new();
        if self.peek()?.kind == TokenKind::RParen {
            self.bump()?;
            return Ok(Expr::Call {
                callee: Box::new(callable),
                args,
            });
        }

        args.push(self.parse_expr()?);
        while self.peek()?.kind == TokenKind::Comma {
            self.bump()?;
            args.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RParen, ParseError::ExpectedRParen)?;

        Ok(Expr::Call {
            callee: Box::new(callable),
            args,
        })
    }

    /// callable := ID | '(' expr ')'
    fn parse_callable(&mut self) -> Result<Expr, ParseError> {
        let tok = self.peek()?;
        match tok.kind {
            TokenKind::Ident(_) => Ok(Expr::Ident(self.parse_ident()?)),
            TokenKind::LParen => self.parse_paren_expr(),
            _ => Err(ParseError::ExpectedBinOperand(tok)),
        }
    }

    /// paren_expr := '(' expr ')'
    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.bump()?; // '(', checked by the caller

        let inner = self.parse_expr()?;
        self.expect(TokenKind::RParen, ParseError::ExpectedRParen)?;
        Ok(Expr::Paren(Box::new(inner)))
    }

    fn parse_int_literal(&mut self) -> Result<Expr, ParseError> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::Int(value) => Ok(Expr::Int(value)),
            _ => Err(ParseError::ExpectedBinOperand(tok)),
        }
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        let tok = self.bump()?;
        match tok.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(ParseError::ExpectedIdent(tok)),
        }
    }
}
