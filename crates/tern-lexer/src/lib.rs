//! Tern lexer: converts source text into a stream of tokens.
//!
//! The lexer hands out one token at a time. [`Lexer::lex`] consumes the next
//! token and advances; [`Lexer::peek`] returns the same token without
//! consuming it, holding it in a one-token buffer that the next `lex` call
//! drains. The parser never needs more lookahead than that.

use tern_syntax::error::LexError;
use tern_syntax::token::{SourceLocation, Token, TokenKind};

/// Streaming character scanner that produces tokens with positions.
///
/// Positions index from zero; a newline increments the line and resets the
/// column. Once the input is exhausted, every further `lex` yields
/// [`TokenKind::Eof`].
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    loc: SourceLocation,
    lookahead: Option<Token>,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            loc: SourceLocation::default(),
            lookahead: None,
        }
    }

    /// The location the scanner has advanced to. When a token is buffered
    /// by [`Lexer::peek`], this is the position just past that token.
    pub fn current_loc(&self) -> SourceLocation {
        self.loc
    }

    fn peek_char(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.loc.line += 1;
                self.loc.col = 0;
            } else {
                self.loc.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consume a single-character token. The caller guarantees the current
    /// character is not a newline.
    fn single(&mut self, kind: TokenKind) -> Token {
        let loc = self.loc;
        self.advance();
        Token { kind, loc }
    }

    fn lex_int(&mut self) -> Result<Token, LexError> {
        let loc = self.loc;
        let mut s = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let val: i64 = s.parse().map_err(|_| LexError::BadInt { loc })?;
        Ok(Token {
            kind: TokenKind::Int(val),
            loc,
        })
    }

    /// An identifier starts with a letter or underscore, followed by any mix
    /// of letters, digits, and underscores. Keyword text is matched exactly.
    fn lex_ident_or_keyword(&mut self) -> Token {
        let loc = self.loc;
        let mut s = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = match s.as_str() {
            "def" => TokenKind::Def,
            "return" => TokenKind::Return,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            _ => TokenKind::Ident(s),
        };
        Token { kind, loc }
    }

    /// Consume and return the next token.
    ///
    /// A buffered token from an earlier [`Lexer::peek`] is returned first.
    /// An unrecognized character is an error carrying the character and its
    /// location; the character is not consumed, and the caller is expected
    /// to abandon the current input unit rather than retry.
    pub fn lex(&mut self) -> Result<Token, LexError> {
        if let Some(tok) = self.lookahead.take() {
            return Ok(tok);
        }

        self.skip_whitespace();
        let loc = self.loc;
        match self.peek_char() {
            None => Ok(Token {
                kind: TokenKind::Eof,
                loc,
            }),
            Some('(') => Ok(self.single(TokenKind::LParen)),
            Some(')') => Ok(self.single(TokenKind::RParen)),
            Some('{') => Ok(self.single(TokenKind::LBrace)),
            Some('}') => Ok(self.single(TokenKind::RBrace)),
            Some(',') => Ok(self.single(TokenKind::Comma)),
            Some(';') => Ok(self.single(TokenKind::Semi)),
            Some('=') => Ok(self.single(TokenKind::Assign)),
            Some('+') => Ok(self.single(TokenKind::Plus)),
            Some('-') => Ok(self.single(TokenKind::Minus)),
            Some('*') => Ok(self.single(TokenKind::Star)),
            Some('/') => Ok(self.single(TokenKind::Slash)),
            Some(c) if c.is_ascii_digit() => self.lex_int(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => Ok(self.lex_ident_or_keyword()),
            Some(c) => Err(LexError::UnknownChar { ch: c, loc }),
        }
    }

    /// Return the next token without consuming it.
    ///
    /// The token is read once and buffered; the following [`Lexer::lex`]
    /// call returns exactly this token. Errors are not buffered, so a
    /// failing `peek` fails again identically on retry.
    pub fn peek(&mut self) -> Result<Token, LexError> {
        if let Some(tok) = &self.lookahead {
            return Ok(tok.clone());
        }
        let tok = self.lex()?;
        self.lookahead = Some(tok.clone());
        Ok(tok)
    }
}
