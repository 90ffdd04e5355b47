//! Parser state and the token acceptance primitives.
//!
//! The `Parser` owns the token stream, a cursor into it, and the
//! `Program` under construction (function table plus scope and variable
//! arenas). All grammar functions in `stmt.rs` and `expr.rs` receive the
//! current innermost scope as an explicit `ScopeId` parameter; there is no
//! ambient "current scope" state to restore on exit paths.

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::stmt::parse_function;

pub struct Parser {
    /// The list of tokens to parse, terminated by an EOF token
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: i32,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// The program being built up during the parse
    pub program: Program,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            program: Program::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.get(self.pos as usize).unwrap()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens.get(self.pos as usize).unwrap().kind
    }

    /// Advances to the next token and returns the consumed token.
    pub fn advance(&mut self) -> &Token {
        self.pos += 1;
        self.tokens.get((self.pos - 1) as usize).unwrap()
    }

    /// Consumes the current token if it matches, without erroring.
    ///
    /// Together with `expect` this is the sole lookahead mechanism: every
    /// ambiguity in the grammar is resolved by one token of lookahead.
    pub fn accept(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            return true;
        }
        false
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::WrongToken {
                        expected: expected_kind.to_string(),
                        found: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

/// Parses a token stream into a resolved `Program`.
///
/// The only construct legal at the top level is a `fun` declaration; the
/// loop runs until the EOF token. The first error encountered anywhere in
/// the recursion aborts the parse with no partial result.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, file);

    while parser.current_token_kind() != TokenKind::EOF {
        parser.expect(TokenKind::Fun)?;
        parse_function(&mut parser)?;
    }

    Ok(parser.program)
}
