use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fun", TokenKind::Fun);
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("continue", TokenKind::Continue);
        map.insert("break", TokenKind::Break);
        map.insert("append", TokenKind::Append);
        map.insert("len", TokenKind::Len);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Keywords
    Fun,
    Var,
    If,
    Else,
    While,
    Return,
    Continue,
    Break,
    Append,
    Len,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: Vec<TokenKind>) -> bool {
        for token in tokens {
            if token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(vec![TokenKind::Identifier, TokenKind::Number]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
