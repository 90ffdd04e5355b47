//! Lexical analysis for veclang source.
//!
//! Converts source text into a stream of tokens for the parser. Handles:
//!
//! - Tokenization via an ordered regex pattern table
//! - Keywords, identifiers, integer literals, and operators
//! - Byte-offset position tracking for error reporting
//! - Line comments and whitespace

pub mod lexer;
pub mod tokens;
