//! Parser module for building the resolved AST.
//!
//! Transforms a stream of tokens into a `Program` in a single fail-fast
//! pass. The pass does three jobs at once:
//!
//! - Grammar recognition: recursive descent, one function per production
//! - Operator precedence: a fixed chain of levels, lowest first, each
//!   level loop-consuming its own operators left-associatively
//! - Scope resolution: declarations write the innermost scope, lookups
//!   walk the parent chain outward, calls resolve against the function
//!   table with arity checked at parse time
//!
//! One token of lookahead, no backtracking, no error recovery: the first
//! violation aborts the whole parse.

pub mod expr;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
