//! Tree-walking executor for a parsed `Program`.
//!
//! Runs `main` directly over the AST. Control-flow statements signal
//! non-local exits through a `Flow` value threaded up the recursion;
//! runtime faults (division by zero, out-of-bounds access, operating on
//! the wrong value type) reuse the front-end's `Error` type.

pub mod interpreter;

#[cfg(test)]
mod tests;
