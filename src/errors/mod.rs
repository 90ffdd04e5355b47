//! Error types for the front-end and the executor.
//!
//! All violations are fatal: the first error aborts the whole pipeline
//! stage that produced it. This module defines:
//!
//! - An `Error` structure pairing an error kind with a source position
//! - Error variants for lexing, grammar, scope, call, and runtime failures
//! - Helpful error messages and suggestions

pub mod errors;
