/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program container and function definitions
/// - expressions: one node type per precedence level
/// - statements: statement variants and blocks
/// - scope: arena of lexical scopes
/// - value: the Var storage cell
pub mod ast;
pub mod expressions;
pub mod scope;
pub mod statements;
pub mod value;
