use super::{
    expressions::{FunctionCall, OrExpr},
    scope::{ScopeId, VarId},
};

/// An ordered sequence of statements sharing one lexical scope.
///
/// The scope itself lives in the program's `ScopeArena`; the block holds
/// its index. A function body block uses the function's top-level scope
/// (parameters and top-level `var`s share it), nested `{ }` blocks get a
/// fresh child scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub scope: ScopeId,
    pub body: Vec<Stmt>,
}

/// Closed set of statement forms. Every child expression and block is
/// owned by its statement; cross-references (assignment targets, call
/// targets) are arena indices.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var x = expr;` or `var x;` (the latter carries a literal zero).
    Declare { var: VarId, value: OrExpr },
    /// `x = expr;` or `x[index] = expr;`.
    Assign {
        target: VarId,
        index: Option<OrExpr>,
        value: OrExpr,
    },
    /// A function call in statement position; the result is discarded.
    Call(FunctionCall),
    If {
        condition: OrExpr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While { condition: OrExpr, body: Block },
    Return(OrExpr),
    Break,
    Continue,
    /// `append(from, to);` pushes `from`'s value onto `to`.
    Append { from: VarId, to: VarId },
    /// A nested bare `{ }` block.
    Block(Block),
}
