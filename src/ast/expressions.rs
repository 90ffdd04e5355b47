use super::{ast::FunId, scope::VarId, value::Var};

/// Lowest precedence level: `andExpr { "||" andExpr }`.
///
/// Each level stores its first operand plus the operands consumed by the
/// same-level operator loop, preserving left-to-right evaluation order.
/// Short-circuiting is the executor's concern, not the parser's.
#[derive(Debug, Clone, PartialEq)]
pub struct OrExpr {
    pub first: AndExpr,
    pub rest: Vec<AndExpr>,
}

/// `relExpr { "&&" relExpr }`.
#[derive(Debug, Clone, PartialEq)]
pub struct AndExpr {
    pub first: RelExpr,
    pub rest: Vec<RelExpr>,
}

/// `logicExpr [ relOp logicExpr ]`.
///
/// At most one comparison is consumed per relational expression: the level
/// is non-associative by construction. `a < b < c` leaves the second `<`
/// for the enclosing production, which rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct RelExpr {
    pub left: LogicExpr,
    pub comparison: Option<(RelOp, LogicExpr)>,
}

/// `[ "!" ] addExpr`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicExpr {
    pub negated: bool,
    pub operand: AddExpr,
}

/// `multExpr { ("+" | "-") multExpr }`, left-associative.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpr {
    pub first: MultExpr,
    pub rest: Vec<(AddOp, MultExpr)>,
}

/// `baseExpr { ("*" | "/") baseExpr }`, left-associative.
#[derive(Debug, Clone, PartialEq)]
pub struct MultExpr {
    pub first: BaseExpr,
    pub rest: Vec<(MultOp, BaseExpr)>,
}

/// Highest precedence level. A leading unary minus is accepted here only.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseExpr {
    pub negated: bool,
    pub kind: BaseKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BaseKind {
    /// Integer or vector literal, held as a ready-made value.
    Literal(Var),
    /// Parenthesized sub-expression.
    Grouping(Box<OrExpr>),
    /// `len(x)` over a declared variable.
    Len(VarId),
    /// Function call in expression position.
    Call(FunctionCall),
    /// Bare identifier resolved to its storage cell.
    Variable(VarId),
    /// `x[index]`.
    Index { var: VarId, index: Box<OrExpr> },
    /// `x[from:to]`, a two-bound slice. Distinct from `Index` so later
    /// passes can tell the forms apart without re-inspecting tokens.
    Slice {
        var: VarId,
        from: Box<OrExpr>,
        to: Box<OrExpr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultOp {
    Multiply,
    Divide,
}

/// A call to an already-registered function. `target` is a non-owning
/// index into the program's function table; argument count was checked
/// against the definition at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub target: FunId,
    pub arguments: Vec<OrExpr>,
}

impl OrExpr {
    /// Wraps a base term in the full precedence chain. Used for the
    /// implicit zero initializer of `var x;`.
    pub fn from_base(base: BaseExpr) -> OrExpr {
        OrExpr {
            first: AndExpr {
                first: RelExpr {
                    left: LogicExpr {
                        negated: false,
                        operand: AddExpr {
                            first: MultExpr {
                                first: base,
                                rest: vec![],
                            },
                            rest: vec![],
                        },
                    },
                    comparison: None,
                },
                rest: vec![],
            },
            rest: vec![],
        }
    }

    pub fn literal(value: Var) -> OrExpr {
        OrExpr::from_base(BaseExpr {
            negated: false,
            kind: BaseKind::Literal(value),
        })
    }
}
