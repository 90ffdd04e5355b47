use std::fmt::Display;

/// A mutable storage cell created at parse time.
///
/// Every `var` declaration and every function parameter allocates one cell
/// in the `Program`'s arena; the AST refers to cells by `VarId`. Cells are
/// written by assignment and append statements at run time, never during
/// the parse itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Var {
    /// Declared but never assigned. Reads as integer zero.
    #[default]
    Uninitialized,
    Int(i64),
    List(Vec<i64>),
}

impl Var {
    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Var::Uninitialized | Var::Int(_) => "int",
            Var::List(_) => "list",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Var::Uninitialized => false,
            Var::Int(value) => *value != 0,
            Var::List(items) => !items.is_empty(),
        }
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Var::Uninitialized => write!(f, "0"),
            Var::Int(value) => write!(f, "{}", value),
            Var::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
