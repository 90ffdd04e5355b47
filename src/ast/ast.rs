use std::{collections::HashMap, ops::Range};

use crate::{errors::errors::Error, interpreter::interpreter::Interpreter};

use super::{
    scope::{ScopeArena, ScopeId, VarId},
    statements::Block,
    value::Var,
};

/// Index of a function in the program's function table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunId(pub usize);

/// One `fun` declaration: its parameter cells and its body block.
///
/// The definition is registered in the program before its body is parsed,
/// which is what lets a function call itself by name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub params: Vec<VarId>,
    pub scope: ScopeId,
    pub body: Block,
    /// The contiguous range of storage cells this function owns: its
    /// parameters plus every variable declared anywhere in its body.
    /// Functions do not nest, so all cells allocated between the start
    /// and the end of one function's parse belong to it. The executor
    /// saves and restores this slice around each call.
    pub cells: Range<usize>,
}

/// The finished parse result: the function table plus the arenas every
/// node indexes into. Owns everything transitively; the only non-owning
/// links in the tree are `VarId`/`FunId`/`ScopeId` indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    functions: Vec<FunctionDefinition>,
    by_name: HashMap<String, FunId>,
    pub scopes: ScopeArena,
    pub vars: Vec<Var>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            functions: vec![],
            by_name: HashMap::new(),
            scopes: ScopeArena::new(),
            vars: vec![],
        }
    }

    /// Registers a function and returns its index. Name uniqueness is the
    /// caller's responsibility (the parser checks before registering).
    pub fn add_function(&mut self, function: FunctionDefinition) -> FunId {
        let id = FunId(self.functions.len());
        self.by_name.insert(function.name.clone(), id);
        self.functions.push(function);
        id
    }

    pub fn find_function(&self, name: &str) -> Option<FunId> {
        self.by_name.get(name).copied()
    }

    pub fn function(&self, id: FunId) -> &FunctionDefinition {
        &self.functions[id.0]
    }

    /// The body is attached after the body block is parsed, since the
    /// definition must already be registered while parsing it. The cell
    /// range closes here too: every cell allocated since the range's
    /// start belongs to this function.
    pub fn set_function_body(&mut self, id: FunId, body: Block) {
        self.functions[id.0].body = body;
        self.functions[id.0].cells.end = self.vars.len();
    }

    pub fn functions(&self) -> &[FunctionDefinition] {
        &self.functions
    }

    /// Allocates one storage cell and returns its index.
    pub fn alloc_var(&mut self, var: Var) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(var);
        id
    }

    pub fn var(&self, id: VarId) -> &Var {
        &self.vars[id.0]
    }

    /// Executes `main` and returns its result.
    pub fn run(&self) -> Result<Var, Error> {
        Interpreter::new(self).run()
    }
}
