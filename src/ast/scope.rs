use std::collections::HashMap;

/// Index of a lexical scope in the `ScopeArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(pub usize);

/// Index of a `Var` storage cell in the `Program`'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// One lexical scope: a symbol table plus the index of the enclosing scope.
///
/// A function's top-level scope has no parent; the scope of every nested
/// `{ }` block points at the scope it appears in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    vars: HashMap<String, VarId>,
}

/// Arena of all scopes created during a parse.
///
/// Scopes reference their parent by index, never by pointer, so the arena
/// can live inside the owning `Program` without self-references.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        ScopeArena { scopes: vec![] }
    }

    pub fn alloc(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            parent,
            vars: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Whether `name` is declared directly in `scope`, ignoring parents.
    /// This is the redeclaration check: declaring writes only the innermost
    /// scope, so an outer `name` may still be shadowed.
    pub fn declared_here(&self, scope: ScopeId, name: &str) -> bool {
        self.scopes[scope.0].vars.contains_key(name)
    }

    pub fn declare(&mut self, scope: ScopeId, name: &str, var: VarId) {
        self.scopes[scope.0].vars.insert(String::from(name), var);
    }

    /// Resolves `name` by walking from `scope` outward through parent
    /// links. The first match wins.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<VarId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(var) = scope.vars.get(name) {
                return Some(*var);
            }
            current = scope.parent;
        }

        None
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0].parent
    }
}
