use compact_str::CompactString;
use index_vec::IndexVec;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::value::Value;

index_vec::define_index_type! {
    /// Index of a [`Scope`] in an [`Env`].
    pub struct ScopeId = u32;
}

/// A named value.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: Value,
    /// Declared with `const`.
    pub immutable: bool,
}

/// A lexical scope.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub bindings: IndexMap<CompactString, Binding, FxBuildHasher>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            parent,
            bindings: IndexMap::with_hasher(FxBuildHasher),
        }
    }
}

/// The scope arena of one interpreter.
///
/// Scopes are entered and left in LIFO order, so leaving a scope always
/// frees the last slot of the arena. The global scope is never left.
#[derive(Debug, Clone)]
pub struct Env {
    scopes: IndexVec<ScopeId, Scope>,
    current: ScopeId,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let global = scopes.push(Scope::new(None));
        Env {
            scopes,
            current: global,
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId::new(0)
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Number of live scopes, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Enters a new scope with the given parent. Returns the scope to restore
    /// with [`Env::leave`].
    pub fn enter(&mut self, parent: ScopeId) -> ScopeId {
        let previous = self.current;
        self.current = self.scopes.push(Scope::new(Some(parent)));
        previous
    }

    /// Leaves the current scope and drops its bindings.
    pub fn leave(&mut self, previous: ScopeId) {
        if self.current != self.global() {
            self.scopes.pop();
        }
        self.current = previous;
    }

    /// Declares a binding in the current scope, shadowing any previous one.
    pub fn declare(&mut self, name: CompactString, value: Value, immutable: bool) {
        self.scopes[self.current]
            .bindings
            .insert(name, Binding { value, immutable });
    }

    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if self.scopes[id].bindings.contains_key(name) {
                return Some(id);
            }
            scope = self.scopes[id].parent;
        }
        None
    }

    /// Looks up the nearest binding of `name`.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        let id = self.resolve(name)?;
        self.scopes[id].bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        let id = self.resolve(name)?;
        self.scopes[id].bindings.get_mut(name)
    }

    /// The bindings of the global scope in declaration order.
    pub fn globals(&self) -> impl Iterator<Item = (&CompactString, &Binding)> {
        self.scopes[self.global()].bindings.iter()
    }
}
