//! Scopes hold their declared objects as an ordered, linear list rather than
//! a hash map. Two things depend on that order:
//!
//! - Name lookup is first-match, walking from the innermost scope outward
//!   and, within a scope, from the most recently declared object backward —
//!   the usual shadowing rule.
//! - A subprogram's parameter list is itself the front slice of its body
//!   scope's object list, in declaration order, so argument lists are
//!   checked positionally against it (count and per-position type).

use pslc_util::{define_idx, IndexVec, ParamMode, Symbol};

use crate::types::{ConstantValue, Type};

define_idx!(ScopeId);

#[derive(Debug, Clone)]
pub enum ObjectKind {
    Const(ConstantValue),
    Type(Type),
    Var(Type),
    Param(Type, ParamMode),
    Function {
        params: Vec<(Type, ParamMode)>,
        returns: Type,
    },
    Procedure {
        params: Vec<(Type, ParamMode)>,
    },
}

#[derive(Debug, Clone)]
pub struct Object {
    pub name: Symbol,
    pub kind: ObjectKind,
}

#[derive(Debug, Default)]
pub struct Scope {
    objects: Vec<Object>,
    parent: Option<ScopeId>,
}

impl Scope {
    fn find_local(&self, name: Symbol) -> Option<&Object> {
        self.objects.iter().rev().find(|o| o.name == name)
    }
}

pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        scopes.push(Scope::default());
        Self { scopes }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn push_child(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            objects: Vec::new(),
            parent: Some(parent),
        })
    }

    /// Declares `object` in `scope`. Returns `false` (and leaves the scope
    /// untouched) if an object with the same name is already declared
    /// directly in `scope` — callers turn that into a duplicate-identifier
    /// diagnostic.
    pub fn declare(&mut self, scope: ScopeId, object: Object) -> bool {
        if self.scopes[scope].find_local(object.name).is_some() {
            return false;
        }
        self.scopes[scope].objects.push(object);
        true
    }

    /// First-match lookup: innermost scope first, then its ancestors.
    pub fn lookup(&self, scope: ScopeId, name: Symbol) -> Option<&Object> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(obj) = self.scopes[id].find_local(name) {
                return Some(obj);
            }
            current = self.scopes[id].parent;
        }
        None
    }

    /// The objects declared directly in `scope`, in declaration order — used
    /// to read back a subprogram's parameter list positionally.
    pub fn locals(&self, scope: ScopeId) -> &[Object] {
        &self.scopes[scope].objects
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pslc_util::Interner;

    #[test]
    fn shadowing_prefers_the_innermost_declaration() {
        let mut interner = Interner::new();
        let x = interner.intern("X");
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.declare(
            root,
            Object {
                name: x,
                kind: ObjectKind::Var(Type::Int),
            },
        );
        let child = tree.push_child(root);
        tree.declare(
            child,
            Object {
                name: x,
                kind: ObjectKind::Var(Type::Char),
            },
        );

        let found = tree.lookup(child, x).unwrap();
        assert!(matches!(found.kind, ObjectKind::Var(Type::Char)));
    }

    #[test]
    fn duplicate_declaration_in_same_scope_is_rejected() {
        let mut interner = Interner::new();
        let x = interner.intern("X");
        let mut tree = ScopeTree::new();
        let root = tree.root();
        assert!(tree.declare(
            root,
            Object {
                name: x,
                kind: ObjectKind::Var(Type::Int)
            }
        ));
        assert!(!tree.declare(
            root,
            Object {
                name: x,
                kind: ObjectKind::Var(Type::Int)
            }
        ));
    }

    #[test]
    fn lookup_falls_back_to_parent_scope() {
        let mut interner = Interner::new();
        let y = interner.intern("Y");
        let mut tree = ScopeTree::new();
        let root = tree.root();
        tree.declare(
            root,
            Object {
                name: y,
                kind: ObjectKind::Var(Type::Int),
            },
        );
        let child = tree.push_child(root);
        assert!(tree.lookup(child, y).is_some());
    }
}
