//! Declaration resolution.
//!
//! Codecs look declarations up through the `DeclResolver` trait. A resolver
//! is assumed total over every name reachable from the schema in use; an
//! unresolvable name is a schema defect, not a data error, and panics.

use crate::naming::ScopedName;
use crate::schema::Decl;
use std::collections::HashMap;
use std::rc::Rc;

/// Resolves scoped names to declarations.
pub trait DeclResolver {
    /// Resolve a scoped name to its declaration.
    ///
    /// # Panics
    ///
    /// Panics when the name has no declaration. Resolution failure signals a
    /// codec/schema mismatch and is unrecoverable.
    fn resolve(&self, name: &ScopedName) -> Rc<Decl>;
}

/// A map-backed resolver holding a fixed set of declarations.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    decls: HashMap<ScopedName, Rc<Decl>>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration under the given module name, keyed by the
    /// declaration's own name.
    pub fn insert(&mut self, module_name: &str, decl: Decl) {
        let name = ScopedName::new(module_name, decl.name.clone());
        self.decls.insert(name, Rc::new(decl));
    }
}

impl FromIterator<(ScopedName, Decl)> for MapResolver {
    fn from_iter<I: IntoIterator<Item = (ScopedName, Decl)>>(iter: I) -> Self {
        MapResolver {
            decls: iter
                .into_iter()
                .map(|(name, decl)| (name, Rc::new(decl)))
                .collect(),
        }
    }
}

impl DeclResolver for MapResolver {
    fn resolve(&self, name: &ScopedName) -> Rc<Decl> {
        match self.decls.get(name) {
            Some(decl) => Rc::clone(decl),
            None => panic!("no declaration for {name}"),
        }
    }
}
