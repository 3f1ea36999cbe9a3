//! Definition resolution: mapping instance type references to definitions.
//!
//! The workspace lookup service is a seam ([`ModuleLookup`]); it may suspend
//! (re-parse, disk access). [`DefinitionResolver`] sits in front of it and
//! memoizes answers for the duration of one indexing pass, so wide modules
//! instantiating the same type many times cost one lookup.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::symbol::Symbol;

/// Type alias for the per-pass memo: type name -> definition (or known miss)
type DefinitionCache = FxHashMap<SmolStr, Option<Arc<Symbol>>>;

// ============================================================================
// LOOKUP SEAM
// ============================================================================

/// Workspace-wide module definition lookup.
pub trait ModuleLookup {
    /// Find the module or interface definition named `name`.
    ///
    /// Returns `None` when no such definition exists anywhere in the workspace.
    /// With duplicate names, the implementation's own precedence decides.
    fn find_module_symbol(&self, name: &str) -> impl Future<Output = Option<Arc<Symbol>>>;
}

impl<T: ModuleLookup> ModuleLookup for &T {
    fn find_module_symbol(&self, name: &str) -> impl Future<Output = Option<Arc<Symbol>>> {
        (**self).find_module_symbol(name)
    }
}

impl<T: ModuleLookup> ModuleLookup for Arc<T> {
    fn find_module_symbol(&self, name: &str) -> impl Future<Output = Option<Arc<Symbol>>> {
        (**self).find_module_symbol(name)
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves type references to module/interface definitions.
///
/// An unresolved reference is a valid outcome (black box, missing file),
/// represented as `None`, never as an error.
#[derive(Debug)]
pub struct DefinitionResolver<L> {
    lookup: L,
    cache: Mutex<DefinitionCache>,
}

impl<L: ModuleLookup> DefinitionResolver<L> {
    /// Create a new resolver over a lookup service.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Get the underlying lookup service.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve a type reference to its definition.
    pub async fn resolve(&self, type_ref: &str) -> Option<Arc<Symbol>> {
        let cached = self.cache.lock().get(type_ref).cloned();
        if let Some(hit) = cached {
            return hit;
        }

        let found = self
            .lookup
            .find_module_symbol(type_ref)
            .await
            .filter(|symbol| symbol.is_definition());

        match &found {
            Some(def) => tracing::trace!(
                "[RESOLVE] '{}' -> {:?} ({})",
                type_ref,
                def.id,
                def.kind.display()
            ),
            None => tracing::debug!("[RESOLVE] '{}' has no definition in the workspace", type_ref),
        }

        self.cache
            .lock()
            .insert(SmolStr::new(type_ref), found.clone());
        found
    }

    /// Resolve the definition an instance symbol elaborates to.
    ///
    /// Instances without a type reference are unresolved.
    pub async fn resolve_instance(&self, instance: &Symbol) -> Option<Arc<Symbol>> {
        match &instance.type_ref {
            Some(type_ref) => self.resolve(type_ref).await,
            None => None,
        }
    }

    /// Forget all memoized answers (start of a new pass).
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// Number of memoized type names (hits and misses).
    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }
}
