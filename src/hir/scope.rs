//! Scope tree: the elaborated instance hierarchy under a top module.
//!
//! Nodes live in an arena and refer to their parent by [`ScopeId`], so the
//! parent link never owns anything. The tree grows one level at a time via
//! [`ScopeTree::expand`], the single primitive shared by lazy browsing, the
//! reverse index and path resolution.
//!
//! ```text
//! Top (Root, definition = Top)
//! ├── u1 (Module, definition = resolve("leaf"))
//! ├── blk (InternalBlock, definition = blk)
//! │   └── u2 (Module, definition = resolve("leaf"))
//! └── clk (Leaf)
//! ```

use std::sync::Arc;

use smol_str::SmolStr;

use super::ids::{DefId, ScopeId};
use super::resolve::{DefinitionResolver, ModuleLookup};
use super::symbol::{Symbol, SymbolKind};

// ============================================================================
// NODES
// ============================================================================

/// What a scope node stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The selected top module itself
    Root,
    /// An instance of a module or interface
    Module {
        /// The type name as written at the instantiation
        type_name: Option<SmolStr>,
        /// The definition already appears on the ancestor chain
        /// (self or mutual instantiation); the UI may mark it.
        recursive: bool,
    },
    /// A named scope inside a module (its own definition)
    InternalBlock,
    /// Port, register, parameter and the like; never has children
    Leaf,
}

/// A node of the elaborated hierarchy.
#[derive(Clone, Debug)]
pub struct ScopeNode {
    instance: Arc<Symbol>,
    definition: Option<Arc<Symbol>>,
    parent: Option<ScopeId>,
    kind: ScopeKind,
}

impl ScopeNode {
    /// The symbol this node represents (instance, block or the top itself).
    pub fn instance(&self) -> &Arc<Symbol> {
        &self.instance
    }

    /// The definition this node elaborates to, if resolved.
    pub fn definition(&self) -> Option<&Arc<Symbol>> {
        self.definition.as_ref()
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    pub fn name(&self) -> &SmolStr {
        &self.instance.name
    }

    /// Check if this is an instance whose definition could not be found.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.kind, ScopeKind::Module { .. }) && self.definition.is_none()
    }

    /// Check if this instance re-enters a definition from its ancestor chain.
    pub fn is_recursive(&self) -> bool {
        matches!(self.kind, ScopeKind::Module { recursive: true, .. })
    }

    /// Check if expanding this node can yield children.
    pub fn has_scope(&self) -> bool {
        self.definition.is_some()
    }
}

// ============================================================================
// TREE
// ============================================================================

/// Arena of scope nodes rooted at one top module.
///
/// Expansions are cached: expanding a node twice returns the same ids.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    nodes: Vec<ScopeNode>,
    /// Expansion result per node, `None` until first expanded.
    children: Vec<Option<Vec<ScopeId>>>,
}

impl ScopeTree {
    /// Create a tree with only the root node for `top`.
    pub fn new(top: Arc<Symbol>) -> Self {
        let root = ScopeNode {
            definition: Some(Arc::clone(&top)),
            instance: top,
            parent: None,
            kind: ScopeKind::Root,
        };
        Self {
            nodes: vec![root],
            children: vec![None],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// The top module symbol.
    pub fn top(&self) -> &Arc<Symbol> {
        &self.nodes[ScopeId::ROOT.index()].instance
    }

    pub fn node(&self, id: ScopeId) -> Option<&ScopeNode> {
        self.nodes.get(id.index())
    }

    pub fn contains(&self, id: ScopeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.node(id)?.parent
    }

    /// Children from a previous expansion, without expanding.
    pub fn children(&self, id: ScopeId) -> Option<&[ScopeId]> {
        self.children.get(id.index())?.as_deref()
    }

    pub fn is_expanded(&self, id: ScopeId) -> bool {
        self.children(id).is_some()
    }

    /// Number of materialized nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate from `id`'s parent up to the root.
    pub fn ancestors(&self, id: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Dotted instance path from the root, e.g. `top.blk.u2`.
    pub fn hierarchical_path(&self, id: ScopeId) -> Option<String> {
        let node = self.node(id)?;
        let mut names = vec![node.name().as_str()];
        names.extend(self.ancestors(id).filter_map(|a| self.node(a)).map(|n| n.name().as_str()));
        names.reverse();
        Some(names.join("."))
    }

    /// Check if `def` is the definition of `id` or of one of its ancestors.
    fn on_definition_chain(&self, id: ScopeId, def: DefId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.node(n)?.definition.as_ref())
            .any(|d| d.id == def)
    }

    /// Produce the children of `id`, one level deep, in declaration order.
    ///
    /// Instance definitions are resolved through `resolver`; unresolved
    /// instances still get a node. Nodes without a definition, and ids that
    /// do not belong to this tree, have no children.
    pub async fn expand<L: ModuleLookup>(
        &mut self,
        id: ScopeId,
        resolver: &DefinitionResolver<L>,
    ) -> Vec<ScopeId> {
        let Some(node) = self.node(id) else {
            tracing::debug!("[SCOPE] Ignoring expand of foreign node {:?}", id);
            return Vec::new();
        };
        if let Some(cached) = &self.children[id.index()] {
            return cached.clone();
        }
        let Some(definition) = node.definition.clone() else {
            self.children[id.index()] = Some(Vec::new());
            return Vec::new();
        };

        let mut created = Vec::with_capacity(definition.children.len());
        for child in definition.children.iter().filter(|c| !c.kind.is_excluded()) {
            let (kind, child_def) = match child.kind {
                SymbolKind::Block => (ScopeKind::InternalBlock, Some(Arc::clone(child))),
                SymbolKind::Instance => {
                    let resolved = resolver.resolve_instance(child).await;
                    let recursive = resolved
                        .as_ref()
                        .is_some_and(|d| self.on_definition_chain(id, d.id));
                    let kind = ScopeKind::Module {
                        type_name: child.type_ref.clone(),
                        recursive,
                    };
                    (kind, resolved)
                }
                _ => (ScopeKind::Leaf, None),
            };

            let Some(child_id) = ScopeId::for_arena_len(self.nodes.len()) else {
                tracing::warn!(
                    "[SCOPE] Node limit reached expanding '{}', remaining children dropped",
                    definition.name
                );
                break;
            };
            self.nodes.push(ScopeNode {
                instance: Arc::clone(child),
                definition: child_def,
                parent: Some(id),
                kind,
            });
            self.children.push(None);
            created.push(child_id);
        }

        tracing::trace!(
            "[SCOPE] Expanded '{}' into {} nodes",
            definition.name,
            created.len()
        );

        self.children[id.index()] = Some(created.clone());
        created
    }

    /// Expand `id` and return its first child named `name`.
    pub async fn find_child<L: ModuleLookup>(
        &mut self,
        id: ScopeId,
        name: &str,
        resolver: &DefinitionResolver<L>,
    ) -> Option<ScopeId> {
        self.expand(id, resolver)
            .await
            .into_iter()
            .find(|&child| self.node(child).is_some_and(|n| n.name() == name))
    }
}
