//! HierarchyHost: unified state for the hierarchy view.
//!
//! The `HierarchyHost` owns the lookup service, the scope tree for the
//! selected top and the reverse index built over that same tree, so a node
//! revealed from the index is the node the tree view shows.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = HierarchyHost::new(index);
//! host.set_top(top.clone());
//!
//! let roots = host.get_children(None).await?;
//! let children = host.get_children(Some(roots[0])).await?;
//!
//! host.build_reverse_index(top, &mut NoProgress, &CancellationToken::new()).await;
//! let node = host.reveal_by_definition_and_path(&leaf, "top.u1")?;
//! ```
//!
//! Every mutating call takes `&mut self`: a pass in flight holds the host
//! exclusively, so readers can't observe a half-built index and two passes
//! can't race. Cancel a pass through its token or by dropping its future.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::hir::{
    DefinitionResolver, HierarchyError, IndexOptions, IndexStatus, ModuleLookup, PathError,
    ProgressSink, ReverseIndex, ScopeId, ScopeKind, ScopeNode, ScopeTree, Symbol,
    locate_materialized, resolve_path,
};

/// Owns all state behind the hierarchy tree view.
pub struct HierarchyHost<L> {
    resolver: DefinitionResolver<L>,
    /// Tree for the selected top, `None` until one is selected
    tree: Option<ScopeTree>,
    index: ReverseIndex,
    options: IndexOptions,
}

impl<L: ModuleLookup> HierarchyHost<L> {
    /// Create a host with default options.
    pub fn new(lookup: L) -> Self {
        Self::with_options(lookup, IndexOptions::default())
    }

    pub fn with_options(lookup: L, options: IndexOptions) -> Self {
        Self {
            resolver: DefinitionResolver::new(lookup),
            tree: None,
            index: ReverseIndex::new(),
            options,
        }
    }

    /// Get the workspace lookup service.
    pub fn lookup(&self) -> &L {
        self.resolver.lookup()
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Select a new top module.
    ///
    /// Starts a fresh tree (all previous node ids become stale), forgets
    /// memoized definitions and empties the reverse index.
    pub fn set_top(&mut self, top: Arc<Symbol>) {
        tracing::debug!("[HOST] Top set to '{}' ({:?})", top.name, top.id);
        self.resolver.clear();
        self.index.clear();
        self.tree = Some(ScopeTree::new(top));
    }

    /// The selected top module.
    pub fn top(&self) -> Option<&Arc<Symbol>> {
        self.tree.as_ref().map(|t| t.top())
    }

    pub fn tree(&self) -> Option<&ScopeTree> {
        self.tree.as_ref()
    }

    pub fn node(&self, id: ScopeId) -> Option<&ScopeNode> {
        self.tree.as_ref()?.node(id)
    }

    /// Dotted instance path of a node, e.g. `top.blk.u2`.
    pub fn hierarchical_path(&self, id: ScopeId) -> Option<String> {
        self.tree.as_ref()?.hierarchical_path(id)
    }

    /// Children for the tree view.
    ///
    /// `None` asks for the roots, which is the top node alone.
    pub async fn get_children(
        &mut self,
        node: Option<ScopeId>,
    ) -> Result<Vec<ScopeId>, HierarchyError> {
        let tree = self.tree.as_mut().ok_or(HierarchyError::NoTopSelected)?;
        match node {
            None => Ok(vec![tree.root()]),
            Some(id) if tree.contains(id) => Ok(tree.expand(id, &self.resolver).await),
            Some(id) => Err(HierarchyError::UnknownNode(id)),
        }
    }

    /// Parent for the tree view; `None` for the root and unknown nodes.
    pub fn get_parent(&self, node: ScopeId) -> Option<ScopeId> {
        self.tree.as_ref()?.parent(node)
    }

    /// Select `top` and eagerly index every instance under it.
    pub async fn build_reverse_index<P>(
        &mut self,
        top: Arc<Symbol>,
        progress: &mut P,
        cancel: &CancellationToken,
    ) -> IndexStatus
    where
        P: ProgressSink + ?Sized,
    {
        self.set_top(top);
        let Self {
            resolver,
            tree,
            index,
            options,
        } = self;
        match tree {
            Some(tree) => index.build(tree, resolver, progress, cancel, options).await,
            None => IndexStatus::Empty,
        }
    }

    pub fn reverse_index(&self) -> &ReverseIndex {
        &self.index
    }

    /// Find the instance of `definition` at `path`, e.g. `top.blk[0].u2`.
    ///
    /// Answered from the reverse index when it has the path. Otherwise the
    /// nodes materialized so far are walked, which finds lazily browsed
    /// instances and names the first segment that is missing.
    pub fn reveal_by_definition_and_path(
        &self,
        definition: &Symbol,
        path: &str,
    ) -> Result<ScopeId, HierarchyError> {
        let tree = self.tree.as_ref().ok_or(HierarchyError::NoTopSelected)?;
        if let Some(id) = self.index.reveal(definition.id, path) {
            return Ok(id);
        }

        let id = locate_materialized(tree, path)?;
        let is_instance = tree.node(id).is_some_and(|node| {
            matches!(node.kind(), ScopeKind::Module { .. })
                && node.definition().is_some_and(|d| d.id == definition.id)
        });
        if is_instance {
            Ok(id)
        } else {
            tracing::debug!(
                "[HOST] '{}' is not an instance of '{}'",
                path,
                definition.name
            );
            Err(PathError::NotAnInstanceOf {
                path: path.into(),
                definition: definition.name.clone(),
            }
            .into())
        }
    }

    /// Every indexed instance of `definition` with its path.
    pub fn instances_of(&self, definition: &Symbol) -> Vec<(&str, ScopeId)> {
        self.index.instances_of(definition.id).collect()
    }

    /// Resolve a hierarchical path under `top` without a prior index pass.
    ///
    /// Switches the host to `top` first if another top is selected.
    pub async fn resolve_path(
        &mut self,
        top: &Arc<Symbol>,
        path: &str,
    ) -> Result<ScopeId, HierarchyError> {
        if self.top().map(|t| t.id) != Some(top.id) {
            self.set_top(Arc::clone(top));
        }
        let tree = self.tree.as_mut().ok_or(HierarchyError::NoTopSelected)?;
        Ok(resolve_path(tree, &self.resolver, path).await?)
    }
}
