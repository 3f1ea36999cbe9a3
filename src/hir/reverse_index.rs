//! Reverse instance index: definition → every instance of it under the top.
//!
//! Built by one eager pre-order pass over the [`ScopeTree`]. The pass shares
//! [`ScopeTree::expand`] with lazy browsing, so both views always agree on
//! filtering and ordering.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use super::ids::{DefId, ScopeId};
use super::options::IndexOptions;
use super::path::strip_array_indices;
use super::resolve::{DefinitionResolver, ModuleLookup};
use super::scope::{ScopeKind, ScopeTree};

// ============================================================================
// PROGRESS
// ============================================================================

/// Receives incremental progress from an indexing pass.
///
/// `increment` is in percent; the increments of one pass sum to exactly 100.
pub trait ProgressSink {
    fn report(&mut self, increment: f64, message: &str);
}

impl<F: FnMut(f64, &str)> ProgressSink for F {
    fn report(&mut self, increment: f64, message: &str) {
        self(increment, message)
    }
}

/// A sink that drops all progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _increment: f64, _message: &str) {}
}

/// Asymptotic progress estimate for a traversal of unknown size.
///
/// Stays below 100 until [`finish`](Self::finish); works in whole percent so
/// the reported increments add up exactly.
#[derive(Clone, Debug)]
struct ProgressEstimate {
    scale: u64,
    visited: u64,
    reported: u32,
}

impl ProgressEstimate {
    fn new(scale: u32) -> Self {
        Self {
            scale: u64::from(scale),
            visited: 0,
            reported: 0,
        }
    }

    /// Count one visited node and return the increment to report.
    fn advance(&mut self) -> u32 {
        self.visited += 1;
        let estimate = (99 * self.visited / (self.visited + self.scale)) as u32;
        let increment = estimate.saturating_sub(self.reported);
        self.reported += increment;
        increment
    }

    /// Return the increment that brings the total to exactly 100.
    fn finish(&mut self) -> u32 {
        let increment = 100 - self.reported;
        self.reported = 100;
        increment
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// State of the reverse index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IndexStatus {
    /// Nothing built since creation or the last clear
    #[default]
    Empty,
    /// A pass started and has not finished (its future was dropped)
    InProgress,
    /// The last pass visited the whole tree
    Complete,
    /// The last pass was cancelled; contents are partial
    Cancelled,
}

/// Mapping from a definition to every instance of it under the top.
#[derive(Clone, Debug, Default)]
pub struct ReverseIndex {
    /// Definition → hierarchical path → node, paths in visit order.
    entries: FxHashMap<DefId, IndexMap<Arc<str>, ScopeId>>,
    status: IndexStatus,
    top: Option<DefId>,
    top_name: Option<SmolStr>,
    visited: usize,
    truncated: usize,
}

impl ReverseIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.status = IndexStatus::Empty;
        self.top = None;
        self.top_name = None;
        self.visited = 0;
        self.truncated = 0;
    }

    /// Rebuild the index from the root of `tree`.
    ///
    /// Visits the tree in pre-order, children in declaration order, and
    /// records every resolved module instance. A node whose definition is
    /// already on its root path is recorded but not descended into.
    /// `cancel` is checked before every visit; a cancelled pass keeps what it
    /// recorded and reports [`IndexStatus::Cancelled`]. Progress reaches 100
    /// exactly once, at the end, in both cases.
    pub async fn build<L, P>(
        &mut self,
        tree: &mut ScopeTree,
        resolver: &DefinitionResolver<L>,
        progress: &mut P,
        cancel: &CancellationToken,
        options: &IndexOptions,
    ) -> IndexStatus
    where
        L: ModuleLookup,
        P: ProgressSink + ?Sized,
    {
        self.clear();
        self.status = IndexStatus::InProgress;
        self.top = Some(tree.top().id);
        self.top_name = Some(tree.top().name.clone());

        let mut estimate = ProgressEstimate::new(options.progress_scale);
        // (node, depth); children pushed in reverse so they pop in order.
        let mut stack = vec![(tree.root(), 0usize)];
        // Definitions of the expanded ancestors of the node being visited.
        let mut path: Vec<DefId> = Vec::new();
        let mut cancelled = false;

        while let Some((id, depth)) = stack.pop() {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let Some(node) = tree.node(id) else {
                continue;
            };
            path.truncate(depth);
            self.visited += 1;

            let definition = node.definition().map(|d| d.id);
            let is_module = matches!(node.kind(), ScopeKind::Module { .. });
            let hier_path: Arc<str> = tree.hierarchical_path(id).unwrap_or_default().into();

            if let (true, Some(def)) = (is_module, definition) {
                self.entries
                    .entry(def)
                    .or_default()
                    .insert(Arc::clone(&hier_path), id);
            }

            match definition {
                Some(def) if path.contains(&def) => {
                    self.truncated += 1;
                    tracing::warn!(
                        "[REVERSE_INDEX] Recursive instantiation at '{}', not descending",
                        hier_path
                    );
                }
                Some(def) => {
                    path.push(def);
                    let children = tree.expand(id, resolver).await;
                    stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
                }
                None => {}
            }

            progress.report(
                f64::from(estimate.advance()),
                &format!("Indexing {}", hier_path),
            );
            tokio::task::yield_now().await;
        }

        self.status = if cancelled {
            IndexStatus::Cancelled
        } else {
            IndexStatus::Complete
        };
        let message = if cancelled {
            "Indexing cancelled"
        } else {
            "Indexing complete"
        };
        progress.report(f64::from(estimate.finish()), message);

        tracing::info!(
            "[REVERSE_INDEX] {} '{}': {} nodes visited, {} definitions, {} instances, {} recursive",
            message,
            tree.top().name,
            self.visited,
            self.entries.len(),
            self.instance_count(),
            self.truncated
        );

        self.status
    }

    pub fn status(&self) -> IndexStatus {
        self.status
    }

    /// Check if the index is authoritative (last pass ran to completion).
    pub fn is_complete(&self) -> bool {
        self.status == IndexStatus::Complete
    }

    /// The top module the index was built for.
    pub fn top(&self) -> Option<DefId> {
        self.top
    }

    /// Find the instance of `definition` at `path`.
    ///
    /// `path` is matched like [`resolve_path`](super::resolve_path) matches it:
    /// `[<digits>]` indices are ignored and the leading top name is optional,
    /// so `top.blk[0].u2` and `blk.u2` both find `top.blk.u2`.
    pub fn reveal(&self, definition: DefId, path: &str) -> Option<ScopeId> {
        let paths = self.entries.get(&definition)?;
        let path = strip_array_indices(path);
        if let Some(top) = self.top_name.as_ref().filter(|_| !path.is_empty()) {
            let relative = format!("{}.{}", top, path);
            if let Some(&id) = paths.get(relative.as_str()) {
                return Some(id);
            }
        }
        paths.get(&*path).copied()
    }

    /// All instances of `definition`, in visit order.
    pub fn instances_of(&self, definition: DefId) -> impl Iterator<Item = (&str, ScopeId)> {
        self.entries
            .get(&definition)
            .into_iter()
            .flat_map(|paths| paths.iter().map(|(path, &id)| (path.as_ref(), id)))
    }

    /// Definitions with at least one recorded instance.
    pub fn definitions(&self) -> impl Iterator<Item = DefId> + '_ {
        self.entries.keys().copied()
    }

    pub fn definition_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of recorded instances.
    pub fn instance_count(&self) -> usize {
        self.entries.values().map(|paths| paths.len()).sum()
    }

    /// Nodes visited by the last pass.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Nodes the last pass did not descend into because of recursion.
    pub fn truncated(&self) -> usize {
        self.truncated
    }
}
