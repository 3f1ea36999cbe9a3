//! Navigation features: the API behind the hierarchy tree view.
//!
//! This module provides the interface between the hierarchy engine (HIR)
//! and the editor: tree children/parent queries, reveal-by-path from
//! external triggers (e.g. a waveform viewer), and jump-to-source targets.
//!
//! ## Design Principles
//!
//! 1. **No UI types**: Nodes are opaque [`ScopeId`](crate::hir::ScopeId)s, labels are computed by the caller
//! 2. **One tree**: Browsing, reverse index and path lookup share one expansion primitive
//!
//! ## Usage
//!
//! ```ignore
//! use hdlhier::ide::HierarchyHost;
//!
//! let mut host = HierarchyHost::new(symbol_index);
//! host.set_top(top);
//! let roots = host.get_children(None).await?;
//! ```

mod host;
mod navigation;

pub use host::HierarchyHost;
pub use navigation::{NavigationTarget, definition_target, instance_target};
