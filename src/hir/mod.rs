//! High-level IR (HIR): symbol model and the hierarchy engine.
//!
//! ## Key Types
//!
//! - [`Symbol`]: An immutable declaration from the parser's symbol table
//! - [`SymbolIndex`]: Workspace-wide symbol index, one table per file
//! - [`DefinitionResolver`]: Instance type reference → module definition
//! - [`ScopeTree`]: Lazily elaborated instance hierarchy under a top module
//! - [`ReverseIndex`]: Definition → every instance of it under the top
//!
//! ## Layers
//!
//! ```text
//! SymbolDecl (parser output)
//!     │  add_file
//!     ▼
//! SymbolIndex               ← ModuleLookup (workspace lookup seam)
//!     │
//!     ▼
//! DefinitionResolver        ← memoized per pass
//!     │
//!     ▼
//! ScopeTree::expand         ← one level, on demand
//!     │
//!     ├──▶ ReverseIndex::build   (eager, pre-order, cancellable)
//!     └──▶ resolve_path          (lazy, one path at a time)
//! ```

mod error;
mod ids;
mod index;
mod options;
mod path;
mod resolve;
mod reverse_index;
mod scope;
mod symbol;

pub use error::{HierarchyError, PathError};
pub use ids::{DefId, LocalDefId, ScopeId};
pub use index::SymbolIndex;
pub use options::IndexOptions;
pub use path::{locate_materialized, resolve_path, split_segments, strip_array_indices};
pub use resolve::{DefinitionResolver, ModuleLookup};
pub use reverse_index::{IndexStatus, NoProgress, ProgressSink, ReverseIndex};
pub use scope::{ScopeKind, ScopeNode, ScopeTree};
pub use symbol::{SourceLocation, Symbol, SymbolDecl, SymbolKind};
