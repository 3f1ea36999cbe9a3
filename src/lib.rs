//! # hdl-hier-base
//!
//! Core library for indexing the module-instantiation hierarchy of an HDL design.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide   → Navigation facade (tree children/parent, reveal, path lookup)
//!   ↓
//! hir   → Symbol model, definition resolution, scope tree, reverse index
//!   ↓
//! base  → Primitives (FileId, Position, Span)
//! ```
//!
//! The parser is an external collaborator: it hands per-file [`hir::SymbolDecl`]
//! trees to a [`hir::SymbolIndex`] (or any other [`hir::ModuleLookup`]), and the
//! [`ide::HierarchyHost`] elaborates instance trees on top of it.

// ============================================================================
// MODULES (dependency order: base → hir → ide)
// ============================================================================

/// Foundation types: FileId, Position, Span
pub mod base;

/// Symbol model and the hierarchy engine
pub mod hir;

/// Navigation features: tree browsing, reveal-by-path, reverse index
pub mod ide;

// Re-export foundation types
pub use base::{FileId, Position, Span};
