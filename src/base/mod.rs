//! Foundation types for the hierarchy toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`Position`], [`Span`] - Line/column positions for declarations
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod position;

pub use file_id::FileId;
pub use position::{Position, Span};
