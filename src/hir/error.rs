//! Error types for hierarchy navigation.
//!
//! Unresolved references, recursive instantiation and cancelled passes are
//! represented in the data (`None` definitions, the `recursive` flag,
//! [`IndexStatus::Cancelled`](super::IndexStatus)) and are not errors.

use smol_str::SmolStr;

use super::ids::ScopeId;

/// Errors from resolving a hierarchical path like `top.sub[2].leaf`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No child of `parent` is named `segment`
    #[error("instance `{segment}` not found in `{parent}`")]
    SegmentNotFound {
        /// The path segment that matched nothing
        segment: SmolStr,
        /// Name of the node whose children were searched
        parent: SmolStr,
    },

    /// The path names a node, but not an instance of the requested definition
    #[error("`{path}` is not an instance of `{definition}`")]
    NotAnInstanceOf {
        /// The path as given
        path: SmolStr,
        /// Name of the requested definition
        definition: SmolStr,
    },
}

/// Errors from the navigation API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// A root query was made before any top module was selected
    #[error("no top module selected")]
    NoTopSelected,

    /// The node id does not belong to the current tree (stale after a new top)
    #[error("scope node {0} does not belong to the current hierarchy")]
    UnknownNode(ScopeId),

    #[error(transparent)]
    Path(#[from] PathError),
}
