//! Identifiers for symbols and scope nodes.

use std::fmt;

use crate::base::FileId;

/// A globally unique identifier for a symbol.
///
/// Combines the file where the symbol was declared with a file-local ID.
/// Symbol identity (e.g. "the same module definition") is `DefId` equality,
/// never name equality: two files may declare modules with the same name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DefId {
    /// The file containing this symbol
    pub file: FileId,
    /// The local ID within the file
    pub local: LocalDefId,
}

impl DefId {
    /// Create a new DefId.
    #[inline]
    pub const fn new(file: FileId, local: LocalDefId) -> Self {
        Self { file, local }
    }
}

impl fmt::Debug for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefId({:?}:{})", self.file, self.local.0)
    }
}

/// A file-local symbol identifier.
///
/// Assigned in pre-order as a file's declarations are loaded, so they are
/// stable across reloads as long as the declaration order doesn't change.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LocalDefId(pub u32);

impl LocalDefId {
    /// Create a new LocalDefId.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LocalDefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDefId({})", self.0)
    }
}

/// Index of a node in a [`crate::hir::ScopeTree`] arena.
///
/// Only meaningful for the tree that produced it; a new top selection
/// starts a new tree and invalidates every previously handed out id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(pub(crate) u32);

impl ScopeId {
    /// The root node of every tree.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Id of the next node pushed onto an arena of `len` nodes.
    ///
    /// `None` once the arena holds 2^32 nodes.
    #[inline]
    pub(crate) fn for_arena_len(len: usize) -> Option<ScopeId> {
        u32::try_from(len).ok().map(ScopeId)
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
