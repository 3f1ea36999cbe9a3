//! Hierarchical path resolution: `top.sub[2].leaf` to a scope node.
//!
//! Array indices denote elaboration-time replication, which the hierarchy
//! does not model, so they are stripped before matching. Segments match
//! instance names exactly (case-sensitive), first match wins.

use std::borrow::Cow;

use super::error::PathError;
use super::ids::ScopeId;
use super::resolve::{DefinitionResolver, ModuleLookup};
use super::scope::ScopeTree;

/// Remove every `[<digits>]` suffix from a path.
///
/// Other bracketed text (`[i]`, `[]`, `[3:0]`) is kept as written.
pub fn strip_array_indices(path: &str) -> Cow<'_, str> {
    let bytes = path.as_bytes();
    let mut out = String::new();
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'[' {
            let digits = bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            let close = i + 1 + digits;
            if digits > 0 && bytes.get(close) == Some(&b']') {
                out.push_str(&path[copied..i]);
                i = close + 1;
                copied = i;
                continue;
            }
        }
        i += 1;
    }

    if copied == 0 {
        Cow::Borrowed(path)
    } else {
        out.push_str(&path[copied..]);
        Cow::Owned(out)
    }
}

/// Split a dotted path into segments; the empty path has none.
pub fn split_segments(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').collect()
    }
}

/// Walk `tree` from its root along `path`, expanding on demand.
///
/// The empty path is the root. A leading segment naming the top module itself
/// is accepted when the root has no child of that name, so absolute paths from
/// waveform viewers (`top.u1`) and relative ones (`u1`) both work.
pub async fn resolve_path<L: ModuleLookup>(
    tree: &mut ScopeTree,
    resolver: &DefinitionResolver<L>,
    path: &str,
) -> Result<ScopeId, PathError> {
    let stripped = strip_array_indices(path);
    let segments = split_segments(&stripped);
    let mut current = tree.root();

    let mut rest = segments.as_slice();
    if let Some((&first, tail)) = segments.split_first() {
        if tree.top().name == first && tree.find_child(current, first, resolver).await.is_none() {
            rest = tail;
        }
    }

    for &segment in rest {
        match tree.find_child(current, segment, resolver).await {
            Some(child) => current = child,
            None => return Err(segment_not_found(tree, path, current, segment)),
        }
    }

    Ok(current)
}

/// Walk `path` through the nodes `tree` has already materialized.
///
/// Same matching as [`resolve_path`], but never expands: a node that was not
/// expanded yet has no children here. Fails on the first segment missing
/// under the longest materialized prefix.
pub fn locate_materialized(tree: &ScopeTree, path: &str) -> Result<ScopeId, PathError> {
    let stripped = strip_array_indices(path);
    let segments = split_segments(&stripped);
    let mut current = tree.root();

    let mut rest = segments.as_slice();
    if let Some((&first, tail)) = segments.split_first() {
        if tree.top().name == first && materialized_child(tree, current, first).is_none() {
            rest = tail;
        }
    }

    for &segment in rest {
        match materialized_child(tree, current, segment) {
            Some(child) => current = child,
            None => return Err(segment_not_found(tree, path, current, segment)),
        }
    }

    Ok(current)
}

fn materialized_child(tree: &ScopeTree, id: ScopeId, name: &str) -> Option<ScopeId> {
    tree.children(id)?
        .iter()
        .copied()
        .find(|&child| tree.node(child).is_some_and(|n| n.name() == name))
}

fn segment_not_found(tree: &ScopeTree, path: &str, current: ScopeId, segment: &str) -> PathError {
    let parent = tree
        .node(current)
        .map(|n| n.name().clone())
        .unwrap_or_default();
    tracing::debug!(
        "[PATH] '{}': no instance '{}' in '{}'",
        path,
        segment,
        parent
    );
    PathError::SegmentNotFound {
        segment: segment.into(),
        parent,
    }
}
