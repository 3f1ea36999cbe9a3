//! Hierarchical path resolution tests.

use hdlhier::hir::{
    DefinitionResolver, IndexOptions, NoProgress, PathError, ReverseIndex, ScopeTree, SymbolDecl,
    SymbolIndex, locate_materialized, resolve_path,
};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

use crate::helpers::design_fixtures::*;

/// Resolve `path` under `top` on a fresh tree, returning the node's dotted path.
async fn resolve(index: &SymbolIndex, top: &str, path: &str) -> Result<String, PathError> {
    let resolver = DefinitionResolver::new(index);
    let mut tree = ScopeTree::new(module(index, top));
    let id = resolve_path(&mut tree, &resolver, path).await?;
    Ok(tree.hierarchical_path(id).unwrap())
}

fn not_found(segment: &str, parent: &str) -> PathError {
    PathError::SegmentNotFound {
        segment: segment.into(),
        parent: parent.into(),
    }
}

#[rstest]
#[case("", "Top")]
#[case("u1", "Top.u1")]
#[case("blk", "Top.blk")]
#[case("blk.u2", "Top.blk.u2")]
#[case("blk.u2.q", "Top.blk.u2.q")]
#[case("blk[3].u2", "Top.blk.u2")]
#[case("blk[0].u2[12]", "Top.blk.u2")]
#[case("Top", "Top")]
#[case("Top.u1.d", "Top.u1.d")]
#[case("Top[1].blk.u2", "Top.blk.u2")]
#[tokio::test]
async fn test_resolves_path(#[case] path: &str, #[case] expected: &str) {
    let index = two_leaf_design();
    assert_eq!(resolve(&index, "Top", path).await.unwrap(), expected);
}

#[rstest]
#[case("nope.x", "nope", "Top")]
#[case("blk.nope", "nope", "blk")]
#[case("u1.d.x", "x", "d")]
#[case("U1", "U1", "Top")]
#[case("top.u1", "top", "Top")]
#[case("u1..d", "", "u1")]
#[tokio::test]
async fn test_reports_first_missing_segment(
    #[case] path: &str,
    #[case] segment: &str,
    #[case] parent: &str,
) {
    let index = two_leaf_design();
    assert_eq!(
        resolve(&index, "Top", path).await,
        Err(not_found(segment, parent))
    );
}

#[tokio::test]
async fn test_unresolved_instance_has_no_children() {
    let index = black_box_design();
    assert_eq!(resolve(&index, "Top", "bb").await.unwrap(), "Top.bb");
    assert_eq!(
        resolve(&index, "Top", "bb.x").await,
        Err(not_found("x", "bb"))
    );
}

#[tokio::test]
async fn test_duplicate_sibling_names_first_wins() {
    let index = duplicate_names_design();
    let resolver = DefinitionResolver::new(&index);
    let mut tree = ScopeTree::new(module(&index, "Top"));

    let id = resolve_path(&mut tree, &resolver, "dup").await.unwrap();
    let definition = tree.node(id).unwrap().definition().unwrap();
    assert_eq!(definition.name, "First");
}

#[tokio::test]
async fn test_child_named_like_top_wins_over_top_prefix() {
    let mut index = SymbolIndex::new();
    index.add_file(
        "rtl/core.sv",
        vec![
            SymbolDecl::module("core").with_child(SymbolDecl::instance("core", "alu")),
            SymbolDecl::module("alu").with_child(port("y")),
        ],
    );
    assert_eq!(resolve(&index, "core", "core").await.unwrap(), "core.core");
    assert_eq!(resolve(&index, "core", "core.y").await.unwrap(), "core.core.y");
}

#[tokio::test]
async fn test_recursive_design_paths_resolve_lazily() {
    let index = self_instantiating_design();
    let path = "self_u.self_u.self_u.p";
    assert_eq!(
        resolve(&index, "M", path).await.unwrap(),
        "M.self_u.self_u.self_u.p"
    );
}

#[rstest]
#[case("Top.u1")]
#[case("u1")]
#[case("u1[2]")]
#[case("Top[0].u1")]
#[case("Top.blk.u2")]
#[case("blk.u2")]
#[case("Top.blk[0].u2")]
#[case("blk[7].u2[1]")]
#[tokio::test]
async fn test_agrees_with_reverse_index(#[case] path: &str) {
    let index = two_leaf_design();
    let leaf = module(&index, "Leaf");
    let resolver = DefinitionResolver::new(&index);
    let mut tree = ScopeTree::new(module(&index, "Top"));
    let mut reverse = ReverseIndex::new();
    reverse
        .build(
            &mut tree,
            &resolver,
            &mut NoProgress,
            &CancellationToken::new(),
            &IndexOptions::default(),
        )
        .await;

    let lazy = resolve_path(&mut tree, &resolver, path).await.unwrap();
    assert_eq!(reverse.reveal(leaf.id, path), Some(lazy));
    assert_eq!(locate_materialized(&tree, path), Ok(lazy));
}

#[rstest]
#[case("Top.blk.u9", "u9", "blk")]
#[case("blk[2].u9", "u9", "blk")]
#[case("nope.u2", "nope", "Top")]
#[case("Top.u1.d.x", "x", "d")]
#[tokio::test]
async fn test_materialized_walk_reports_missing_segment(
    #[case] path: &str,
    #[case] segment: &str,
    #[case] parent: &str,
) {
    let index = two_leaf_design();
    let resolver = DefinitionResolver::new(&index);
    let mut tree = ScopeTree::new(module(&index, "Top"));
    let mut reverse = ReverseIndex::new();
    reverse
        .build(
            &mut tree,
            &resolver,
            &mut NoProgress,
            &CancellationToken::new(),
            &IndexOptions::default(),
        )
        .await;

    assert_eq!(locate_materialized(&tree, path), Err(not_found(segment, parent)));
}

#[test]
fn test_materialized_walk_never_expands() {
    let index = two_leaf_design();
    let tree = ScopeTree::new(module(&index, "Top"));

    assert_eq!(locate_materialized(&tree, ""), Ok(tree.root()));
    assert_eq!(locate_materialized(&tree, "Top"), Ok(tree.root()));
    assert_eq!(locate_materialized(&tree, "u1"), Err(not_found("u1", "Top")));
    assert_eq!(tree.len(), 1);
}

#[tokio::test]
async fn test_resolution_reuses_expanded_nodes() {
    let index = two_leaf_design();
    let resolver = DefinitionResolver::new(&index);
    let mut tree = ScopeTree::new(module(&index, "Top"));

    let first = resolve_path(&mut tree, &resolver, "blk.u2").await.unwrap();
    let size = tree.len();
    let second = resolve_path(&mut tree, &resolver, "Top.blk[2].u2").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(tree.len(), size);
}
