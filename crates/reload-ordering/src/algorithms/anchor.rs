//! Anchor normalization
//!
//! Links every dangling listener to the end of the baseline chain so that
//! listeners without a declared relationship run after the built-in ones.

use super::traversal::{reaches_any, Direction};
use crate::domain::entities::DependencyGraph;
use std::hash::Hash;

/// A node is dangling when it is not baseline and has no directed path, in
/// either direction and of any length, to any baseline node.
pub fn is_dangling<N, B>(graph: &DependencyGraph<N>, node: usize, is_baseline: &B) -> bool
where
    N: Eq + Hash,
    B: Fn(usize) -> bool,
{
    if is_baseline(node) {
        return false;
    }

    !reaches_any(graph, node, Direction::Forward, is_baseline)
        && !reaches_any(graph, node, Direction::Backward, is_baseline)
}

/// Add `anchor -> node` for every dangling node, visiting nodes in insertion order.
///
/// Edges added for earlier nodes are visible when checking later ones.
/// Returns the indices that received an anchor edge.
pub fn link_dangling_nodes<N, B>(graph: &mut DependencyGraph<N>, anchor: usize, is_baseline: B) -> Vec<usize>
where
    N: Eq + Hash,
    B: Fn(usize) -> bool,
{
    let mut linked = Vec::new();

    for node in 0..graph.node_count() {
        if !is_dangling(graph, node, &is_baseline) {
            continue;
        }
        // Both indices come from this graph
        if let Ok(true) = graph.add_edge_at(anchor, node) {
            linked.push(node);
        }
    }

    linked
}
