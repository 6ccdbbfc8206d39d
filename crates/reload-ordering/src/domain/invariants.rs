//! Domain invariants for Reload Listener Ordering
//!
//! Checked after every sort (see `SortConfig::verify_order`) and in tests.

use super::entities::{DependencyGraph, ListenerRegistry};
use crate::algorithms::anchor::is_dangling;
use std::hash::Hash;

/// INVARIANT-1: Topological Order
/// If `A -> B` exists, A appears before B.
pub fn invariant_topological_order<N: Eq + Hash>(order: &[usize], graph: &DependencyGraph<N>) -> bool {
    let mut position = vec![usize::MAX; graph.node_count()];
    for (pos, &node) in order.iter().enumerate() {
        let Some(slot) = position.get_mut(node) else {
            return false;
        };
        *slot = pos;
    }

    (0..graph.node_count()).all(|from| {
        graph
            .successor_indices(from)
            .iter()
            .all(|&to| position[from] < position[to])
    })
}

/// INVARIANT-2: Anchored
/// No non-baseline node is dangling.
pub fn invariant_anchored<N, B>(graph: &DependencyGraph<N>, is_baseline: B) -> bool
where
    N: Eq + Hash,
    B: Fn(usize) -> bool,
{
    (0..graph.node_count()).all(|node| !is_dangling(graph, node, &is_baseline))
}

/// INVARIANT-3: Completeness
/// Every node is emitted exactly once.
pub fn invariant_completeness<N: Eq + Hash>(order: &[usize], graph: &DependencyGraph<N>) -> bool {
    if order.len() != graph.node_count() {
        return false;
    }

    let mut seen = vec![false; graph.node_count()];
    order.iter().all(|&node| match seen.get_mut(node) {
        Some(slot) if !*slot => {
            *slot = true;
            true
        }
        _ => false,
    })
}

/// INVARIANT-4: Registry Bijection
/// `key -> listener` and `listener -> key` agree.
pub fn invariant_registry_bijection<L: ?Sized>(registry: &ListenerRegistry<L>) -> bool {
    registry
        .iter()
        .all(|(key, handle)| registry.key_of(handle) == Some(key))
}
