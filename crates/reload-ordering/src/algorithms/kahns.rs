//! Kahn's Topological Sort Algorithm
//!
//! O((V + E) log V), ties broken by node insertion order.

use crate::domain::entities::DependencyGraph;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Perform Kahn's topological sort on the dependency graph.
///
/// Among nodes whose predecessors have all been emitted, the one with the
/// lowest insertion index goes first. Returns node indices, or `None` if the
/// graph contains a cycle.
pub fn kahns_topological_sort<N: Eq + Hash>(graph: &DependencyGraph<N>) -> Option<Vec<usize>> {
    let node_count = graph.node_count();

    // 1. In-degree per node
    let mut in_degree: Vec<usize> = (0..node_count)
        .map(|node| graph.predecessor_indices(node).len())
        .collect();

    // 2. Min-heap of zero in-degree nodes
    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(node, _)| Reverse(node))
        .collect();

    // 3. Emit lowest ready index, release its successors
    let mut order = Vec::with_capacity(node_count);
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);

        for &next in graph.successor_indices(node) {
            let degree = &mut in_degree[next];
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    // 4. Cycle detection: if not all nodes emitted, there's a cycle
    if order.len() < node_count {
        return None;
    }

    Some(order)
}
