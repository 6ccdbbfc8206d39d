//! Depth-first graph traversal
//!
//! Traversals work on node indices and can follow edges in either direction.

use crate::domain::entities::DependencyGraph;
use std::hash::Hash;

/// Which way edges are followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// `from -> to`
    Forward,
    /// `to -> from` (the transposed graph)
    Backward,
}

/// Whether any node reachable from `start` (itself included) satisfies `matches`.
///
/// Nodes are offered in depth-first pre-order, neighbours in edge insertion
/// order; the walk stops at the first match.
pub fn reaches_any<N, F>(graph: &DependencyGraph<N>, start: usize, direction: Direction, mut matches: F) -> bool
where
    N: Eq + Hash,
    F: FnMut(usize) -> bool,
{
    if start >= graph.node_count() {
        return false;
    }

    let mut visited = vec![false; graph.node_count()];
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;

        if matches(node) {
            return true;
        }

        let neighbours = match direction {
            Direction::Forward => graph.successor_indices(node),
            Direction::Backward => graph.predecessor_indices(node),
        };
        // Reversed so the first neighbour is popped first
        stack.extend(neighbours.iter().rev().filter(|&&n| !visited[n]));
    }

    false
}
