//! Algorithms module for Reload Listener Ordering
//!
//! Contains:
//! - Depth-first traversal
//! - Anchor normalization
//! - Kahn's topological sort
//! - Tarjan's strongly connected components

pub mod anchor;
pub mod kahns;
pub mod tarjan;
pub mod traversal;

pub use anchor::link_dangling_nodes;
pub use kahns::kahns_topological_sort;
pub use tarjan::{cycle_walk, find_cycles, strongly_connected_components};
pub use traversal::Direction;
