//! Strongly connected components (Tarjan)
//!
//! Used to explain a failed sort: every component with more than one node, or
//! a single node with an edge to itself, is a cycle.

use crate::domain::entities::DependencyGraph;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

const UNVISITED: usize = usize::MAX;

/// All strongly connected components, in the order Tarjan's algorithm closes them.
///
/// Iterative, so deep dependency chains cannot overflow the stack. Roots are
/// tried in insertion order and successors in edge insertion order.
pub fn strongly_connected_components<N: Eq + Hash>(graph: &DependencyGraph<N>) -> Vec<Vec<usize>> {
    let node_count = graph.node_count();

    let mut index = vec![UNVISITED; node_count];
    let mut lowlink = vec![0; node_count];
    let mut on_stack = vec![false; node_count];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0;
    let mut components = Vec::new();

    // (node, position of the next successor to look at)
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(frame) = frames.last_mut() {
            let node = frame.0;

            if let Some(&next) = graph.successor_indices(node).get_index(frame.1) {
                frame.1 += 1;

                if index[next] == UNVISITED {
                    index[next] = next_index;
                    lowlink[next] = next_index;
                    next_index += 1;
                    stack.push(next);
                    on_stack[next] = true;
                    frames.push((next, 0));
                } else if on_stack[next] {
                    lowlink[node] = lowlink[node].min(index[next]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[node]);
            }

            if lowlink[node] == index[node] {
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    components
}

/// Every cycle in the graph as sorted node indices, ordered by lowest member.
pub fn find_cycles<N: Eq + Hash>(graph: &DependencyGraph<N>) -> Vec<Vec<usize>> {
    let mut cycles: Vec<Vec<usize>> = strongly_connected_components(graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => graph.successor_indices(*single).contains(single),
            members => members.len() > 1,
        })
        .map(|mut component| {
            component.sort_unstable();
            component
        })
        .collect();

    cycles.sort_unstable_by_key(|cycle| cycle[0]);
    cycles
}

/// Closed walk through every member of one cycle, following real edges.
///
/// Starts at the lowest member (`members` is sorted) and repeatedly moves along
/// the shortest path to the nearest member not yet on the walk, then back to
/// the start. The closing return to the start is left implicit. A simple cycle
/// comes out as itself; a component made of several loops may repeat members.
pub fn cycle_walk<N: Eq + Hash>(graph: &DependencyGraph<N>, members: &[usize]) -> Vec<usize> {
    let Some(&start) = members.first() else {
        return Vec::new();
    };
    let component: HashSet<usize> = members.iter().copied().collect();

    let mut walk = vec![start];
    let mut on_walk = HashSet::from([start]);
    let mut current = start;

    while on_walk.len() < component.len() {
        let Some(path) = shortest_path(graph, current, &component, |node| !on_walk.contains(&node)) else {
            break;
        };
        on_walk.extend(path.iter().copied());
        if let Some(&last) = path.last() {
            current = last;
        }
        walk.extend(path);
    }

    if let Some(mut back) = shortest_path(graph, current, &component, |node| node == start) {
        back.pop();
        walk.extend(back);
    }

    walk
}

/// Breadth-first search inside `component`, successors in ascending index order.
///
/// Returns the path after `from`, ending at the first node accepted by `target`.
fn shortest_path<N, F>(
    graph: &DependencyGraph<N>,
    from: usize,
    component: &HashSet<usize>,
    target: F,
) -> Option<Vec<usize>>
where
    N: Eq + Hash,
    F: Fn(usize) -> bool,
{
    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    let mut seen = HashSet::from([from]);

    while let Some(node) = queue.pop_front() {
        let mut successors: Vec<usize> = graph
            .successor_indices(node)
            .iter()
            .copied()
            .filter(|next| component.contains(next))
            .collect();
        successors.sort_unstable();

        for next in successors {
            if target(next) {
                let mut path = vec![next];
                let mut step = node;
                while let Some(&previous) = parent.get(&step) {
                    path.push(step);
                    step = previous;
                }
                path.reverse();
                return Some(path);
            }
            if seen.insert(next) {
                parent.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    None
}
