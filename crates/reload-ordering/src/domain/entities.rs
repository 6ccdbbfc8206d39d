//! Core entities for Reload Listener Ordering

use super::errors::{GraphError, OrderingError};
use super::value_objects::{ListenerHandle, ListenerKey, ListenerSide};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Directed dependency graph with stable node order.
///
/// An edge `from -> to` means `from` must be ordered before `to`. Nodes are
/// addressed by their insertion index, which never changes.
#[derive(Debug, Clone)]
pub struct DependencyGraph<N> {
    /// All nodes in first-insertion order
    nodes: IndexSet<N>,
    /// Outgoing edges per node index
    successors: Vec<IndexSet<usize>>,
    /// Incoming edges per node index
    predecessors: Vec<IndexSet<usize>>,
    edge_count: usize,
}

impl<N: Eq + Hash> DependencyGraph<N> {
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
            successors: Vec::new(),
            predecessors: Vec::new(),
            edge_count: 0,
        }
    }

    /// Add a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        let (_, inserted) = self.nodes.insert_full(node);
        if inserted {
            self.successors.push(IndexSet::new());
            self.predecessors.push(IndexSet::new());
        }
        inserted
    }

    /// Add an edge between two existing nodes. Returns `false` if it already existed.
    pub fn add_edge(&mut self, from: &N, to: &N) -> Result<bool, GraphError> {
        let from = self.index_of(from).ok_or(GraphError::MissingNode)?;
        let to = self.index_of(to).ok_or(GraphError::MissingNode)?;
        self.add_edge_at(from, to)
    }

    pub(crate) fn add_edge_at(&mut self, from: usize, to: usize) -> Result<bool, GraphError> {
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return Err(GraphError::MissingNode);
        }

        let inserted = self.successors[from].insert(to);
        if inserted {
            self.predecessors[to].insert(from);
            self.edge_count += 1;
        }
        Ok(inserted)
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.nodes.get_index_of(node)
    }

    pub fn node(&self, index: usize) -> Option<&N> {
        self.nodes.get_index(index)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Check if an edge exists from -> to
    pub fn has_edge(&self, from: &N, to: &N) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.successors[from].contains(&to),
            _ => false,
        }
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    /// Edges ordered by source insertion, then by the order they were added
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.successors.iter().enumerate().flat_map(move |(from, targets)| {
            targets
                .iter()
                .map(move |&to| (&self.nodes[from], &self.nodes[to]))
        })
    }

    pub fn successors(&self, node: &N) -> impl Iterator<Item = &N> + '_ {
        self.index_of(node)
            .into_iter()
            .flat_map(move |idx| self.successors[idx].iter().map(move |&to| &self.nodes[to]))
    }

    pub fn predecessors(&self, node: &N) -> impl Iterator<Item = &N> + '_ {
        self.index_of(node).into_iter().flat_map(move |idx| {
            self.predecessors[idx]
                .iter()
                .map(move |&from| &self.nodes[from])
        })
    }

    pub(crate) fn successor_indices(&self, index: usize) -> &IndexSet<usize> {
        &self.successors[index]
    }

    pub(crate) fn predecessor_indices(&self, index: usize) -> &IndexSet<usize> {
        &self.predecessors[index]
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl<N: Eq + Hash> Default for DependencyGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration-ordered bijection between keys and listener identities.
pub struct ListenerRegistry<L: ?Sized> {
    /// Key -> listener, in registration order
    entries: IndexMap<ListenerKey, ListenerHandle<L>>,
    /// Listener identity -> key
    keys: HashMap<ListenerHandle<L>, ListenerKey>,
}

impl<L: ?Sized> ListenerRegistry<L> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            keys: HashMap::new(),
        }
    }

    /// Fails if `key` or `listener` is already registered.
    pub fn ensure_vacant(&self, key: &ListenerKey, listener: &Arc<L>) -> Result<(), OrderingError> {
        if self.entries.contains_key(key) {
            return Err(OrderingError::DuplicateKey { key: key.clone() });
        }

        if let Some(existing) = self.key_of_listener(listener) {
            return Err(OrderingError::DuplicateListener {
                key: key.clone(),
                existing: existing.clone(),
            });
        }

        Ok(())
    }

    /// Register `listener` under `key`, returning its registration index.
    ///
    /// Nothing is modified when either the key or the listener is taken.
    pub fn insert(&mut self, key: ListenerKey, listener: Arc<L>) -> Result<usize, OrderingError> {
        self.ensure_vacant(&key, &listener)?;

        let handle = ListenerHandle::new(listener);
        self.keys.insert(handle.clone(), key.clone());
        let (index, _) = self.entries.insert_full(key, handle);
        Ok(index)
    }

    pub fn get(&self, key: &ListenerKey) -> Result<&ListenerHandle<L>, OrderingError> {
        self.entries
            .get(key)
            .ok_or_else(|| OrderingError::UnknownKey { key: key.clone() })
    }

    pub fn contains_key(&self, key: &ListenerKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn key_of(&self, handle: &ListenerHandle<L>) -> Option<&ListenerKey> {
        self.keys.get(handle)
    }

    pub fn key_of_listener(&self, listener: &Arc<L>) -> Option<&ListenerKey> {
        self.keys.get(&ListenerHandle::new(Arc::clone(listener)))
    }

    pub fn index_of(&self, key: &ListenerKey) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    pub fn get_index(&self, index: usize) -> Option<(&ListenerKey, &ListenerHandle<L>)> {
        self.entries.get_index(index)
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&ListenerKey, &ListenerHandle<L>)> + '_ {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ListenerKey> + '_ {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: ?Sized> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Final listener order produced by a session. Immutable once built.
pub struct SortedListeners<L: ?Sized> {
    listeners: Vec<ListenerHandle<L>>,
    keys: Vec<ListenerKey>,
}

impl<L: ?Sized> SortedListeners<L> {
    pub(crate) fn new(entries: Vec<(ListenerKey, ListenerHandle<L>)>) -> Self {
        let (keys, listeners) = entries.into_iter().unzip();
        Self { listeners, keys }
    }

    /// Keys in execution order
    pub fn keys(&self) -> &[ListenerKey] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ListenerKey, &ListenerHandle<L>)> + '_ {
        self.keys.iter().zip(self.listeners.iter())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Hand the listeners over to the reload pipeline
    pub fn into_listeners(self) -> Vec<Arc<L>> {
        self.listeners
            .into_iter()
            .map(ListenerHandle::into_inner)
            .collect()
    }
}

impl<L: ?Sized> fmt::Debug for SortedListeners<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedListeners").field("keys", &self.keys).finish()
    }
}

impl<L: ?Sized> std::ops::Deref for SortedListeners<L> {
    type Target = [ListenerHandle<L>];

    fn deref(&self) -> &Self::Target {
        &self.listeners
    }
}

/// Serializable view of a session graph, for diagnostics tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub side: ListenerSide,
    /// Keys in registration order
    pub nodes: Vec<ListenerKey>,
    /// `(first, second)` pairs: `first` runs before `second`
    pub edges: Vec<(ListenerKey, ListenerKey)>,
}

impl GraphSnapshot {
    /// Direct successors of `key`
    pub fn dependents_of(&self, key: &ListenerKey) -> Vec<&ListenerKey> {
        self.edges
            .iter()
            .filter(|(from, _)| from == key)
            .map(|(_, to)| to)
            .collect()
    }
}
