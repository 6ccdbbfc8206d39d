//! Reload Listener Session
//!
//! Main service implementing ReloadListenerRegistrar and the final sort.

use crate::algorithms::{cycle_walk, find_cycles, kahns_topological_sort, link_dangling_nodes};
use crate::config::SortConfig;
use crate::domain::entities::{DependencyGraph, GraphSnapshot, ListenerRegistry, SortedListeners};
use crate::domain::errors::{CycleReport, GraphError, OrderingError};
use crate::domain::invariants::{
    invariant_anchored, invariant_completeness, invariant_registry_bijection, invariant_topological_order,
};
use crate::domain::value_objects::{ListenerHandle, ListenerKey, ListenerSide};
use crate::ports::inbound::ReloadListenerRegistrar;
use crate::ports::outbound::NameLookup;
use std::sync::Arc;

use tracing::{debug, info, warn};

/// One listener ordering session.
///
/// Orchestrates the ordering pipeline:
/// 1. Register and chain the baseline listeners
/// 2. Accept listeners and dependencies
/// 3. Link dangling listeners to the anchor
/// 4. Execute Kahn's algorithm
/// 5. Report every cycle if the sort fails
///
/// A session is sorted at most once; afterwards only the read accessors work.
pub struct ReloadListenerSession<L: ?Sized> {
    side: ListenerSide,
    config: SortConfig,
    registry: ListenerRegistry<L>,
    /// Node index == registration index
    graph: DependencyGraph<ListenerHandle<L>>,
    baseline_len: usize,
    anchor: ListenerKey,
    finished: bool,
}

impl<L: ?Sized> ReloadListenerSession<L> {
    /// Create a session from the engine's built-in listeners, in their default order.
    ///
    /// Every baseline listener must resolve through `lookup`; consecutive
    /// baseline listeners are chained and the last one becomes the anchor.
    pub fn new<I, N>(side: ListenerSide, baseline: I, lookup: &N, config: SortConfig) -> Result<Self, OrderingError>
    where
        I: IntoIterator<Item = Arc<L>>,
        N: NameLookup<L> + ?Sized,
    {
        let baseline: Vec<Arc<L>> = baseline.into_iter().collect();

        // Resolve every name before touching any state
        let keys = baseline
            .iter()
            .enumerate()
            .map(|(index, listener)| {
                lookup
                    .lookup_name(&**listener)
                    .ok_or(OrderingError::MissingName { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let Some(anchor) = keys.last().cloned() else {
            return Err(OrderingError::EmptyBaseline);
        };

        let mut session = Self {
            side,
            config,
            registry: ListenerRegistry::new(),
            graph: DependencyGraph::new(),
            baseline_len: 0,
            anchor,
            finished: false,
        };

        for (key, listener) in keys.into_iter().zip(baseline) {
            if !key.is_in(&session.config.baseline_namespace) {
                warn!(
                    side = %side,
                    key = %key,
                    baseline_namespace = %session.config.baseline_namespace,
                    "Baseline reload listener is outside the baseline namespace"
                );
            }
            session.register(key, listener)?;
        }

        let baseline_len = session.registry.len();
        for index in 1..baseline_len {
            session.graph.add_edge_at(index - 1, index)?;
        }
        session.baseline_len = baseline_len;

        info!(
            side = %side,
            baseline = baseline_len,
            anchor = %session.anchor,
            "Reload listener session created"
        );

        Ok(session)
    }

    /// Session with the default configuration
    pub fn with_defaults<I, N>(side: ListenerSide, baseline: I, lookup: &N) -> Result<Self, OrderingError>
    where
        I: IntoIterator<Item = Arc<L>>,
        N: NameLookup<L> + ?Sized,
    {
        Self::new(side, baseline, lookup, SortConfig::default())
    }

    pub fn side(&self) -> ListenerSide {
        self.side
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Last baseline listener; default predecessor of unlinked listeners
    pub fn anchor(&self) -> &ListenerKey {
        &self.anchor
    }

    /// Number of baseline listeners
    pub fn baseline_len(&self) -> usize {
        self.baseline_len
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Dependency graph, including anchor edges once sorted
    pub fn graph(&self) -> &DependencyGraph<ListenerHandle<L>> {
        &self.graph
    }

    /// Look up a registered listener
    pub fn get(&self, key: &ListenerKey) -> Result<&ListenerHandle<L>, OrderingError> {
        self.registry.get(key)
    }

    /// Whether `key` names a baseline listener
    pub fn is_baseline(&self, key: &ListenerKey) -> bool {
        key.is_in(&self.config.baseline_namespace)
    }

    /// Graph as keys, for diagnostics tooling
    pub fn snapshot(&self) -> GraphSnapshot {
        let key_at = |index: usize| self.registry.get_index(index).map(|(key, _)| key.clone());

        let nodes = self.registry.keys().cloned().collect();
        let edges = (0..self.graph.node_count())
            .flat_map(|from| {
                self.graph
                    .successor_indices(from)
                    .iter()
                    .map(move |&to| (from, to))
            })
            .filter_map(|(from, to)| Some((key_at(from)?, key_at(to)?)))
            .collect();

        GraphSnapshot {
            side: self.side,
            nodes,
            edges,
        }
    }

    /// Sort the listeners.
    ///
    /// Links every dangling listener to the anchor first, so the graph is
    /// modified. On success the order respects every edge and otherwise
    /// follows registration order; on failure every cycle is reported.
    pub fn sort_listeners(&mut self) -> Result<SortedListeners<L>, OrderingError> {
        self.ensure_open()?;
        self.finished = true;

        // 1. Link dangling listeners after the last baseline listener
        let anchor = self.baseline_len - 1;
        let registry = &self.registry;
        let baseline_namespace = self.config.baseline_namespace.as_str();
        let linked = link_dangling_nodes(&mut self.graph, anchor, |index| {
            is_baseline_at(registry, baseline_namespace, index)
        });

        debug!(
            side = %self.side,
            anchor = %self.anchor,
            linked = linked.len(),
            "Linked dangling reload listeners to anchor"
        );

        info!(
            side = %self.side,
            listeners = self.graph.node_count(),
            dependencies = self.graph.edge_count(),
            "Sorting reload listeners"
        );

        // 2. Execute Kahn's algorithm
        let Some(order) = kahns_topological_sort(&self.graph) else {
            let report = self.cycle_report();
            warn!(side = %self.side, cycles = report.len(), "{}", report);
            return Err(OrderingError::Cycle(report));
        };

        // 3. Verify
        if self.config.verify_order && !self.verify(&order) {
            warn!(side = %self.side, "Sorted reload listener order violates the dependency graph");
        }

        // 4. Translate back to listeners
        let sorted = order
            .into_iter()
            .map(|index| {
                self.registry
                    .get_index(index)
                    .map(|(key, handle)| (key.clone(), handle.clone()))
                    .ok_or(OrderingError::Graph(GraphError::MissingNode))
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            side = %self.side,
            listeners = sorted.len(),
            "Reload listener sorting complete"
        );

        Ok(SortedListeners::new(sorted))
    }

    fn cycle_report(&self) -> CycleReport {
        let cycles = find_cycles(&self.graph)
            .into_iter()
            .map(|members| {
                cycle_walk(&self.graph, &members)
                    .into_iter()
                    .filter_map(|index| self.registry.get_index(index).map(|(key, _)| key.clone()))
                    .collect()
            })
            .collect();

        CycleReport::new(cycles)
    }

    fn verify(&self, order: &[usize]) -> bool {
        let registry = &self.registry;
        let baseline_namespace = self.config.baseline_namespace.as_str();

        invariant_topological_order(order, &self.graph)
            && invariant_completeness(order, &self.graph)
            && invariant_anchored(&self.graph, |index| is_baseline_at(registry, baseline_namespace, index))
            && invariant_registry_bijection(registry)
    }

    fn ensure_open(&self) -> Result<(), OrderingError> {
        if self.finished {
            return Err(OrderingError::SessionFinished);
        }
        Ok(())
    }

    /// Add to registry and graph in lockstep
    fn register(&mut self, key: ListenerKey, listener: Arc<L>) -> Result<usize, OrderingError> {
        // Duplicates are reported as such even at the cap
        self.registry.ensure_vacant(&key, &listener)?;

        if self.registry.len() >= self.config.max_listeners {
            return Err(OrderingError::TooManyListeners {
                count: self.registry.len() + 1,
                max: self.config.max_listeners,
            });
        }

        let index = self.registry.insert(key, Arc::clone(&listener))?;
        self.graph.add_node(ListenerHandle::new(listener));
        debug_assert_eq!(self.graph.node_count(), self.registry.len());

        Ok(index)
    }
}

fn is_baseline_at<L: ?Sized>(registry: &ListenerRegistry<L>, namespace: &str, index: usize) -> bool {
    registry
        .get_index(index)
        .is_some_and(|(key, _)| key.is_in(namespace))
}

impl<L: ?Sized> ReloadListenerRegistrar<L> for ReloadListenerSession<L> {
    fn add_listener(&mut self, key: ListenerKey, listener: Arc<L>) -> Result<(), OrderingError> {
        self.ensure_open()?;

        let index = self.register(key.clone(), listener)?;
        debug!(side = %self.side, key = %key, index, "Registered reload listener");

        Ok(())
    }

    fn add_dependency(&mut self, first: &ListenerKey, second: &ListenerKey) -> Result<(), OrderingError> {
        self.ensure_open()?;

        let from = self
            .registry
            .index_of(first)
            .ok_or_else(|| OrderingError::UnknownKey { key: first.clone() })?;
        let to = self
            .registry
            .index_of(second)
            .ok_or_else(|| OrderingError::UnknownKey { key: second.clone() })?;

        if from == to {
            return Err(OrderingError::SelfDependency { key: first.clone() });
        }

        let inserted = self.graph.add_edge_at(from, to)?;
        debug!(
            side = %self.side,
            first = %first,
            second = %second,
            inserted,
            "Declared reload listener dependency"
        );

        Ok(())
    }

    fn registry(&self) -> &ListenerRegistry<L> {
        &self.registry
    }
}
