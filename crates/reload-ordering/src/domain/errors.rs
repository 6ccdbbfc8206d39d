//! Error types for Reload Listener Ordering

use super::value_objects::ListenerKey;
use std::fmt;
use thiserror::Error;

/// All errors that can occur while building or sorting a listener session
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Key already registered
    #[error("Attempted to register two reload listeners for the same key: {key}")]
    DuplicateKey { key: ListenerKey },

    /// Same listener instance already registered under another key
    #[error("Reload listener for {key} is already registered as {existing}")]
    DuplicateListener {
        key: ListenerKey,
        existing: ListenerKey,
    },

    /// Key was never registered
    #[error("Unknown reload listener: {key}")]
    UnknownKey { key: ListenerKey },

    /// A listener cannot depend on itself
    #[error("Reload listener {key} cannot depend on itself")]
    SelfDependency { key: ListenerKey },

    /// Baseline listener without a registered name
    #[error("A key for the baseline reload listener at position {index} was not provided")]
    MissingName { index: usize },

    /// No baseline listeners, so there is no anchor
    #[error("At least one baseline reload listener is required")]
    EmptyBaseline,

    /// Listener cap exceeded
    #[error("Too many reload listeners: {count} > {max}")]
    TooManyListeners { count: usize, max: usize },

    /// Session already produced its order
    #[error("Reload listener session has already been sorted")]
    SessionFinished,

    /// Dependency graph is not acyclic
    #[error("{0}")]
    Cycle(CycleReport),

    /// Malformed key
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Raw graph misuse
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Key parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Listener key {key:?} has no ':' separator")]
    MissingSeparator { key: String },

    #[error("Listener key {key:?} has an empty namespace")]
    EmptyNamespace { key: String },

    #[error("Listener key {key:?} has an empty path")]
    EmptyPath { key: String },

    #[error("Namespace {namespace:?} must not contain ':'")]
    InvalidNamespace { namespace: String },
}

/// Dependency graph error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Edge endpoint is not a node of the graph")]
    MissingNode,
}

/// Every cycle found during a failed sort, translated back into keys.
///
/// Each cycle is listed as a walk along its edges, starting at its
/// earliest-registered member; cycles are ordered by that member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    cycles: Vec<Vec<ListenerKey>>,
}

impl CycleReport {
    pub fn new(cycles: Vec<Vec<ListenerKey>>) -> Self {
        Self { cycles }
    }

    pub fn cycles(&self) -> &[Vec<ListenerKey>] {
        &self.cycles
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Closed arrow chain for one cycle, e.g. `a:x->a:y->a:x`.
    pub fn render_cycle(cycle: &[ListenerKey]) -> String {
        let Some(first) = cycle.first() else {
            return String::new();
        };

        let mut out = String::new();
        for key in cycle {
            out.push_str(&key.to_string());
            out.push_str("->");
        }
        out.push_str(&first.to_string());
        out
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cycles were detected during reload listener sorting:")?;
        for (idx, cycle) in self.cycles.iter().enumerate() {
            writeln!(f, "{}: {}", idx, Self::render_cycle(cycle))?;
        }
        Ok(())
    }
}
