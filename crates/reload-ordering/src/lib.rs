//! # Reload Listener Ordering
//!
//! Dependency-ordered registration and deterministic topological sort for
//! reload listeners (resource-loading stages) of an asset pipeline.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (ListenerRegistry, DependencyGraph, SortedListeners)
//! - **Algorithms**: Traversal, anchor normalization, Kahn's sort, Tarjan's SCC
//! - **Ports**: Inbound (ReloadListenerRegistrar) and Outbound (NameLookup)
//! - **Adapters**: Static name table for built-in listeners
//! - **Application**: Session orchestration
//!
//! ## Ordering rules
//!
//! - Baseline listeners are chained in the order supplied.
//! - `add_dependency(a, b)` makes `a` run before `b`.
//! - A listener with no path to or from any baseline listener runs after the
//!   last baseline listener.
//! - Otherwise unconstrained listeners keep registration order.
//! - Cycles fail the sort and every one of them is reported.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::NameTable;
pub use application::service::ReloadListenerSession;
pub use config::SortConfig;
pub use domain::entities::*;
pub use domain::errors::{CycleReport, GraphError, KeyError, OrderingError};
pub use domain::value_objects::*;
pub use ports::inbound::ReloadListenerRegistrar;
pub use ports::outbound::NameLookup;
