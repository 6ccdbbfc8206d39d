//! Configuration for Reload Listener Ordering

use serde::{Deserialize, Serialize};

/// Namespace of the engine's own listeners.
pub const DEFAULT_BASELINE_NAMESPACE: &str = "minecraft";

/// Ordering configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Keys in this namespace are baseline listeners
    pub baseline_namespace: String,
    /// Maximum listeners per session, baseline included
    pub max_listeners: usize,
    /// Re-check the produced order against the graph after sorting
    pub verify_order: bool,
}

impl SortConfig {
    pub fn with_baseline_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.baseline_namespace = namespace.into();
        self
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            baseline_namespace: DEFAULT_BASELINE_NAMESPACE.to_string(),
            max_listeners: 4096,
            verify_order: true,
        }
    }
}
