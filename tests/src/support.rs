//! Shared fixtures for the test suite.

use reload_ordering::{ListenerKey, ListenerSide, NameTable, ReloadListenerSession, SortConfig};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-friendly `fmt` subscriber once per process.
///
/// Honours `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

/// A resource-loading stage as the pipeline sees it.
pub trait ReloadStage: Send + Sync {
    fn label(&self) -> &str;
}

/// Minimal stage used throughout the suite
#[derive(Debug)]
pub struct Stage(pub String);

impl ReloadStage for Stage {
    fn label(&self) -> &str {
        &self.0
    }
}

pub type DynStage = Arc<dyn ReloadStage>;

pub fn stage(label: &str) -> DynStage {
    Arc::new(Stage(label.to_string()))
}

pub fn key(raw: &str) -> ListenerKey {
    raw.parse().expect("valid listener key")
}

/// Engine built-in stages for one side, plus the name table the engine ships for them.
pub struct Builtins {
    pub stages: Vec<DynStage>,
    pub names: NameTable<dyn ReloadStage>,
}

impl Builtins {
    pub fn new(namespace: &str, paths: &[&str]) -> Self {
        let mut names = NameTable::new();
        let stages: Vec<DynStage> = paths.iter().map(|path| stage(path)).collect();
        for (path, listener) in paths.iter().zip(&stages) {
            names.insert(ListenerKey::new(namespace, path).expect("valid key"), listener);
        }
        Self { stages, names }
    }

    pub fn session(&self, side: ListenerSide) -> ReloadListenerSession<dyn ReloadStage> {
        self.session_with(side, SortConfig::default())
    }

    pub fn session_with(&self, side: ListenerSide, config: SortConfig) -> ReloadListenerSession<dyn ReloadStage> {
        init_tracing();
        ReloadListenerSession::new(side, self.stages.iter().cloned(), &self.names, config)
            .expect("builtins resolve")
    }
}

/// Built-in client stages
pub fn client_builtins() -> Builtins {
    Builtins::new(
        "minecraft",
        &["language", "textures", "shaders", "models", "sounds", "fonts"],
    )
}

/// Built-in server stages
pub fn server_builtins() -> Builtins {
    Builtins::new(
        "minecraft",
        &["recipes", "tags", "loot_tables", "advancements", "functions"],
    )
}

/// Baseline of `count` stages named `minecraft:v0 .. v{count-1}`
pub fn numbered_builtins(count: usize) -> Builtins {
    let paths: Vec<String> = (0..count).map(|i| format!("v{i}")).collect();
    let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
    Builtins::new("minecraft", &paths)
}

/// Labels of sorted stages, in order
pub fn labels(stages: &[DynStage]) -> Vec<String> {
    stages.iter().map(|s| s.label().to_string()).collect()
}
