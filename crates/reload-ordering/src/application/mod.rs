//! Application layer for Reload Listener Ordering

pub mod service;

pub use service::ReloadListenerSession;
