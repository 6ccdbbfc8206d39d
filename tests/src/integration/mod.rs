//! # Integration Flows
//!
//! End-to-end sessions driven through the public API the way a resource
//! pipeline drives them: built-in listeners at construction, mod listeners
//! and dependencies through [`ReloadListenerRegistrar`], one sort.
//!
//! - `pipeline`: successful orderings, client and server sessions side by side
//! - `cycles`: failing sorts and their diagnostics
//!
//! [`ReloadListenerRegistrar`]: reload_ordering::ReloadListenerRegistrar

pub mod cycles;
