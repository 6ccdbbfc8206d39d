//! Ports module for Reload Listener Ordering
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::ReloadListenerRegistrar;
pub use outbound::NameLookup;
