//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::ListenerRegistry;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::ListenerKey;
use std::sync::Arc;

/// Registration surface handed to code that contributes reload listeners.
///
/// Implemented by the session; pipeline code can take
/// `&mut dyn ReloadListenerRegistrar<L>` without seeing the sort.
pub trait ReloadListenerRegistrar<L: ?Sized> {
    /// Register `listener` under `key`.
    ///
    /// Unless a dependency says otherwise, it runs after every baseline
    /// listener, in registration order.
    fn add_listener(&mut self, key: ListenerKey, listener: Arc<L>) -> Result<(), OrderingError>;

    /// Declare that `first` must run before `second`.
    ///
    /// Both keys must already be registered. Cycles are only reported when
    /// the session is sorted.
    fn add_dependency(&mut self, first: &ListenerKey, second: &ListenerKey) -> Result<(), OrderingError>;

    /// Registered listeners in registration order.
    fn registry(&self) -> &ListenerRegistry<L>;
}
