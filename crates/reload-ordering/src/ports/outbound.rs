//! Outbound Ports (Driven Ports / SPI)

use crate::domain::value_objects::ListenerKey;

/// Resolves the key of a baseline listener.
///
/// Returning `None` aborts session construction with `MissingName`.
pub trait NameLookup<L: ?Sized> {
    fn lookup_name(&self, listener: &L) -> Option<ListenerKey>;
}

impl<L, F> NameLookup<L> for F
where
    L: ?Sized,
    F: Fn(&L) -> Option<ListenerKey>,
{
    fn lookup_name(&self, listener: &L) -> Option<ListenerKey> {
        self(listener)
    }
}
