//! Static Name Table Adapter
//!
//! Implements `NameLookup` from a fixed list of built-in listeners, the way
//! an engine ships one name list per side.

use crate::domain::value_objects::ListenerKey;
use crate::ports::outbound::NameLookup;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Built-in listener names resolved by listener identity.
pub struct NameTable<L: ?Sized> {
    /// Allocation address -> (name, listener). Holding the `Arc` keeps the address unique.
    names: HashMap<usize, (ListenerKey, Arc<L>)>,
}

fn address_of<L: ?Sized>(listener: &L) -> usize {
    listener as *const L as *const () as usize
}

impl<L: ?Sized> NameTable<L> {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    /// Add a named listener. A listener added twice keeps its last name.
    pub fn with(mut self, key: ListenerKey, listener: &Arc<L>) -> Self {
        self.insert(key, listener);
        self
    }

    pub fn insert(&mut self, key: ListenerKey, listener: &Arc<L>) {
        let entry = (key.clone(), Arc::clone(listener));
        if let Some((previous, _)) = self.names.insert(address_of(&**listener), entry) {
            debug!(%previous, %key, "Renamed built-in reload listener");
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<L: ?Sized> Default for NameTable<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> NameLookup<L> for NameTable<L> {
    fn lookup_name(&self, listener: &L) -> Option<ListenerKey> {
        self.names
            .get(&address_of(listener))
            .map(|(key, _)| key.clone())
    }
}
