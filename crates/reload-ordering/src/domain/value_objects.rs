//! Value objects for Reload Listener Ordering
//!
//! Keys, identity handles and the session side.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use super::errors::KeyError;

/// Separator between namespace and path in a [`ListenerKey`].
pub const KEY_SEPARATOR: char = ':';

/// Namespaced identifier of a reload listener (`namespace:path`).
///
/// Keys are immutable and compared by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey {
    namespace: Arc<str>,
    path: Arc<str>,
}

impl ListenerKey {
    /// Build a key from its two halves.
    pub fn new(namespace: &str, path: &str) -> Result<Self, KeyError> {
        if namespace.is_empty() {
            return Err(KeyError::EmptyNamespace {
                key: format!("{namespace}{KEY_SEPARATOR}{path}"),
            });
        }
        if path.is_empty() {
            return Err(KeyError::EmptyPath {
                key: format!("{namespace}{KEY_SEPARATOR}{path}"),
            });
        }
        if namespace.contains(KEY_SEPARATOR) {
            return Err(KeyError::InvalidNamespace {
                namespace: namespace.to_string(),
            });
        }

        Ok(Self {
            namespace: Arc::from(namespace),
            path: Arc::from(path),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this key lives in `namespace`.
    pub fn is_in(&self, namespace: &str) -> bool {
        &*self.namespace == namespace
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, KEY_SEPARATOR, self.path)
    }
}

impl FromStr for ListenerKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((namespace, path)) = s.split_once(KEY_SEPARATOR) else {
            return Err(KeyError::MissingSeparator { key: s.to_string() });
        };
        Self::new(namespace, path)
    }
}

impl Serialize for ListenerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ListenerKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity handle for a registered listener.
///
/// Equality and hashing use the address of the shared allocation, so two
/// distinct listeners are never conflated even if their values compare equal.
pub struct ListenerHandle<L: ?Sized>(Arc<L>);

impl<L: ?Sized> ListenerHandle<L> {
    pub fn new(listener: Arc<L>) -> Self {
        Self(listener)
    }

    /// The shared listener.
    pub fn listener(&self) -> &Arc<L> {
        &self.0
    }

    pub fn into_inner(self) -> Arc<L> {
        self.0
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }

    /// Identity comparison against a bare `Arc`.
    pub fn is(&self, other: &Arc<L>) -> bool {
        self.addr() == Arc::as_ptr(other) as *const ()
    }
}

impl<L: ?Sized> Clone for ListenerHandle<L> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<L: ?Sized> PartialEq for ListenerHandle<L> {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<L: ?Sized> Eq for ListenerHandle<L> {}

impl<L: ?Sized> Hash for ListenerHandle<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<L: ?Sized> fmt::Debug for ListenerHandle<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerHandle({:p})", self.addr())
    }
}

impl<L: ?Sized> From<Arc<L>> for ListenerHandle<L> {
    fn from(listener: Arc<L>) -> Self {
        Self::new(listener)
    }
}

impl<L: ?Sized> std::ops::Deref for ListenerHandle<L> {
    type Target = L;

    fn deref(&self) -> &L {
        &self.0
    }
}

/// Logical side a session orders listeners for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerSide {
    Client,
    Server,
}

impl fmt::Display for ListenerSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerSide::Client => f.write_str("client"),
            ListenerSide::Server => f.write_str("server"),
        }
    }
}
