//! Durable key/value store contract and in-memory implementations.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Object-safe contract for the durable store backing the shared registry.
///
/// Reads and writes are whole-value: a key maps to one serialized container,
/// and a write replaces the previous container outright. Concurrent writers
/// therefore race at container granularity; the last write wins.
pub trait KeyValueStore {
    /// Returns the raw serialized value for `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Replaces the value for `key`.
    fn save(&self, key: &str, raw: &str) -> Result<(), String>;

    /// Deletes the value for `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), String>;
}

/// In-memory store used by tests and non-browser targets.
///
/// Clones share the same underlying map, which lets a test hand two handles
/// to independent "tabs" and observe their writes interleave.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), String> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), raw.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Store that persists nothing and reads nothing.
///
/// Stands in when no durable backend is available; the desktop then runs with
/// session-local state only.
#[derive(Clone, Copy, Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn load(&self, _key: &str) -> Option<String> {
        None
    }

    fn save(&self, _key: &str, _raw: &str) -> Result<(), String> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Ok(())
    }
}

/// Loads and decodes a JSON value, falling back to `default` when the key is
/// absent or its container no longer parses.
pub fn load_typed_with<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    default: impl FnOnce() -> T,
) -> T {
    match store.load(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|_| default()),
        None => default(),
    }
}

/// Encodes a value as JSON and saves it under `key`.
pub fn save_typed_with<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|err| err.to_string())?;
    store.save(key, &raw)
}
