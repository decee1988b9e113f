#![deny(missing_docs)]

//! # State Store
//!
//! Key/value seam standing in for the actor runtime's state manager.
//! Values are JSON documents, matching what the runtime persists.

use crate::error::DemoResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-actor key/value state.
pub trait StateStore {
    /// Returns the stored value, if any.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value);

    /// True when a value is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store used by tests and the demo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStateStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Loads and decodes the value under `key`.
pub fn load_state<T: DeserializeOwned>(store: &impl StateStore, key: &str) -> DemoResult<Option<T>> {
    match store.get(key) {
        Some(value) => Ok(Some(T::deserialize(value)?)),
        None => Ok(None),
    }
}

/// Encodes and stores `state` under `key`.
pub fn save_state<T: Serialize>(store: &mut impl StateStore, key: &str, state: &T) -> DemoResult<()> {
    store.set(key, serde_json::to_value(state)?);
    Ok(())
}
