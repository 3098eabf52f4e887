#![forbid(unsafe_code)]

//! The property store: one model's canonical key → value map.
//!
//! No validation, no coercion, no diffing. Writing an identical value is
//! still a write; whether that propagates is the engine's business.

use ahash::AHashMap;
use mog_core::Value;

/// Canonical property values of one model.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: AHashMap<String, Value>,
}

impl PropertyStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property. `None` means nothing was ever stored, which is
    /// distinct from a stored [`Value::Null`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store a value without side effects.
    pub(crate) fn set_raw(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Every stored key, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Every stored `(key, value)` pair, sorted by key.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, Value)> {
        let mut pairs: Vec<(String, Value)> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Number of stored properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
