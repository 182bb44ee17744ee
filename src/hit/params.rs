//! Ordered tracking parameters and their form encoding.

use crate::error::Result;
use crate::types::{DEFAULT_HIT_TYPE, PROTOCOL_VERSION};

/// Ordered key/value mapping of Measurement Protocol fields.
///
/// Inserting an existing key replaces its value in place; new keys are
/// appended. A key may be present without a value (`None`), which reserves
/// its position but is left out of the encoded payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackingParameters {
    entries: Vec<(String, Option<String>)>,
}

impl TrackingParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// `v=1`, `tid` unset, `t=pageview`.
    pub fn defaults() -> Self {
        let mut params = Self::new();
        params.insert("v", PROTOCOL_VERSION);
        params.insert_unset("tid");
        params.insert("t", DEFAULT_HIT_TYPE);
        params
    }

    /// Set `key` to `value`, keeping the key's position if it already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.put(key.into(), Some(value.to_string()));
    }

    /// Reserve `key` without a value.
    pub fn insert_unset(&mut self, key: impl Into<String>) {
        self.put(key.into(), None);
    }

    fn put(&mut self, key: String, value: Option<String>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Overlay `other` onto `self`; `other` wins on collisions.
    pub fn merge(&mut self, other: TrackingParameters) {
        for (key, value) in other.entries {
            self.put(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether `key` carries a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| !v.is_empty())
    }

    /// Drop `key` when it is unset or holds an empty string.
    pub fn remove_if_empty(&mut self, key: &str) {
        self.entries
            .retain(|(k, v)| k != key || v.as_deref().map_or(false, |v| !v.is_empty()));
    }

    /// Keys in order, including unset ones.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Encode as `application/x-www-form-urlencoded`, skipping unset keys.
    pub fn encode(&self) -> Result<String> {
        let pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)))
            .collect();
        Ok(serde_urlencoded::to_string(pairs)?)
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for TrackingParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = TrackingParameters::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
