//! Value snapshots.
//!
//! A `RuleSnapshot` captures every rule's string form so it can be stored
//! with serde in whatever format the host chooses, and later loaded back.
//! Loading goes through the lenient string path and does not notify
//! observers, the same way a host restores rules from saved data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::registry::GameRules;

/// Rule name to string value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSnapshot {
    values: BTreeMap<String, String>,
}

impl RuleSnapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stored string for a rule.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Add an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get the stored string for a rule.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over entries, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<C: 'static> GameRules<C> {
    /// Capture the string form of every rule.
    #[must_use]
    pub fn snapshot(&self) -> RuleSnapshot {
        let mut snapshot = RuleSnapshot::new();
        for rule in self.iter() {
            snapshot.insert(rule.name(), rule.value_string());
        }
        snapshot
    }

    /// Load values from a snapshot without notifying observers.
    ///
    /// Entries naming unknown rules are skipped with a warning. Returns the
    /// skipped names.
    pub fn apply_snapshot(&mut self, snapshot: &RuleSnapshot) -> Vec<String> {
        let mut skipped = Vec::new();
        for (name, value) in snapshot.iter() {
            if self.set_from_string(name, value).is_err() {
                log::warn!("Skipping unknown rule '{}' in snapshot", name);
                skipped.push(name.to_string());
            }
        }
        skipped
    }
}
