//! Three-bucket delta between two flat configuration documents.
//!
//! Only top-level keys are compared; nested values are compared as a whole
//! with structural equality. For any `base` and `patched`:
//!
//! `apply(base, &diff(base, patched)) == *patched`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat configuration document: top-level keys to arbitrary JSON values.
pub type FlatConfig = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    /// Keys only in the patched document. Sorted by key.
    #[serde(default)]
    pub additions: Vec<Addition>,
    /// Keys only in the base document. Sorted.
    #[serde(default)]
    pub deletions: Vec<String>,
    /// Keys in both documents whose values differ. Sorted by key.
    #[serde(default)]
    pub updates: Vec<Update>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addition {
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub key: String,
    pub from: Value,
    pub to: Value,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.deletions.is_empty() && self.updates.is_empty()
    }
}

pub fn diff(base: &FlatConfig, patched: &FlatConfig) -> Delta {
    let mut additions: Vec<Addition> = patched
        .iter()
        .filter(|(key, _)| !base.contains_key(*key))
        .map(|(key, value)| Addition {
            key: key.clone(),
            value: value.clone(),
        })
        .collect();

    let mut deletions: Vec<String> = base
        .keys()
        .filter(|key| !patched.contains_key(*key))
        .cloned()
        .collect();

    let mut updates: Vec<Update> = base
        .iter()
        .filter_map(|(key, from)| match patched.get(key) {
            Some(to) if to != from => Some(Update {
                key: key.clone(),
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        })
        .collect();

    additions.sort_by(|a, b| a.key.cmp(&b.key));
    deletions.sort();
    updates.sort_by(|a, b| a.key.cmp(&b.key));

    Delta {
        additions,
        deletions,
        updates,
    }
}

/// Rebuild the patched document from `base`. `base` is left untouched.
///
/// Deletions of absent keys are no-ops. Updates and additions are plain
/// inserts, so an inconsistent delta re-adds or overwrites keys instead of
/// failing.
pub fn apply(base: &FlatConfig, delta: &Delta) -> FlatConfig {
    let mut result = base.clone();

    for key in &delta.deletions {
        result.shift_remove(key);
    }
    for update in &delta.updates {
        result.insert(update.key.clone(), update.to.clone());
    }
    for addition in &delta.additions {
        result.insert(addition.key.clone(), addition.value.clone());
    }

    result
}
