use devconsole_model::Entry;
use std::collections::BTreeMap;
use tracing::warn;

/// A set of entries with unique keys.
///
/// Iteration is always in ascending key order, regardless of the order
/// entries were added in.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<E> {
    entries: BTreeMap<String, E>,
}

impl<E> Default for Collection<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<E: Entry> Collection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from stored entries. If the source repeats a key
    /// the later entry wins.
    pub fn from_entries(entries: impl IntoIterator<Item = E>) -> Self {
        let mut collection = Self::new();
        for entry in entries {
            if let Some(previous) = collection.insert(entry) {
                warn!(key = previous.key(), "duplicate key in stored collection, keeping last");
            }
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    /// Entries in ascending key order, as stored by the remote resource.
    pub fn to_vec(&self) -> Vec<E> {
        self.entries.values().cloned().collect()
    }

    /// Inserts `entry`, replacing and returning any entry with the same key.
    pub(crate) fn insert(&mut self, entry: E) -> Option<E> {
        self.entries.insert(entry.key().to_string(), entry)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<E> {
        self.entries.remove(key)
    }
}

impl<E: Entry> FromIterator<E> for Collection<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
