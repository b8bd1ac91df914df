/// Insertion-ordered string-keyed map.
///
/// Entries live in a `Vec` in first-insertion order with a `HashMap` index
/// for lookups. Iteration and serialization follow insertion order, so
/// "first writer wins" and stable tie-breaks are reproducible.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Inserts only if `key` is absent. Returns true when the value was stored.
    pub fn insert_if_absent(&mut self, key: &str, value: V) -> bool {
        if self.index.contains_key(key) {
            return false;
        }
        self.push_new(key, value);
        true
    }

    /// Mutable access to the entry for `key`, creating it with `init` on
    /// first sight. New keys are appended at the end.
    pub fn entry_or_insert_with<F>(&mut self, key: &str, init: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => self.push_new(key, init()),
        };
        &mut self.entries[i].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }

    fn push_new(&mut self, key: &str, value: V) -> usize {
        let i = self.entries.len();
        self.entries.push((key.to_string(), value));
        self.index.insert(key.to_string(), i);
        i
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
