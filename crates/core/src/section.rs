// SPDX-License-Identifier: MIT

//!
//! Keyed, ordered collections of page content (header links, html fragments
//! and script blocks)
//!

/// An ordered collection of children, each stored under a key.  Adding a child
/// under a key that's already present replaces the existing child in place, so
/// content registered by several elements (e.g. the same JavaScript library)
/// only appears once.
#[derive(Clone, Debug, PartialEq)]
pub struct Section<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Section<T> {
    /// Create a new, empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child under `key`, replacing any child already stored under it
    pub fn add_child<K: ToString>(&mut self, child: T, key: K) {
        let key = key.to_string();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = child,
            None => self.entries.push((key, child)),
        }
    }

    /// Get the child stored under `key`
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, child)| child)
    }

    /// Whether a child is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over the keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over the children in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(key, child)| (key.as_str(), child))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
