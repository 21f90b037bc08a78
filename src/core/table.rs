//! Insertion-ordered tables keyed by [`Item`].
//!
//! The node map and the resolution cache must iterate in a stable order so
//! that listings and graph renderings are deterministic across runs. Each
//! table keeps its keys in first-insertion order alongside a hash index.

use std::collections::HashMap;

use super::item::{Candidate, Item};

/// Appends every element of `extra` to `target` unless already present.
///
/// Returns the number of elements actually added.
pub fn merge_unique<T: PartialEq + Clone>(target: &mut Vec<T>, extra: &[T]) -> usize {
    let before = target.len();
    for value in extra {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
    target.len() - before
}

/// A map from [`Item`] to an ordered, duplicate-free list of values.
#[derive(Debug, Clone)]
pub struct ItemTable<V> {
    entries: Vec<(Item, Vec<V>)>,
    index: HashMap<Item, usize>,
}

impl<V: PartialEq + Clone> ItemTable<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the entry for `key`, inserting an empty one if needed.
    ///
    /// The returned flag is `true` when the entry was just created.
    pub fn entry(&mut self, key: &Item) -> (&mut Vec<V>, bool) {
        match self.index.get(key) {
            Some(&slot) => (&mut self.entries[slot].1, false),
            None => {
                let slot = self.entries.len();
                self.entries.push((key.clone(), Vec::new()));
                self.index.insert(key.clone(), slot);
                (&mut self.entries[slot].1, true)
            }
        }
    }

    /// Merges `values` into the entry for `key` (append-if-absent).
    pub fn merge(&mut self, key: &Item, values: &[V]) -> usize {
        let (list, _) = self.entry(key);
        merge_unique(list, values)
    }

    pub fn get(&self, key: &Item) -> Option<&[V]> {
        self.index.get(key).map(|&slot| self.entries[slot].1.as_slice())
    }

    pub fn contains(&self, key: &Item) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, &[V])> {
        self.entries.iter().map(|(key, values)| (key, values.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Item> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges every entry of `other` into `self`, keeping `self`'s order
    /// first.
    pub fn absorb(&mut self, other: &ItemTable<V>) {
        for (key, values) in other.iter() {
            self.merge(key, values);
        }
    }
}

impl<V: PartialEq + Clone> Default for ItemTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Provided item → merged requirements of every file providing it.
pub type NodeMap = ItemTable<Item>;

/// Item → every candidate location found so far.
pub type ResolutionCache = ItemTable<Candidate>;
