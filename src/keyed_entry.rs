//! Key/value pair ordered by its key alone

use std::cmp::Ordering;

/// A key/value pair whose equality and ordering look only at `key`.
///
/// Two entries with equal keys compare equal even when their values differ,
/// which lets an entry stand in for its key inside ordered containers such as
/// [`BinaryMinHeap`](crate::BinaryMinHeap) or a chain of a
/// [`ChainedHashMap`](crate::ChainedHashMap).
#[derive(Debug, Clone)]
pub struct KeyedEntry<K, V> {
    /// The key that decides equality and ordering
    pub key: K,
    /// The payload carried alongside the key
    pub value: V,
}

impl<K, V> KeyedEntry<K, V> {
    /// Creates an entry from a key and a value
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Splits the entry back into its key and value
    #[must_use]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Ord, V> KeyedEntry<K, V> {
    /// Compares two entries by key, ignoring both values.
    #[must_use]
    pub fn cmp_by_key(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> From<(K, V)> for KeyedEntry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K: PartialEq, V> PartialEq for KeyedEntry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for KeyedEntry<K, V> {}

impl<K: Ord, V> PartialOrd for KeyedEntry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_by_key(other))
    }
}

impl<K: Ord, V> Ord for KeyedEntry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_by_key(other)
    }
}
