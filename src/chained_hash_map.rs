use std::{borrow::Borrow, hash::Hash, mem, slice};

use crate::{
    Error, KeyedEntry, KeyedMap, Result,
    hash_table_base::{Bucket, HashTableBase, HashTableConfig},
    utils::next_prime,
};

/// Entries that compressed to the same bucket
type Chain<K, V> = Vec<KeyedEntry<K, V>>;

impl<K, V> Bucket<K, V> for Chain<K, V> {
    fn into_pairs(self) -> impl Iterator<Item = (K, V)> {
        self.into_iter().map(KeyedEntry::into_pair)
    }
}

/// A hash map resolving collisions by separate chaining.
///
/// Buckets come from a [`HashTableBase`], so keys are placed with randomized
/// MAD compression. Once an insertion pushes the load factor above the
/// threshold, the table grows to the smallest prime at least twice the
/// current capacity plus one, capped one below the compression prime.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<K, V> {
    /// Bucket array, compression parameters and entry count
    table: HashTableBase<Chain<K, V>>,
}

impl<K, V> Default for ChainedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> ChainedHashMap<K, V> {
    /// Creates an empty map with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self { table: HashTableBase::new() }
    }

    /// Creates an empty map with `capacity` buckets
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: HashTableBase::with_capacity(capacity) }
    }

    /// Creates an empty map from `config`
    #[must_use]
    pub fn with_config(config: HashTableConfig) -> Self {
        Self { table: HashTableBase::with_config(config) }
    }

    /// Creates an empty map from `config`, drawing the compression parameters from `rng`
    #[must_use]
    pub fn with_config_and_rng<R: rand::Rng>(config: HashTableConfig, rng: &mut R) -> Self {
        Self { table: HashTableBase::with_config_and_rng(config, rng) }
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the current load factor
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Returns the load factor above which the map grows
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.table.load_factor_threshold()
    }

    /// Sets the growth threshold; takes effect on the next insertion
    pub fn set_load_factor_threshold(&mut self, threshold: f64) {
        self.table.set_load_factor_threshold(threshold);
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns the underlying bucket table
    #[must_use]
    pub fn hash_table(&self) -> &HashTableBase<Chain<K, V>> {
        &self.table
    }
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Puts a pair into its chain without checking the load factor
    fn place(table: &mut HashTableBase<Chain<K, V>>, key: K, value: V) -> Option<V> {
        let index = table.hash_index(&key);
        let slot = table.slot_mut(index)?;
        let chain = slot.get_or_insert_with(Vec::new);

        if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        chain.push(KeyedEntry::new(key, value));
        table.record_insert();
        None
    }

    /// Rebuilds the table at the next prime past twice its capacity, never
    /// beyond what the compression prime can address
    fn grow(&mut self) {
        let capacity = self.table.capacity();
        let doubled = u64::try_from(capacity).unwrap_or(u64::MAX).saturating_mul(2).saturating_add(1);
        let new_capacity = usize::try_from(next_prime(doubled))
            .unwrap_or(usize::MAX)
            .min(self.table.max_capacity());
        if new_capacity <= capacity {
            #[cfg(feature = "logging")]
            log::warn!("hash table is at its largest capacity of {capacity} buckets; not growing");
            return;
        }
        self.table.resize(new_capacity, |table, key, value| {
            Self::place(table, key, value);
        });
    }

    /// Finds the entry holding `key`
    fn find<Q>(&self, key: &Q) -> Option<&KeyedEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table
            .slot(self.table.hash_index(key))?
            .iter()
            .find(|entry| entry.key.borrow() == key)
    }
}

impl<K, V> KeyedMap for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    type Key = K;
    type Value = V;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a;

    fn len(&self) -> usize {
        self.table.len()
    }

    fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|entry| &entry.value).ok_or(Error::KeyNotFound)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.table.hash_index(key);
        self.table
            .slot_mut(index)
            .and_then(Option::as_mut)
            .and_then(|chain| chain.iter_mut().find(|entry| entry.key.borrow() == key))
            .map(|entry| &mut entry.value)
            .ok_or(Error::KeyNotFound)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let replaced = Self::place(&mut self.table, key, value);
        if replaced.is_none() && self.table.exceeds_threshold() {
            self.grow();
        }
        replaced
    }

    fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.table.hash_index(key);
        let slot = self.table.slot_mut(index).ok_or(Error::KeyNotFound)?;
        let chain = slot.as_mut().ok_or(Error::KeyNotFound)?;
        let position = chain
            .iter()
            .position(|entry| entry.key.borrow() == key)
            .ok_or(Error::KeyNotFound)?;

        let entry = chain.swap_remove(position);
        if chain.is_empty() {
            *slot = None;
        }
        self.table.record_remove();
        Ok(entry.value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter { slots: self.table.slots(), chain: Default::default() }
    }
}

impl<K, V> Extend<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Iterator over the key-value pairs of a [`ChainedHashMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Buckets not yet visited
    slots: slice::Iter<'a, Option<Chain<K, V>>>,
    /// Remaining entries of the bucket being visited
    chain: slice::Iter<'a, KeyedEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some((&entry.key, &entry.value));
            }
            if let Some(chain) = self.slots.next()? {
                self.chain = chain.iter();
            }
        }
    }
}
