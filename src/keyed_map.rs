//! The mapping contract implemented by concrete collision strategies

use std::{borrow::Borrow, hash::Hash};

use crate::Result;

/// Lookup, insertion, removal and iteration over key/value pairs.
///
/// Implementors keep their entry count exact on every mutating path: an
/// insert that replaces a value leaves it unchanged, and a removal decrements
/// it once per removed entry.
pub trait KeyedMap {
    /// Type of the keys
    type Key;
    /// Type of the stored values
    type Value;
    /// Iterator over borrowed pairs
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if the key is absent.
    fn get<Q>(&self, key: &Q) -> Result<&Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if the key is absent.
    fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Stores `value` under `key`, returning the value it replaced
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Removes `key` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`](crate::Error::KeyNotFound) if the key is absent.
    fn remove<Q>(&mut self, key: &Q) -> Result<Self::Value>
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Returns true if the map holds `key`
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Self::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_ok()
    }

    /// Iterates over every pair in unspecified order
    fn iter(&self) -> Self::Iter<'_>;
}
