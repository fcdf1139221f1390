//! Utility functions and traits shared by the map implementations

use crate::KeyedMap;

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions: KeyedMap {
    /// Returns the keys of the map as a Vec
    fn keys(&self) -> Vec<Self::Key>;

    /// Returns the values of the map as a Vec
    fn values(&self) -> Vec<Self::Value>;
}

impl<M> HashMapExtensions for M
where
    M: KeyedMap,
    M::Key: Clone,
    M::Value: Clone,
{
    fn keys(&self) -> Vec<M::Key> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<M::Value> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }
}

/// Returns true if `n` is prime, by trial division
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut divisor: u64 = 3;
    while divisor.saturating_mul(divisor) <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor = divisor.saturating_add(2);
    }
    true
}

/// Returns the smallest prime greater than or equal to `n`.
///
/// Past the largest 64-bit prime there is none, so `u64::MAX` comes back.
#[must_use]
pub fn next_prime(n: u64) -> u64 {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        match candidate.checked_add(1) {
            Some(next) => candidate = next,
            None => return candidate,
        }
    }
    candidate
}
