//! Shared infrastructure for hash maps: bucket array, MAD compression, load
//! tracking and the resize primitive.
//!
//! `HashTableBase` does not resolve collisions. A concrete map owns one, picks
//! what a bucket holds (a chain, a single entry, a marker), and drives
//! insertion and removal through the slot accessors while the base keeps the
//! count and the hashing consistent.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    mem,
};

use rand::Rng;

use crate::utils::next_prime;

/// Default number of buckets for a new table
pub const DEFAULT_CAPACITY: usize = 11;

/// Default ratio of entries to buckets above which a map grows
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.5;

/// Default prime modulus for MAD compression; large enough for any table up to
/// about 1e8 buckets
pub const DEFAULT_PRIME: u64 = 109_345_121;

/// A bucket payload that can hand back every live pair it holds.
///
/// [`HashTableBase::resize`] uses this to collect entries before rebuilding.
pub trait Bucket<K, V> {
    /// Consumes the bucket, yielding its live key/value pairs
    fn into_pairs(self) -> impl Iterator<Item = (K, V)>;
}

/// Construction parameters for a [`HashTableBase`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashTableConfig {
    /// Initial number of buckets, at least 1
    pub capacity: usize,
    /// Load factor above which the owning map should resize
    pub load_factor_threshold: f64,
    /// Prime modulus `P` of the MAD compression. Raised at construction to
    /// the next prime above the capacity when it is smaller or not prime.
    pub prime: u64,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            prime: DEFAULT_PRIME,
        }
    }
}

impl HashTableConfig {
    /// Sets the initial bucket count
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the resize threshold
    #[must_use]
    pub fn with_load_factor_threshold(mut self, threshold: f64) -> Self {
        self.load_factor_threshold = threshold;
        self
    }

    /// Sets the MAD prime modulus
    #[must_use]
    pub fn with_prime(mut self, prime: u64) -> Self {
        self.prime = prime;
        self
    }
}

/// Bucket array with randomized Multiply-Add-Divide compression.
///
/// Keys map to buckets through
///
/// ```text
/// ((hash(key) * scale + shift) mod P) mod capacity
/// ```
///
/// where `scale` is drawn from `[1, P-1]` and `shift` from `[0, P-1]` once per
/// instance. Both survive resizes; only the capacity changes.
#[derive(Debug, Clone)]
pub struct HashTableBase<B> {
    /// Slots of the table, `None` when empty
    buckets: Vec<Option<B>>,
    /// Number of live entries across all buckets
    len: usize,
    /// Load factor above which the owning map resizes
    load_factor_threshold: f64,
    /// Prime modulus of the compression
    prime: u64,
    /// Multiplier of the compression, in `[1, prime - 1]`
    scale: u64,
    /// Offset of the compression, in `[0, prime - 1]`
    shift: u64,
}

impl<B> Default for HashTableBase<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> HashTableBase<B> {
    /// Creates a table with the default configuration, seeded from the thread-local RNG
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HashTableConfig::default())
    }

    /// Creates a table with `capacity` buckets and default parameters otherwise
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(HashTableConfig::default().with_capacity(capacity))
    }

    /// Creates a table from `config`, seeded from the thread-local RNG
    #[must_use]
    pub fn with_config(config: HashTableConfig) -> Self {
        Self::with_config_and_rng(config, &mut rand::rng())
    }

    /// Creates a table from `config`, drawing `scale` and `shift` from `rng`.
    ///
    /// Passing a seeded generator makes bucket placement reproducible. The
    /// prime becomes the smallest prime that is at least `config.prime` and
    /// exceeds the capacity.
    #[must_use]
    pub fn with_config_and_rng<R: Rng>(config: HashTableConfig, rng: &mut R) -> Self {
        let capacity = u64::try_from(config.capacity.max(1)).unwrap_or(u64::MAX);
        let prime = next_prime(config.prime.max(capacity.saturating_add(1)));
        let mut table = Self {
            buckets: Vec::new(),
            len: 0,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            prime,
            scale: rng.random_range(1..prime),
            shift: rng.random_range(0..prime),
        };
        table.buckets = empty_slots(config.capacity);
        table.set_load_factor_threshold(config.load_factor_threshold);
        table
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, `len / capacity`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the load factor above which the owning map resizes
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor_threshold
    }

    /// Sets the resize threshold. Non-positive and NaN values are ignored.
    pub fn set_load_factor_threshold(&mut self, threshold: f64) {
        if threshold > 0.0 {
            self.load_factor_threshold = threshold;
        }
    }

    /// Returns true once the load factor is above the threshold
    #[must_use]
    pub fn exceeds_threshold(&self) -> bool {
        self.load_factor() > self.load_factor_threshold
    }

    /// Returns the largest capacity the compression can spread keys over, `P - 1`
    #[must_use]
    pub fn max_capacity(&self) -> usize {
        usize::try_from(self.prime.saturating_sub(1)).unwrap_or(usize::MAX)
    }

    /// Returns the prime modulus of the compression
    #[must_use]
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Returns the compression multiplier
    #[must_use]
    pub fn scale(&self) -> u64 {
        self.scale
    }

    /// Returns the compression offset
    #[must_use]
    pub fn shift(&self) -> u64 {
        self.shift
    }

    /// Maps `key` to a bucket index in `[0, capacity)`.
    ///
    /// Equal keys land on the same index for as long as the capacity is
    /// unchanged.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn hash_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        let prime = u128::from(self.prime);
        // (h * a + b) mod P == ((h mod P) * a + b) mod P, and the reduced form fits in u128.
        let code = u128::from(hash_code(key)) % prime;
        let compressed = (code * u128::from(self.scale) + u128::from(self.shift)) % prime;
        (compressed % self.buckets.len() as u128) as usize
    }

    /// Returns the payload at `index`, if the slot is occupied
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&B> {
        self.buckets.get(index).and_then(Option::as_ref)
    }

    /// Returns the slot at `index` for in-place updates
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Option<B>> {
        self.buckets.get_mut(index)
    }

    /// Iterates over every slot in index order
    pub fn slots(&self) -> std::slice::Iter<'_, Option<B>> {
        self.buckets.iter()
    }

    /// Counts one entry added by the owning map
    pub fn record_insert(&mut self) {
        self.len = self.len.saturating_add(1);
    }

    /// Counts one entry removed by the owning map
    pub fn record_remove(&mut self) {
        self.len = self.len.saturating_sub(1);
    }

    /// Empties every slot, keeping the capacity and the compression parameters
    pub fn clear(&mut self) {
        for slot in &mut self.buckets {
            *slot = None;
        }
        self.len = 0;
    }

    /// Rebuilds the table with `new_capacity` buckets.
    ///
    /// Every live pair is collected, the bucket array is replaced by empty
    /// slots and the count reset to zero, then each pair is handed to
    /// `insert`, which must place it through the map's normal insertion path
    /// and call [`record_insert`](Self::record_insert). Afterwards the table
    /// holds the same pairs and the same count as before.
    ///
    /// `new_capacity` is capped at [`max_capacity`](Self::max_capacity), since
    /// buckets at or past `P` would never receive a key.
    pub fn resize<K, V, F>(&mut self, new_capacity: usize, mut insert: F)
    where
        B: Bucket<K, V>,
        F: FnMut(&mut Self, K, V),
    {
        let new_capacity = new_capacity.min(self.max_capacity());
        let expected_len = self.len;
        let old_buckets = mem::replace(&mut self.buckets, empty_slots(new_capacity));
        self.len = 0;

        #[cfg(feature = "logging")]
        log::debug!(
            "resizing hash table from {} to {} buckets with {} entries",
            old_buckets.len(),
            self.buckets.len(),
            expected_len
        );

        let pairs = old_buckets.into_iter().flatten().flat_map(<B as Bucket<K, V>>::into_pairs);
        for (key, value) in pairs {
            insert(self, key, value);
        }

        debug_assert_eq!(self.len, expected_len, "resize changed the entry count");
    }
}

/// Hashes `key` with the standard library's deterministic SipHash
fn hash_code<Q: Hash + ?Sized>(key: &Q) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Allocates `capacity` empty slots, never fewer than one
fn empty_slots<B>(capacity: usize) -> Vec<Option<B>> {
    let capacity = capacity.max(1);
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Unordered list of pairs, enough to exercise resize without a real map
    type PairList = Vec<(u64, String)>;

    impl Bucket<u64, String> for PairList {
        fn into_pairs(self) -> impl Iterator<Item = (u64, String)> {
            self.into_iter()
        }
    }

    fn seeded(config: HashTableConfig, seed: u64) -> HashTableBase<PairList> {
        HashTableBase::with_config_and_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    fn place(table: &mut HashTableBase<PairList>, key: u64, value: String) {
        let index = table.hash_index(&key);
        if let Some(slot) = table.slot_mut(index) {
            slot.get_or_insert_with(Vec::new).push((key, value));
            table.record_insert();
        }
    }

    fn find(table: &HashTableBase<PairList>, key: u64) -> Option<&String> {
        table
            .slot(table.hash_index(&key))
            .and_then(|pairs| pairs.iter().find(|(k, _)| *k == key))
            .map(|(_, v)| v)
    }

    #[test]
    fn test_defaults() {
        let table: HashTableBase<PairList> = HashTableBase::new();
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        assert_eq!(table.prime(), DEFAULT_PRIME);
        assert!((table.load_factor_threshold() - 0.5).abs() < f64::EPSILON);
        assert!(table.is_empty());
        assert!(table.load_factor().abs() < f64::EPSILON);
    }

    #[test]
    fn test_parameters_in_range() {
        for seed in 0..64 {
            let table = seeded(HashTableConfig::default(), seed);
            assert!(table.scale() >= 1 && table.scale() < table.prime());
            assert!(table.shift() < table.prime());
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = seeded(HashTableConfig::default(), 7);
        let b = seeded(HashTableConfig::default(), 7);
        assert_eq!((a.scale(), a.shift()), (b.scale(), b.shift()));
        for key in 0..100_u64 {
            assert_eq!(a.hash_index(&key), b.hash_index(&key));
        }
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let table: HashTableBase<PairList> = HashTableBase::with_capacity(0);
        assert_eq!(table.capacity(), 1);
        assert_eq!(table.hash_index("anything"), 0);
    }

    #[test]
    fn test_borrowed_key_hashes_like_owned() {
        let table: HashTableBase<PairList> = HashTableBase::with_capacity(101);
        assert_eq!(table.hash_index("apple"), table.hash_index(&"apple".to_string()));
    }

    #[test]
    fn test_prime_exceeds_capacity() {
        let table = seeded(HashTableConfig::default().with_capacity(11).with_prime(5), 2);
        assert_eq!(table.prime(), 13);
        assert_eq!(table.max_capacity(), 12);
        assert!(table.scale() >= 1 && table.scale() < 13);

        let at_prime = seeded(HashTableConfig::default().with_capacity(7).with_prime(7), 2);
        assert_eq!(at_prime.prime(), 11);
    }

    #[test]
    fn test_composite_prime_is_rounded_up() {
        let table = seeded(HashTableConfig::default().with_prime(100), 4);
        assert_eq!(table.prime(), 101);
    }

    #[test]
    fn test_resize_capped_below_prime() {
        let mut table = seeded(HashTableConfig::default().with_capacity(3).with_prime(7), 8);
        for key in 0..20 {
            place(&mut table, key, key.to_string());
        }

        table.resize(1_000, |t, k, v| place(t, k, v));

        assert_eq!(table.capacity(), 6);
        assert_eq!(table.len(), 20);
        for key in 0..20 {
            assert_eq!(find(&table, key), Some(&key.to_string()));
        }
    }

    #[test]
    fn test_invalid_threshold_is_ignored() {
        let mut table: HashTableBase<PairList> = HashTableBase::new();
        table.set_load_factor_threshold(0.0);
        table.set_load_factor_threshold(-1.0);
        table.set_load_factor_threshold(f64::NAN);
        assert!((table.load_factor_threshold() - DEFAULT_LOAD_FACTOR_THRESHOLD).abs() < f64::EPSILON);

        table.set_load_factor_threshold(0.75);
        assert!((table.load_factor_threshold() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_factor_tracks_records() {
        let mut table = seeded(HashTableConfig::default().with_capacity(10), 1);
        for key in 0..5 {
            place(&mut table, key, key.to_string());
        }
        assert_eq!(table.len(), 5);
        assert!((table.load_factor() - 0.5).abs() < f64::EPSILON);
        assert!(!table.exceeds_threshold());

        place(&mut table, 5, "5".to_string());
        assert!(table.exceeds_threshold());
    }

    #[test]
    fn test_resize_keeps_every_pair() {
        let mut table = seeded(HashTableConfig::default(), 3);
        for key in 0..40 {
            place(&mut table, key, format!("v{key}"));
        }
        let scale = table.scale();
        let shift = table.shift();

        table.resize(97, |t, k, v| place(t, k, v));

        assert_eq!(table.capacity(), 97);
        assert_eq!(table.len(), 40);
        assert_eq!((table.scale(), table.shift()), (scale, shift));
        for key in 0..40 {
            assert_eq!(find(&table, key), Some(&format!("v{key}")));
        }
        let stored: usize = table.slots().flatten().map(Vec::len).sum();
        assert_eq!(stored, 40);
    }

    #[test]
    fn test_resize_can_shrink() {
        let mut table = seeded(HashTableConfig::default().with_capacity(64), 11);
        for key in 0..10 {
            place(&mut table, key, String::new());
        }
        table.resize(3, |t, k, v| place(t, k, v));
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.len(), 10);
        assert!(table.slots().flatten().all(|pairs| pairs.iter().all(|(k, _)| *k < 10)));
    }

    #[test]
    fn test_clear() {
        let mut table = seeded(HashTableConfig::default(), 5);
        for key in 0..4 {
            place(&mut table, key, String::new());
        }
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        assert!(table.slots().all(|slot| slot.is_none()));
    }

    proptest! {
        #[test]
        fn prop_hash_index_in_bounds(key in any::<u64>(), capacity in 1_usize..100_000, seed in any::<u64>()) {
            let table = seeded(HashTableConfig::default().with_capacity(capacity), seed);
            prop_assert!(table.hash_index(&key) < capacity);
        }

        #[test]
        fn prop_hash_index_in_bounds_with_small_prime(
            key in any::<u64>(),
            capacity in 1_usize..200,
            prime in 0_u64..64,
            seed in any::<u64>(),
        ) {
            let table = seeded(HashTableConfig::default().with_capacity(capacity).with_prime(prime), seed);
            prop_assert!(u64::try_from(capacity).unwrap_or(u64::MAX) < table.prime());
            prop_assert!(crate::utils::is_prime(table.prime()));
            prop_assert!(table.hash_index(&key) < capacity);
        }

        #[test]
        fn prop_hash_index_deterministic(key in ".*", seed in any::<u64>()) {
            let table = seeded(HashTableConfig::default().with_capacity(1009), seed);
            prop_assert_eq!(table.hash_index(&key), table.hash_index(&key));
            prop_assert_eq!(table.hash_index(&key), table.hash_index(key.as_str()));
        }

        #[test]
        fn prop_resize_fidelity(keys in proptest::collection::hash_set(any::<u64>(), 0..200), new_capacity in 1_usize..500) {
            let mut table = seeded(HashTableConfig::default(), 99);
            for &key in &keys {
                place(&mut table, key, key.to_string());
            }
            table.resize(new_capacity, |t, k, v| place(t, k, v));
            prop_assert_eq!(table.len(), keys.len());
            for &key in &keys {
                prop_assert_eq!(find(&table, key), Some(&key.to_string()));
            }
        }
    }
}
