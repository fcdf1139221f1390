//! # MAD Containers
//!
//! Two building blocks for keyed and prioritized data:
//!
//! - `HashTableBase`: bucket array, randomized Multiply-Add-Divide
//!   compression, load tracking and a resize primitive. Concrete maps own one
//!   and supply the collision strategy; `ChainedHashMap` does it by separate
//!   chaining.
//! - `BinaryMinHeap`: an array-backed min-heap with logarithmic push and pop.
//!
//! `KeyedEntry` pairs a key with a value and orders by the key alone, so it
//! works as a heap element or a chain entry.
//!
//! ## Basic Usage
//!
//! ```rust
//! use mad_containers::{BinaryMinHeap, ChainedHashMap, Error, KeyedMap};
//!
//! let mut map = ChainedHashMap::new();
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//! assert_eq!(map.get("apple"), Ok(&1));
//! assert_eq!(map.remove("cherry"), Err(Error::KeyNotFound));
//!
//! let mut heap = BinaryMinHeap::new();
//! for value in [5, 3, 8, 1] {
//!     heap.push(value);
//! }
//! assert_eq!(heap.pop_min(), Ok(1));
//! assert_eq!(heap.peek_min(), Ok(&3));
//! ```
//!
//! ## Deterministic Placement
//!
//! The compression parameters come from a random source supplied at
//! construction, so a seeded generator reproduces bucket placement:
//!
//! ```rust
//! use mad_containers::{HashTableBase, HashTableConfig};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let config = HashTableConfig::default().with_capacity(31);
//! let a: HashTableBase<()> = HashTableBase::with_config_and_rng(config, &mut StdRng::seed_from_u64(1));
//! let b: HashTableBase<()> = HashTableBase::with_config_and_rng(config, &mut StdRng::seed_from_u64(1));
//! assert_eq!(a.hash_index("key"), b.hash_index("key"));
//! ```

/// Module implementing the array-backed min-heap
mod binary_min_heap;
/// Module implementing a separate-chaining map on top of the hash table base
mod chained_hash_map;
/// Module defining the crate error type
mod error;
/// Module implementing the shared hash table infrastructure
pub mod hash_table_base;
/// Module defining the key-ordered entry
mod keyed_entry;
/// Module defining the map capability trait
mod keyed_map;
/// Utility functions and traits for the hash maps
pub mod utils;

pub use binary_min_heap::BinaryMinHeap;
pub use chained_hash_map::{ChainedHashMap, Iter};
pub use error::{Error, Result};
pub use hash_table_base::{Bucket, HashTableBase, HashTableConfig};
pub use keyed_entry::KeyedEntry;
pub use keyed_map::KeyedMap;
pub use utils::HashMapExtensions;
