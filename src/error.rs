//! Error type shared by the heap and the keyed maps

/// Failures reported by container operations.
///
/// A container that returns one of these is left untouched and stays usable.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `peek_min` or `pop_min` was called on a heap with no elements.
    #[error("heap is empty")]
    EmptyContainer,

    /// A lookup or removal named a key the map does not hold.
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias for container operations.
pub type Result<T> = std::result::Result<T, Error>;
