//! Errors returned by [`IntegerSet`][crate::IntegerSet] and [`Universe`][crate::Universe].

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when building or querying a set.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The universe size is not of the form `2^(2^k)`, so it can't be split into square-root
    /// sized clusters all the way down.
    #[error("invalid universe size {0}: expected one of 2, 4, 16, 256, 65536 or 4294967296")]
    InvalidUniverse(u64),

    /// The value doesn't fit in the set's universe.
    #[error("value {value} is outside the universe [0, {universe})")]
    OutOfRange {
        /// The offending value.
        value: u64,
        /// The size of the universe it was checked against.
        universe: u64,
    },

    /// Storage for a node's cluster slots couldn't be reserved.
    #[error("failed to allocate cluster slots for a universe of size {universe}")]
    Allocation {
        /// The universe size of the node being built.
        universe: u64,
    },
}
