//! The universe a set is built over.
//!
//! A van Emde Boas node of universe `U` splits every value `x` into a cluster index
//! `high = x / sqrt(U)` and an offset `low = x % sqrt(U)`, and both halves must again be valid
//! universes. That only works all the way down when `U = 2^(2^k)`, so `log2(U)` is always a power
//! of two and the split is a shift and a mask.
//!
//! # Examples
//!
//! ```
//! use veb::Universe;
//!
//! let universe = Universe::new(16).unwrap();
//! assert_eq!(universe.split(9), (2, 1));
//! assert_eq!(universe.join(2, 1), 9);
//! assert_eq!(universe.lower().size(), 4);
//!
//! assert!(Universe::new(8).is_err());
//! assert_eq!(Universe::covering(300).unwrap().size(), 65536);
//! ```

use std::convert::TryFrom;
use std::fmt;

use crate::error::{Error, Result};

/// The largest supported `log2(U)`. Values are `u64`, so `sqrt(2^64)` sized cluster indices
/// would still fit but the universe size itself wouldn't.
const MAX_BITS: u32 = 32;

/// A validated universe size: one of 2, 4, 16, 256, 65536 or 2^32.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Universe {
    /// `log2` of the universe size. Always a power of two no larger than [`MAX_BITS`].
    bits: u32,
}

impl Universe {
    /// The smallest universe, holding only 0 and 1. Nodes of this size are leaves.
    pub const LEAF: Self = Self { bits: 1 };

    /// The largest universe, holding every `u32`.
    pub const MAX: Self = Self { bits: MAX_BITS };

    /// Validates `size` as a universe size.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUniverse`] if `size` is not `2^(2^k)` for some `k` in `0..=5`.
    pub fn new(size: u64) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(Error::InvalidUniverse(size));
        }
        Self::from_bits(size.trailing_zeros()).map_err(|_| Error::InvalidUniverse(size))
    }

    /// Builds the universe of size `2^bits`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUniverse`] if `bits` is not a power of two no larger than 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        if bits.is_power_of_two() && bits <= MAX_BITS {
            Ok(Self { bits })
        } else {
            Err(Error::InvalidUniverse(1u64.checked_shl(bits).unwrap_or(0)))
        }
    }

    /// The smallest universe containing `value`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `value` doesn't fit in even the largest universe.
    pub fn covering(value: u64) -> Result<Self> {
        let needed = (u64::BITS - value.leading_zeros()).max(1).next_power_of_two();
        if needed > MAX_BITS {
            return Err(Error::OutOfRange {
                value,
                universe: Self::MAX.size(),
            });
        }
        Ok(Self { bits: needed })
    }

    /// Number of distinct values in this universe.
    pub fn size(self) -> u64 {
        1 << self.bits
    }

    /// `log2` of the universe size.
    pub fn bits(self) -> u32 {
        self.bits
    }

    /// Whether nodes of this universe are leaves (no clusters, no summary).
    pub fn is_leaf(self) -> bool {
        self.bits == 1
    }

    /// The universe of every cluster and of the summary: `sqrt(U)`.
    ///
    /// A leaf is its own lower universe.
    pub fn lower(self) -> Self {
        Self {
            bits: (self.bits / 2).max(1),
        }
    }

    /// How many cluster slots a node of this universe has.
    pub fn clusters(self) -> usize {
        if self.is_leaf() {
            0
        } else {
            1 << self.half()
        }
    }

    /// Whether `value` is inside this universe.
    pub fn contains(self, value: u64) -> bool {
        value < self.size()
    }

    /// Returns `value` if it's inside this universe.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] otherwise.
    pub fn check(self, value: u64) -> Result<u64> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(Error::OutOfRange {
                value,
                universe: self.size(),
            })
        }
    }

    /// Splits `value` into `(high, low)`: its cluster index and the offset inside that cluster.
    pub fn split(self, value: u64) -> (u64, u64) {
        let half = self.half();
        (value >> half, value & ((1 << half) - 1))
    }

    /// Inverse of [`split`][Self::split].
    pub fn join(self, high: u64, low: u64) -> u64 {
        (high << self.half()) | low
    }

    fn half(self) -> u32 {
        self.bits / 2
    }
}

impl TryFrom<u64> for Universe {
    type Error = Error;

    fn try_from(size: u64) -> Result<Self> {
        Self::new(size)
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Universe(2^{})", self.bits)
    }
}
