//! This crate exposes a van Emde Boas tree: an ordered set of integers drawn from a fixed
//! universe `[0, U)`.
//!
//! ## van Emde Boas Tree
//!
//! A van Emde Boas (vEB) tree supports insert, delete, membership, successor and predecessor in
//! `O(lg lg U)` time. It trades the `O(lg N)` of a balanced BST, which depends on how many
//! values are stored, for a bound that only depends on how big the values can get.
//!
//! A vEB tree is defined recursively. A node over a universe of size `U` splits each value into
//! a "high" half (which of the `sqrt(U)` clusters it belongs to) and a "low" half (where it sits
//! inside that cluster). Each node keeps:
//!
//! 1. Its `min` and `max`. The `min` is stored _only_ here and never in a cluster.
//! 2. `sqrt(U)` clusters, each a vEB tree over `sqrt(U)` values. A cluster only exists once
//!    something has been inserted into it.
//! 3. A summary, a vEB tree over `sqrt(U)` values holding the indices of the non-empty clusters.
//!
//! > Note that a node over a universe of size 2 has no clusters or summary. These nodes are the
//! > leaves and their `min` and `max` are all there is.
//!
//! Keeping the `min` out of the clusters is what makes the bound work: inserting into an empty
//! cluster only has to set its `min`, so each operation makes at most one "real" recursive call
//! per level, and every level halves the number of bits in the value.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod integer_set;
pub mod universe;
mod util;


pub use error::{Error, Result};
pub use integer_set::IntegerSet;
pub use universe::Universe;
