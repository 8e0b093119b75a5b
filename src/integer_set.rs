//! A van Emde Boas tree over a fixed universe of integers.
//!
//! Every operation except [`IntegerSet::clear`] and iteration runs in `O(lg lg U)` where `U` is
//! the universe size: each level of recursion halves the number of bits left in the value.
//!
//! # Examples
//!
//! ```
//! use veb::IntegerSet;
//!
//! let mut set = IntegerSet::new(16).unwrap();
//!
//! for x in [5, 2, 8, 15] {
//!     set.insert(x).unwrap();
//! }
//!
//! assert_eq!(set.min(), Some(2));
//! assert_eq!(set.max(), Some(15));
//! assert_eq!(set.contains(3), Ok(false));
//! assert_eq!(set.successor(5), Ok(Some(8)));
//! assert_eq!(set.predecessor(8), Ok(Some(5)));
//!
//! // Deleting returns whether the value was there.
//! assert_eq!(set.delete(5), Ok(true));
//! assert_eq!(set.delete(5), Ok(false));
//! assert_eq!(set.successor(2), Ok(Some(8)));
//!
//! // Values outside the universe are rejected rather than wrapped.
//! assert!(set.insert(16).is_err());
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::universe::Universe;
use crate::util::{Bounds, Carry, Removal};

/// An ordered set of integers in `[0, U)` for a universe size `U` fixed at construction.
///
/// Dropping the set tears down every materialized cluster and summary exactly once.
#[derive(Clone)]
pub struct IntegerSet {
    root: Node,
    len: usize,
}

/// One level of the recursive structure. Values passed to a `Node` are already known to be
/// inside its universe.
#[derive(Clone)]
struct Node {
    universe: Universe,
    /// `None` iff the node is empty.
    bounds: Option<Bounds>,
    /// `None` iff the universe is a leaf.
    branch: Option<Branch>,
}

/// The substructure of a non-leaf node. The node's `min` is never stored in here, its `max` is
/// whenever it differs from `min`.
#[derive(Clone)]
struct Branch {
    /// Indices of the non-empty clusters.
    summary: Box<Node>,
    /// A slot is `None` until something is inserted into it and again once it empties.
    clusters: Vec<Option<Box<Node>>>,
}

impl Node {
    fn new(universe: Universe) -> Result<Self> {
        let branch = if universe.is_leaf() {
            None
        } else {
            Some(Branch::new(universe)?)
        };

        Ok(Self {
            universe,
            bounds: None,
            branch,
        })
    }

    fn holding(universe: Universe, value: u64) -> Result<Self> {
        let mut node = Self::new(universe)?;
        node.bounds = Some(Bounds::single(value));
        Ok(node)
    }

    fn min(&self) -> Option<u64> {
        self.bounds.map(|bounds| bounds.min)
    }

    fn max(&self) -> Option<u64> {
        self.bounds.map(|bounds| bounds.max)
    }

    fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    fn contains(&self, value: u64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        if value == bounds.min || value == bounds.max {
            return true;
        }
        let Some(branch) = &self.branch else {
            return false;
        };

        let (high, low) = self.universe.split(value);
        branch.cluster(high).map_or(false, |cluster| cluster.contains(low))
    }

    /// Inserts `value`. Nothing in this node changes unless every fallible step below it
    /// succeeded.
    fn insert(&mut self, value: u64) -> Result<()> {
        let Some(bounds) = self.bounds else {
            self.bounds = Some(Bounds::single(value));
            return Ok(());
        };

        let (bounds, carry) = bounds.insert(value);
        if let (Carry::Push(pushed), Some(branch)) = (carry, self.branch.as_mut()) {
            branch.push(self.universe, pushed)?;
        }
        self.bounds = Some(bounds);

        Ok(())
    }

    /// Deletes `value`, which must be present.
    fn delete(&mut self, value: u64) {
        let Some(bounds) = self.bounds else {
            return;
        };

        let universe = self.universe;
        let first = self
            .branch
            .as_ref()
            .and_then(|branch| branch.first(universe));

        match bounds.remove(value, first) {
            Removal::Emptied => self.bounds = None,
            Removal::Settled(bounds) => self.bounds = Some(bounds),
            Removal::Pull { min, target } => {
                let Some(branch) = self.branch.as_mut() else {
                    unreachable!("only nodes with clusters pull values out of them");
                };
                branch.pull(universe, target);

                let max = if target == bounds.max {
                    branch.last(universe).unwrap_or(min)
                } else {
                    bounds.max
                };
                self.bounds = Some(Bounds { min, max });
            }
        }
    }

    fn successor(&self, value: u64) -> Option<u64> {
        let bounds = self.bounds?;
        if value < bounds.min {
            return Some(bounds.min);
        }
        if value >= bounds.max {
            return None;
        }
        // A leaf only gets here with `value == 0` and `max == 1`.
        let Some(branch) = &self.branch else {
            return Some(bounds.max);
        };

        let universe = self.universe;
        let (high, low) = universe.split(value);
        if let Some(cluster) = branch.cluster(high) {
            if cluster.max().map_or(false, |max| low < max) {
                return Some(universe.join(high, cluster.successor(low)?));
            }
        }

        let next = branch.summary.successor(high)?;
        Some(universe.join(next, branch.cluster(next)?.min()?))
    }

    fn predecessor(&self, value: u64) -> Option<u64> {
        let bounds = self.bounds?;
        if value > bounds.max {
            return Some(bounds.max);
        }
        if value <= bounds.min {
            return None;
        }
        // A leaf only gets here with `value == 1` and `min == 0`.
        let Some(branch) = &self.branch else {
            return Some(bounds.min);
        };

        let universe = self.universe;
        let (high, low) = universe.split(value);
        if let Some(cluster) = branch.cluster(high) {
            if cluster.min().map_or(false, |min| low > min) {
                return Some(universe.join(high, cluster.predecessor(low)?));
            }
        }

        // The minimum isn't in any cluster so it's the fallback when no cluster has an answer.
        match branch.summary.predecessor(high) {
            Some(prev) => Some(universe.join(prev, branch.cluster(prev)?.max()?)),
            None => Some(bounds.min),
        }
    }

    fn clear(&mut self) {
        self.bounds = None;
        if let Some(branch) = &mut self.branch {
            branch.clear();
        }
    }
}

impl Branch {
    fn new(universe: Universe) -> Result<Self> {
        let slots = universe.clusters();
        let mut clusters = Vec::new();
        clusters
            .try_reserve_exact(slots)
            .map_err(|_| Error::Allocation {
                universe: universe.size(),
            })?;
        clusters.resize_with(slots, || None);

        Ok(Self {
            summary: Box::new(Node::new(universe.lower())?),
            clusters,
        })
    }

    fn cluster(&self, high: u64) -> Option<&Node> {
        self.clusters.get(high as usize)?.as_deref()
    }

    /// The smallest clustered value, as a value of the owning node's `universe`.
    fn first(&self, universe: Universe) -> Option<u64> {
        let high = self.summary.min()?;
        Some(universe.join(high, self.cluster(high)?.min()?))
    }

    /// The largest clustered value, as a value of the owning node's `universe`.
    fn last(&self, universe: Universe) -> Option<u64> {
        let high = self.summary.max()?;
        Some(universe.join(high, self.cluster(high)?.max()?))
    }

    fn push(&mut self, universe: Universe, value: u64) -> Result<()> {
        let (high, low) = universe.split(value);
        if let Some(cluster) = self.clusters[high as usize].as_deref_mut() {
            return cluster.insert(low);
        }

        // Build the cluster and record it in the summary before filling the slot so a failure
        // leaves both untouched.
        let cluster = Node::holding(universe.lower(), low)?;
        self.summary.insert(high)?;
        self.clusters[high as usize] = Some(Box::new(cluster));
        log::trace!("materialized cluster {} of {:?}", high, universe);

        Ok(())
    }

    fn pull(&mut self, universe: Universe, value: u64) {
        let (high, low) = universe.split(value);
        let Some(cluster) = self.clusters[high as usize].as_deref_mut() else {
            return;
        };

        cluster.delete(low);
        if cluster.is_empty() {
            self.summary.delete(high);
            self.clusters[high as usize] = None;
            log::trace!("released cluster {} of {:?}", high, universe);
        }
    }

    fn clear(&mut self) {
        for slot in &mut self.clusters {
            *slot = None;
        }
        self.summary.clear();
    }
}

impl IntegerSet {
    /// Creates an empty set over `[0, universe_size)`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUniverse`] unless `universe_size` is one of 2, 4, 16, 256, 65536 or 2^32.
    /// [`Error::Allocation`] if the root's cluster slots can't be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use veb::{Error, IntegerSet};
    ///
    /// assert!(IntegerSet::new(256).unwrap().is_empty());
    /// assert_eq!(IntegerSet::new(100).unwrap_err(), Error::InvalidUniverse(100));
    /// ```
    pub fn new(universe_size: u64) -> Result<Self> {
        Self::with_universe(Universe::new(universe_size)?)
    }

    /// Creates an empty set over an already validated universe.
    ///
    /// # Errors
    ///
    /// [`Error::Allocation`] if the root's cluster slots can't be allocated.
    pub fn with_universe(universe: Universe) -> Result<Self> {
        let root = Node::new(universe)?;
        log::debug!("created integer set over {:?}", universe);

        Ok(Self { root, len: 0 })
    }

    /// The universe this set was built over.
    pub fn universe(&self) -> Universe {
        self.root.universe
    }

    /// Number of distinct values in the universe.
    pub fn universe_size(&self) -> u64 {
        self.universe().size()
    }

    /// Number of values in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// The smallest value in the set.
    pub fn min(&self) -> Option<u64> {
        self.root.min()
    }

    /// The largest value in the set.
    pub fn max(&self) -> Option<u64> {
        self.root.max()
    }

    /// Whether `value` is in the set.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `value` is outside the universe.
    pub fn contains(&self, value: u64) -> Result<bool> {
        let value = self.universe().check(value)?;
        Ok(self.root.contains(value))
    }

    /// Adds `value` to the set. Returns whether it was newly added; inserting a value that's
    /// already present changes nothing.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `value` is outside the universe. [`Error::Allocation`] if a new
    /// cluster couldn't be built, in which case the set is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use veb::IntegerSet;
    ///
    /// let mut set = IntegerSet::new(4).unwrap();
    /// assert_eq!(set.insert(3), Ok(true));
    /// assert_eq!(set.insert(3), Ok(false));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: u64) -> Result<bool> {
        if self.contains(value)? {
            return Ok(false);
        }

        self.root.insert(value)?;
        self.len += 1;
        Ok(true)
    }

    /// Removes `value` from the set. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `value` is outside the universe.
    pub fn delete(&mut self, value: u64) -> Result<bool> {
        if !self.contains(value)? {
            return Ok(false);
        }

        self.root.delete(value);
        self.len -= 1;
        Ok(true)
    }

    /// The smallest value in the set strictly greater than `value`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `value` is outside the universe.
    ///
    /// # Examples
    ///
    /// ```
    /// use veb::IntegerSet;
    ///
    /// let mut set = IntegerSet::new(256).unwrap();
    /// set.insert(10).unwrap();
    /// set.insert(200).unwrap();
    ///
    /// assert_eq!(set.successor(0), Ok(Some(10)));
    /// assert_eq!(set.successor(10), Ok(Some(200)));
    /// assert_eq!(set.successor(200), Ok(None));
    /// ```
    pub fn successor(&self, value: u64) -> Result<Option<u64>> {
        let value = self.universe().check(value)?;
        Ok(self.root.successor(value))
    }

    /// The largest value in the set strictly less than `value`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `value` is outside the universe.
    pub fn predecessor(&self, value: u64) -> Result<Option<u64>> {
        let value = self.universe().check(value)?;
        Ok(self.root.predecessor(value))
    }

    /// Removes every value, releasing all clusters. The universe stays the same.
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
        log::debug!("cleared integer set over {:?}", self.universe());
    }

    /// Iterates over the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use veb::IntegerSet;
    ///
    /// let mut set = IntegerSet::new(16).unwrap();
    /// for x in [9, 1, 4] {
    ///     set.insert(x).unwrap();
    /// }
    ///
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [1, 4, 9]);
    /// assert_eq!(set.iter().rev().collect::<Vec<_>>(), [9, 4, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            root: &self.root,
            front: self.root.min(),
            back: self.root.max(),
            remaining: self.len,
        }
    }
}

impl PartialEq for IntegerSet {
    fn eq(&self, other: &Self) -> bool {
        self.universe() == other.universe() && self.len == other.len && self.iter().eq(other)
    }
}

impl Eq for IntegerSet {}

impl fmt::Debug for IntegerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a IntegerSet {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over an [`IntegerSet`], created by [`IntegerSet::iter`]. Each step is a
/// successor (or, from the back, predecessor) query.
pub struct Iter<'a> {
    root: &'a Node,
    front: Option<u64>,
    back: Option<u64>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.front?;
        self.front = self.root.successor(value);
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.back?;
        self.back = self.root.predecessor(value);
        self.remaining -= 1;
        Some(value)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
