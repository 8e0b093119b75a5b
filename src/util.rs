//! The bookkeeping a node does on its own `min`/`max` before touching its clusters.
//!
//! A node never stores its minimum in a cluster. So an insert below the minimum swaps the new
//! value in and pushes the *old* minimum down, and deleting the minimum promotes the smallest
//! clustered value, which then has to be pulled out of its cluster. Keeping those steps here as
//! plain values means the recursive code only has to act on what they return.

/// The smallest and largest values held by a non-empty node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) min: u64,
    pub(crate) max: u64,
}

/// What an insert still has to do below the node that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Carry {
    /// The value was already one of the bounds.
    Done,
    /// This value has to be inserted into the node's clusters.
    Push(u64),
}

/// What a delete still has to do below the node that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    /// The node held exactly the deleted value and is now empty.
    Emptied,
    /// The node has no clusters and these bounds describe everything left in it.
    Settled(Bounds),
    /// `target` has to be removed from the node's clusters and `min` is the node's new minimum.
    /// The maximum can only be recomputed once `target` is gone.
    Pull { min: u64, target: u64 },
}

impl Bounds {
    /// Bounds of a node holding just `value`.
    pub(crate) fn single(value: u64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub(crate) fn is_single(self) -> bool {
        self.min == self.max
    }

    /// Adds `value` to the bounds. The returned [`Carry`] says which value, if any, now belongs
    /// in the clusters: `value` itself, or the old minimum when `value` replaces it.
    pub(crate) fn insert(self, value: u64) -> (Self, Carry) {
        if value == self.min || value == self.max {
            return (self, Carry::Done);
        }

        let (min, pushed) = if value < self.min {
            (value, self.min)
        } else {
            (self.min, value)
        };
        let bounds = Self {
            min,
            max: self.max.max(pushed),
        };

        (bounds, Carry::Push(pushed))
    }

    /// Removes `value`, which must be present. `first_clustered` is the smallest value stored in
    /// the node's clusters, or `None` for a leaf.
    pub(crate) fn remove(self, value: u64, first_clustered: Option<u64>) -> Removal {
        if self.is_single() {
            return Removal::Emptied;
        }

        match first_clustered {
            // A leaf holding two values keeps the other one.
            None => {
                let other = if value == self.min { self.max } else { self.min };
                Removal::Settled(Self::single(other))
            }
            Some(first) if value == self.min => Removal::Pull {
                min: first,
                target: first,
            },
            Some(_) => Removal::Pull {
                min: self.min,
                target: value,
            },
        }
    }
}
