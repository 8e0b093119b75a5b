use quickcheck::{Arbitrary, Gen};

mod integer_set;

/// An enum for the various kinds of "things" to do to
/// an integer set in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op {
    /// Insert the value into the data structure
    Insert(u8),
    /// Remove the value from the data structure
    Remove(u8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1]).unwrap() {
            0 => Op::Insert(u8::arbitrary(g)),
            1 => Op::Remove(u8::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
