use veb::IntegerSet;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

fn set_of(xs: &[u8]) -> IntegerSet {
    let mut set = IntegerSet::new(256).unwrap();
    for x in xs {
        set.insert(u64::from(*x)).unwrap();
    }
    set
}

/// Applies a set of operations to an integer set and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same values in both.
fn do_ops(ops: &[Op], set: &mut IntegerSet, model: &mut BTreeSet<u64>) {
    for op in ops {
        match *op {
            Op::Insert(x) => {
                let x = u64::from(x);
                assert_eq!(set.insert(x), Ok(model.insert(x)));
            }
            Op::Remove(x) => {
                let x = u64::from(x);
                assert_eq!(set.delete(x), Ok(model.remove(&x)));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_u8(ops: Vec<Op>) -> bool {
    let mut set = IntegerSet::new(256).unwrap();
    let mut model = BTreeSet::new();

    do_ops(&ops, &mut set, &mut model);
    (0..256).all(|x| set.contains(x) == Ok(model.contains(&x)))
        && set.min() == model.iter().next().copied()
        && set.max() == model.iter().next_back().copied()
}

#[quickcheck]
fn contains(xs: Vec<u8>) -> bool {
    let set = set_of(&xs);

    xs.iter().all(|x| set.contains(u64::from(*x)) == Ok(true))
}

#[quickcheck]
fn contains_not(xs: Vec<u8>, nots: Vec<u8>) -> bool {
    let set = set_of(&xs);
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| set.contains(u64::from(*x)) == Ok(false))
}

#[quickcheck]
fn with_deletions(xs: Vec<u8>, deletes: Vec<u8>) -> bool {
    let mut set = set_of(&xs);
    for delete in &deletes {
        set.delete(u64::from(*delete)).unwrap();
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| set.contains(u64::from(*x)) == Ok(false))
        && still_present
            .iter()
            .all(|x| set.contains(u64::from(*x)) == Ok(true))
}

#[quickcheck]
fn deleting_everything_empties(xs: Vec<u8>) -> bool {
    let mut set = set_of(&xs);
    for x in &xs {
        set.delete(u64::from(*x)).unwrap();
    }

    set.is_empty() && set.len() == 0 && set.min().is_none() && set.iter().next().is_none()
}

#[quickcheck]
fn reinserting_changes_nothing(xs: Vec<u8>) -> bool {
    let mut set = set_of(&xs);
    let before = set.clone();
    for x in &xs {
        set.insert(u64::from(*x)).unwrap();
    }

    set == before
        && (0..256).all(|x| {
            set.successor(x) == before.successor(x) && set.predecessor(x) == before.predecessor(x)
        })
}

#[quickcheck]
fn successor_and_predecessor(xs: Vec<u8>, probe: u8) -> bool {
    let set = set_of(&xs);
    let model: BTreeSet<u64> = xs.into_iter().map(u64::from).collect();
    let probe = u64::from(probe);

    set.successor(probe) == Ok(model.range(probe + 1..).next().copied())
        && set.predecessor(probe) == Ok(model.range(..probe).next_back().copied())
}

#[quickcheck]
fn iterates_in_order(xs: Vec<u8>) -> bool {
    let set = set_of(&xs);
    let model: BTreeSet<u64> = xs.into_iter().map(u64::from).collect();

    set.iter().eq(model.iter().copied()) && set.iter().rev().eq(model.iter().rev().copied())
}
