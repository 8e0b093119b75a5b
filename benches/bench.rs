use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use std::collections::BTreeSet;

use veb::IntegerSet;

const UNIVERSE: u64 = 1 << 16;

#[derive(Clone)]
enum SetEnum {
    Veb(IntegerSet),
    BTree(BTreeSet<u64>),
}

impl SetEnum {
    fn contains(&self, x: u64) -> bool {
        match self {
            Self::Veb(s) => s.contains(x).unwrap(),
            Self::BTree(s) => s.contains(&x),
        }
    }

    fn insert(&mut self, x: u64) {
        match self {
            Self::Veb(s) => {
                s.insert(x).unwrap();
            }
            Self::BTree(s) => {
                s.insert(x);
            }
        }
    }

    fn delete(&mut self, x: u64) {
        match self {
            Self::Veb(s) => {
                s.delete(x).unwrap();
            }
            Self::BTree(s) => {
                s.remove(&x);
            }
        }
    }

    fn successor(&self, x: u64) -> Option<u64> {
        match self {
            Self::Veb(s) => s.successor(x).unwrap(),
            Self::BTree(s) => s.range(x + 1..).next().copied(),
        }
    }
}

/// Helper to bench a function on a set.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of ordered sets before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut SetEnum, u64)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_values = 2u64.pow(num_levels) - 1;
        // Spread the values over the whole universe so clusters aren't all packed at the bottom.
        let stride = UNIVERSE / (num_values + 1);
        let largest_value = stride * (num_values - 1);

        let veb_set = {
            let mut set = IntegerSet::new(UNIVERSE).unwrap();
            for x in 0..num_values {
                set.insert(x * stride).unwrap();
            }

            set
        };
        let btree_set = (0..num_values).map(|x| x * stride).collect::<BTreeSet<_>>();
        let set_tests = [
            ("veb", SetEnum::Veb(veb_set)),
            ("btree", SetEnum::BTree(btree_set)),
        ];
        for (name, set) in set_tests {
            let id = BenchmarkId::new(name, num_values);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut set = black_box(set.clone());
                        let instant = std::time::Instant::now();
                        f(&mut set, black_box(largest_value));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |set, x| {
        let _found = black_box(set.contains(x));
    });
    bench_helper(c, "delete", |set, x| {
        set.delete(x);
    });

    bench_helper(c, "insert", |set, x| {
        set.insert(x + 1);
    });
    bench_helper(c, "successor", |set, x| {
        let _next = black_box(set.successor(x / 2));
    });

    bench_helper(c, "contains-miss", |set, x| {
        let _found = black_box(set.contains(x + 1));
    });
    bench_helper(c, "delete-miss", |set, x| {
        set.delete(x + 1);
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
