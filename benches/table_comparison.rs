use std::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::BenchmarkGroup;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::measurement::WallTime;
use hashbrown::HashMap as HashbrownMap;
use keyed_tables::Key;
use keyed_tables::OpenAddressingTable;
use keyed_tables::OrderedTable;
use keyed_tables::SeparateChainingTable;
use keyed_tables::Table;
use keyed_tables::UnorderedTable;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;

const SIZES: &[usize] = &[
    (1 << 8),
    (1 << 9),
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
];

/// The array tables are quadratic to fill, so they stop here.
const MAX_ARRAY_SIZE: usize = 1 << 12;

/// Keys drawn by find and erase come from a space this many times larger than
/// the inserted set, so about half of them miss.
const KEY_SPACE_MULTIPLIER: usize = 2;

fn random_keys(count: usize) -> Vec<Key> {
    let mut rng = OsRng;
    (0..count).map(|_| rng.try_next_u32().unwrap()).collect()
}

fn shuffled(keys: &[Key]) -> Vec<Key> {
    let mut keys = keys.to_vec();
    keys.shuffle(&mut SmallRng::from_os_rng());
    keys
}

fn filled<T: Table<u64> + Default>(keys: &[Key]) -> T {
    let mut table = T::default();
    for key in keys {
        table.insert(*key, u64::from(*key));
    }
    table
}

fn filled_hashbrown(keys: &[Key]) -> HashbrownMap<Key, u64> {
    let mut table = HashbrownMap::new();
    for key in keys {
        table.entry(*key).or_insert(u64::from(*key));
    }
    table
}

fn for_each_table(
    group: &mut BenchmarkGroup<'_, WallTime>,
    size: usize,
    mut bench: impl FnMut(&mut BenchmarkGroup<'_, WallTime>, &'static str),
) {
    bench(group, "open_addressing");
    bench(group, "separate_chaining");
    if size <= MAX_ARRAY_SIZE {
        bench(group, "unordered");
        bench(group, "ordered");
    }
    bench(group, "hashbrown");
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES.iter().copied() {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        fn run<T: Table<u64> + Default>(
            group: &mut BenchmarkGroup<'_, WallTime>,
            name: &str,
            size: usize,
            keys: &[Key],
        ) {
            group.bench_function(format!("{name}/{size}"), |b| {
                b.iter_batched(
                    || shuffled(keys),
                    |keys| black_box(filled::<T>(&keys)),
                    BatchSize::SmallInput,
                )
            });
        }

        for_each_table(&mut group, size, |group, name| match name {
            "open_addressing" => run::<OpenAddressingTable<u64>>(group, name, size, &keys),
            "separate_chaining" => run::<SeparateChainingTable<u64>>(group, name, size, &keys),
            "unordered" => run::<UnorderedTable<u64>>(group, name, size, &keys),
            "ordered" => run::<OrderedTable<u64>>(group, name, size, &keys),
            _ => {
                group.bench_function(format!("{name}/{size}"), |b| {
                    b.iter_batched(
                        || shuffled(&keys),
                        |keys| black_box(filled_hashbrown(&keys)),
                        BatchSize::SmallInput,
                    )
                });
            }
        });
    }

    group.finish();
}

fn bench_find_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hit");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES.iter().copied() {
        let keys = random_keys(size);
        let lookups = shuffled(&keys);
        group.throughput(Throughput::Elements(size as u64));

        fn run<T: Table<u64> + Default>(
            group: &mut BenchmarkGroup<'_, WallTime>,
            name: &str,
            size: usize,
            keys: &[Key],
            lookups: &[Key],
        ) {
            let table = filled::<T>(keys);
            group.bench_function(format!("{name}/{size}"), |b| {
                b.iter(|| {
                    for key in lookups {
                        black_box(table.find(*key));
                    }
                })
            });
        }

        for_each_table(&mut group, size, |group, name| match name {
            "open_addressing" => {
                run::<OpenAddressingTable<u64>>(group, name, size, &keys, &lookups)
            }
            "separate_chaining" => {
                run::<SeparateChainingTable<u64>>(group, name, size, &keys, &lookups)
            }
            "unordered" => run::<UnorderedTable<u64>>(group, name, size, &keys, &lookups),
            "ordered" => run::<OrderedTable<u64>>(group, name, size, &keys, &lookups),
            _ => {
                let table = filled_hashbrown(&keys);
                group.bench_function(format!("{name}/{size}"), |b| {
                    b.iter(|| {
                        for key in &lookups {
                            black_box(table.get(key));
                        }
                    })
                });
            }
        });
    }

    group.finish();
}

fn bench_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES.iter().copied() {
        let keys = random_keys(size);
        group.throughput(Throughput::Elements(size as u64));

        fn run<T: Table<u64> + Default>(
            group: &mut BenchmarkGroup<'_, WallTime>,
            name: &str,
            size: usize,
            keys: &[Key],
        ) {
            group.bench_function(format!("{name}/{size}"), |b| {
                b.iter_batched(
                    || (filled::<T>(keys), shuffled(keys)),
                    |(mut table, keys)| {
                        for key in keys {
                            black_box(table.erase(key));
                        }
                        table
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        for_each_table(&mut group, size, |group, name| match name {
            "open_addressing" => run::<OpenAddressingTable<u64>>(group, name, size, &keys),
            "separate_chaining" => run::<SeparateChainingTable<u64>>(group, name, size, &keys),
            "unordered" => run::<UnorderedTable<u64>>(group, name, size, &keys),
            "ordered" => run::<OrderedTable<u64>>(group, name, size, &keys),
            _ => {
                group.bench_function(format!("{name}/{size}"), |b| {
                    b.iter_batched(
                        || (filled_hashbrown(&keys), shuffled(&keys)),
                        |(mut table, keys)| {
                            for key in keys {
                                black_box(table.remove(&key));
                            }
                            table
                        },
                        BatchSize::SmallInput,
                    )
                });
            }
        });
    }

    group.finish();
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Insert,
    Erase,
    Find,
}

fn mixed_operations(size: usize, rng: &mut SmallRng) -> Vec<(Operation, Key)> {
    let insert_distr = Zipf::new(size as f32 - 1.0, 1.0).unwrap();
    let find_erase_distr = Zipf::new((size * KEY_SPACE_MULTIPLIER) as f32 - 1.0, 1.0).unwrap();

    (0..size * 3)
        .map(|_| match rng.random_range(0..3) {
            0 => (Operation::Insert, rng.sample(insert_distr) as Key),
            1 => (Operation::Erase, rng.sample(find_erase_distr) as Key),
            _ => (Operation::Find, rng.sample(find_erase_distr) as Key),
        })
        .collect()
}

fn bench_mixed_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let mut rng = SmallRng::from_os_rng();
    for size in SIZES.iter().copied() {
        let operations = mixed_operations(size, &mut rng);
        group.throughput(Throughput::Elements(operations.len() as u64));

        fn run<T: Table<u64> + Default>(
            group: &mut BenchmarkGroup<'_, WallTime>,
            name: &str,
            size: usize,
            operations: &[(Operation, Key)],
        ) {
            group.bench_function(format!("{name}/{size}"), |b| {
                b.iter(|| {
                    let mut table = T::default();
                    for (operation, key) in operations.iter().copied() {
                        match operation {
                            Operation::Insert => {
                                black_box(table.insert(key, u64::from(key)));
                            }
                            Operation::Erase => {
                                black_box(table.erase(key));
                            }
                            Operation::Find => {
                                black_box(table.find(key));
                            }
                        }
                    }
                    table
                })
            });
        }

        for_each_table(&mut group, size, |group, name| match name {
            "open_addressing" => run::<OpenAddressingTable<u64>>(group, name, size, &operations),
            "separate_chaining" => {
                run::<SeparateChainingTable<u64>>(group, name, size, &operations)
            }
            "unordered" => run::<UnorderedTable<u64>>(group, name, size, &operations),
            "ordered" => run::<OrderedTable<u64>>(group, name, size, &operations),
            _ => {
                group.bench_function(format!("{name}/{size}"), |b| {
                    b.iter(|| {
                        let mut table = HashbrownMap::new();
                        for (operation, key) in operations.iter().copied() {
                            match operation {
                                Operation::Insert => {
                                    black_box(table.entry(key).or_insert(u64::from(key)));
                                }
                                Operation::Erase => {
                                    black_box(table.remove(&key));
                                }
                                Operation::Find => {
                                    black_box(table.get(&key));
                                }
                            }
                        }
                        table
                    })
                });
            }
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random,
    bench_find_hit,
    bench_erase,
    bench_mixed_zipf,
);

criterion_main!(benches);
