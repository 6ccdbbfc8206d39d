//! # Reload Listener Sort Benchmarks
//!
//! | Scenario | Shape |
//! |----------|-------|
//! | builtins + unanchored mods | every mod needs an anchor edge |
//! | mod chains | only chain heads need anchor edges |
//! | cyclic | sort fails, all cycles collected |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use reload_ordering::{ListenerKey, ListenerSide, ReloadListenerRegistrar};
use reload_tests::support::{numbered_builtins, stage};

const BASELINE: usize = 40;

fn key(raw: &str) -> ListenerKey {
    raw.parse().expect("valid key")
}

fn bench_unanchored_mods(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort-unanchored");
    let builtins = numbered_builtins(BASELINE);

    for mods in [10usize, 100, 500] {
        group.throughput(Throughput::Elements((BASELINE + mods) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(mods), &mods, |b, &mods| {
            b.iter(|| {
                let mut session = builtins.session(ListenerSide::Client);
                for i in 0..mods {
                    session.add_listener(key(&format!("mod:m{i}")), stage("m")).unwrap();
                }
                black_box(session.sort_listeners().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_mod_chains(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort-chains");
    let builtins = numbered_builtins(BASELINE);

    for mods in [10usize, 100, 500] {
        group.throughput(Throughput::Elements((BASELINE + mods) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(mods), &mods, |b, &mods| {
            b.iter(|| {
                let mut session = builtins.session(ListenerSide::Server);
                for i in 0..mods {
                    session.add_listener(key(&format!("mod:m{i}")), stage("m")).unwrap();
                    // Chains of ten, the head of each pinned ahead of a builtin
                    if i % 10 == 0 {
                        let builtin = format!("minecraft:v{}", i % BASELINE);
                        session.add_dependency(&key(&format!("mod:m{i}")), &key(&builtin)).unwrap();
                    } else {
                        session
                            .add_dependency(&key(&format!("mod:m{}", i - 1)), &key(&format!("mod:m{i}")))
                            .unwrap();
                    }
                }
                black_box(session.sort_listeners().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_cycle_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort-cycles");
    let builtins = numbered_builtins(BASELINE);

    for rings in [5usize, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(rings), &rings, |b, &rings| {
            b.iter(|| {
                let mut session = builtins.session(ListenerSide::Client);
                for ring in 0..rings {
                    for i in 0..4 {
                        session.add_listener(key(&format!("mod:r{ring}_{i}")), stage("r")).unwrap();
                    }
                    for i in 0..4 {
                        let from = key(&format!("mod:r{ring}_{i}"));
                        let to = key(&format!("mod:r{ring}_{}", (i + 1) % 4));
                        session.add_dependency(&from, &to).unwrap();
                    }
                }
                black_box(session.sort_listeners().unwrap_err())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_unanchored_mods, bench_mod_chains, bench_cycle_report);
criterion_main!(benches);
