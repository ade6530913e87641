//! Criterion micro-benchmarks for placement strategies and snapshots.

use carve_bench::churn_workload;
use carve_core::PlacementStrategy;
use carve_engine::{Engine, EngineConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A large arena so churn produces many blocks and the placement scan
/// dominates.
fn large_config() -> EngineConfig {
    EngineConfig {
        capacity: 1 << 16,
        ..EngineConfig::default()
    }
}

/// Replay a 512-operation churn workload under each strategy.
fn bench_churn(c: &mut Criterion) {
    for strategy in PlacementStrategy::ALL {
        let requests = churn_workload(42, 512, strategy);
        c.bench_function(&format!("churn_512/{strategy}"), |b| {
            b.iter(|| {
                let mut engine = Engine::new(large_config()).unwrap();
                for request in &requests {
                    black_box(engine.apply(request.clone()));
                }
                engine
            })
        });
    }
}

/// Snapshot cost over a fragmented arena.
fn bench_snapshot(c: &mut Criterion) {
    let mut engine = Engine::new(large_config()).unwrap();
    for request in churn_workload(7, 256, PlacementStrategy::BestFit) {
        engine.apply(request);
    }
    c.bench_function("snapshot_after_churn_256", |b| {
        b.iter(|| black_box(engine.snapshot()))
    });
}

criterion_group!(benches, bench_churn, bench_snapshot);
criterion_main!(benches);
