//! Property tests: the partition invariants hold after every
//! operation, for arbitrary operation sequences.

use carve_core::{EngineSnapshot, PlacementStrategy};
use carve_engine::{Engine, EngineConfig};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Allocate {
        pid: u8,
        size: u32,
        strategy: PlacementStrategy,
    },
    Deallocate {
        pid: u8,
    },
    Reset,
}

fn arb_strategy() -> impl Strategy<Value = PlacementStrategy> {
    prop_oneof![
        Just(PlacementStrategy::FirstFit),
        Just(PlacementStrategy::BestFit),
        Just(PlacementStrategy::WorstFit),
        Just(PlacementStrategy::NextFit),
    ]
}

/// Sizes straddle the valid range on purpose: 0 and >1024 exercise the
/// rejection paths, which must also leave the invariants intact.
fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..12, 0u32..1100, arb_strategy())
            .prop_map(|(pid, size, strategy)| Op::Allocate { pid, size, strategy }),
        4 => (0u8..12).prop_map(|pid| Op::Deallocate { pid }),
        1 => Just(Op::Reset),
    ]
}

fn run_op(engine: &mut Engine, op: Op) {
    match op {
        Op::Allocate {
            pid,
            size,
            strategy,
        } => {
            engine.allocate(format!("p{pid}").into(), format!("proc {pid}"), size, strategy);
        }
        Op::Deallocate { pid } => {
            engine.deallocate(&format!("p{pid}").into());
        }
        Op::Reset => {
            engine.reset();
        }
    }
}

/// Snapshot-level partition check: blocks are contiguous from offset 0
/// and cover the arena exactly.
fn assert_contiguous(snapshot: &EngineSnapshot) {
    let mut expected_offset = 0u32;
    for block in &snapshot.blocks {
        assert_eq!(block.offset, expected_offset);
        assert!(block.size >= 1);
        expected_offset += block.size;
    }
    assert_eq!(expected_offset, snapshot.stats.total_memory);
}

proptest! {
    #[test]
    fn partition_invariants_hold_after_every_operation(
        ops in proptest::collection::vec(arb_op(), 1..80),
    ) {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        for op in ops {
            run_op(&mut engine, op);

            prop_assert!(engine.blocks().verify_partition().is_ok());

            let snapshot = engine.snapshot();
            assert_contiguous(&snapshot);

            // No two consecutive blocks are both free.
            for pair in snapshot.blocks.windows(2) {
                prop_assert!(pair[0].allocated() || pair[1].allocated());
            }

            let stats = &snapshot.stats;
            prop_assert_eq!(stats.allocated_memory + stats.free_memory, stats.total_memory);
            prop_assert!((0.0..=100.0).contains(&stats.utilization_percentage));
            prop_assert!((0.0..=100.0).contains(&stats.fragmentation_percentage));
        }
    }

    #[test]
    fn every_active_process_owns_exactly_one_block(
        ops in proptest::collection::vec(arb_op(), 1..80),
    ) {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        for op in ops {
            run_op(&mut engine, op);

            let snapshot = engine.snapshot();
            for process in snapshot
                .processes
                .iter()
                .filter(|p| p.status == carve_core::ProcessStatus::Allocated)
            {
                let owned: Vec<_> = snapshot
                    .blocks
                    .iter()
                    .filter(|b| b.owner.as_ref() == Some(&process.id))
                    .collect();
                prop_assert_eq!(owned.len(), 1);
                prop_assert_eq!(owned[0].size, process.size);
            }
        }
    }

    #[test]
    fn utilization_is_conserved_by_matched_pairs(
        base in 1u32..600,
        size in 1u32..300,
        strategy in arb_strategy(),
    ) {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.allocate("base".into(), "base", base, PlacementStrategy::FirstFit);

        let before = engine.stats().utilization_percentage;
        let receipt = engine.allocate("probe".into(), "probe", size, strategy);
        prop_assert!(receipt.accepted);

        let expected_delta = 100.0 * f64::from(size) / 1024.0;
        let during = engine.stats().utilization_percentage;
        prop_assert!((during - before - expected_delta).abs() < 1e-9);

        engine.deallocate(&"probe".into());
        let after = engine.stats().utilization_percentage;
        prop_assert!((after - before).abs() < 1e-9);
    }

    #[test]
    fn history_seq_is_strictly_increasing(
        ops in proptest::collection::vec(arb_op(), 1..60),
    ) {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        for op in ops {
            run_op(&mut engine, op);
        }
        let history = engine.snapshot().history;
        for pair in history.windows(2) {
            prop_assert!(pair[0].seq < pair[1].seq);
        }
    }
}
