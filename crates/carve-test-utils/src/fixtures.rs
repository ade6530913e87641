//! Engine fixtures with prescribed arena layouts.

use carve_core::PlacementStrategy;
use carve_engine::{Engine, EngineConfig};

/// One slot of a prescribed layout, left to right.
#[derive(Clone, Copy, Debug)]
pub enum Slot {
    /// A free block of the given size.
    Free(u32),
    /// A block allocated to the named process.
    Used(u32, &'static str),
}

impl Slot {
    fn size(self) -> u32 {
        match self {
            Slot::Free(size) | Slot::Used(size, _) => size,
        }
    }
}

/// Build an engine whose arena matches `slots` exactly.
///
/// The arena capacity is the sum of the slot sizes. Free slots are
/// realized by allocating a placeholder process (`hole-N`) and
/// deallocating it afterwards, so the engine's process table and
/// history contain those placeholder operations — use this fixture for
/// block-layout and strategy-selection assertions, not for
/// history-shape assertions.
///
/// Adjacent `Free` slots would coalesce into one block; pass the
/// layout you actually want to observe.
///
/// # Panics
///
/// Panics if a slot has size zero or the engine rejects a setup
/// operation; both indicate a broken fixture, not a broken engine.
pub fn engine_with_layout(slots: &[Slot]) -> Engine {
    let capacity: u32 = slots.iter().map(|s| s.size()).sum();
    let config = EngineConfig {
        capacity,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(config).expect("fixture config is valid");

    let mut holes = Vec::new();
    for (n, slot) in slots.iter().enumerate() {
        let (size, pid) = match *slot {
            Slot::Free(size) => {
                let pid = format!("hole-{n}");
                holes.push(pid.clone());
                (size, pid)
            }
            Slot::Used(size, name) => (size, name.to_string()),
        };
        let receipt = engine.allocate(
            pid.clone().into(),
            pid,
            size,
            PlacementStrategy::FirstFit,
        );
        assert!(receipt.accepted, "fixture slot rejected: {}", receipt.message);
    }
    for pid in holes {
        let receipt = engine.deallocate(&pid.into());
        assert!(receipt.accepted, "fixture hole rejected: {}", receipt.message);
    }
    engine
}

/// The mixed layout exercised by the strategy-selection tests:
/// free blocks of 100, 200, 50, 300, and 374 units separated by small
/// allocations.
///
/// ```text
/// [free 100][a 8][free 200][b 8][free 50][c 8][free 300][d 8][free 374]
/// ```
pub fn mixed_free_layout() -> Engine {
    engine_with_layout(&[
        Slot::Free(100),
        Slot::Used(8, "a"),
        Slot::Free(200),
        Slot::Used(8, "b"),
        Slot::Free(50),
        Slot::Used(8, "c"),
        Slot::Free(300),
        Slot::Used(8, "d"),
        Slot::Free(374),
    ])
}
