//! Carve: a simulator of a fixed-size address space shared by
//! competing processes under pluggable placement strategies.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Carve sub-crates. For most users, adding `carve` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use carve::prelude::*;
//!
//! // A 1024-unit arena, initially one free block.
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//!
//! let receipt = engine.allocate("p1".into(), "editor", 200, PlacementStrategy::FirstFit);
//! assert!(receipt.accepted);
//!
//! let receipt = engine.allocate("p2".into(), "shell", 300, PlacementStrategy::BestFit);
//! assert!(receipt.accepted);
//!
//! // The arena is now [p1 200][p2 300][free 524].
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.blocks.len(), 3);
//! assert_eq!(snapshot.stats.allocated_memory, 500);
//!
//! // Releasing p1 leaves a hole; the free space is now fragmented.
//! engine.deallocate(&"p1".into());
//! let stats = engine.stats();
//! assert!(stats.fragmentation_percentage > 0.0);
//!
//! // Releasing p2 coalesces everything back to a single free block.
//! engine.deallocate(&"p2".into());
//! assert_eq!(engine.snapshot().blocks.len(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `carve-core` | Ids, strategies, requests, receipts, errors, snapshots |
//! | [`engine`] | `carve-engine` | The allocator engine, config, metrics, service wrapper |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types: ids, strategies, requests, receipts, errors, snapshots
/// (`carve-core`).
pub use carve_core as types;

/// The allocator engine and its service wrapper (`carve-engine`).
pub use carve_engine as engine;

/// The types most callers need, in one import.
pub mod prelude {
    pub use carve_core::{
        EngineSnapshot, PlacementStrategy, ProcessId, ProcessStatus, Receipt, Request,
        RequestError,
    };
    pub use carve_engine::{Engine, EngineConfig, EngineHandle, EngineService};
}
