//! Core types for the Carve memory-placement simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Carve workspace:
//! typed identifiers, placement strategies, the request/receipt
//! contract, the error taxonomy, and snapshot (read-model) types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod request;
pub mod snapshot;
pub mod strategy;

pub use error::RequestError;
pub use id::{OpSeq, ProcessId};
pub use request::{Receipt, Request};
pub use snapshot::{
    BlockView, EngineSnapshot, HistoryAction, HistoryRecord, ProcessRecord, ProcessStatus,
    StatsSnapshot,
};
pub use strategy::{ParseStrategyError, PlacementStrategy};
