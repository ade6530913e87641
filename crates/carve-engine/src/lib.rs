//! Allocator engine for the Carve memory-placement simulator.
//!
//! [`Engine`] is a single in-process state machine over a fixed-capacity
//! arena: it maintains the ordered block partition, applies placement
//! strategies, tracks process records, and appends the operation
//! history. [`EngineService`] wraps an engine in a dedicated thread for
//! callers that need serialized access from multiple threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod blocks;
pub mod config;
pub mod engine;
pub mod history;
pub mod metrics;
pub mod placement;
pub mod process;
pub mod service;

pub use blocks::{Block, BlockList, FreeSpan};
pub use config::{ConfigError, EngineConfig, DEFAULT_CAPACITY};
pub use engine::Engine;
pub use metrics::EngineMetrics;
pub use service::{EngineHandle, EngineService, ServiceError};
