//! Request and receipt types for the operation boundary.
//!
//! [`Request`] is the closed, discriminated type a boundary layer
//! (HTTP handler, CLI, test harness) builds after its own transport
//! validation; the engine only ever sees well-typed arguments and
//! performs the domain checks itself. [`Receipt`] is the structured
//! outcome returned for every operation.

use std::fmt;

use crate::error::RequestError;
use crate::id::ProcessId;
use crate::strategy::PlacementStrategy;

/// A single operation submitted to the engine, one variant per
/// operation of the public contract.
///
/// # Examples
///
/// ```
/// use carve_core::{PlacementStrategy, Request};
///
/// let req = Request::Allocate {
///     process_id: "p1".into(),
///     process_name: "editor".to_string(),
///     size: 200,
///     strategy: PlacementStrategy::FirstFit,
/// };
/// assert!(matches!(req, Request::Allocate { size: 200, .. }));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// Grant `size` contiguous units to a new process.
    Allocate {
        /// Caller-supplied id, unique among currently-allocated processes.
        process_id: ProcessId,
        /// Display label for the process.
        process_name: String,
        /// Requested (and, on success, granted) size in units.
        size: u32,
        /// The placement strategy choosing the free block.
        strategy: PlacementStrategy,
    },
    /// Release the block owned by a currently-allocated process.
    Deallocate {
        /// The id whose block is released.
        process_id: ProcessId,
    },
    /// Return the arena to its initial single-free-block state.
    Reset,
}

/// Structured outcome of one engine operation.
///
/// Mirrors the `{success, message}` shape of the public contract, with
/// the machine-readable rejection reason alongside: `reason` is `None`
/// exactly when `accepted` is true.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    /// Whether the operation was applied.
    pub accepted: bool,
    /// Human-readable outcome, suitable for direct display.
    pub message: String,
    /// The rejection reason, if the operation was refused.
    pub reason: Option<RequestError>,
}

impl Receipt {
    /// An accepted receipt with the given display message.
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            reason: None,
        }
    }

    /// A rejected receipt; the message is derived from the reason.
    pub fn rejected(reason: RequestError) -> Self {
        Self {
            accepted: false,
            message: reason.to_string(),
            reason: Some(reason),
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accepted {
            write!(f, "ok: {}", self.message)
        } else {
            write!(f, "rejected: {}", self.message)
        }
    }
}
