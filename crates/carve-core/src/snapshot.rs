//! Read-model types returned by the engine's `snapshot()` operation.
//!
//! Everything here is plain, owned data: a snapshot is decoupled from
//! the engine the moment it is produced and never observes later
//! mutations. Display layers render blocks proportionally to `size`,
//! so ordering and sizes are part of the contract; empty states are
//! empty sequences, never a null-like sentinel.

use crate::id::{OpSeq, ProcessId};
use crate::strategy::PlacementStrategy;

/// One block of the arena partition, in offset order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockView {
    /// Start address of the block within the arena.
    pub offset: u32,
    /// Size of the block in units. Always ≥ 1.
    pub size: u32,
    /// The owning process, or `None` for a free block.
    pub owner: Option<ProcessId>,
}

impl BlockView {
    /// Whether the block is allocated to a process.
    pub fn allocated(&self) -> bool {
        self.owner.is_some()
    }
}

/// Lifecycle state of a process record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessStatus {
    /// The process currently owns a block.
    Allocated,
    /// The process's block has been released; the record is retained
    /// so callers can distinguish "deallocated" from "never existed".
    Deallocated,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allocated => f.write_str("allocated"),
            Self::Deallocated => f.write_str("deallocated"),
        }
    }
}

/// A process known to the engine, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Caller-supplied process id.
    pub id: ProcessId,
    /// Display label.
    pub name: String,
    /// Granted size in units (identical to the requested size).
    pub size: u32,
    /// Current lifecycle state.
    pub status: ProcessStatus,
    /// Operation sequence number of the allocation that created this
    /// record.
    pub allocated_at: OpSeq,
}

/// The operation kind recorded in a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    /// A successful allocation.
    Allocate,
    /// A successful deallocation.
    Deallocate,
    /// A reset of the whole arena.
    Reset,
}

impl std::fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allocate => f.write_str("allocate"),
            Self::Deallocate => f.write_str("deallocate"),
            Self::Reset => f.write_str("reset"),
        }
    }
}

/// One completed operation, append-ordered.
///
/// Rejected operations are never recorded; the history only contains
/// operations that mutated the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRecord {
    /// Monotonic operation sequence number; totally orders the log.
    pub seq: OpSeq,
    /// Wall-clock timestamp, milliseconds since the Unix epoch.
    pub unix_ms: u64,
    /// The operation kind.
    pub action: HistoryAction,
    /// The process involved, absent for `Reset`.
    pub process_id: Option<ProcessId>,
    /// The size moved by the operation, absent for `Reset`.
    pub size: Option<u32>,
    /// The start address of the affected block, absent for `Reset`.
    pub address: Option<u32>,
    /// The strategy used, present only for `Allocate`.
    pub strategy: Option<PlacementStrategy>,
}

/// Derived arena statistics. Computed from the block list at snapshot
/// time, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsSnapshot {
    /// Total arena capacity in units.
    pub total_memory: u32,
    /// Sum of allocated block sizes.
    pub allocated_memory: u32,
    /// Sum of free block sizes.
    pub free_memory: u32,
    /// Number of free blocks in the partition.
    pub free_block_count: u32,
    /// Size of the largest free block, 0 when fully allocated.
    pub largest_free_block: u32,
    /// `100 · allocated_memory / total_memory`, in `[0, 100]`.
    pub utilization_percentage: f64,
    /// `100 · (1 − largest_free_block / free_memory)` when free memory
    /// exists, else `0`. Few large free blocks score low; many small
    /// scattered ones score high.
    pub fragmentation_percentage: f64,
}

/// Full read-only view of the engine state.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSnapshot {
    /// The arena partition, ordered by offset.
    pub blocks: Vec<BlockView>,
    /// Derived statistics.
    pub stats: StatsSnapshot,
    /// All known process records, in insertion order.
    pub processes: Vec<ProcessRecord>,
    /// The operation history, in append order.
    pub history: Vec<HistoryRecord>,
}
