//! The allocator engine: a single state machine over the arena.
//!
//! [`Engine`] owns the block partition, the process table, and the
//! operation history, and is the only thing that mutates them. Every
//! operation is synchronous, terminates in time proportional to the
//! block count, and is atomic: a rejected request changes nothing, an
//! accepted one completes its whole split/coalesce/record/history
//! sequence before returning.
//!
//! # Ownership model
//!
//! `Engine` is [`Send`] (can be moved between threads) but all mutating
//! methods take `&mut self`, so the borrow checker serializes access
//! for in-process callers. Callers that need shared access from many
//! threads wrap the engine in an [`EngineService`](crate::EngineService)
//! instead — there is no interior locking here.

use carve_core::{
    BlockView, EngineSnapshot, OpSeq, PlacementStrategy, ProcessId, ProcessStatus, Receipt,
    Request, RequestError, StatsSnapshot,
};

use crate::blocks::BlockList;
use crate::config::{ConfigError, EngineConfig};
use crate::history::HistoryLog;
use crate::metrics::EngineMetrics;
use crate::placement;
use crate::process::ProcessTable;

// Compile-time assertion: Engine moves between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Engine>();
    }
};

/// The allocator engine.
///
/// # Example
///
/// ```
/// use carve_core::PlacementStrategy;
/// use carve_engine::{Engine, EngineConfig};
///
/// let mut engine = Engine::new(EngineConfig::default()).unwrap();
/// let receipt = engine.allocate("p1".into(), "editor", 200, PlacementStrategy::FirstFit);
/// assert!(receipt.accepted);
///
/// let snapshot = engine.snapshot();
/// assert_eq!(snapshot.blocks.len(), 2);
/// assert_eq!(snapshot.blocks[0].size, 200);
/// ```
pub struct Engine {
    blocks: BlockList,
    processes: ProcessTable,
    history: HistoryLog,
    metrics: EngineMetrics,
    /// Offset just past the most recent successful allocation, modulo
    /// capacity. Read only by next-fit; updated by every successful
    /// allocation so a strategy switch still resumes correctly.
    next_fit_cursor: Option<u32>,
    op_seq: u64,
}

impl Engine {
    /// Construct an engine with a single free block covering the arena.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            blocks: BlockList::new(config.capacity),
            processes: ProcessTable::new(),
            history: HistoryLog::new(),
            metrics: EngineMetrics::default(),
            next_fit_cursor: None,
            op_seq: 0,
        })
    }

    /// Total arena capacity in units.
    pub fn capacity(&self) -> u32 {
        self.blocks.capacity()
    }

    /// Dispatch a [`Request`] to the matching operation.
    pub fn apply(&mut self, request: Request) -> Receipt {
        match request {
            Request::Allocate {
                process_id,
                process_name,
                size,
                strategy,
            } => self.allocate(process_id, process_name, size, strategy),
            Request::Deallocate { process_id } => self.deallocate(&process_id),
            Request::Reset => self.reset(),
        }
    }

    /// Grant `size` contiguous units to `process_id` under `strategy`.
    ///
    /// The allocated portion is carved from the start of the chosen
    /// free block; any remainder stays free at the immediately
    /// following offset. On rejection nothing changes and no history
    /// record is appended.
    pub fn allocate(
        &mut self,
        process_id: ProcessId,
        process_name: impl Into<String>,
        size: u32,
        strategy: PlacementStrategy,
    ) -> Receipt {
        let capacity = self.blocks.capacity();
        if size < 1 || size > capacity {
            return self.reject(RequestError::InvalidSize {
                requested: size,
                capacity,
            });
        }
        if self.processes.is_active(&process_id) {
            return self.reject(RequestError::DuplicateProcessId { process_id });
        }

        let spans = self.blocks.free_spans();
        let Some(span) = placement::choose(strategy, &spans, size, self.next_fit_cursor) else {
            return self.reject(RequestError::NoFittingBlock {
                requested: size,
                largest_free: self.blocks.largest_free(),
            });
        };

        let (offset, split) = self.blocks.allocate_at(span.index, size, process_id.clone());
        self.next_fit_cursor = Some((offset + size) % capacity);
        if split {
            self.metrics.block_splits += 1;
        }

        let seq = self.next_seq();
        self.processes
            .record_allocation(process_id.clone(), process_name.into(), size, seq);
        self.history
            .push_allocate(seq, &process_id, size, offset, strategy);
        self.metrics.allocations += 1;

        Receipt::accepted("Memory allocated successfully")
    }

    /// Release the block owned by `process_id` and coalesce.
    ///
    /// The process record survives with status
    /// [`ProcessStatus::Deallocated`]. On rejection nothing changes.
    pub fn deallocate(&mut self, process_id: &ProcessId) -> Receipt {
        let Some((index, offset, size)) = self.blocks.find_owner(process_id) else {
            let reason = match self.processes.status(process_id) {
                Some(ProcessStatus::Deallocated) => RequestError::ProcessAlreadyDeallocated {
                    process_id: process_id.clone(),
                },
                _ => RequestError::UnknownProcessId {
                    process_id: process_id.clone(),
                },
            };
            return self.reject(reason);
        };

        let merges = self.blocks.release_at(index);
        self.metrics.block_merges += u64::from(merges);
        self.processes.mark_deallocated(process_id);

        let seq = self.next_seq();
        self.history.push_deallocate(seq, process_id, size, offset);
        self.metrics.deallocations += 1;

        Receipt::accepted("Memory deallocated successfully")
    }

    /// Return the arena to the single-free-block state.
    ///
    /// Clears the process table, wipes the history (leaving the
    /// terminal reset record), and drops the next-fit cursor. Always
    /// succeeds. Metrics counters are engine-lifetime and survive.
    pub fn reset(&mut self) -> Receipt {
        self.blocks.reset();
        self.processes.clear();
        let seq = self.next_seq();
        self.history.reset(seq);
        self.next_fit_cursor = None;
        self.metrics.resets += 1;

        Receipt::accepted("Memory system reset successfully")
    }

    /// A full read-only view of the current state. Side-effect free.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            blocks: self
                .blocks
                .iter()
                .map(|(offset, block)| BlockView {
                    offset,
                    size: block.size(),
                    owner: block.owner().cloned(),
                })
                .collect(),
            stats: self.stats(),
            processes: self.processes.records(),
            history: self.history.records().to_vec(),
        }
    }

    /// Derived statistics for the current partition.
    pub fn stats(&self) -> StatsSnapshot {
        let total = self.blocks.capacity();
        let free = self.blocks.total_free();
        let allocated = total - free;
        let largest = self.blocks.largest_free();

        let utilization = 100.0 * f64::from(allocated) / f64::from(total);
        let fragmentation = if free > 0 {
            (100.0 * (1.0 - f64::from(largest) / f64::from(free))).clamp(0.0, 100.0)
        } else {
            0.0
        };

        StatsSnapshot {
            total_memory: total,
            allocated_memory: allocated,
            free_memory: free,
            free_block_count: self.blocks.free_block_count(),
            largest_free_block: largest,
            utilization_percentage: utilization,
            fragmentation_percentage: fragmentation,
        }
    }

    /// Cumulative operation counters.
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// The block partition, for invariant checks in tests.
    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    fn next_seq(&mut self) -> OpSeq {
        self.op_seq += 1;
        OpSeq(self.op_seq)
    }

    fn reject(&mut self, reason: RequestError) -> Receipt {
        self.metrics.record_rejection(&reason);
        Receipt::rejected(reason)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("capacity", &self.blocks.capacity())
            .field("blocks", &self.blocks.len())
            .field("processes", &self.processes.len())
            .field("history", &self.history.len())
            .field("op_seq", &self.op_seq)
            .finish()
    }
}
