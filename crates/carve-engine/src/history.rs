//! The append-only operation history.

use std::time::{SystemTime, UNIX_EPOCH};

use carve_core::{HistoryAction, HistoryRecord, OpSeq, PlacementStrategy, ProcessId};

/// Append-ordered log of completed operations.
///
/// Only operations that mutated the arena are recorded; rejections
/// leave no trace here. Records are never mutated or removed except by
/// [`reset`](HistoryLog::reset), which clears the log and appends a
/// terminal [`HistoryAction::Reset`] record as the sole entry — so an
/// empty log means the engine has never been used, and a one-entry
/// `Reset` log means it was wiped.
#[derive(Clone, Debug, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a successful allocation.
    pub fn push_allocate(
        &mut self,
        seq: OpSeq,
        process_id: &ProcessId,
        size: u32,
        address: u32,
        strategy: PlacementStrategy,
    ) {
        self.records.push(HistoryRecord {
            seq,
            unix_ms: unix_ms_now(),
            action: HistoryAction::Allocate,
            process_id: Some(process_id.clone()),
            size: Some(size),
            address: Some(address),
            strategy: Some(strategy),
        });
    }

    /// Append a record for a successful deallocation.
    pub fn push_deallocate(&mut self, seq: OpSeq, process_id: &ProcessId, size: u32, address: u32) {
        self.records.push(HistoryRecord {
            seq,
            unix_ms: unix_ms_now(),
            action: HistoryAction::Deallocate,
            process_id: Some(process_id.clone()),
            size: Some(size),
            address: Some(address),
            strategy: None,
        });
    }

    /// Clear the log and append the terminal reset record.
    pub fn reset(&mut self, seq: OpSeq) {
        self.records.clear();
        self.records.push(HistoryRecord {
            seq,
            unix_ms: unix_ms_now(),
            action: HistoryAction::Reset,
            process_id: None,
            size: None,
            address: None,
            strategy: None,
        });
    }

    /// The records in append order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty (the engine has never been mutated).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Milliseconds since the Unix epoch; 0 if the system clock is before
/// the epoch.
fn unix_ms_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
