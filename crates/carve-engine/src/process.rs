//! The process table: id → record, in insertion order.

use carve_core::{OpSeq, ProcessId, ProcessRecord, ProcessStatus};
use indexmap::IndexMap;

#[derive(Clone, Debug)]
struct ProcessEntry {
    name: String,
    size: u32,
    status: ProcessStatus,
    allocated_at: OpSeq,
}

/// All processes the engine has seen since the last reset.
///
/// Records are retained after deallocation so callers can distinguish
/// "deallocated" from "never existed"; only a reset purges them.
/// Iteration order is insertion order — re-allocating a previously
/// deallocated id moves its record to the end, as the newest
/// allocation.
#[derive(Clone, Debug, Default)]
pub struct ProcessTable {
    entries: IndexMap<ProcessId, ProcessEntry>,
}

impl ProcessTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `process_id` currently owns a block.
    pub fn is_active(&self, process_id: &ProcessId) -> bool {
        matches!(
            self.entries.get(process_id).map(|e| e.status),
            Some(ProcessStatus::Allocated)
        )
    }

    /// The lifecycle state of `process_id`, if the id is known.
    pub fn status(&self, process_id: &ProcessId) -> Option<ProcessStatus> {
        self.entries.get(process_id).map(|e| e.status)
    }

    /// Record a successful allocation.
    ///
    /// A retained record under the same id (from an earlier, since
    /// deallocated process) is replaced and moved to the end of the
    /// table.
    pub fn record_allocation(
        &mut self,
        process_id: ProcessId,
        name: String,
        size: u32,
        allocated_at: OpSeq,
    ) {
        self.entries.shift_remove(&process_id);
        self.entries.insert(
            process_id,
            ProcessEntry {
                name,
                size,
                status: ProcessStatus::Allocated,
                allocated_at,
            },
        );
    }

    /// Flip `process_id` to [`ProcessStatus::Deallocated`].
    pub fn mark_deallocated(&mut self, process_id: &ProcessId) {
        if let Some(entry) = self.entries.get_mut(process_id) {
            entry.status = ProcessStatus::Deallocated;
        }
    }

    /// All records in insertion order.
    pub fn records(&self) -> Vec<ProcessRecord> {
        self.entries
            .iter()
            .map(|(id, entry)| ProcessRecord {
                id: id.clone(),
                name: entry.name.clone(),
                size: entry.size,
                status: entry.status,
                allocated_at: entry.allocated_at,
            })
            .collect()
    }

    /// Number of known processes (allocated and deallocated).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no process has been recorded since the last reset.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every record.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deallocated_record_is_retained_not_active() {
        let mut table = ProcessTable::new();
        table.record_allocation("p1".into(), "editor".into(), 200, OpSeq(1));
        assert!(table.is_active(&"p1".into()));

        table.mark_deallocated(&"p1".into());
        assert!(!table.is_active(&"p1".into()));
        assert_eq!(
            table.status(&"p1".into()),
            Some(ProcessStatus::Deallocated)
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unknown_id_has_no_status() {
        let table = ProcessTable::new();
        assert_eq!(table.status(&"ghost".into()), None);
        assert!(!table.is_active(&"ghost".into()));
    }

    #[test]
    fn reallocation_moves_record_to_the_end() {
        let mut table = ProcessTable::new();
        table.record_allocation("p1".into(), "a".into(), 10, OpSeq(1));
        table.record_allocation("p2".into(), "b".into(), 20, OpSeq(2));
        table.mark_deallocated(&"p1".into());
        table.record_allocation("p1".into(), "a2".into(), 30, OpSeq(3));

        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "p2".into());
        assert_eq!(records[1].id, "p1".into());
        assert_eq!(records[1].name, "a2");
        assert_eq!(records[1].status, ProcessStatus::Allocated);
    }
}
