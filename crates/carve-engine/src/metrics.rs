//! Cumulative engine counters.
//!
//! [`EngineMetrics`] tracks operation and rejection counts across the
//! engine's lifetime, for telemetry and test assertions. The counters
//! describe the engine, not the arena contents, so a reset of the arena
//! does **not** zero them (it increments `resets`).

use carve_core::RequestError;

/// Operation and rejection counters, cumulative since construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Successful allocations.
    pub allocations: u64,
    /// Successful deallocations.
    pub deallocations: u64,
    /// Arena resets.
    pub resets: u64,
    /// Allocations rejected for a size outside `[1, capacity]`.
    pub rejected_invalid_size: u64,
    /// Allocations rejected for an already-active process id.
    pub rejected_duplicate_id: u64,
    /// Allocations rejected because no free block fits.
    pub rejected_no_fit: u64,
    /// Deallocations rejected for an id that was never allocated.
    pub rejected_unknown_id: u64,
    /// Deallocations rejected for an already-deallocated id.
    pub rejected_already_deallocated: u64,
    /// Free blocks split by an allocation carve.
    pub block_splits: u64,
    /// Adjacent free blocks merged by coalescing.
    pub block_merges: u64,
}

impl EngineMetrics {
    /// Bump the rejection counter matching `reason`.
    pub fn record_rejection(&mut self, reason: &RequestError) {
        match reason {
            RequestError::InvalidSize { .. } => self.rejected_invalid_size += 1,
            RequestError::DuplicateProcessId { .. } => self.rejected_duplicate_id += 1,
            RequestError::NoFittingBlock { .. } => self.rejected_no_fit += 1,
            RequestError::UnknownProcessId { .. } => self.rejected_unknown_id += 1,
            RequestError::ProcessAlreadyDeallocated { .. } => {
                self.rejected_already_deallocated += 1
            }
        }
    }

    /// Total rejections across all reasons.
    pub fn total_rejections(&self) -> u64 {
        self.rejected_invalid_size
            + self.rejected_duplicate_id
            + self.rejected_no_fit
            + self.rejected_unknown_id
            + self.rejected_already_deallocated
    }
}
