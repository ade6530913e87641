//! The caller-facing error taxonomy.
//!
//! Every rejection an engine operation can produce is one of the
//! variants here. All are recoverable conditions reported back to the
//! caller through [`Receipt::reason`](crate::request::Receipt); none is
//! fatal to the engine, and a rejected operation leaves no partial
//! mutation behind.

use std::error::Error;
use std::fmt;

use crate::id::ProcessId;

/// Why an allocate or deallocate request was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    /// Requested size is outside `[1, capacity]`.
    InvalidSize {
        /// The rejected size.
        requested: u32,
        /// The arena capacity the size was checked against.
        capacity: u32,
    },
    /// The process id is already in use by a currently-allocated process.
    DuplicateProcessId {
        /// The id that is already active.
        process_id: ProcessId,
    },
    /// No free block satisfies the requested size under any strategy.
    NoFittingBlock {
        /// The rejected size.
        requested: u32,
        /// Size of the largest free block at the time of the request.
        largest_free: u32,
    },
    /// The process id has never been allocated.
    UnknownProcessId {
        /// The unrecognised id.
        process_id: ProcessId,
    },
    /// The process exists but was already deallocated.
    ProcessAlreadyDeallocated {
        /// The id whose block was already released.
        process_id: ProcessId,
    },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "invalid size: requested {requested} units, allowed range [1, {capacity}]"
                )
            }
            Self::DuplicateProcessId { process_id } => {
                write!(f, "process '{process_id}' is already allocated")
            }
            Self::NoFittingBlock {
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "no suitable free block: requested {requested} units, largest free block is {largest_free}"
                )
            }
            Self::UnknownProcessId { process_id } => {
                write!(f, "unknown process '{process_id}'")
            }
            Self::ProcessAlreadyDeallocated { process_id } => {
                write!(f, "process '{process_id}' was already deallocated")
            }
        }
    }
}

impl Error for RequestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_values() {
        let err = RequestError::InvalidSize {
            requested: 2000,
            capacity: 1024,
        };
        assert!(err.to_string().contains("2000"));
        assert!(err.to_string().contains("1024"));

        let err = RequestError::NoFittingBlock {
            requested: 60,
            largest_free: 50,
        };
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("50"));

        let err = RequestError::UnknownProcessId {
            process_id: "ghost".into(),
        };
        assert!(err.to_string().contains("ghost"));
    }
}
