//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a process (logical tenant) requesting memory.
///
/// Process ids are caller-supplied and opaque to the engine. An id must
/// be unique among *currently-allocated* processes; once its owner is
/// deallocated, the id may be reused by a later allocation.
///
/// # Examples
///
/// ```
/// use carve_core::ProcessId;
///
/// let pid = ProcessId::from("p1");
/// assert_eq!(pid.as_str(), "p1");
/// assert_eq!(pid.to_string(), "p1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(String);

impl ProcessId {
    /// Create a process id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProcessId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&str> for ProcessId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

/// Monotonically increasing operation counter.
///
/// Incremented each time the engine completes a mutating operation
/// (allocate, deallocate, or reset). Provides a total order over
/// history records that wall-clock timestamps cannot — two operations
/// in the same millisecond still compare correctly by `OpSeq`.
///
/// The counter is engine-lifetime: it is **not** rewound by a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpSeq(pub u64);

impl fmt::Display for OpSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OpSeq {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
