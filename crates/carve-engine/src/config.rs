//! Engine configuration, validation, and construction-time errors.

use std::error::Error;
use std::fmt;

/// Default arena capacity in size-units.
pub const DEFAULT_CAPACITY: u32 = 1024;

/// Configuration for constructing an [`Engine`](crate::Engine).
///
/// The capacity is fixed for the lifetime of the engine — the arena is
/// never resized. Validation happens once, at construction; after that
/// every operation can assume a well-formed configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Total arena capacity in size-units. Default: 1024.
    pub capacity: u32,
    /// Bound on the service request channel used by
    /// [`EngineService`](crate::EngineService). Default: 64.
    pub max_request_queue: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_request_queue: 64,
        }
    }
}

impl EngineConfig {
    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the capacity is zero or the request
    /// queue bound is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_request_queue == 0 {
            return Err(ConfigError::RequestQueueZero);
        }
        Ok(())
    }
}

/// Errors detected during [`EngineConfig::validate()`] or while
/// spawning an [`EngineService`](crate::EngineService).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Arena capacity is zero.
    ZeroCapacity,
    /// Service request queue bound is zero.
    RequestQueueZero,
    /// The service thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the spawn failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "arena capacity must be at least 1"),
            Self::RequestQueueZero => write!(f, "request queue bound must be at least 1"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "service thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.capacity, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = EngineConfig {
            capacity: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn zero_queue_is_rejected() {
        let config = EngineConfig {
            max_request_queue: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::RequestQueueZero));
    }
}
