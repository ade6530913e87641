//! Serialized access to an engine from multiple threads.
//!
//! [`EngineService`] moves an [`Engine`] onto a dedicated thread that
//! owns it exclusively — no locks anywhere. Cloneable
//! [`EngineHandle`]s submit one request at a time over a bounded
//! channel and block on a per-request reply channel, so every
//! operation remains atomic with respect to every other: the service
//! thread applies them strictly one after another.
//!
//! This is the serialization boundary a network-facing caller needs; a
//! single-threaded caller can use [`Engine`] directly and skip the
//! thread entirely.

use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};

use carve_core::{EngineSnapshot, PlacementStrategy, ProcessId, Receipt, Request};

use crate::config::{ConfigError, EngineConfig};
use crate::engine::Engine;
use crate::metrics::EngineMetrics;

/// A request to the service thread, paired with its reply channel.
enum ServiceRequest {
    Apply {
        request: Request,
        reply: Sender<Receipt>,
    },
    Snapshot {
        reply: Sender<EngineSnapshot>,
    },
    Metrics {
        reply: Sender<EngineMetrics>,
    },
    Shutdown,
}

/// Error returned when the service thread is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceError {
    /// The service thread has shut down or panicked; the channel is
    /// disconnected.
    Disconnected,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "engine service disconnected"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Cloneable submission handle to a running [`EngineService`].
#[derive(Clone)]
pub struct EngineHandle {
    tx: Sender<ServiceRequest>,
}

impl EngineHandle {
    /// Apply a request and wait for its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Disconnected`] if the service thread is
    /// gone.
    pub fn apply(&self, request: Request) -> Result<Receipt, ServiceError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(ServiceRequest::Apply {
                request,
                reply: reply_tx,
            })
            .map_err(|_| ServiceError::Disconnected)?;
        reply_rx.recv().map_err(|_| ServiceError::Disconnected)
    }

    /// Convenience wrapper for [`Request::Allocate`].
    pub fn allocate(
        &self,
        process_id: ProcessId,
        process_name: impl Into<String>,
        size: u32,
        strategy: PlacementStrategy,
    ) -> Result<Receipt, ServiceError> {
        self.apply(Request::Allocate {
            process_id,
            process_name: process_name.into(),
            size,
            strategy,
        })
    }

    /// Convenience wrapper for [`Request::Deallocate`].
    pub fn deallocate(&self, process_id: ProcessId) -> Result<Receipt, ServiceError> {
        self.apply(Request::Deallocate { process_id })
    }

    /// Convenience wrapper for [`Request::Reset`].
    pub fn reset(&self) -> Result<Receipt, ServiceError> {
        self.apply(Request::Reset)
    }

    /// Fetch a read-only snapshot of the engine state.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Disconnected`] if the service thread is
    /// gone.
    pub fn snapshot(&self) -> Result<EngineSnapshot, ServiceError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(ServiceRequest::Snapshot { reply: reply_tx })
            .map_err(|_| ServiceError::Disconnected)?;
        reply_rx.recv().map_err(|_| ServiceError::Disconnected)
    }

    /// Fetch the cumulative engine metrics.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Disconnected`] if the service thread is
    /// gone.
    pub fn metrics(&self) -> Result<EngineMetrics, ServiceError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(ServiceRequest::Metrics { reply: reply_tx })
            .map_err(|_| ServiceError::Disconnected)?;
        reply_rx.recv().map_err(|_| ServiceError::Disconnected)
    }
}

/// An engine running on its own thread.
///
/// Dropping the service sends a shutdown request and joins the thread.
/// Handles outliving the service observe [`ServiceError::Disconnected`].
pub struct EngineService {
    handle: EngineHandle,
    join: Option<thread::JoinHandle<()>>,
}

impl EngineService {
    /// Validate the configuration, spawn the service thread, and hand
    /// the engine to it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation fails or the thread cannot
    /// be spawned.
    pub fn spawn(config: EngineConfig) -> Result<Self, ConfigError> {
        let queue_bound = config.max_request_queue;
        let engine = Engine::new(config)?;
        let (tx, rx) = bounded(queue_bound);
        let join = thread::Builder::new()
            .name("carve-engine".to_string())
            .spawn(move || run(engine, rx))
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            handle: EngineHandle { tx },
            join: Some(join),
        })
    }

    /// A new submission handle.
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }
}

impl Drop for EngineService {
    fn drop(&mut self) {
        let _ = self.handle.tx.send(ServiceRequest::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// The service loop. Owns the engine; applies requests strictly in
/// arrival order.
fn run(mut engine: Engine, rx: Receiver<ServiceRequest>) {
    for message in rx.iter() {
        match message {
            ServiceRequest::Apply { request, reply } => {
                let _ = reply.send(engine.apply(request));
            }
            ServiceRequest::Snapshot { reply } => {
                let _ = reply.send(engine.snapshot());
            }
            ServiceRequest::Metrics { reply } => {
                let _ = reply.send(engine.metrics().clone());
            }
            ServiceRequest::Shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_round_trips_operations() {
        let service = EngineService::spawn(EngineConfig::default()).unwrap();
        let handle = service.handle();

        let receipt = handle
            .allocate("p1".into(), "editor", 200, PlacementStrategy::FirstFit)
            .unwrap();
        assert!(receipt.accepted);

        let snapshot = handle.snapshot().unwrap();
        assert_eq!(snapshot.blocks.len(), 2);
        assert_eq!(snapshot.stats.allocated_memory, 200);

        assert!(handle.deallocate("p1".into()).unwrap().accepted);
        assert!(handle.reset().unwrap().accepted);
        assert_eq!(handle.metrics().unwrap().allocations, 1);
    }

    #[test]
    fn concurrent_handles_serialize_without_corruption() {
        let service = EngineService::spawn(EngineConfig::default()).unwrap();
        let mut joins = Vec::new();
        for t in 0..4 {
            let handle = service.handle();
            joins.push(thread::spawn(move || {
                for i in 0..16 {
                    let pid = format!("t{t}-{i}");
                    let receipt = handle
                        .allocate(pid.clone().into(), "worker", 8, PlacementStrategy::FirstFit)
                        .unwrap();
                    if receipt.accepted {
                        handle.deallocate(pid.into()).unwrap();
                    }
                }
            }));
        }
        for join in joins {
            join.join().unwrap();
        }

        let snapshot = service.handle().snapshot().unwrap();
        // Every allocation was matched by a deallocation.
        assert_eq!(snapshot.stats.allocated_memory, 0);
        assert_eq!(snapshot.blocks.len(), 1);
    }

    #[test]
    fn dropped_service_disconnects_handles() {
        let service = EngineService::spawn(EngineConfig::default()).unwrap();
        let handle = service.handle();
        drop(service);
        assert_eq!(handle.reset(), Err(ServiceError::Disconnected));
    }
}
