//! Benchmark workloads for the Carve memory-placement simulator.
//!
//! Provides deterministic, seeded request streams so benchmark runs
//! are reproducible: the same seed always produces the same mix of
//! allocations and deallocations.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use carve_core::{PlacementStrategy, Request};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Build a deterministic churn workload of `operations` requests.
///
/// Roughly 60% allocations (sizes 1..=64) and 40% deallocations of a
/// randomly chosen live process, seeded so identical inputs produce
/// identical request streams. Early in the stream there is nothing to
/// deallocate, so the arena fills before churn sets in — the worst
/// case for placement scans.
pub fn churn_workload(
    seed: u64,
    operations: usize,
    strategy: PlacementStrategy,
) -> Vec<Request> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut live: Vec<String> = Vec::new();
    let mut next_id = 0u32;
    let mut requests = Vec::with_capacity(operations);

    for _ in 0..operations {
        if !live.is_empty() && rng.random_bool(0.4) {
            let victim = live.swap_remove(rng.random_range(0..live.len()));
            requests.push(Request::Deallocate {
                process_id: victim.into(),
            });
        } else {
            let pid = format!("p{next_id}");
            next_id += 1;
            requests.push(Request::Allocate {
                process_id: pid.clone().into(),
                process_name: pid.clone(),
                size: rng.random_range(1..=64),
                strategy,
            });
            live.push(pid);
        }
    }
    requests
}
