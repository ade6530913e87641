//! Test fixtures for Carve development.
//!
//! Provides [`engine_with_layout`] for constructing engines whose
//! arena already has a prescribed pattern of free and allocated
//! blocks, plus the mixed layout used by the strategy-selection tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{engine_with_layout, mixed_free_layout, Slot};
