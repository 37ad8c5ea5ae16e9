//! # tessera-debug
//!
//! State snapshots for debugging simulation issues. Snapshots
//! serialize particle state to compact binary for replay, diffing,
//! and determinism checks.

pub mod snapshot;

pub use snapshot::StateSnapshot;
