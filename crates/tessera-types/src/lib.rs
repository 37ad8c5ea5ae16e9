//! # tessera-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Tessera soft-body simulation engine.
//!
//! This crate has zero domain logic; it defines the vocabulary
//! that all other Tessera crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{SkipCounts, SkipReason, TesseraError, TesseraResult};
pub use ids::{BodyId, ParticleId};
pub use scalar::Scalar;
