//! Error types for the Tessera engine.
//!
//! Setup and configuration code returns `TesseraResult<T>`. Geometric
//! degeneracies inside a step never become errors; they are reported
//! as a [`SkipReason`] and the affected update is omitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the Tessera engine.
#[derive(Debug, Error)]
pub enum TesseraError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scene description cannot be turned into particles and constraints.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, TesseraError>`.
pub type TesseraResult<T> = Result<T, TesseraError>;

/// Why a constraint or collision pair was skipped during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    /// Zero-length edge or zero-magnitude volume gradient.
    DegenerateGeometry,
    /// GJK ran out of iterations; the pair is treated as separated.
    InconclusiveIntersection,
    /// EPA ran out of iterations; the collision is dropped this step.
    StuckExpansion,
}

impl SkipReason {
    /// Every reason, in reporting order.
    pub const ALL: [SkipReason; 3] = [
        SkipReason::DegenerateGeometry,
        SkipReason::InconclusiveIntersection,
        SkipReason::StuckExpansion,
    ];

    /// Returns a stable snake_case label for logs and CSV output.
    pub fn label(self) -> &'static str {
        match self {
            SkipReason::DegenerateGeometry => "degenerate_geometry",
            SkipReason::InconclusiveIntersection => "inconclusive_intersection",
            SkipReason::StuckExpansion => "stuck_expansion",
        }
    }
}

/// Per-reason tally of skipped updates within one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Constraints skipped for zero-length edges or zero volume gradients.
    pub degenerate_geometry: u32,
    /// Pairs whose GJK query ran out of iterations.
    pub inconclusive_intersection: u32,
    /// Pairs whose EPA expansion ran out of iterations.
    pub stuck_expansion: u32,
}

impl SkipCounts {
    /// Records one skip.
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::DegenerateGeometry => self.degenerate_geometry += 1,
            SkipReason::InconclusiveIntersection => self.inconclusive_intersection += 1,
            SkipReason::StuckExpansion => self.stuck_expansion += 1,
        }
    }

    /// Adds another tally into this one.
    pub fn merge(&mut self, other: SkipCounts) {
        self.degenerate_geometry += other.degenerate_geometry;
        self.inconclusive_intersection += other.inconclusive_intersection;
        self.stuck_expansion += other.stuck_expansion;
    }

    /// Returns the count for a single reason.
    pub fn get(&self, reason: SkipReason) -> u32 {
        match reason {
            SkipReason::DegenerateGeometry => self.degenerate_geometry,
            SkipReason::InconclusiveIntersection => self.inconclusive_intersection,
            SkipReason::StuckExpansion => self.stuck_expansion,
        }
    }

    /// Returns the total number of skips.
    pub fn total(&self) -> u32 {
        self.degenerate_geometry + self.inconclusive_intersection + self.stuck_expansion
    }
}
