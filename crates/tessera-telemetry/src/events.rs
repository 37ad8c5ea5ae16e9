//! Simulation event types.
//!
//! Structured events emitted around each solver step. Events are
//! lightweight value types that carry just enough data to be useful
//! for monitoring and debugging.

use serde::{Deserialize, Serialize};
use tessera_types::SkipReason;

/// A simulation event emitted by the engine.
///
/// Events are tagged with a timestep index and carry domain-specific data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Timestep number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Timestep started.
    StepBegin {
        /// Simulation time at the start of this step (seconds).
        sim_time: f64,
    },

    /// Timestep completed.
    StepEnd {
        /// Wall-clock time for the entire timestep (seconds).
        wall_time: f64,
        /// Constraint substeps performed.
        substeps: u32,
    },

    /// Collision detection and response completed.
    CollisionDetection {
        /// Body pairs produced by the broad phase.
        candidate_pairs: u32,
        /// Body pairs found overlapping.
        collisions: u32,
        /// Particles pushed out by collision response.
        corrected_particles: u32,
        /// Maximum per-particle penetration depth (meters).
        max_penetration: f32,
    },

    /// Updates skipped during the step, one event per non-zero reason.
    Skipped {
        reason: SkipReason,
        count: u32,
    },

    /// Energy snapshot at current state.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
        /// Gravitational potential energy relative to y = 0.
        potential: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
