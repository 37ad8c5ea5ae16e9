//! Solver strategy trait: the core abstraction for time integration.
//!
//! The simulation loop only needs `step`; the benchmark runner and the
//! CLI drive any implementation through this trait.

use serde::{Deserialize, Serialize};
use tessera_types::{SkipCounts, TesseraResult};

use crate::scene::Scene;

/// Result of a solver step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepReport {
    /// Candidate body pairs from the broad phase.
    pub candidate_pairs: u32,
    /// Body pairs found overlapping.
    pub collisions: u32,
    /// Particles moved by collision response.
    pub corrected_particles: u32,
    /// Largest per-particle penetration depth resolved.
    pub max_penetration: f32,
    /// Substeps performed.
    pub substeps: u32,
    /// Largest `|C|` seen by edge constraints in the last substep.
    pub max_edge_error: f32,
    /// Largest `|C|` seen by volume constraints in the last substep.
    pub max_volume_error: f32,
    /// Updates skipped for degenerate geometry or exhausted queries.
    pub skipped: SkipCounts,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration solvers.
///
/// ```text
/// let mut scene = Scene::build(descs)?;
/// loop {
///     solver.step(&mut scene, dt)?;
/// }
/// ```
///
/// # Implementations
///
/// - [`XpbdSolver`](crate::xpbd::XpbdSolver): substepped XPBD with GJK/EPA contacts
pub trait SolverStrategy: Send {
    /// Advance the scene by one timestep.
    ///
    /// Returns an error only for an unusable `dt` or configuration.
    /// Degenerate geometry is skipped and counted in the report.
    fn step(&mut self, scene: &mut Scene, dt: f32) -> TesseraResult<StepReport>;

    /// Returns the solver's name.
    fn name(&self) -> &str;
}
