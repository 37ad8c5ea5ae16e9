//! Substepped XPBD solver.
//!
//! One outer step:
//! 1. **Integrate**: gravity, explicit position update, ground clamp
//! 2. **Detect**: broad phase + GJK + EPA over body hulls
//! 3. **Resolve**: per-particle proxy push-out
//! 4. **Substeps**: edge then volume projections with `h = dt / substeps`
//! 5. **Velocities**: `v = (p − p_prev) / dt`

use std::time::Instant;

use tessera_collision::CollisionPipeline;
use tessera_types::{SkipCounts, TesseraError, TesseraResult};

use crate::config::SolverConfig;
use crate::constraints::{solve_edges, solve_volumes};
use crate::response::resolve_collisions;
use crate::scene::Scene;
use crate::strategy::{SolverStrategy, StepReport};

/// XPBD solver with edge, volume, and collision constraints.
pub struct XpbdSolver {
    config: SolverConfig,
    pipeline: CollisionPipeline,
    steps: u64,
}

impl XpbdSolver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> TesseraResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pipeline: CollisionPipeline::default(),
            steps: 0,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of steps taken so far.
    pub fn step_count(&self) -> u64 {
        self.steps
    }
}

impl SolverStrategy for XpbdSolver {
    fn step(&mut self, scene: &mut Scene, dt: f32) -> TesseraResult<StepReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(TesseraError::InvalidConfig(format!(
                "Timestep must be positive and finite, got {}",
                dt
            )));
        }

        let start = Instant::now();
        let config = &self.config;
        let mut report = StepReport {
            substeps: config.substeps,
            ..Default::default()
        };

        if config.reset_lambda_each_step {
            scene.reset_lambdas();
        }

        // 1. Integrate
        scene
            .state
            .integrate(dt, config.gravity_vec(), config.ground_height);
        scene.clear_hits();

        // 2–3. Detect and resolve
        if config.collisions_enabled {
            let detection = self.pipeline.detect(&scene.hulls());
            report.candidate_pairs = detection.candidate_pairs;
            report.collisions = detection.collisions.len() as u32;
            report.skipped.merge(detection.skipped);

            let response = resolve_collisions(
                scene,
                &detection.collisions,
                config.collision_response_fraction,
            );
            report.corrected_particles = response.corrected_particles;
            report.max_penetration = response.max_penetration;
            report.skipped.merge(response.skipped);
        }

        // 4. Substeps
        let h = dt / config.substeps as f32;
        let mut constraint_skips = SkipCounts::default();
        for _ in 0..config.substeps {
            report.max_edge_error =
                solve_edges(&mut scene.edges, &mut scene.state.particles, h, &mut constraint_skips);
            report.max_volume_error = solve_volumes(
                &mut scene.tetrahedra,
                &mut scene.state.particles,
                h,
                &mut constraint_skips,
            );
        }
        report.skipped.merge(constraint_skips);

        // 5. Velocities
        scene.state.update_velocities(dt);
        scene.sync_meshes();

        self.steps += 1;
        report.wall_time = start.elapsed().as_secs_f64();

        tracing::trace!(
            step = self.steps,
            collisions = report.collisions,
            corrected = report.corrected_particles,
            skipped = report.skipped.total(),
            "xpbd step"
        );

        Ok(report)
    }

    fn name(&self) -> &str {
        "xpbd"
    }
}
