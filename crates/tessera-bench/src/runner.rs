//! Benchmark runner: executes scenarios with a solver and collects metrics.
//!
//! Every step is bracketed by telemetry: `StepBegin`, then collision,
//! skip, and energy events, then `StepEnd`. The bus is flushed once per
//! step.

use std::time::Instant;

use tessera_math::Vec3;
use tessera_solver::{SimulationState, SolverStrategy, StepReport};
use tessera_telemetry::{EventBus, EventKind, SimulationEvent};
use tessera_types::TesseraResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario with the given solver.
    ///
    /// Returns metrics for the completed run.
    pub fn run(
        scenario: &Scenario,
        solver: &mut dyn SolverStrategy,
        bus: &mut EventBus,
    ) -> TesseraResult<BenchmarkMetrics> {
        let mut scene = scenario.build_scene()?;
        let initial: Vec<Vec3> = scene.state.particles.iter().map(|p| p.position).collect();
        let gravity = scenario.config.gravity_vec();

        tracing::debug!(
            scenario = scenario.kind.name(),
            solver = solver.name(),
            particles = scene.particle_count(),
            "benchmark start"
        );

        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut total_collisions = 0_u32;
        let mut total_corrected = 0_u32;
        let mut total_skipped = 0_u32;

        let total_start = Instant::now();

        for t in 0..scenario.timesteps {
            let sim_time = t as f64 * scenario.dt as f64;
            bus.emit(SimulationEvent::new(t, EventKind::StepBegin { sim_time }));

            let report: StepReport = solver.step(&mut scene, scenario.dt)?;
            step_times.push(report.wall_time);
            total_collisions += report.collisions;
            total_corrected += report.corrected_particles;
            total_skipped += report.skipped.total();

            bus.emit(SimulationEvent::new(
                t,
                EventKind::CollisionDetection {
                    candidate_pairs: report.candidate_pairs,
                    collisions: report.collisions,
                    corrected_particles: report.corrected_particles,
                    max_penetration: report.max_penetration,
                },
            ));
            bus.emit_skips(t, &report.skipped);
            bus.emit(SimulationEvent::new(
                t,
                EventKind::Energy {
                    kinetic: scene.state.kinetic_energy(),
                    potential: potential_energy(&scene.state, gravity),
                },
            ));
            bus.emit(SimulationEvent::new(
                t,
                EventKind::StepEnd {
                    wall_time: report.wall_time,
                    substeps: report.substeps,
                },
            ));
            bus.flush();
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let max_displacement = scene
            .state
            .particles
            .iter()
            .zip(&initial)
            .map(|(p, &p0)| p.position.distance(p0))
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            body_count: scene.body_count(),
            particle_count: scene.particle_count(),
            edge_count: scene.edges.len(),
            tetrahedron_count: scene.tetrahedra.len(),
            timesteps: scenario.timesteps,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step },
            max_step_time: max_step,
            final_kinetic_energy: scene.state.kinetic_energy(),
            max_displacement,
            final_min_height: scene.state.min_height().unwrap_or(0.0),
            total_collisions,
            total_corrected_particles: total_corrected,
            total_skipped,
            final_edge_error: scene.max_edge_error(),
            final_volume_error: scene.max_volume_error(),
        })
    }

    /// Run all scenarios, each with an XPBD solver built from its own config.
    pub fn run_all(bus: &mut EventBus) -> TesseraResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            let mut solver = scenario.solver()?;
            results.push(Self::run(&scenario, &mut solver, bus)?);
        }
        Ok(results)
    }
}

/// Gravitational potential energy `−Σ m (g · x)` of movable particles.
fn potential_energy(state: &SimulationState, gravity: Vec3) -> f64 {
    state
        .particles
        .iter()
        .filter(|p| p.is_movable())
        .map(|p| -(p.mass as f64) * gravity.dot(p.position) as f64)
        .sum()
}
