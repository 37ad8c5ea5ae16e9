//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Number of bodies.
    pub body_count: usize,
    /// Number of particles.
    pub particle_count: usize,
    /// Number of edge constraints.
    pub edge_count: usize,
    /// Number of volume constraints.
    pub tetrahedron_count: usize,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Final kinetic energy (should approach zero once bodies settle).
    pub final_kinetic_energy: f64,
    /// Maximum particle displacement from initial position.
    pub max_displacement: f32,
    /// Lowest particle height at the end of the run.
    pub final_min_height: f32,
    /// Body pairs found overlapping, summed over all steps.
    pub total_collisions: u32,
    /// Particles moved by collision response, summed over all steps.
    pub total_corrected_particles: u32,
    /// Skipped updates of every kind, summed over all steps.
    pub total_skipped: u32,
    /// Largest edge constraint error after the last step.
    pub final_edge_error: f32,
    /// Largest volume constraint error after the last step.
    pub final_volume_error: f32,
}

impl BenchmarkMetrics {
    /// Format as a CSV row (header + data).
    pub fn to_csv_header() -> String {
        "scenario,bodies,particles,edges,tetrahedra,timesteps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,final_min_height,collisions,corrected_particles,skipped,edge_error,volume_error".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{:.6},{},{},{},{:.3e},{:.3e}",
            self.scenario,
            self.body_count,
            self.particle_count,
            self.edge_count,
            self.tetrahedron_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.final_min_height,
            self.total_collisions,
            self.total_corrected_particles,
            self.total_skipped,
            self.final_edge_error,
            self.final_volume_error,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
