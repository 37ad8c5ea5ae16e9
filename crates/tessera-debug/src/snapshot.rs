//! State snapshot serialization for replay and debugging.
//!
//! Snapshots capture particle state at a point in time, enabling
//! deterministic replay and diff-based debugging.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tessera_math::Vec3;
use tessera_solver::Scene;
use tessera_types::{TesseraError, TesseraResult};

/// Particle state of a scene at one timestep.
///
/// Serialized with `bincode` for compact binary output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Timestep index when this snapshot was taken.
    pub timestep: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// Particle positions (flat: [x0, y0, z0, x1, y1, z1, ...]).
    pub positions: Vec<f32>,
    /// Particle velocities (flat: [vx0, vy0, vz0, ...]).
    pub velocities: Vec<f32>,
    /// Vertex count of each body, in body order.
    pub body_vertex_counts: Vec<u32>,
    /// Collision-hit flags, one per particle.
    pub hits: Vec<bool>,
}

impl StateSnapshot {
    /// Captures the current particle state of `scene`.
    pub fn capture(timestep: u32, sim_time: f64, scene: &Scene) -> Self {
        let n = scene.particle_count();
        let mut positions = Vec::with_capacity(n * 3);
        let mut velocities = Vec::with_capacity(n * 3);
        for p in &scene.state.particles {
            positions.extend_from_slice(&p.position.to_array());
            velocities.extend_from_slice(&p.velocity.to_array());
        }

        let mut hits = vec![false; n];
        for body in &scene.bodies {
            for (local, id) in body.particles.iter().enumerate() {
                hits[id.index()] = body.mesh.is_hit(local);
            }
        }

        Self {
            timestep,
            sim_time,
            positions,
            velocities,
            body_vertex_counts: scene
                .bodies
                .iter()
                .map(|b| b.mesh.vertex_count() as u32)
                .collect(),
            hits,
        }
    }

    /// Number of particles in the snapshot.
    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Position of particle `i`.
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Velocity of particle `i`.
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities[i * 3..i * 3 + 3])
    }

    /// Writes positions and velocities back into `scene` and resyncs meshes.
    ///
    /// The scene must have the same body layout as the captured one.
    pub fn restore_into(&self, scene: &mut Scene) -> TesseraResult<()> {
        let layout: Vec<u32> = scene
            .bodies
            .iter()
            .map(|b| b.mesh.vertex_count() as u32)
            .collect();
        if layout != self.body_vertex_counts {
            return Err(TesseraError::InvalidScene(format!(
                "Snapshot body layout {:?} does not match scene {:?}",
                self.body_vertex_counts, layout
            )));
        }

        for (i, p) in scene.state.particles.iter_mut().enumerate() {
            p.position = self.position(i);
            p.previous = p.position;
            p.velocity = self.velocity(i);
        }
        scene.sync_meshes();
        Ok(())
    }

    /// Largest per-particle position difference, or `None` if the
    /// snapshots hold different particle counts.
    pub fn max_position_delta(&self, other: &StateSnapshot) -> Option<f32> {
        if self.positions.len() != other.positions.len() {
            return None;
        }
        Some(
            (0..self.particle_count())
                .map(|i| self.position(i).distance(other.position(i)))
                .fold(0.0, f32::max),
        )
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> TesseraResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| TesseraError::Serialization(format!("Snapshot serialization failed: {}", e)))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> TesseraResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| TesseraError::Serialization(format!("Snapshot deserialization failed: {}", e)))
    }

    /// Writes the snapshot to a file.
    pub fn save(&self, path: &Path) -> TesseraResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Reads a snapshot from a file.
    pub fn load(path: &Path) -> TesseraResult<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }
}
