//! Simulation state: the global particle array.
//!
//! Every body's mesh vertices are mirrored here as particles with
//! global indices. The solver reads and writes these each step;
//! meshes are refreshed from them by `Scene::sync_meshes`.

use serde::{Deserialize, Serialize};
use tessera_math::Vec3;
use tessera_types::ParticleId;

/// A simulated point mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Current position.
    pub position: Vec3,
    /// Position at the start of the current step, used to rebuild velocity.
    pub previous: Vec3,
    /// Velocity reconstructed at the end of the last step.
    pub velocity: Vec3,
    /// Velocity after gravity, used only during integration.
    pub local_velocity: Vec3,
    /// Mass (kg).
    pub mass: f32,
    /// Inverse mass. Zero for static particles.
    pub inv_mass: f32,
    /// Compliance of edge constraints touching this particle.
    pub edge_compliance: f32,
    /// Compliance of volume constraints touching this particle.
    pub volume_compliance: f32,
    /// Whether the particle responds to gravity, collisions, and constraints.
    pub dynamic: bool,
}

impl Particle {
    /// Creates a particle at rest.
    ///
    /// Static particles get `inv_mass = 0` regardless of `mass`.
    pub fn new(
        position: Vec3,
        mass: f32,
        edge_compliance: f32,
        volume_compliance: f32,
        dynamic: bool,
    ) -> Self {
        let inv_mass = if dynamic && mass > 0.0 { 1.0 / mass } else { 0.0 };
        Self {
            position,
            previous: position,
            velocity: Vec3::ZERO,
            local_velocity: Vec3::ZERO,
            mass,
            inv_mass,
            edge_compliance,
            volume_compliance,
            dynamic,
        }
    }

    /// Returns true if the particle can be moved by the solver.
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.dynamic && self.inv_mass > 0.0
    }
}

/// Particle buffer for the whole scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// All particles, indexed by [`ParticleId`].
    pub particles: Vec<Particle>,
}

impl SimulationState {
    pub fn new(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    /// Returns the number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    #[inline]
    pub fn particle_mut(&mut self, id: ParticleId) -> &mut Particle {
        &mut self.particles[id.index()]
    }

    #[inline]
    pub fn position(&self, id: ParticleId) -> Vec3 {
        self.particles[id.index()].position
    }

    /// Explicit integration with an optional ground plane.
    ///
    /// `local_velocity = velocity + gravity·dt`, `previous = position`,
    /// `position += local_velocity·dt`. A particle that ends below the
    /// ground returns to its previous position with `y` clamped to the
    /// ground. `previous` is left alone.
    pub fn integrate(&mut self, dt: f32, gravity: Vec3, ground_height: Option<f32>) {
        for p in &mut self.particles {
            if !p.is_movable() {
                p.previous = p.position;
                continue;
            }

            p.local_velocity = p.velocity + gravity * dt;
            p.previous = p.position;
            p.position += p.local_velocity * dt;

            if let Some(ground) = ground_height {
                if p.position.y < ground {
                    p.position = p.previous;
                    p.position.y = ground;
                }
            }
        }
    }

    /// Rebuild velocities from the position change: `v = (p − p_prev) / dt`.
    pub fn update_velocities(&mut self, dt: f32) {
        let inv_dt = 1.0 / dt;
        for p in &mut self.particles {
            p.velocity = (p.position - p.previous) * inv_dt;
        }
    }

    /// Compute total kinetic energy: 0.5 * Σ m_i * ||v_i||².
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .filter(|p| p.is_movable())
            .map(|p| 0.5 * p.mass as f64 * p.velocity.length_squared() as f64)
            .sum()
    }

    /// Largest particle speed.
    pub fn max_speed(&self) -> f32 {
        self.particles
            .iter()
            .map(|p| p.velocity.length())
            .fold(0.0, f32::max)
    }

    /// Lowest particle `y`, or `None` for an empty state.
    pub fn min_height(&self) -> Option<f32> {
        self.particles.iter().map(|p| p.position.y).reduce(f32::min)
    }
}
