//! XPBD edge and volume constraints.
//!
//! Both constraints use the compliance-weighted multiplier update
//!
//! ```text
//! α̃  = α / h²
//! Δλ = −C / (w + α̃)
//! xᵢ += wᵢ ∇ᵢC Δλ
//! λ  += Δλ
//! ```
//!
//! where `w` is the inverse-mass weighted gradient sum and `h` the
//! substep length. `Δλ` does not read the accumulated `λ`, so the
//! multiplier is bookkeeping: it reports the total correction applied
//! since the last reset.

use serde::{Deserialize, Serialize};
use tessera_math::geometry::{signed_tet_volume, tet_volume_gradients};
use tessera_math::Vec3;
use tessera_types::constants::EPSILON;
use tessera_types::{ParticleId, SkipCounts, SkipReason};

use crate::state::Particle;

/// Keeps the distance between two particles at its rest length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeConstraint {
    /// First particle.
    pub a: ParticleId,
    /// Second particle.
    pub b: ParticleId,
    /// Target distance.
    pub rest_length: f32,
    /// Accumulated Lagrange multiplier.
    pub lambda: f32,
}

impl EdgeConstraint {
    pub fn new(a: ParticleId, b: ParticleId, rest_length: f32) -> Self {
        Self {
            a,
            b,
            rest_length,
            lambda: 0.0,
        }
    }

    /// Create an edge whose rest length is the current distance.
    pub fn from_particles(a: ParticleId, b: ParticleId, particles: &[Particle]) -> Self {
        let rest = particles[a.index()].position.distance(particles[b.index()].position);
        Self::new(a, b, rest)
    }

    /// Constraint value `C = |a − b| − rest`.
    pub fn evaluate(&self, particles: &[Particle]) -> f32 {
        particles[self.a.index()]
            .position
            .distance(particles[self.b.index()].position)
            - self.rest_length
    }

    /// Applies one XPBD projection with substep length `h`.
    ///
    /// The edge compliance is the mean of the two endpoints' edge
    /// compliances, so `α̃ = (c_a + c_b) / (2h²)`. Returns `|C|` before
    /// the projection. Edges between two fixed, rigid particles are
    /// inert and return `Ok(0.0)`.
    pub fn solve(&mut self, particles: &mut [Particle], h: f32) -> Result<f32, SkipReason> {
        let (pa, pb) = (&particles[self.a.index()], &particles[self.b.index()]);
        let (wa, wb) = (pa.inv_mass, pb.inv_mass);
        let w = wa + wb;
        let alpha = 0.5 * (pa.edge_compliance + pb.edge_compliance) / (h * h);

        if w + alpha < EPSILON {
            return Ok(0.0);
        }

        let diff = pa.position - pb.position;
        let distance = diff.length();
        if distance < EPSILON {
            return Err(SkipReason::DegenerateGeometry);
        }

        let grad = diff / distance;
        let c = distance - self.rest_length;
        let delta_lambda = -c / (w + alpha);

        particles[self.a.index()].position += grad * (delta_lambda * wa);
        particles[self.b.index()].position -= grad * (delta_lambda * wb);
        self.lambda += delta_lambda;

        Ok(c.abs())
    }
}

/// Keeps the signed volume of a tetrahedron at its rest value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TetConstraint {
    /// Corner particles. The order fixes the sign of the volume.
    pub particles: [ParticleId; 4],
    /// Signed rest volume for this corner order.
    pub rest_volume: f32,
    /// Accumulated Lagrange multiplier.
    pub lambda: f32,
}

impl TetConstraint {
    pub fn new(particles: [ParticleId; 4], rest_volume: f32) -> Self {
        Self {
            particles,
            rest_volume,
            lambda: 0.0,
        }
    }

    /// Create a constraint whose rest volume is the current signed volume.
    pub fn from_particles(ids: [ParticleId; 4], particles: &[Particle]) -> Self {
        let [p0, p1, p2, p3] = ids.map(|id| particles[id.index()].position);
        Self::new(ids, signed_tet_volume(p0, p1, p2, p3))
    }

    fn positions(&self, particles: &[Particle]) -> [Vec3; 4] {
        self.particles.map(|id| particles[id.index()].position)
    }

    /// Current signed volume.
    pub fn volume(&self, particles: &[Particle]) -> f32 {
        let [p0, p1, p2, p3] = self.positions(particles);
        signed_tet_volume(p0, p1, p2, p3)
    }

    /// Constraint value `C = V − V₀`.
    pub fn evaluate(&self, particles: &[Particle]) -> f32 {
        self.volume(particles) - self.rest_volume
    }

    /// Applies one XPBD projection with substep length `h`.
    ///
    /// The weight is `w = Σ wᵢ |∇ᵢ|` over the unscaled cross-product
    /// gradients. Returns `|C|` before the projection.
    pub fn solve(&mut self, particles: &mut [Particle], h: f32) -> Result<f32, SkipReason> {
        let [p0, p1, p2, p3] = self.positions(particles);
        let grads = tet_volume_gradients(p0, p1, p2, p3);

        let mut inv_masses = [0.0_f32; 4];
        let mut compliance = 0.0_f32;
        for (k, id) in self.particles.iter().enumerate() {
            let p = &particles[id.index()];
            inv_masses[k] = p.inv_mass;
            compliance += p.volume_compliance;
        }

        if inv_masses.iter().sum::<f32>() == 0.0 {
            return Ok(0.0);
        }

        let w: f32 = inv_masses
            .iter()
            .zip(&grads)
            .map(|(&wi, g)| wi * g.length())
            .sum();
        if w < EPSILON {
            return Err(SkipReason::DegenerateGeometry);
        }

        let alpha = compliance / (4.0 * h * h);
        let c = signed_tet_volume(p0, p1, p2, p3) - self.rest_volume;
        let delta_lambda = -c / (w + alpha);

        for (k, id) in self.particles.iter().enumerate() {
            particles[id.index()].position += grads[k] * (inv_masses[k] * delta_lambda);
        }
        self.lambda += delta_lambda;

        Ok(c.abs())
    }
}

/// Solve every edge once, in order. Skips are tallied into `skipped`.
pub fn solve_edges(
    edges: &mut [EdgeConstraint],
    particles: &mut [Particle],
    h: f32,
    skipped: &mut SkipCounts,
) -> f32 {
    let mut max_error = 0.0_f32;
    for (i, edge) in edges.iter_mut().enumerate() {
        match edge.solve(particles, h) {
            Ok(err) => max_error = max_error.max(err),
            Err(reason) => {
                tracing::debug!(edge = i, reason = reason.label(), "edge constraint skipped");
                skipped.record(reason);
            }
        }
    }
    max_error
}

/// Solve every tetrahedron once, in order. Skips are tallied into `skipped`.
pub fn solve_volumes(
    tetrahedra: &mut [TetConstraint],
    particles: &mut [Particle],
    h: f32,
    skipped: &mut SkipCounts,
) -> f32 {
    let mut max_error = 0.0_f32;
    for (i, tet) in tetrahedra.iter_mut().enumerate() {
        match tet.solve(particles, h) {
            Ok(err) => max_error = max_error.max(err),
            Err(reason) => {
                tracing::debug!(tetrahedron = i, reason = reason.label(), "volume constraint skipped");
                skipped.record(reason);
            }
        }
    }
    max_error
}
