//! Scene setup: body descriptions in, particles and constraints out.
//!
//! `Scene::build` walks each body's topology once, assigns global
//! particle indices body by body, and records rest lengths and rest
//! volumes from the initial positions. The resulting constraint lists
//! are sorted by key within each body, so the solve order does not
//! depend on how the mesh lists its primitives.

use serde::{Deserialize, Serialize};
use tessera_math::Vec3;
use tessera_mesh::{BodyMesh, Topology};
use tessera_types::{BodyId, ParticleId, TesseraError, TesseraResult};

use crate::body::Body;
use crate::constraints::{EdgeConstraint, TetConstraint};
use crate::state::{Particle, SimulationState};

/// Everything needed to add one body to a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Rest-shape mesh; its current positions become the rest state.
    pub mesh: BodyMesh,
    /// Mass of every particle of this body (kg).
    pub particle_mass: f32,
    /// Edge compliance (inverse stiffness, 0 = rigid).
    pub edge_compliance: f32,
    /// Volume compliance (inverse stiffness, 0 = incompressible).
    pub volume_compliance: f32,
    /// Whether the body is simulated or held fixed.
    pub dynamic: bool,
}

impl BodyDesc {
    /// A dynamic body with unit particle mass and rigid constraints.
    pub fn new(mesh: BodyMesh) -> Self {
        Self {
            mesh,
            particle_mass: 1.0,
            edge_compliance: 0.0,
            volume_compliance: 0.0,
            dynamic: true,
        }
    }

    pub fn with_mass(mut self, particle_mass: f32) -> Self {
        self.particle_mass = particle_mass;
        self
    }

    pub fn with_compliance(mut self, edge: f32, volume: f32) -> Self {
        self.edge_compliance = edge;
        self.volume_compliance = volume;
        self
    }

    /// Marks the body as static: its particles never move.
    pub fn fixed(mut self) -> Self {
        self.dynamic = false;
        self
    }

    fn validate(&self, index: usize) -> TesseraResult<()> {
        self.mesh.validate()?;
        if !(self.particle_mass.is_finite() && self.particle_mass > 0.0) {
            return Err(TesseraError::InvalidScene(format!(
                "Body {} has non-positive particle mass {}",
                index, self.particle_mass
            )));
        }
        for (name, value) in [
            ("edge_compliance", self.edge_compliance),
            ("volume_compliance", self.volume_compliance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TesseraError::InvalidScene(format!(
                    "Body {} has invalid {} {}",
                    index, name, value
                )));
            }
        }
        Ok(())
    }
}

/// Bodies, particles, and constraints for one simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Global particle array.
    pub state: SimulationState,
    /// Bodies in insertion order; `bodies[i].id == BodyId(i)`.
    pub bodies: Vec<Body>,
    /// Deduplicated edge constraints.
    pub edges: Vec<EdgeConstraint>,
    /// Deduplicated volume constraints.
    pub tetrahedra: Vec<TetConstraint>,
}

impl Scene {
    /// Builds a scene from body descriptions.
    pub fn build(descs: Vec<BodyDesc>) -> TesseraResult<Self> {
        let mut particles = Vec::new();
        let mut bodies = Vec::with_capacity(descs.len());
        let mut edges = Vec::new();
        let mut tetrahedra = Vec::new();

        for (index, desc) in descs.into_iter().enumerate() {
            desc.validate(index)?;

            let base = particles.len() as u32;
            let global = |local: u32| ParticleId(base + local);

            for p in desc.mesh.positions() {
                particles.push(Particle::new(
                    p,
                    desc.particle_mass,
                    desc.edge_compliance,
                    desc.volume_compliance,
                    desc.dynamic,
                ));
            }

            let topology = Topology::build(&desc.mesh);
            for key in &topology.edges {
                let [a, b] = key.indices();
                edges.push(EdgeConstraint::from_particles(global(a), global(b), &particles));
            }
            for key in &topology.tetrahedra {
                let ids = key.indices().map(global);
                let tet = TetConstraint::from_particles(ids, &particles);
                if tet.rest_volume.abs() < f32::EPSILON {
                    tracing::warn!(body = index, "tetrahedron with zero rest volume");
                }
                tetrahedra.push(tet);
            }

            let vertex_count = desc.mesh.vertex_count() as u32;
            bodies.push(Body {
                id: BodyId(index as u32),
                mesh: desc.mesh,
                particles: (0..vertex_count).map(global).collect(),
                dynamic: desc.dynamic,
            });
        }

        tracing::debug!(
            bodies = bodies.len(),
            particles = particles.len(),
            edges = edges.len(),
            tetrahedra = tetrahedra.len(),
            "scene built"
        );

        Ok(Self {
            state: SimulationState::new(particles),
            bodies,
            edges,
            tetrahedra,
        })
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.state.particle_count()
    }

    #[inline]
    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }

    /// Current vertex cloud of every body, indexed by body.
    pub fn hulls(&self) -> Vec<Vec<Vec3>> {
        self.bodies.iter().map(|b| b.hull(&self.state)).collect()
    }

    /// Copy particle positions back into every body's mesh.
    pub fn sync_meshes(&mut self) {
        for body in &mut self.bodies {
            body.sync_mesh(&self.state);
        }
    }

    /// Clear every collision-hit flag.
    pub fn clear_hits(&mut self) {
        for body in &mut self.bodies {
            body.mesh.clear_hits();
        }
    }

    /// Zero every constraint multiplier.
    pub fn reset_lambdas(&mut self) {
        for edge in &mut self.edges {
            edge.lambda = 0.0;
        }
        for tet in &mut self.tetrahedra {
            tet.lambda = 0.0;
        }
    }

    /// Largest `|C|` over all edges.
    pub fn max_edge_error(&self) -> f32 {
        self.edges
            .iter()
            .map(|e| e.evaluate(&self.state.particles).abs())
            .fold(0.0, f32::max)
    }

    /// Largest `|C|` over all tetrahedra.
    pub fn max_volume_error(&self) -> f32 {
        self.tetrahedra
            .iter()
            .map(|t| t.evaluate(&self.state.particles).abs())
            .fold(0.0, f32::max)
    }
}
