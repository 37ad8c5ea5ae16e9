//! A simulated body: its mesh and where its vertices live in the
//! global particle array.

use tessera_math::Vec3;
use tessera_mesh::BodyMesh;
use tessera_types::{BodyId, ParticleId};

use crate::state::SimulationState;

/// A deformable (or static) body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Index of this body in the scene.
    pub id: BodyId,
    /// Owned mesh. Positions are refreshed from particles by `sync_mesh`.
    pub mesh: BodyMesh,
    /// Global particle for each local mesh vertex.
    pub particles: Vec<ParticleId>,
    /// Whether the body's particles are simulated.
    pub dynamic: bool,
}

impl Body {
    /// Current vertex cloud, read from the particle array.
    pub fn hull(&self, state: &SimulationState) -> Vec<Vec3> {
        self.particles.iter().map(|&id| state.position(id)).collect()
    }

    /// Copy particle positions into the mesh, keeping hit flags.
    pub fn sync_mesh(&mut self, state: &SimulationState) {
        for (local, &id) in self.particles.iter().enumerate() {
            self.mesh.set_position(local, state.position(id));
        }
    }
}
