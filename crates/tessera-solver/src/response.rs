//! Per-particle collision response.
//!
//! For every detected pair, each side in turn is treated as the moving
//! body. Each of its particles becomes a single-point proxy hull that is
//! tested against the other body with GJK + EPA; a particle found inside
//! is translated by `−fraction × penetration` and its mesh vertex is
//! flagged as hit.
//!
//! The other body's hull is captured once per side, just before that
//! side moves. When the second body of a pair is resolved, its opponent
//! hull already includes the corrections applied to the first body.

use tessera_collision::{penetration, Collision};
use tessera_types::{BodyId, SkipCounts};

use crate::scene::Scene;

/// Result of resolving one step's collisions.
#[derive(Debug, Clone, Default)]
pub struct ResponseResult {
    /// Particles translated out of another body.
    pub corrected_particles: u32,
    /// Largest per-particle penetration depth encountered.
    pub max_penetration: f32,
    /// Proxy queries dropped because GJK or EPA gave up.
    pub skipped: SkipCounts,
}

/// Push particles of both bodies of every collision out of each other.
pub fn resolve_collisions(scene: &mut Scene, collisions: &[Collision], fraction: f32) -> ResponseResult {
    let mut result = ResponseResult::default();
    for collision in collisions {
        push_out(scene, collision.body_a, collision.body_b, fraction, &mut result);
        push_out(scene, collision.body_b, collision.body_a, fraction, &mut result);
    }
    result
}

/// Move every particle of `moving` that lies inside `other`.
fn push_out(scene: &mut Scene, moving: BodyId, other: BodyId, fraction: f32, result: &mut ResponseResult) {
    if !scene.bodies[moving.index()].dynamic {
        return;
    }
    let other_hull = scene.bodies[other.index()].hull(&scene.state);

    let Scene { state, bodies, .. } = scene;
    let body = &mut bodies[moving.index()];

    for (local, &id) in body.particles.iter().enumerate() {
        let particle = state.particle_mut(id);
        if !particle.is_movable() {
            continue;
        }

        match penetration(&[particle.position], &other_hull) {
            Ok(Some(pen)) => {
                particle.position -= pen.vector() * fraction;
                body.mesh.mark_hit(local);
                result.corrected_particles += 1;
                result.max_penetration = result.max_penetration.max(pen.depth);
            }
            Ok(None) => {}
            Err(reason) => {
                tracing::debug!(
                    body = moving.0,
                    particle = id.0,
                    reason = reason.label(),
                    "proxy collision query skipped"
                );
                result.skipped.record(reason);
            }
        }
    }
}
