//! Collision data types.
//!
//! A `Collision` records that two bodies' hulls overlap and carries
//! the minimum translation that would separate them.

use serde::{Deserialize, Serialize};
use tessera_math::Vec3;
use tessera_types::BodyId;

/// A detected overlap between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    /// First body of the pair.
    pub body_a: BodyId,
    /// Second body of the pair.
    pub body_b: BodyId,
    /// Penetration vector (`normal × depth`) in `A − B` space.
    ///
    /// Moving `body_a` by `−penetration` (or `body_b` by `+penetration`)
    /// separates the hulls.
    pub penetration: Vec3,
}

impl Collision {
    /// Returns the penetration depth.
    pub fn depth(&self) -> f32 {
        self.penetration.length()
    }

    /// Returns the unit penetration direction, or zero for a touching contact.
    pub fn normal(&self) -> Vec3 {
        self.penetration.normalize_or_zero()
    }
}
