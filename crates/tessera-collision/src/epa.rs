//! EPA (Expanding Polytope Algorithm) penetration recovery.
//!
//! Starting from the tetrahedron GJK leaves around the origin, EPA grows
//! a convex polytope inside the Minkowski difference until the face
//! closest to the origin lies on its boundary. That face's normal and
//! distance give the minimum translation that separates the hulls.

use serde::{Deserialize, Serialize};
use tessera_math::geometry::try_normalize;
use tessera_math::Vec3;
use tessera_types::constants::{EPA_MAX_ITERATIONS, EPA_TOLERANCE, EPSILON};
use tessera_types::SkipReason;

use crate::gjk::GjkResult;
use crate::support::minkowski_support;

/// Minimum translation between two overlapping hulls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Penetration {
    /// Unit direction of the translation, in `A − B` space.
    pub normal: Vec3,
    /// Penetration depth along `normal`.
    pub depth: f32,
}

impl Penetration {
    /// The penetration as a single vector (`normal × depth`).
    #[inline]
    pub fn vector(&self) -> Vec3 {
        self.normal * self.depth
    }
}

#[derive(Debug, Clone, Copy)]
struct Face {
    indices: [usize; 3],
    normal: Vec3,
    distance: f32,
}

impl Face {
    /// Builds a face wound so its normal points away from the origin.
    ///
    /// Returns `None` for sliver triangles with no usable normal.
    fn new(vertices: &[Vec3], indices: [usize; 3]) -> Option<Self> {
        let [a, b, c] = indices.map(|i| vertices[i]);
        let normal = try_normalize((b - a).cross(c - a), EPSILON)?;
        let distance = normal.dot(a);
        if distance < -EPSILON {
            return Some(Self {
                indices: [indices[0], indices[2], indices[1]],
                normal: -normal,
                distance: -distance,
            });
        }
        Some(Self {
            indices,
            normal,
            distance: distance.max(0.0),
        })
    }

    /// Builds a seed face wound away from the tetrahedron vertex it excludes.
    fn seed(vertices: &[Vec3], indices: [usize; 3], opposite: usize) -> Option<Self> {
        let [a, b, c] = indices.map(|i| vertices[i]);
        let raw = (b - a).cross(c - a);
        let wound = if raw.dot(vertices[opposite] - a) > 0.0 {
            [indices[0], indices[2], indices[1]]
        } else {
            indices
        };
        Self::new(vertices, wound)
    }

    fn sees(&self, vertices: &[Vec3], point: Vec3) -> bool {
        self.normal.dot(point - vertices[self.indices[0]]) > 0.0
    }
}

/// Recovers the penetration of two hulls that GJK found intersecting.
///
/// `simplex` must be the terminal result of [`crate::gjk`] on the same
/// hulls. Returns [`SkipReason::DegenerateGeometry`] when the simplex is
/// not a usable tetrahedron, and [`SkipReason::StuckExpansion`] when the
/// polytope has not converged within [`EPA_MAX_ITERATIONS`].
pub fn epa(a: &[Vec3], b: &[Vec3], simplex: &GjkResult) -> Result<Penetration, SkipReason> {
    if !simplex.collides || simplex.simplex.len() != 4 {
        return Err(SkipReason::DegenerateGeometry);
    }

    let mut vertices: Vec<Vec3> = simplex.simplex.points().to_vec();
    let mut faces: Vec<Face> = [([0, 1, 2], 3), ([0, 3, 1], 2), ([0, 2, 3], 1), ([1, 3, 2], 0)]
        .into_iter()
        .filter_map(|(indices, opposite)| Face::seed(&vertices, indices, opposite))
        .collect();

    let mut horizon: Vec<(usize, usize)> = Vec::new();

    for _ in 0..EPA_MAX_ITERATIONS {
        let closest = closest_face(&faces).ok_or(SkipReason::DegenerateGeometry)?;

        let point = minkowski_support(a, b, closest.normal);
        if point.dot(closest.normal) - closest.distance <= EPA_TOLERANCE {
            return Ok(Penetration {
                normal: closest.normal,
                depth: closest.distance,
            });
        }

        horizon.clear();
        faces.retain(|face| {
            if face.sees(&vertices, point) {
                let [i, j, k] = face.indices;
                add_edge(&mut horizon, i, j);
                add_edge(&mut horizon, j, k);
                add_edge(&mut horizon, k, i);
                false
            } else {
                true
            }
        });

        let new_index = vertices.len();
        vertices.push(point);
        faces.extend(
            horizon
                .iter()
                .filter_map(|&(i, j)| Face::new(&vertices, [i, j, new_index])),
        );
    }

    Err(SkipReason::StuckExpansion)
}

/// Face with the smallest distance to the origin. Ties keep the earliest face.
fn closest_face(faces: &[Face]) -> Option<Face> {
    let mut best: Option<Face> = None;
    for face in faces {
        match best {
            Some(current) if face.distance >= current.distance => {}
            _ => best = Some(*face),
        }
    }
    best
}

/// Adds a horizon edge, or cancels it if a neighbouring removed face already
/// contributed it.
fn add_edge(edges: &mut Vec<(usize, usize)>, from: usize, to: usize) {
    if let Some(pos) = edges
        .iter()
        .position(|&(u, v)| (u == from && v == to) || (u == to && v == from))
    {
        edges.swap_remove(pos);
    } else {
        edges.push((from, to));
    }
}
