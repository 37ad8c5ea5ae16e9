//! Support functions over vertex clouds.
//!
//! The support point of a convex set in direction `d` is the point of
//! the set with the largest projection onto `d`. For a hull stored as
//! its vertices this is a linear scan.

use tessera_math::Vec3;

/// Returns the vertex of `hull` farthest along `direction`.
///
/// Ties resolve to the first vertex with the maximum projection.
///
/// # Panics
/// Panics if `hull` is empty. GJK rejects empty hulls before calling this.
#[inline]
pub fn farthest_point(hull: &[Vec3], direction: Vec3) -> Vec3 {
    let mut best = hull[0];
    let mut best_dot = best.dot(direction);
    for &p in &hull[1..] {
        let d = p.dot(direction);
        if d > best_dot {
            best = p;
            best_dot = d;
        }
    }
    best
}

/// Support point of the Minkowski difference `A − B` along `direction`.
#[inline]
pub fn minkowski_support(a: &[Vec3], b: &[Vec3], direction: Vec3) -> Vec3 {
    farthest_point(a, direction) - farthest_point(b, -direction)
}
