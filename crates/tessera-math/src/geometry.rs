//! Small geometric kernels used by GJK, EPA, and the volume constraint.

use glam::Vec3;

/// Vector triple product `(a × b) × c`, expanded as `b(a·c) − a(b·c)`.
///
/// With `a = ab`, `b = ao`, `c = ab` this is the component of `ao`
/// perpendicular to the segment, pointing toward the origin.
#[inline]
pub fn triple_product(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    b * a.dot(c) - a * b.dot(c)
}

/// Signed volume of the tetrahedron `(p0, p1, p2, p3)`.
///
/// Positive when `p3` lies on the side of triangle `(p0, p1, p2)`
/// that its counter-clockwise normal points to.
#[inline]
pub fn signed_tet_volume(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> f32 {
    (p1 - p0).cross(p2 - p0).dot(p3 - p0) / 6.0
}

/// Unscaled volume gradients for the four corners of a tetrahedron.
///
/// Each gradient is the cross product of two edges of the face opposite
/// that corner, oriented so that moving the corner along it increases
/// [`signed_tet_volume`]. The true gradient is one sixth of these.
#[inline]
pub fn tet_volume_gradients(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> [Vec3; 4] {
    [
        (p3 - p1).cross(p2 - p1),
        (p2 - p0).cross(p3 - p0),
        (p3 - p0).cross(p1 - p0),
        (p1 - p0).cross(p2 - p0),
    ]
}

/// Normalizes `v`, returning `None` when its length is below `epsilon`.
#[inline]
pub fn try_normalize(v: Vec3, epsilon: f32) -> Option<Vec3> {
    let len = v.length();
    if len > epsilon {
        Some(v / len)
    } else {
        None
    }
}
