//! GJK (Gilbert-Johnson-Keerthi) intersection test.
//!
//! GJK decides whether two convex hulls overlap by searching their
//! Minkowski difference `A − B` for the origin. It grows a simplex of
//! support points toward the origin; if a tetrahedron ever encloses
//! the origin the hulls intersect, and if a support point fails to
//! pass the origin they are separated.
//!
//! # Simplex cases
//!
//! With `a` the newest point and `o` the origin:
//!
//! ```text
//! line:        dir = (ab × ao) × ab          (perpendicular, toward o)
//! triangle:    dir = ±(ab × ac)              (normal, toward o)
//! tetrahedron: test faces abd, bcd, cad      (d newest, fixed order)
//!              first face with o outside → keep it, drop opposite vertex
//!              no such face               → o enclosed, intersecting
//! ```
//!
//! The search is capped at [`GJK_MAX_ITERATIONS`]; an exhausted budget
//! is reported as [`GjkTermination::Exhausted`] and treated as separated.

use tessera_math::geometry::triple_product;
use tessera_math::Vec3;
use tessera_types::constants::{EPSILON, GJK_MAX_ITERATIONS};

use crate::simplex::Simplex;
use crate::support::minkowski_support;

/// How a GJK query ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GjkTermination {
    /// The simplex enclosed the origin.
    Intersecting,
    /// A support point failed to pass the origin.
    Separated,
    /// The simplex collapsed (collinear or coplanar points, empty hull).
    Degenerate,
    /// The iteration budget ran out without a conclusive answer.
    Exhausted,
}

/// Result of a GJK query.
#[derive(Debug, Clone)]
pub struct GjkResult {
    /// Whether the hulls intersect.
    pub collides: bool,
    /// Terminal simplex. A tetrahedron enclosing the origin when `collides`.
    pub simplex: Simplex,
    /// Last search direction.
    pub direction: Vec3,
    /// Why the query stopped.
    pub termination: GjkTermination,
    /// Number of support iterations performed.
    pub iterations: usize,
}

impl GjkResult {
    fn finish(simplex: Simplex, direction: Vec3, termination: GjkTermination, iterations: usize) -> Self {
        Self {
            collides: termination == GjkTermination::Intersecting,
            simplex,
            direction,
            termination,
            iterations,
        }
    }
}

/// Runs GJK on two vertex clouds.
///
/// Empty hulls are reported as [`GjkTermination::Degenerate`].
pub fn gjk(a: &[Vec3], b: &[Vec3]) -> GjkResult {
    let mut simplex = Simplex::new();
    let mut direction = Vec3::ONE.normalize();

    if a.is_empty() || b.is_empty() {
        return GjkResult::finish(simplex, direction, GjkTermination::Degenerate, 0);
    }

    let first = minkowski_support(a, b, direction);
    simplex.push(first);
    direction = -first;

    for iteration in 0..GJK_MAX_ITERATIONS {
        if direction.length_squared() < EPSILON * EPSILON {
            // The origin sits on the simplex: touching, no penetration to recover.
            return GjkResult::finish(simplex, direction, GjkTermination::Degenerate, iteration);
        }

        let point = minkowski_support(a, b, direction);
        if point.dot(direction) <= 0.0 {
            return GjkResult::finish(simplex, direction, GjkTermination::Separated, iteration + 1);
        }
        simplex.push(point);

        match update_simplex(&mut simplex, &mut direction) {
            SimplexUpdate::Continue => {}
            SimplexUpdate::Enclosed => {
                return GjkResult::finish(simplex, direction, GjkTermination::Intersecting, iteration + 1);
            }
            SimplexUpdate::Degenerate => {
                return GjkResult::finish(simplex, direction, GjkTermination::Degenerate, iteration + 1);
            }
        }
    }

    GjkResult::finish(simplex, direction, GjkTermination::Exhausted, GJK_MAX_ITERATIONS)
}

enum SimplexUpdate {
    Continue,
    Enclosed,
    Degenerate,
}

/// Refines the simplex and picks the next search direction.
fn update_simplex(simplex: &mut Simplex, direction: &mut Vec3) -> SimplexUpdate {
    match simplex.len() {
        2 => update_line(simplex, direction),
        3 => update_triangle(simplex, direction),
        4 => update_tetrahedron(simplex, direction),
        _ => SimplexUpdate::Degenerate,
    }
}

fn update_line(simplex: &Simplex, direction: &mut Vec3) -> SimplexUpdate {
    let [b, a] = [simplex.points()[0], simplex.points()[1]];
    let ab = b - a;
    let ao = -a;

    let perpendicular = triple_product(ab, ao, ab);
    if perpendicular.length_squared() > EPSILON * EPSILON {
        *direction = perpendicular;
        return SimplexUpdate::Continue;
    }

    // Origin lies on the segment's line; any perpendicular will do.
    if ab.length_squared() < EPSILON * EPSILON {
        return SimplexUpdate::Degenerate;
    }
    *direction = ab.any_orthogonal_vector();
    SimplexUpdate::Continue
}

fn update_triangle(simplex: &Simplex, direction: &mut Vec3) -> SimplexUpdate {
    let [c, b, a] = [simplex.points()[0], simplex.points()[1], simplex.points()[2]];
    let ao = -a;

    let normal = (b - a).cross(c - a);
    if normal.length_squared() < EPSILON * EPSILON {
        return SimplexUpdate::Degenerate;
    }

    *direction = if normal.dot(ao) >= 0.0 { normal } else { -normal };
    SimplexUpdate::Continue
}

fn update_tetrahedron(simplex: &mut Simplex, direction: &mut Vec3) -> SimplexUpdate {
    let [a, b, c, d] = [
        simplex.points()[0],
        simplex.points()[1],
        simplex.points()[2],
        simplex.points()[3],
    ];

    if (b - a).cross(c - a).dot(d - a).abs() < EPSILON {
        return SimplexUpdate::Degenerate;
    }

    let d_o = -d;

    // Faces sharing the newest vertex, each paired with the vertex it excludes.
    let faces = [([a, b], c), ([b, c], a), ([c, a], b)];
    for ([p, q], opposite) in faces {
        let mut normal = (p - d).cross(q - d);
        if normal.dot(opposite - d) > 0.0 {
            normal = -normal;
        }
        if normal.dot(d_o) > 0.0 {
            simplex.set(&[p, q, d]);
            *direction = normal;
            return SimplexUpdate::Continue;
        }
    }

    SimplexUpdate::Enclosed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(center: Vec3) -> Vec<Vec3> {
        let mut v = Vec::with_capacity(8);
        for &z in &[-0.5, 0.5] {
            for &(x, y) in &[(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                v.push(center + Vec3::new(x, y, z));
            }
        }
        v
    }

    #[test]
    fn line_direction_is_perpendicular() {
        let mut simplex = Simplex::new();
        simplex.push(Vec3::new(1.0, 1.0, 1.0));
        simplex.push(Vec3::new(-1.0, -1.0, 1.0));
        let mut dir = Vec3::ZERO;
        assert!(matches!(update_line(&simplex, &mut dir), SimplexUpdate::Continue));
        let ab = simplex.points()[0] - simplex.points()[1];
        assert!(dir.dot(ab).abs() < 1e-5);
        assert!(dir.dot(-simplex.points()[1]) > 0.0, "Direction must face the origin");
    }

    #[test]
    fn line_through_origin_still_advances() {
        let mut simplex = Simplex::new();
        simplex.push(Vec3::new(1.0, 0.0, 0.0));
        simplex.push(Vec3::new(-1.0, 0.0, 0.0));
        let mut dir = Vec3::ZERO;
        assert!(matches!(update_line(&simplex, &mut dir), SimplexUpdate::Continue));
        assert!(dir.length() > 0.0);
        assert!(dir.x.abs() < 1e-6);
    }

    #[test]
    fn triangle_normal_faces_origin() {
        let mut simplex = Simplex::new();
        simplex.push(Vec3::new(1.0, 0.0, 1.0));
        simplex.push(Vec3::new(-1.0, 1.0, 1.0));
        simplex.push(Vec3::new(-1.0, -1.0, 1.0));
        let mut dir = Vec3::ZERO;
        update_triangle(&simplex, &mut dir);
        assert!(dir.z < 0.0);
    }

    #[test]
    fn collinear_triangle_is_degenerate() {
        let mut simplex = Simplex::new();
        simplex.push(Vec3::new(0.0, 0.0, 1.0));
        simplex.push(Vec3::new(1.0, 0.0, 1.0));
        simplex.push(Vec3::new(2.0, 0.0, 1.0));
        let mut dir = Vec3::ZERO;
        assert!(matches!(update_triangle(&simplex, &mut dir), SimplexUpdate::Degenerate));
    }

    #[test]
    fn tetrahedron_around_origin_is_enclosed() {
        let mut simplex = Simplex::new();
        simplex.set(&[
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]);
        let mut dir = Vec3::ZERO;
        assert!(matches!(update_tetrahedron(&mut simplex, &mut dir), SimplexUpdate::Enclosed));
        assert_eq!(simplex.len(), 4);
    }

    #[test]
    fn tetrahedron_drops_vertex_opposite_failing_face() {
        // Shifted so the origin lies outside the face through a, b and d.
        let offset = Vec3::new(0.0, 3.0, 0.0);
        let a = Vec3::new(1.0, -1.0, -1.0) + offset;
        let b = Vec3::new(-1.0, -1.0, -1.0) + offset;
        let c = Vec3::new(0.0, 1.0, -1.0) + offset;
        let d = Vec3::new(0.0, 0.0, 1.0) + offset;
        let mut simplex = Simplex::new();
        simplex.set(&[a, b, c, d]);
        let mut dir = Vec3::ZERO;
        assert!(matches!(update_tetrahedron(&mut simplex, &mut dir), SimplexUpdate::Continue));
        assert_eq!(simplex.points(), &[a, b, d]);
        assert!(dir.y < 0.0);
    }

    #[test]
    fn cube_pair_overlap_terminates_intersecting() {
        let result = gjk(&cube(Vec3::ZERO), &cube(Vec3::new(0.7, 0.0, 0.0)));
        assert_eq!(result.termination, GjkTermination::Intersecting);
        assert_eq!(result.simplex.len(), 4);
        assert!(result.iterations <= GJK_MAX_ITERATIONS);
    }

    #[test]
    fn empty_hull_is_degenerate() {
        let result = gjk(&[], &cube(Vec3::ZERO));
        assert!(!result.collides);
        assert_eq!(result.termination, GjkTermination::Degenerate);
    }
}
