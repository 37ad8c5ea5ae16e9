//! Fixed-capacity simplex used by GJK and handed to EPA.

use tessera_math::Vec3;

/// A point, segment, triangle, or tetrahedron in Minkowski space.
///
/// Points are kept in insertion order: the last point is always the
/// most recently added support point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Simplex {
    points: [Vec3; 4],
    len: usize,
}

impl Simplex {
    /// Creates an empty simplex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point. Pushing onto a full simplex overwrites the newest point.
    pub fn push(&mut self, point: Vec3) {
        if self.len < 4 {
            self.points[self.len] = point;
            self.len += 1;
        } else {
            self.points[3] = point;
        }
    }

    /// Replaces the contents with `points` (at most four).
    pub fn set(&mut self, points: &[Vec3]) {
        self.len = points.len().min(4);
        self.points[..self.len].copy_from_slice(&points[..self.len]);
    }

    /// Number of points (0–4).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Points in insertion order.
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points[..self.len]
    }
}
