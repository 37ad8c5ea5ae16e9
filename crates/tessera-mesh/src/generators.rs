//! Procedural body generators for tests and benchmarks.
//!
//! These generators produce deterministic meshes with outward-facing
//! triangle winding and positively oriented tetrahedra.

use tessera_math::Vec3;

use crate::mesh::BodyMesh;

/// Corner signs of a cuboid, in the order the vertices are emitted.
const CUBOID_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Two triangles per face, wound counter-clockwise seen from outside.
/// Each face is split along the diagonal used by the tetrahedra.
const CUBOID_TRIANGLES: [[u32; 3]; 12] = [
    [0, 3, 1], [1, 3, 2], // -Z
    [4, 5, 6], [4, 6, 7], // +Z
    [0, 1, 4], [1, 5, 4], // -Y
    [3, 7, 6], [3, 6, 2], // +Y
    [0, 4, 3], [3, 4, 7], // -X
    [1, 2, 6], [1, 6, 5], // +X
];

/// Five-tetrahedron split: four corner tets around a central one.
const CUBOID_TETRAHEDRA: [[u32; 4]; 5] = [
    [0, 1, 3, 4],
    [1, 2, 3, 6],
    [1, 4, 5, 6],
    [3, 4, 6, 7],
    [1, 3, 4, 6],
];

/// Generates an axis-aligned cuboid.
///
/// Produces 8 vertices, 12 surface triangles, and 5 tetrahedra
/// (18 unique edges).
///
/// # Example
/// ```
/// use tessera_math::Vec3;
/// use tessera_mesh::generators::cuboid;
/// let mesh = cuboid(Vec3::ZERO, Vec3::splat(0.5));
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.tetrahedron_count(), 5);
/// ```
pub fn cuboid(center: Vec3, half_extents: Vec3) -> BodyMesh {
    let positions: Vec<Vec3> = CUBOID_CORNERS
        .iter()
        .map(|&s| center + Vec3::from_array(s) * half_extents)
        .collect();

    BodyMesh::new(
        &positions,
        CUBOID_TRIANGLES.to_vec(),
        CUBOID_TETRAHEDRA.to_vec(),
    )
}

/// Generates a unit cube (edge length 1) centered at `center`.
pub fn unit_cube(center: Vec3) -> BodyMesh {
    cuboid(center, Vec3::splat(0.5))
}

/// Generates a single tetrahedron with its four surface triangles.
///
/// The corners are reordered if needed so that the tetrahedron has
/// positive signed volume.
pub fn tetrahedron(corners: [Vec3; 4]) -> BodyMesh {
    let [p0, p1, p2, p3] = corners;
    let positions = if (p1 - p0).cross(p2 - p0).dot(p3 - p0) < 0.0 {
        [p0, p2, p1, p3]
    } else {
        corners
    };

    BodyMesh::new(
        &positions,
        vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        vec![[0, 1, 2, 3]],
    )
}
