//! Integration tests for tessera-mesh.

use tessera_math::Vec3;
use tessera_mesh::generators::{cuboid, tetrahedron, unit_cube};
use tessera_mesh::topology::{ConstraintKey, EdgeKey, TetKey, Topology};
use tessera_mesh::BodyMesh;

// ─── BodyMesh Tests ───────────────────────────────────────────

fn make_single_tet() -> BodyMesh {
    tetrahedron([Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z])
}

#[test]
fn basic_counts() {
    let mesh = make_single_tet();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.tetrahedron_count(), 1);
}

#[test]
fn validate_ok() {
    assert!(make_single_tet().validate().is_ok());
    assert!(unit_cube(Vec3::ZERO).validate().is_ok());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_tet();
    mesh.tetrahedra.push([0, 1, 2, 9]);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_repeated_index() {
    let mut mesh = make_single_tet();
    mesh.triangles.push([1, 1, 2]);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_empty_mesh() {
    let mesh = BodyMesh::new(&[], Vec::new(), Vec::new());
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_nan() {
    let mut mesh = make_single_tet();
    mesh.set_position(2, Vec3::new(f32::NAN, 0.0, 0.0));
    assert!(mesh.validate().is_err());
}

#[test]
fn hit_flags_do_not_touch_positions() {
    let mut mesh = make_single_tet();
    let before = mesh.position(1);
    mesh.mark_hit(1);
    assert!(mesh.is_hit(1));
    assert!(!mesh.is_hit(0));
    assert_eq!(mesh.position(1), before);

    mesh.set_position(1, Vec3::new(2.0, 0.0, 0.0));
    assert!(mesh.is_hit(1), "Moving a vertex keeps its flag");

    mesh.clear_hits();
    assert!(!mesh.is_hit(1));
}

#[test]
fn mesh_serialization() {
    let mesh = unit_cube(Vec3::new(0.0, 2.5, 0.0));
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: BodyMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cuboid_extents() {
    let mesh = cuboid(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 1.5));
    let min = mesh.positions().fold(Vec3::splat(f32::MAX), Vec3::min);
    let max = mesh.positions().fold(Vec3::splat(f32::MIN), Vec3::max);
    assert!((min - Vec3::new(0.5, 1.0, 1.5)).length() < 1e-6);
    assert!((max - Vec3::new(1.5, 3.0, 4.5)).length() < 1e-6);
}

#[test]
fn cuboid_tetrahedra_fill_volume() {
    let mesh = unit_cube(Vec3::ZERO);
    let total: f32 = mesh
        .tetrahedra
        .iter()
        .map(|&[a, b, c, d]| {
            let p = |i: u32| mesh.position(i as usize);
            (p(b) - p(a)).cross(p(c) - p(a)).dot(p(d) - p(a)) / 6.0
        })
        .sum();
    assert!((total - 1.0).abs() < 1e-5, "Tetrahedra should fill the unit cube, got {total}");
}

#[test]
fn cuboid_triangles_face_outward() {
    let mesh = unit_cube(Vec3::ZERO);
    for &[a, b, c] in &mesh.triangles {
        let (pa, pb, pc) = (
            mesh.position(a as usize),
            mesh.position(b as usize),
            mesh.position(c as usize),
        );
        let normal = (pb - pa).cross(pc - pa);
        let centroid = (pa + pb + pc) / 3.0;
        assert!(normal.dot(centroid) > 0.0, "Triangle [{a}, {b}, {c}] faces inward");
    }
}

#[test]
fn tetrahedron_reorients_negative_input() {
    let mesh = tetrahedron([Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::Z]);
    let p = |i: usize| mesh.position(i);
    let volume = (p(1) - p(0)).cross(p(2) - p(0)).dot(p(3) - p(0));
    assert!(volume > 0.0);
}

// ─── Constraint Key Tests ─────────────────────────────────────

#[test]
fn key_is_order_independent() {
    assert_eq!(EdgeKey::new([3, 1]), EdgeKey::new([1, 3]));
    assert_eq!(TetKey::new([4, 2, 9, 0]), TetKey::new([0, 9, 4, 2]));
    assert_eq!(TetKey::new([4, 2, 9, 0]).indices(), [0, 2, 4, 9]);
}

#[test]
fn key_hash_is_order_independent() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(ConstraintKey::new([7, 2]));
    set.insert(ConstraintKey::new([2, 7]));
    assert_eq!(set.len(), 1);
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn cube_topology_counts() {
    let topo = Topology::build(&unit_cube(Vec3::ZERO));
    assert_eq!(topo.edge_count(), 18);
    assert_eq!(topo.tetrahedron_count(), 5);
}

#[test]
fn single_tet_topology() {
    let topo = Topology::build(&make_single_tet());
    assert_eq!(topo.edge_count(), 6);
    assert_eq!(topo.tetrahedron_count(), 1);
}

#[test]
fn topology_ignores_traversal_order() {
    let mesh = unit_cube(Vec3::ZERO);
    let mut shuffled = mesh.clone();
    shuffled.triangles.reverse();
    for tri in &mut shuffled.triangles {
        tri.rotate_left(1);
    }
    shuffled.tetrahedra.reverse();
    for tet in &mut shuffled.tetrahedra {
        tet.swap(0, 3);
    }

    assert_eq!(Topology::build(&mesh), Topology::build(&shuffled));
}

#[test]
fn duplicated_primitives_are_deduplicated() {
    let mut mesh = make_single_tet();
    mesh.tetrahedra.push([3, 2, 1, 0]);
    mesh.triangles.push([1, 0, 2]);
    let topo = Topology::build(&mesh);
    assert_eq!(topo.tetrahedron_count(), 1);
    assert_eq!(topo.edge_count(), 6);
}
