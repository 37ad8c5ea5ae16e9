//! Integration tests for tessera-collision.

use tessera_collision::broad::{BroadPhase, BruteForceBroadPhase, CandidatePair, NullBroadPhase};
use tessera_collision::support::{farthest_point, minkowski_support};
use tessera_collision::{epa, gjk, penetration, Collision, CollisionPipeline, GjkTermination};
use tessera_math::Vec3;
use tessera_types::BodyId;

fn cube(center: Vec3, half: f32) -> Vec<Vec3> {
    let mut v = Vec::with_capacity(8);
    for &z in &[-half, half] {
        for &(x, y) in &[(-half, -half), (half, -half), (half, half), (-half, half)] {
            v.push(center + Vec3::new(x, y, z));
        }
    }
    v
}

fn unit_cube(center: Vec3) -> Vec<Vec3> {
    cube(center, 0.5)
}

// ─── Support Function Tests ───────────────────────────────────

#[test]
fn farthest_point_picks_max_projection() {
    let hull = unit_cube(Vec3::ZERO);
    let p = farthest_point(&hull, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(p, Vec3::splat(0.5));
}

#[test]
fn farthest_point_ties_resolve_to_first() {
    let hull = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 5.0, 0.0)];
    assert_eq!(farthest_point(&hull, Vec3::X), hull[0]);
}

#[test]
fn minkowski_support_is_difference_of_extremes() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(3.0, 0.0, 0.0));
    let s = minkowski_support(&a, &b, Vec3::X);
    // max_x(A) − min_x(B) = 0.5 − 2.5
    assert!((s.x - (-2.0)).abs() < 1e-6);
}

// ─── GJK Tests ────────────────────────────────────────────────

#[test]
fn gjk_separated_cubes() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(1.5, 0.0, 0.0));
    let result = gjk(&a, &b);
    assert!(!result.collides);
    assert_eq!(result.termination, GjkTermination::Separated);
}

#[test]
fn gjk_separated_diagonally() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(1.2, 1.2, -1.2));
    assert!(!gjk(&a, &b).collides);
}

#[test]
fn gjk_overlapping_cubes() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(0.7, 0.0, 0.0));
    let result = gjk(&a, &b);
    assert!(result.collides);
    assert_eq!(result.simplex.len(), 4);
}

#[test]
fn gjk_is_symmetric_in_outcome() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(0.2, 0.6, 0.1));
    assert!(gjk(&a, &b).collides);
    assert!(gjk(&b, &a).collides);
}

#[test]
fn gjk_empty_hull_is_not_colliding() {
    let a = unit_cube(Vec3::ZERO);
    assert!(!gjk(&a, &[]).collides);
    assert!(!gjk(&[], &a).collides);
}

// ─── EPA Tests ────────────────────────────────────────────────

#[test]
fn epa_recovers_overlap_along_x() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(0.7, 0.0, 0.0));
    let result = gjk(&a, &b);
    let pen = epa(&a, &b, &result).expect("EPA should converge on a box");
    assert!((pen.depth - 0.3).abs() < 1e-3, "depth = {}", pen.depth);
    assert!(pen.normal.x.abs() > 0.99, "normal = {:?}", pen.normal);
}

#[test]
fn epa_separating_direction_moves_a_away_from_b() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(0.0, 0.8, 0.0));
    let pen = penetration(&a, &b).unwrap().expect("cubes overlap");
    assert!((pen.depth - 0.2).abs() < 1e-3);

    // Translating A by −penetration leaves the pair at most touching.
    let shifted: Vec<Vec3> = a.iter().map(|&p| p - pen.vector()).collect();
    let top_of_a = shifted.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    let bottom_of_b = b.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    assert!(top_of_a <= bottom_of_b + 1e-3);
}

#[test]
fn epa_rejects_non_colliding_result() {
    let a = unit_cube(Vec3::ZERO);
    let b = unit_cube(Vec3::new(2.0, 0.0, 0.0));
    let result = gjk(&a, &b);
    assert!(epa(&a, &b, &result).is_err());
}

#[test]
fn point_inside_hull_is_pushed_to_nearest_face() {
    let hull = unit_cube(Vec3::ZERO);
    let point = [Vec3::new(0.3, 0.0, 0.0)];
    let pen = penetration(&point, &hull).unwrap().expect("point is inside");
    assert!((pen.depth - 0.2).abs() < 1e-3, "depth = {}", pen.depth);
    let moved = point[0] - pen.vector();
    assert!((moved.x - 0.5).abs() < 1e-3);
}

#[test]
fn point_outside_hull_has_no_penetration() {
    let hull = unit_cube(Vec3::ZERO);
    let point = [Vec3::new(0.0, 2.0, 0.0)];
    assert_eq!(penetration(&point, &hull), Ok(None));
}

#[test]
fn empty_hull_has_no_penetration() {
    assert_eq!(penetration(&[], &unit_cube(Vec3::ZERO)), Ok(None));
}

// ─── Broad Phase Tests ────────────────────────────────────────

#[test]
fn brute_force_enumerates_lexicographic_pairs() {
    let mut broad = BruteForceBroadPhase::new();
    broad.update(4);
    let pairs: Vec<(u32, u32)> = broad.query_pairs().iter().map(|p| (p.a.0, p.b.0)).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
}

#[test]
fn brute_force_small_scenes() {
    let mut broad = BruteForceBroadPhase::new();
    broad.update(0);
    assert!(broad.query_pairs().is_empty());
    broad.update(1);
    assert!(broad.query_pairs().is_empty());
    broad.update(2);
    assert_eq!(broad.query_pairs(), vec![CandidatePair { a: BodyId(0), b: BodyId(1) }]);
}

#[test]
fn null_broad_phase_returns_empty() {
    let mut broad = NullBroadPhase;
    broad.update(10);
    assert!(broad.query_pairs().is_empty());
    assert_eq!(broad.name(), "null_broad_phase");
}

// ─── Pipeline Tests ───────────────────────────────────────────

#[test]
fn pipeline_reports_only_overlapping_pairs() {
    let hulls = vec![
        unit_cube(Vec3::ZERO),
        unit_cube(Vec3::new(0.7, 0.0, 0.0)),
        unit_cube(Vec3::new(10.0, 0.0, 0.0)),
    ];
    let mut pipeline = CollisionPipeline::default();
    let report = pipeline.detect(&hulls);

    assert_eq!(report.candidate_pairs, 3);
    assert_eq!(report.skipped.total(), 0);
    assert_eq!(report.collisions.len(), 1);
    let c = report.collisions[0];
    assert_eq!((c.body_a, c.body_b), (BodyId(0), BodyId(1)));
    assert!((c.depth() - 0.3).abs() < 1e-3);
}

#[test]
fn pipeline_with_null_broad_phase_detects_nothing() {
    let hulls = vec![unit_cube(Vec3::ZERO), unit_cube(Vec3::ZERO)];
    let mut pipeline = CollisionPipeline::new(Box::new(NullBroadPhase));
    let report = pipeline.detect(&hulls);
    assert_eq!(report.candidate_pairs, 0);
    assert!(report.collisions.is_empty());
}

// ─── Collision Tests ──────────────────────────────────────────

#[test]
fn collision_depth_and_normal() {
    let c = Collision {
        body_a: BodyId(0),
        body_b: BodyId(1),
        penetration: Vec3::new(0.0, -0.25, 0.0),
    };
    assert!((c.depth() - 0.25).abs() < 1e-6);
    assert_eq!(c.normal(), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn collision_serialization() {
    let c = Collision {
        body_a: BodyId(2),
        body_b: BodyId(5),
        penetration: Vec3::new(0.1, 0.0, 0.0),
    };
    let json = serde_json::to_string(&c).unwrap();
    let recovered: Collision = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, c);
}
