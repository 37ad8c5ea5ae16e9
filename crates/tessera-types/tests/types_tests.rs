//! Integration tests for tessera-types.

use tessera_types::constants::{EPA_MAX_ITERATIONS, EPA_TOLERANCE, GJK_MAX_ITERATIONS};
use tessera_types::{BodyId, ParticleId, SkipCounts, SkipReason, TesseraError};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn particle_id_index() {
    let id = ParticleId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn body_id_index() {
    let id = BodyId::from(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn ids_are_serializable() {
    let id = ParticleId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: ParticleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = TesseraError::InvalidMesh("tetrahedron 3 references vertex 99".into());
    assert!(err.to_string().contains("vertex 99"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: TesseraError = io.into();
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn skip_reason_labels_are_distinct() {
    let labels = [
        SkipReason::DegenerateGeometry.label(),
        SkipReason::InconclusiveIntersection.label(),
        SkipReason::StuckExpansion.label(),
    ];
    assert_ne!(labels[0], labels[1]);
    assert_ne!(labels[1], labels[2]);
    assert_ne!(labels[0], labels[2]);
}

#[test]
fn skip_reason_serialization() {
    let json = serde_json::to_string(&SkipReason::StuckExpansion).unwrap();
    let recovered: SkipReason = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, SkipReason::StuckExpansion);
}

#[test]
fn skip_counts_record_and_merge() {
    let mut a = SkipCounts::default();
    a.record(SkipReason::DegenerateGeometry);
    a.record(SkipReason::DegenerateGeometry);
    a.record(SkipReason::StuckExpansion);

    let mut b = SkipCounts::default();
    b.record(SkipReason::InconclusiveIntersection);
    a.merge(b);

    assert_eq!(a.get(SkipReason::DegenerateGeometry), 2);
    assert_eq!(a.get(SkipReason::InconclusiveIntersection), 1);
    assert_eq!(a.get(SkipReason::StuckExpansion), 1);
    assert_eq!(a.total(), 4);
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn iteration_budgets() {
    assert_eq!(GJK_MAX_ITERATIONS, 10);
    assert_eq!(EPA_MAX_ITERATIONS, 10);
    assert!((EPA_TOLERANCE - 0.001).abs() < 1e-9);
}

#[test]
fn skip_reason_all_matches_counts() {
    let mut counts = SkipCounts::default();
    for reason in SkipReason::ALL {
        counts.record(reason);
    }
    assert_eq!(counts.total(), SkipReason::ALL.len() as u32);
    assert!(SkipReason::ALL.iter().all(|&r| counts.get(r) == 1));
}
