//! Collision pipeline: broad phase → GJK → EPA.
//!
//! Run once per outer step by the solver. Detection failures never
//! abort the step; they are tallied in the report and the pair is
//! treated as non-colliding.

use tessera_math::Vec3;
use tessera_types::{SkipCounts, SkipReason};

use crate::broad::{BroadPhase, BruteForceBroadPhase};
use crate::contact::Collision;
use crate::epa::{epa, Penetration};
use crate::gjk::{gjk, GjkTermination};

/// Penetration between two hulls, if they overlap.
///
/// `Ok(None)` means the hulls are separated (or only touch degenerately).
/// `Err` means detection gave up; callers should treat the pair as
/// separated and record the reason.
pub fn penetration(a: &[Vec3], b: &[Vec3]) -> Result<Option<Penetration>, SkipReason> {
    let result = gjk(a, b);
    match result.termination {
        GjkTermination::Intersecting => epa(a, b, &result).map(Some),
        GjkTermination::Separated | GjkTermination::Degenerate => Ok(None),
        GjkTermination::Exhausted => Err(SkipReason::InconclusiveIntersection),
    }
}

/// Output of one detection pass.
#[derive(Debug, Clone, Default)]
pub struct DetectionReport {
    /// Overlapping pairs with their penetration vectors, in pair order.
    pub collisions: Vec<Collision>,
    /// Number of pairs the broad phase produced.
    pub candidate_pairs: u32,
    /// Pairs dropped because GJK or EPA gave up.
    pub skipped: SkipCounts,
}

/// Broad phase plus narrow phase over a list of body hulls.
pub struct CollisionPipeline {
    /// Broad phase strategy.
    pub broad: Box<dyn BroadPhase>,
}

impl CollisionPipeline {
    pub fn new(broad: Box<dyn BroadPhase>) -> Self {
        Self { broad }
    }

    /// Detect every overlapping pair among `hulls` (one vertex cloud per body).
    pub fn detect(&mut self, hulls: &[Vec<Vec3>]) -> DetectionReport {
        self.broad.update(hulls.len());
        let candidates = self.broad.query_pairs();

        let mut report = DetectionReport {
            candidate_pairs: candidates.len() as u32,
            ..Default::default()
        };

        for pair in candidates {
            let (hull_a, hull_b) = (&hulls[pair.a.index()], &hulls[pair.b.index()]);
            match penetration(hull_a, hull_b) {
                Ok(Some(pen)) => report.collisions.push(Collision {
                    body_a: pair.a,
                    body_b: pair.b,
                    penetration: pen.vector(),
                }),
                Ok(None) => {}
                Err(reason) => {
                    tracing::debug!(
                        body_a = pair.a.0,
                        body_b = pair.b.0,
                        reason = reason.label(),
                        "collision pair skipped"
                    );
                    report.skipped.record(reason);
                }
            }
        }

        report
    }
}

impl Default for CollisionPipeline {
    fn default() -> Self {
        Self::new(Box::new(BruteForceBroadPhase::new()))
    }
}
