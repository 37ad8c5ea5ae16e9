//! Broad phase collision detection trait.
//!
//! Identifies *candidate* body pairs for the narrow phase (GJK + EPA).
//! The only real implementation enumerates every pair; the trait exists
//! so an accelerated structure can take its place without touching the
//! pipeline or the solver.

use serde::{Deserialize, Serialize};
use tessera_types::BodyId;

/// Candidate pair from broad phase. Always `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidatePair {
    /// First body.
    pub a: BodyId,
    /// Second body.
    pub b: BodyId,
}

/// Trait for broad phase collision detection.
///
/// # Implementations
/// - `BruteForceBroadPhase`: every unordered pair, O(N²)
/// - `NullBroadPhase`: no pairs, for collision-free scenes
pub trait BroadPhase: Send {
    /// Rebuild from the current number of bodies.
    fn update(&mut self, body_count: usize);

    /// Query candidate pairs, in lexicographic order.
    fn query_pairs(&self) -> Vec<CandidatePair>;

    /// Returns the broad phase strategy name.
    fn name(&self) -> &str;
}

/// Exhaustive pair enumeration.
#[derive(Debug, Clone, Default)]
pub struct BruteForceBroadPhase {
    body_count: usize,
}

impl BruteForceBroadPhase {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BroadPhase for BruteForceBroadPhase {
    fn update(&mut self, body_count: usize) {
        self.body_count = body_count;
    }

    fn query_pairs(&self) -> Vec<CandidatePair> {
        let n = self.body_count;
        let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                pairs.push(CandidatePair {
                    a: BodyId(i as u32),
                    b: BodyId(j as u32),
                });
            }
        }
        pairs
    }

    fn name(&self) -> &str {
        "brute_force"
    }
}

/// No-op broad phase for benchmarks that don't need collision.
pub struct NullBroadPhase;

impl BroadPhase for NullBroadPhase {
    fn update(&mut self, _body_count: usize) {}

    fn query_pairs(&self) -> Vec<CandidatePair> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "null_broad_phase"
    }
}
