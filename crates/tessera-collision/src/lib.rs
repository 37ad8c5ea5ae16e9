//! # tessera-collision
//!
//! Convex collision detection between vertex clouds.
//!
//! The collision pipeline is split into three phases:
//! 1. **Broad phase**: Candidate body pairs (exhaustive enumeration)
//! 2. **GJK**: Boolean intersection test in Minkowski-difference space
//! 3. **EPA**: Penetration vector for pairs GJK reports as intersecting
//!
//! Every query is bounded: GJK and EPA each give up after a fixed
//! iteration budget and report a [`tessera_types::SkipReason`] instead
//! of failing.

pub mod broad;
pub mod contact;
pub mod epa;
pub mod gjk;
pub mod pipeline;
pub mod simplex;
pub mod support;

pub use broad::{BroadPhase, BruteForceBroadPhase, CandidatePair, NullBroadPhase};
pub use contact::Collision;
pub use epa::{epa, Penetration};
pub use gjk::{gjk, GjkResult, GjkTermination};
pub use pipeline::{penetration, CollisionPipeline, DetectionReport};
pub use simplex::Simplex;
