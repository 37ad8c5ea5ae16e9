//! # tessera-math
//!
//! Vector math for the Tessera simulation engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `Vec4`)
//! - Triple products and tetrahedron volume/gradient helpers shared by
//!   the collision and constraint code

pub mod geometry;

// Re-export glam types as the canonical math types for Tessera.
pub use glam::{Vec3, Vec4};
