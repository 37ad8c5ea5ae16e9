//! Scalar type alias for the simulation.
//!
//! `glam::Vec3` is single precision, so the solver runs in `f32`.

/// The floating-point type used throughout the simulation.
pub type Scalar = f32;
