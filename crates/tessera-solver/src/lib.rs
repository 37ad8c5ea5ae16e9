//! # tessera-solver
//!
//! Scene setup, simulation state, and the XPBD time integrator.
//!
//! ## Key Types
//!
//! - [`Scene`]: Bodies, the global particle array, and constraint sets
//! - [`SimulationState`]: Particles with positions, velocities, masses
//! - [`SolverStrategy`]: Pluggable solver trait
//! - [`XpbdSolver`]: Substepped XPBD with edge, volume, and collision constraints
//! - [`SolverConfig`]: Substeps, gravity, ground, collision response

pub mod body;
pub mod config;
pub mod constraints;
pub mod response;
pub mod scene;
pub mod state;
pub mod strategy;
pub mod xpbd;

pub use body::Body;
pub use config::SolverConfig;
pub use constraints::{EdgeConstraint, TetConstraint};
pub use scene::{BodyDesc, Scene};
pub use state::{Particle, SimulationState};
pub use strategy::{SolverStrategy, StepReport};
pub use xpbd::XpbdSolver;
