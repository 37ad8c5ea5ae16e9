//! Solver configuration.
//!
//! Parameters that control one outer step: substep count, gravity,
//! the ground plane, and collision response. Loadable from TOML; any
//! field left out takes its default, except `ground_height`, where a
//! missing value means no ground plane.

use serde::{Deserialize, Serialize};
use tessera_math::Vec3;
use tessera_types::constants::{DEFAULT_COLLISION_RESPONSE_FRACTION, DEFAULT_SUBSTEPS, GRAVITY};
use tessera_types::{TesseraError, TesseraResult};

/// Configuration for the XPBD solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Constraint substeps per outer step.
    #[serde(default = "default_substeps")]
    pub substeps: u32,

    /// Gravity vector [gx, gy, gz] in m/s².
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],

    /// Ground plane height (Y coordinate). `None` disables the ground.
    #[serde(default)]
    pub ground_height: Option<f32>,

    /// Fraction of a localized penetration vector applied per particle.
    #[serde(default = "default_fraction")]
    pub collision_response_fraction: f32,

    /// Zero every constraint multiplier at the start of each outer step.
    #[serde(default = "default_true")]
    pub reset_lambda_each_step: bool,

    /// Run body-body collision detection and response.
    #[serde(default = "default_true")]
    pub collisions_enabled: bool,
}

fn default_substeps() -> u32 {
    DEFAULT_SUBSTEPS
}

fn default_gravity() -> [f32; 3] {
    [0.0, -GRAVITY, 0.0]
}

fn default_fraction() -> f32 {
    DEFAULT_COLLISION_RESPONSE_FRACTION
}

fn default_true() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            substeps: DEFAULT_SUBSTEPS,
            gravity: default_gravity(),
            ground_height: Some(0.0),
            collision_response_fraction: DEFAULT_COLLISION_RESPONSE_FRACTION,
            reset_lambda_each_step: true,
            collisions_enabled: true,
        }
    }
}

impl SolverConfig {
    /// Creates a config for quick previews (few substeps).
    pub fn fast() -> Self {
        Self {
            substeps: 5,
            ..Default::default()
        }
    }

    /// Creates a high-quality config (many substeps, gentler response).
    pub fn high_quality() -> Self {
        Self {
            substeps: 50,
            collision_response_fraction: 0.25,
            ..Default::default()
        }
    }

    /// Gravity as a vector.
    #[inline]
    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    /// Checks that the configuration can drive a step.
    pub fn validate(&self) -> TesseraResult<()> {
        if self.substeps == 0 {
            return Err(TesseraError::InvalidConfig("substeps must be at least 1".into()));
        }
        let fraction = self.collision_response_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(TesseraError::InvalidConfig(format!(
                "collision_response_fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        if !self.gravity_vec().is_finite() {
            return Err(TesseraError::InvalidConfig("gravity must be finite".into()));
        }
        if let Some(ground) = self.ground_height {
            if !ground.is_finite() {
                return Err(TesseraError::InvalidConfig("ground_height must be finite".into()));
            }
        }
        if self.substeps > 1000 {
            tracing::warn!(substeps = self.substeps, "unusually high substep count");
        }
        Ok(())
    }
}
