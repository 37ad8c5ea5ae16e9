//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Default number of XPBD substeps per timestep.
pub const DEFAULT_SUBSTEPS: u32 = 20;

/// Iteration budget for a single GJK query.
pub const GJK_MAX_ITERATIONS: usize = 10;

/// Iteration budget for a single EPA expansion.
pub const EPA_MAX_ITERATIONS: usize = 10;

/// EPA convergence tolerance: a new support point must extend the
/// closest face by more than this to continue expanding.
///
/// Larger values stop earlier with a coarser penetration estimate.
pub const EPA_TOLERANCE: f32 = 1.0e-3;

/// Default fraction of a localized penetration vector applied to a
/// particle during collision response.
pub const DEFAULT_COLLISION_RESPONSE_FRACTION: f32 = 0.5;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;
