//! Benchmark scenarios: procedural bodies + config for each test case.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Falling cube**: One unit cube dropped onto the ground
//! 2. **Cube stack**: Three cubes dropped onto each other
//! 3. **Overlapping cubes**: Two cubes that start interpenetrating

use serde::{Deserialize, Serialize};

use tessera_math::Vec3;
use tessera_mesh::generators::unit_cube;
use tessera_solver::{BodyDesc, Scene, SolverConfig, XpbdSolver};
use tessera_types::constants::DEFAULT_DT;
use tessera_types::TesseraResult;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Single cube falling onto the ground.
    FallingCube,
    /// Three cubes stacked with small gaps.
    CubeStack,
    /// Two cubes starting in overlap (collision response stress test).
    OverlappingCubes,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::FallingCube,
            ScenarioKind::CubeStack,
            ScenarioKind::OverlappingCubes,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::FallingCube => "falling_cube",
            ScenarioKind::CubeStack => "cube_stack",
            ScenarioKind::OverlappingCubes => "overlapping_cubes",
        }
    }

    /// Looks a scenario up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Bodies in scene order.
    pub bodies: Vec<BodyDesc>,
    /// Solver configuration.
    pub config: SolverConfig,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f32,
}

impl Scenario {
    /// Create the falling cube scenario.
    ///
    /// A unit cube centered 2.5 m up falls for 5 seconds at 60fps
    /// and comes to rest on the ground.
    pub fn falling_cube() -> Self {
        Self {
            kind: ScenarioKind::FallingCube,
            bodies: vec![BodyDesc::new(unit_cube(Vec3::new(0.0, 2.5, 0.0)))],
            config: SolverConfig::default(),
            timesteps: 300,
            dt: DEFAULT_DT,
        }
    }

    /// Create the cube stack scenario.
    ///
    /// Three unit cubes, each 0.1 m above the previous and slightly
    /// offset sideways, fall onto the ground and onto each other.
    pub fn cube_stack() -> Self {
        let centers = [
            Vec3::new(0.0, 0.6, 0.0),
            Vec3::new(0.05, 1.7, 0.0),
            Vec3::new(-0.05, 2.8, 0.05),
        ];
        Self {
            kind: ScenarioKind::CubeStack,
            bodies: centers
                .iter()
                .map(|&c| BodyDesc::new(unit_cube(c)).with_compliance(1e-6, 1e-6))
                .collect(),
            config: SolverConfig::default(),
            timesteps: 240,
            dt: DEFAULT_DT,
        }
    }

    /// Create the overlapping cubes scenario.
    ///
    /// Two cubes resting on the ground start 0.3 m interpenetrated
    /// along X and are pushed apart by collision response.
    pub fn overlapping_cubes() -> Self {
        Self {
            kind: ScenarioKind::OverlappingCubes,
            bodies: vec![
                BodyDesc::new(unit_cube(Vec3::new(0.0, 0.5, 0.0))),
                BodyDesc::new(unit_cube(Vec3::new(0.7, 0.55, 0.05))),
            ],
            config: SolverConfig::default(),
            timesteps: 120,
            dt: DEFAULT_DT,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::FallingCube => Self::falling_cube(),
            ScenarioKind::CubeStack => Self::cube_stack(),
            ScenarioKind::OverlappingCubes => Self::overlapping_cubes(),
        }
    }

    /// Replace the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the scene for this scenario.
    pub fn build_scene(&self) -> TesseraResult<Scene> {
        Scene::build(self.bodies.clone())
    }

    /// Build an XPBD solver from this scenario's configuration.
    pub fn solver(&self) -> TesseraResult<XpbdSolver> {
        XpbdSolver::new(self.config.clone())
    }
}
