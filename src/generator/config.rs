//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::solver::SolverConfig;

/// Parameters for random level synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Grid width, border included.
    pub width: u16,

    /// Grid height, border included.
    pub height: u16,

    /// Number of goal cells to place.
    pub goal_count: usize,

    /// Probability that an interior cell becomes a wall.
    /// Clamped to `[0, 1]` when sampling.
    pub wall_density: f64,

    /// Number used in the first generated name; later attempts count up.
    pub attempt: u32,

    /// Prefix for generated level names.
    pub label: String,

    /// Candidates to try before returning the fallback level.
    pub retry_budget: u32,

    /// Also run the multi-solution search and attach move limits.
    pub calibrate: bool,

    /// Bounds for the solvability filter and calibration.
    pub solver: SolverConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 8,
            goal_count: 2,
            wall_density: 0.08,
            attempt: 1,
            label: "Random level".to_string(),
            retry_budget: 30,
            calibrate: false,
            solver: SolverConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_goal_count(mut self, count: usize) -> Self {
        self.goal_count = count;
        self
    }

    pub fn with_wall_density(mut self, density: f64) -> Self {
        self.wall_density = density;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>, attempt: u32) -> Self {
        self.label = label.into();
        self.attempt = attempt;
        self
    }

    pub fn with_retry_budget(mut self, budget: u32) -> Self {
        self.retry_budget = budget;
        self
    }

    pub fn with_calibration(mut self, calibrate: bool) -> Self {
        self.calibrate = calibrate;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
