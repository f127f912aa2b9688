//! Solver bounds.

use serde::{Deserialize, Serialize};

use crate::difficulty::TierRanks;

/// Search bounds and calibration settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum states dequeued before the search gives up.
    /// Reachable joint positions grow with grid area squared.
    pub max_states: usize,

    /// Maximum move count of a dequeued state.
    pub max_depth: u32,

    /// Completed states to record before stopping.
    pub max_solutions: usize,

    /// Rank table used to derive move limits.
    pub tier_ranks: TierRanks,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_states: 200_000,
            max_depth: 200,
            max_solutions: 10,
            tier_ranks: TierRanks::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    pub fn with_tier_ranks(mut self, ranks: TierRanks) -> Self {
        self.tier_ranks = ranks;
        self
    }
}
