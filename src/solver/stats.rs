//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Bound that cut a search short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truncation {
    /// More than `max_states` states were dequeued.
    NodeBudget,
    /// A dequeued state was deeper than `max_depth`.
    DepthLimit,
}

/// Statistics collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States taken off the frontier.
    pub states_dequeued: usize,

    /// Distinct states ever enqueued, including the start.
    pub states_enqueued: usize,

    /// Deepest move count dequeued.
    pub max_depth_reached: u32,

    /// Set when a bound stopped the search early.
    pub truncation: Option<Truncation>,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Dequeued states per second.
    #[must_use]
    pub fn states_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.states_dequeued as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
