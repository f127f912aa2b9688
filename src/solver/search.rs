//! Bounded breadth-first search over joint states.
//!
//! The frontier is a strict FIFO, so the first complete state dequeued has
//! the globally minimal move count. Every state is enqueued at most once,
//! keyed by its `CanonicalKey`; the start state counts as visited.
//!
//! Complete states are recorded but never expanded. Their siblings still
//! are, which is how the search collects several distinct completions for
//! difficulty calibration.

use std::collections::VecDeque;
use std::time::Instant;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{CanonicalKey, JointState, Level};
use crate::difficulty::MoveLimits;
use crate::rules::MovementEngine;

use super::config::SolverConfig;
use super::stats::{SearchStats, Truncation};

/// Result of the plain solvability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solvability {
    pub solvable: bool,
    pub min_steps: Option<u32>,
}

/// Result of a multi-solution search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    pub solvable: bool,
    pub min_steps: Option<u32>,
    /// Move counts of distinct completed states, ascending.
    pub solutions: Vec<u32>,
    pub move_limits: MoveLimits,
    pub stats: SearchStats,
}

/// Breadth-first solver.
///
/// Holds configuration and the statistics of the most recent search. The
/// frontier and visited set live only for the duration of one call.
#[derive(Clone, Debug, Default)]
pub struct Solver {
    config: SolverConfig,
    stats: SearchStats,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Statistics of the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Stop at the first completion.
    ///
    /// A search cut short by a bound reports unsolvable: a level that
    /// expensive is treated as unplayable.
    pub fn is_solvable(&mut self, level: &Level) -> Solvability {
        let solutions = self.search(level, 1);
        Solvability {
            solvable: !solutions.is_empty(),
            min_steps: solutions.first().copied(),
        }
    }

    /// Collect up to `max_solutions` completions and derive move limits.
    ///
    /// A `max_solutions` of 0 is treated as 1: the shortest solution is
    /// always searched for. When a bound is hit, the completions found so
    /// far are kept.
    pub fn solve(&mut self, level: &Level, max_solutions: usize) -> SolveReport {
        let solutions = self.search(level, max_solutions.max(1));
        let move_limits = self.config.tier_ranks.limits(&solutions);

        SolveReport {
            solvable: !solutions.is_empty(),
            min_steps: solutions.first().copied(),
            move_limits,
            solutions,
            stats: self.stats.clone(),
        }
    }

    /// Like `solve`, with `max_solutions` taken from the config.
    pub fn solve_default(&mut self, level: &Level) -> SolveReport {
        self.solve(level, self.config.max_solutions)
    }

    fn search(&mut self, level: &Level, cap: usize) -> Vec<u32> {
        let started = Instant::now();
        self.stats.reset();

        let engine = MovementEngine::new(level);
        let start = level.initial_state();

        let mut visited: FxHashSet<CanonicalKey> = FxHashSet::default();
        let mut frontier: VecDeque<(JointState, u32)> = VecDeque::new();
        visited.insert(start.key());
        frontier.push_back((start, 0));
        self.stats.states_enqueued = 1;

        let mut solutions = Vec::new();

        while let Some((state, steps)) = frontier.pop_front() {
            self.stats.states_dequeued += 1;
            if self.stats.states_dequeued > self.config.max_states {
                self.stats.truncation = Some(Truncation::NodeBudget);
                break;
            }
            if steps > self.config.max_depth {
                self.stats.truncation = Some(Truncation::DepthLimit);
                break;
            }
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(steps);

            if engine.is_complete(&state) {
                solutions.push(steps);
                if solutions.len() >= cap {
                    break;
                }
                continue;
            }

            for (_, next) in engine.successors(&state) {
                if visited.insert(next.key()) {
                    frontier.push_back((next, steps + 1));
                    self.stats.states_enqueued += 1;
                }
            }
        }

        solutions.sort_unstable();
        self.stats.time_us = started.elapsed().as_micros() as u64;

        if let Some(truncation) = self.stats.truncation {
            log::debug!(
                "search of {:?} stopped by {:?} after {} states ({} solutions)",
                level.name(),
                truncation,
                self.stats.states_dequeued,
                solutions.len()
            );
        }

        solutions
    }
}

/// Multi-solution search with default bounds. See `Solver::solve` for how
/// `max_solutions` is interpreted.
#[must_use]
pub fn solve(level: &Level, max_solutions: usize) -> SolveReport {
    Solver::default().solve(level, max_solutions)
}

/// Plain solvability check with default bounds.
#[must_use]
pub fn is_solvable(level: &Level) -> Solvability {
    Solver::default().is_solvable(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pos;

    fn open_room() -> Level {
        Level::parse(
            "open room",
            &["#####", "#   #", "# . #", "#   #", "#####"],
            Pos::new(1, 1),
            Pos::new(3, 3),
        )
        .unwrap()
    }

    fn sealed_goal() -> Level {
        Level::parse(
            "sealed",
            &[
                "#######",
                "#     #",
                "#  #  #",
                "# #.# #",
                "#  #  #",
                "#     #",
                "#######",
            ],
            Pos::new(1, 1),
            Pos::new(5, 5),
        )
        .unwrap()
    }

    #[test]
    fn test_min_steps_in_open_room() {
        let result = is_solvable(&open_room());
        assert_eq!(result, Solvability { solvable: true, min_steps: Some(2) });
    }

    #[test]
    fn test_collects_all_completions() {
        let mut solver = Solver::default();
        let report = solver.solve(&open_room(), 10);

        assert!(report.solvable);
        assert_eq!(report.min_steps, Some(2));
        assert_eq!(report.solutions, vec![2, 2, 4, 4, 4, 4, 6]);
        assert_eq!(report.stats.states_enqueued, 36);
        assert_eq!(report.stats.states_dequeued, 36);
        assert!(!report.stats.is_truncated());
    }

    #[test]
    fn test_solution_cap() {
        let report = solve(&open_room(), 3);
        assert_eq!(report.solutions, vec![2, 2, 4]);

        // Zero is treated as one.
        let report = solve(&open_room(), 0);
        assert_eq!(report.solutions, vec![2]);
    }

    #[test]
    fn test_sealed_goal_is_unsolvable() {
        let report = solve(&sealed_goal(), 10);
        assert!(!report.solvable);
        assert_eq!(report.min_steps, None);
        assert!(report.solutions.is_empty());
        assert!(report.move_limits.is_unbounded());
        assert!(!report.stats.is_truncated());
    }

    #[test]
    fn test_node_budget_reports_unsolvable() {
        let mut solver = Solver::new(SolverConfig::default().with_max_states(10));
        let result = solver.is_solvable(&sealed_goal());

        assert!(!result.solvable);
        assert_eq!(solver.stats().truncation, Some(Truncation::NodeBudget));
    }

    #[test]
    fn test_depth_limit_reports_unsolvable() {
        let mut solver = Solver::new(SolverConfig::default().with_max_depth(1));
        let result = solver.is_solvable(&open_room());

        assert!(!result.solvable);
        assert_eq!(solver.stats().truncation, Some(Truncation::DepthLimit));
        assert_eq!(solver.stats().max_depth_reached, 1);
    }

    #[test]
    fn test_start_on_goal_is_zero_steps() {
        let level = Level::parse(
            "instant",
            &["#####", "#.  #", "#####"],
            Pos::new(1, 1),
            Pos::new(3, 1),
        )
        .unwrap();

        let report = solve(&level, 1);
        assert_eq!(report.min_steps, Some(0));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = solve(&open_room(), 1);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"minSteps\":2"));
        assert!(json.contains("\"moveLimits\""));
    }
}
