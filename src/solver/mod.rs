//! State-space solver.
//!
//! ## Overview
//!
//! Bounded breadth-first search over the joint positions reachable from a
//! level's start through the movement engine. Used to:
//!
//! - prove a level solvable and report its shortest solution,
//! - collect a ranked set of solution lengths for difficulty calibration,
//! - filter generated levels and validate hand-authored ones at load time.
//!
//! ## Usage
//!
//! ```rust
//! use axis_pals::core::{Level, Pos};
//! use axis_pals::solver::{Solver, SolverConfig};
//!
//! let level = Level::parse(
//!     "room",
//!     &["#####", "#   #", "# . #", "#   #", "#####"],
//!     Pos::new(1, 1),
//!     Pos::new(3, 3),
//! )
//! .unwrap();
//!
//! let mut solver = Solver::new(SolverConfig::default());
//! let report = solver.solve(&level, 10);
//!
//! assert!(report.solvable);
//! assert_eq!(report.min_steps, Some(2));
//! assert!(report.move_limits.strict <= report.move_limits.lenient);
//! ```

pub mod config;
pub mod search;
pub mod stats;

pub use config::SolverConfig;
pub use search::{is_solvable, solve, Solvability, SolveReport, Solver};
pub use stats::{SearchStats, Truncation};
