//! # axis-pals
//!
//! Core of a two-agent cooperative grid puzzle.
//!
//! Two agents share one walled grid. The first moves only horizontally, the
//! second only vertically, and every legal command moves both of them one
//! step in the same direction. A level is complete when every goal is
//! covered, with owned goals covered by their owner.
//!
//! ## Design Principles
//!
//! 1. **One rule set**: local play, the room relay, the solver and the
//!    generator all go through the same `MovementEngine`.
//!
//! 2. **Bounded search**: the solver never runs unbounded; truncation is
//!    reported in its stats rather than raised.
//!
//! 3. **Seeded randomness**: generation and room ids draw from an explicit
//!    `LevelRng`, so a seed reproduces the output.
//!
//! ## Modules
//!
//! - `core`: Positions, agents, directions, levels, RNG
//! - `rules`: Movement engine and command outcomes
//! - `solver`: Bounded BFS solver and search stats
//! - `difficulty`: Move-limit tiers derived from solution lengths
//! - `generator`: Procedural level generator
//! - `levels`: Built-in campaign and solver-validated catalog
//! - `session`: Play sessions, room relay and wire protocol

pub mod core;
pub mod difficulty;
pub mod generator;
pub mod levels;
pub mod rules;
pub mod session;
pub mod solver;

// Re-export commonly used types
pub use crate::core::{
    AgentId, AgentPair, Axis, Cell, Direction, Goal, JointState, Level, LevelError, LevelRng,
    LevelSpec, Pos,
};

pub use crate::rules::{Command, MoveOutcome, MoveReason, MovementEngine};

pub use crate::solver::{SearchStats, SolveReport, Solver, SolverConfig, Truncation};

pub use crate::difficulty::{MoveLimits, Tier, TierRanks};

pub use crate::generator::{GeneratedLevel, GeneratorConfig};

pub use crate::levels::{CatalogEntry, CatalogError, LevelCatalog};

pub use crate::session::{
    ClientMessage, ConnectionId, PlaySession, RoomRegistry, ServerMessage, SessionError,
};
