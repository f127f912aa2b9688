//! Joint state: the unit of search.
//!
//! A `JointState` holds only the two agent positions. The grid and goal
//! layout live in the immutable `Level` and are passed by shared reference,
//! so producing a successor is a plain copy of four integers.

use serde::{Deserialize, Serialize};

use super::agent::{AgentId, AgentPair};
use super::direction::Direction;

/// A grid coordinate. `(0, 0)` is the top-left cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate in `dir`, or `None` if it would leave
    /// the coordinate space.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let x = u16::try_from(i32::from(self.x) + dx).ok()?;
        let y = u16::try_from(i32::from(self.y) + dy).ok()?;
        Some(Pos { x, y })
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Deduplication key for a `JointState`.
///
/// Packs `(first.x, first.y, second.x, second.y)` into 16-bit lanes, most
/// significant first, so key order equals lexicographic coordinate order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CanonicalKey(pub u64);

/// Positions of both agents at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointState {
    pub agents: AgentPair<Pos>,
}

impl JointState {
    #[must_use]
    pub const fn new(first: Pos, second: Pos) -> Self {
        Self {
            agents: AgentPair::new(first, second),
        }
    }

    /// Position of one agent.
    #[must_use]
    pub fn position(&self, agent: AgentId) -> Pos {
        self.agents[agent]
    }

    /// Copy of this state with one agent relocated.
    #[must_use]
    pub fn with_position(mut self, agent: AgentId, pos: Pos) -> Self {
        self.agents[agent] = pos;
        self
    }

    /// Whether any agent stands on `pos`.
    #[must_use]
    pub fn occupies(&self, pos: Pos) -> bool {
        self.agents.first == pos || self.agents.second == pos
    }

    #[must_use]
    pub fn key(&self) -> CanonicalKey {
        let AgentPair { first, second } = self.agents;
        CanonicalKey(
            (u64::from(first.x) << 48)
                | (u64::from(first.y) << 32)
                | (u64::from(second.x) << 16)
                | u64::from(second.y),
        )
    }
}
