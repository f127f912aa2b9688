//! Agent identification, control axes and per-agent data storage.
//!
//! ## AgentId
//!
//! The puzzle always has exactly two agents. Each one is bound to a fixed
//! control axis: the first agent commands horizontal moves, the second
//! commands vertical moves. The axis is a property of the agent role, never
//! of the input device that issued the command.
//!
//! ## AgentPair
//!
//! Per-agent data storage with O(1) access, indexed by `AgentId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Movement axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Left/right.
    Horizontal,
    /// Up/down.
    Vertical,
}

/// One of the two agents.
///
/// Serialized as `1` or `2`, matching the seat numbers used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AgentId {
    /// Agent 1, commands horizontal moves.
    First,
    /// Agent 2, commands vertical moves.
    Second,
}

impl AgentId {
    /// Both agents, in seat order.
    pub const BOTH: [AgentId; 2] = [AgentId::First, AgentId::Second];

    /// Get the 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            AgentId::First => 0,
            AgentId::Second => 1,
        }
    }

    /// Get the 1-based seat number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// The axis this agent is allowed to command.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            AgentId::First => Axis::Horizontal,
            AgentId::Second => Axis::Vertical,
        }
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Agent {}", self.number())
    }
}

impl From<AgentId> for u8 {
    fn from(agent: AgentId) -> Self {
        agent.number()
    }
}

impl TryFrom<u8> for AgentId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AgentId::First),
            2 => Ok(AgentId::Second),
            other => Err(format!("agent number must be 1 or 2, got {other}")),
        }
    }
}

/// One value per agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentPair<T> {
    pub first: T,
    pub second: T,
}

impl<T> AgentPair<T> {
    /// Create a pair from explicit values.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Get a reference to an agent's value.
    #[must_use]
    pub fn get(&self, agent: AgentId) -> &T {
        match agent {
            AgentId::First => &self.first,
            AgentId::Second => &self.second,
        }
    }

    /// Get a mutable reference to an agent's value.
    pub fn get_mut(&mut self, agent: AgentId) -> &mut T {
        match agent {
            AgentId::First => &mut self.first,
            AgentId::Second => &mut self.second,
        }
    }

    /// Iterate over (AgentId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &T)> {
        [(AgentId::First, &self.first), (AgentId::Second, &self.second)].into_iter()
    }
}

impl<T> Index<AgentId> for AgentPair<T> {
    type Output = T;

    fn index(&self, agent: AgentId) -> &Self::Output {
        self.get(agent)
    }
}

impl<T> IndexMut<AgentId> for AgentPair<T> {
    fn index_mut(&mut self, agent: AgentId) -> &mut Self::Output {
        self.get_mut(agent)
    }
}
