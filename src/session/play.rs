//! One play session: the current level, position, move count and history.
//!
//! Replaces scattered global UI state with an explicit context whose
//! lifetime is one session. Rendering and input mapping stay outside; the
//! caller feeds `(agent, direction)` commands in and reads state back.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{AgentId, Direction, JointState, Level};
use crate::difficulty::{MoveLimits, Tier};
use crate::levels::LevelCatalog;
use crate::rules::{MoveOutcome, MovementEngine};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("level index {index} out of range (catalog has {len} levels)")]
    LevelIndex { index: usize, len: usize },

    #[error("checkpoint encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("checkpoint position {state:?} is not playable on level {level:?}")]
    Mismatch { level: String, state: JointState },

    #[error("checkpoint records {moves} moves but {history} undo steps")]
    MoveCount { moves: u32, history: usize },
}

/// Serialized session progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Checkpoint {
    level_index: usize,
    state: JointState,
    moves: u32,
    history: im::Vector<JointState>,
    completed: bool,
}

/// Session context for local or relayed play.
#[derive(Clone, Debug)]
pub struct PlaySession {
    catalog: Arc<LevelCatalog>,
    level_index: usize,
    state: JointState,
    moves: u32,
    /// States before each successful move, oldest first.
    history: im::Vector<JointState>,
    completed: bool,
}

impl PlaySession {
    /// Start at the first catalog level.
    pub fn new(catalog: Arc<LevelCatalog>) -> Result<Self, SessionError> {
        Self::at_level(catalog, 0)
    }

    /// Start at a specific catalog level.
    pub fn at_level(catalog: Arc<LevelCatalog>, index: usize) -> Result<Self, SessionError> {
        let state = catalog
            .get(index)
            .ok_or(SessionError::LevelIndex {
                index,
                len: catalog.len(),
            })?
            .level
            .initial_state();

        Ok(Self {
            catalog,
            level_index: index,
            state,
            moves: 0,
            history: im::Vector::new(),
            completed: false,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<LevelCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.catalog[self.level_index].level
    }

    #[must_use]
    pub fn state(&self) -> JointState {
        self.state
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn move_limits(&self) -> MoveLimits {
        self.catalog[self.level_index].move_limits
    }

    /// Issue a command by direction name, as received from input or the wire.
    ///
    /// Once the level is completed, further commands are ignored until the
    /// session is reset, undone or advanced.
    pub fn command(&mut self, agent: AgentId, direction: &str) -> MoveOutcome {
        if self.completed {
            return MoveOutcome::unchanged(self.state, None);
        }
        let outcome = MovementEngine::new(self.level()).apply_named(self.state, agent, direction);
        self.record(outcome);
        outcome
    }

    /// Issue an already-parsed command.
    pub fn apply(&mut self, agent: AgentId, direction: Direction) -> MoveOutcome {
        if self.completed {
            return MoveOutcome::unchanged(self.state, None);
        }
        let outcome = MovementEngine::new(self.level()).apply(self.state, agent, direction);
        self.record(outcome);
        outcome
    }

    fn record(&mut self, outcome: MoveOutcome) {
        if !outcome.moved {
            return;
        }
        self.history.push_back(self.state);
        self.state = outcome.state;
        self.moves += 1;
        self.completed = MovementEngine::new(self.level()).is_complete(&self.state);

        if self.completed {
            log::info!("level {:?} completed in {} moves", self.level().name(), self.moves);
        }
    }

    /// Step back one move. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.state = previous;
                self.moves -= 1;
                self.completed = MovementEngine::new(self.level()).is_complete(&self.state);
                true
            }
            None => false,
        }
    }

    /// Restart the current level.
    pub fn reset(&mut self) {
        self.state = self.level().initial_state();
        self.moves = 0;
        self.history.clear();
        self.completed = false;
    }

    /// Move to the next catalog level, wrapping after the last.
    pub fn advance(&mut self) {
        self.level_index = self.catalog.next_index(self.level_index);
        self.reset();
    }

    /// Jump to a catalog level.
    pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.catalog.len() {
            return Err(SessionError::LevelIndex {
                index,
                len: self.catalog.len(),
            });
        }
        self.level_index = index;
        self.reset();
        Ok(())
    }

    /// Whether the move count is still within the tier's ceiling.
    #[must_use]
    pub fn within_limit(&self, tier: Tier) -> bool {
        self.move_limits().allows(tier, self.moves)
    }

    /// Moves left under the tier's ceiling, `None` when unlimited.
    #[must_use]
    pub fn remaining(&self, tier: Tier) -> Option<u32> {
        self.move_limits()
            .get(tier)
            .map(|ceiling| ceiling.saturating_sub(self.moves))
    }

    /// Encode progress for later `restore`.
    pub fn checkpoint(&self) -> Result<Vec<u8>, SessionError> {
        let checkpoint = Checkpoint {
            level_index: self.level_index,
            state: self.state,
            moves: self.moves,
            history: self.history.clone(),
            completed: self.completed,
        };
        Ok(bincode::serialize(&checkpoint)?)
    }

    /// Rebuild a session from `checkpoint` bytes against `catalog`.
    ///
    /// The move count must match the undo history, and completion is
    /// recomputed from the restored position.
    pub fn restore(catalog: Arc<LevelCatalog>, bytes: &[u8]) -> Result<Self, SessionError> {
        let checkpoint: Checkpoint = bincode::deserialize(bytes)?;
        if usize::try_from(checkpoint.moves).ok() != Some(checkpoint.history.len()) {
            return Err(SessionError::MoveCount {
                moves: checkpoint.moves,
                history: checkpoint.history.len(),
            });
        }
        let mut session = Self::at_level(catalog, checkpoint.level_index)?;

        let level = session.level();
        let playable = |s: &JointState| s.agents.iter().all(|(_, &pos)| !level.is_wall(pos));
        if !playable(&checkpoint.state) || !checkpoint.history.iter().all(playable) {
            return Err(SessionError::Mismatch {
                level: level.name().to_string(),
                state: checkpoint.state,
            });
        }

        session.state = checkpoint.state;
        session.moves = checkpoint.moves;
        session.history = checkpoint.history;
        session.completed = MovementEngine::new(session.level()).is_complete(&session.state);
        Ok(session)
    }
}
