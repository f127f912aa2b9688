//! Level catalog validated by the solver at load time.

use std::ops::Index;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Level, LevelError};
use crate::difficulty::MoveLimits;
use crate::solver::{Solver, SolverConfig};

use super::builtin;

/// Reasons a catalog cannot be loaded.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid level definition: {0}")]
    Level(#[from] LevelError),

    #[error("malformed level file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level {index} ({name:?}) has no solution within search bounds")]
    Unsolvable { index: usize, name: String },

    #[error("catalog has no levels")]
    Empty,
}

/// A validated level with its precomputed difficulty data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub level: Level,
    pub min_steps: u32,
    pub move_limits: MoveLimits,
}

/// Ordered list of playable levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    entries: Vec<CatalogEntry>,
}

impl LevelCatalog {
    /// Solve every level and keep its limits. Fails on the first
    /// unsolvable level.
    pub fn from_levels(levels: Vec<Level>, config: &SolverConfig) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut solver = Solver::new(config.clone());
        let mut entries = Vec::with_capacity(levels.len());
        for (index, level) in levels.into_iter().enumerate() {
            let report = solver.solve_default(&level);
            log::debug!(
                "solved {:?}: {} states at {:.0} states/s",
                level.name(),
                report.stats.states_dequeued,
                report.stats.states_per_second()
            );
            let min_steps = match report.min_steps {
                Some(steps) => steps,
                None => {
                    return Err(CatalogError::Unsolvable {
                        index,
                        name: level.name().to_string(),
                    })
                }
            };
            entries.push(CatalogEntry {
                level,
                min_steps,
                move_limits: report.move_limits,
            });
        }

        log::info!("level catalog loaded with {} levels", entries.len());
        Ok(Self { entries })
    }

    /// Load a JSON array of level definitions.
    pub fn from_json(json: &str, config: &SolverConfig) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::from_levels(levels, config)
    }

    /// The built-in campaign.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_levels(builtin::campaign()?, &SolverConfig::default())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Index after `index`, wrapping back to the first level.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.entries.len().max(1)
    }
}

impl Index<usize> for LevelCatalog {
    type Output = CatalogEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}
