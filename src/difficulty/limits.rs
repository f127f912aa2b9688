//! Move-limit tiers derived from ranked solution lengths.

use serde::{Deserialize, Serialize};

/// Difficulty tier, from most to least forgiving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Lenient,
    Medium,
    Strict,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Lenient, Tier::Medium, Tier::Strict];
}

/// Which rank of the ascending solution list each tier reads.
///
/// Ranks are zero-based. When the list is shorter than a rank, that tier
/// falls back to the longest recorded solution plus `padding`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRanks {
    pub lenient: usize,
    pub medium: usize,
    pub strict: usize,
    pub padding: u32,
}

impl Default for TierRanks {
    fn default() -> Self {
        Self {
            lenient: 9,
            medium: 4,
            strict: 1,
            padding: 2,
        }
    }
}

impl TierRanks {
    /// Create a rank table.
    ///
    /// Ranks must satisfy `strict <= medium <= lenient`; that ordering is
    /// what keeps the ceilings ordered.
    pub fn new(lenient: usize, medium: usize, strict: usize, padding: u32) -> Self {
        assert!(strict <= medium, "strict rank must not exceed medium rank");
        assert!(medium <= lenient, "medium rank must not exceed lenient rank");
        Self {
            lenient,
            medium,
            strict,
            padding,
        }
    }

    /// Ceiling for one rank over an ascending, non-empty list.
    fn ceiling(&self, solutions: &[u32], rank: usize) -> Option<u32> {
        let longest = *solutions.last()?;
        Some(
            solutions
                .get(rank)
                .copied()
                .unwrap_or_else(|| longest.saturating_add(self.padding)),
        )
    }

    /// Derive the move-limit table for an ascending solution list.
    #[must_use]
    pub fn limits(&self, solutions: &[u32]) -> MoveLimits {
        MoveLimits {
            lenient: self.ceiling(solutions, self.lenient),
            medium: self.ceiling(solutions, self.medium),
            strict: self.ceiling(solutions, self.strict),
        }
    }
}

/// Per-tier move ceilings. `None` means no limit, never zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lenient: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<u32>,
}

impl MoveLimits {
    /// No ceiling on any tier.
    pub const UNBOUNDED: MoveLimits = MoveLimits {
        lenient: None,
        medium: None,
        strict: None,
    };

    #[must_use]
    pub fn get(&self, tier: Tier) -> Option<u32> {
        match tier {
            Tier::Lenient => self.lenient,
            Tier::Medium => self.medium,
            Tier::Strict => self.strict,
        }
    }

    /// Whether `moves` stays within the tier's ceiling.
    #[must_use]
    pub fn allows(&self, tier: Tier, moves: u32) -> bool {
        self.get(tier).map_or(true, |ceiling| moves <= ceiling)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }
}

/// Derive limits with the default rank table.
#[must_use]
pub fn limits(solutions: &[u32]) -> MoveLimits {
    TierRanks::default().limits(solutions)
}
