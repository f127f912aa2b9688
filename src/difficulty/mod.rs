//! Difficulty calibration.
//!
//! Turns the solver's ascending solution lengths into a three-tier
//! move-limit table. Tier ordering (`strict <= medium <= lenient`) follows
//! from the rank ordering in `TierRanks`; no clamping is applied afterwards.

pub mod limits;

pub use limits::{limits, MoveLimits, Tier, TierRanks};
