//! Core puzzle types: agents, directions, positions, levels, RNG.
//!
//! Everything here is plain data. Behaviour lives in `rules` (movement),
//! `solver` (search) and `generator` (synthesis).

pub mod agent;
pub mod direction;
pub mod level;
pub mod rng;
pub mod state;

pub use agent::{AgentId, AgentPair, Axis};
pub use direction::{Direction, UnknownDirection};
pub use level::{Cell, Goal, Level, LevelError, LevelSpec};
pub use rng::LevelRng;
pub use state::{CanonicalKey, JointState, Pos};
