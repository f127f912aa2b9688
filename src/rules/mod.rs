//! Movement rules.
//!
//! The engine is shared unmodified by local play, the room relay, the
//! solver and the generator.

pub mod engine;

pub use engine::{Command, MoveOutcome, MoveReason, MovementEngine, Successors};
