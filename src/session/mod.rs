//! Play sessions and the two-player room relay.
//!
//! - `play`: one local session over a level catalog (moves, undo, restart,
//!   level progression, checkpoints).
//! - `protocol`: JSON envelopes exchanged with relay clients.
//! - `room`: transport-free room registry that owns one session per room.

pub mod play;
pub mod protocol;
pub mod room;

pub use play::{PlaySession, SessionError};
pub use protocol::{
    ClientMessage, JoinRoom, PlayerInput, ProtocolError, RoomError, RoomSeat, ServerMessage,
    StateUpdate,
};
pub use room::{ConnectionId, Outbound, RoomRegistry};
