//! Authoritative room state for two-player relayed play.
//!
//! The registry owns every room and knows nothing about sockets: the caller
//! hands it a connection id plus a decoded message and delivers whatever
//! `(connection, message)` pairs come back.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{AgentId, AgentPair, LevelRng};
use crate::levels::LevelCatalog;

use super::play::PlaySession;
use super::protocol::{ClientMessage, RoomSeat, ServerMessage, StateUpdate};

const ROOM_ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const ROOM_ID_LEN: usize = 5;

/// Opaque handle for one client connection, assigned by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u64);

/// A message addressed to one connection.
pub type Outbound = (ConnectionId, ServerMessage);

#[derive(Clone, Debug)]
struct Room {
    session: PlaySession,
    seats: AgentPair<Option<ConnectionId>>,
}

impl Room {
    fn members(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.seats.iter().filter_map(|(_, seat)| *seat)
    }

    fn free_seat(&self) -> Option<AgentId> {
        AgentId::BOTH.into_iter().find(|&agent| self.seats[agent].is_none())
    }

    fn broadcast(&self, room_id: &str, out: &mut Vec<Outbound>) {
        let update = ServerMessage::StateUpdate(StateUpdate {
            room_id: room_id.to_string(),
            level_index: self.session.level_index(),
            state: self.session.state(),
            moves: self.session.moves(),
            completed: self.session.completed(),
        });
        out.extend(self.members().map(|conn| (conn, update.clone())));
    }
}

/// All live rooms and their members.
#[derive(Debug)]
pub struct RoomRegistry {
    catalog: Arc<LevelCatalog>,
    rooms: FxHashMap<String, Room>,
    members: FxHashMap<ConnectionId, (String, AgentId)>,
    rng: LevelRng,
}

impl RoomRegistry {
    /// Room ids are drawn from an RNG seeded with `seed`.
    pub fn new(catalog: Arc<LevelCatalog>, seed: u64) -> Self {
        Self {
            catalog,
            rooms: FxHashMap::default(),
            members: FxHashMap::default(),
            rng: LevelRng::new(seed),
        }
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// The session backing `room_id`, if the room is live.
    #[must_use]
    pub fn session(&self, room_id: &str) -> Option<&PlaySession> {
        self.rooms.get(room_id).map(|room| &room.session)
    }

    /// Room and seat held by `conn`.
    #[must_use]
    pub fn seat(&self, conn: ConnectionId) -> Option<(&str, AgentId)> {
        self.members
            .get(&conn)
            .map(|(room_id, agent)| (room_id.as_str(), *agent))
    }

    /// Decode and handle raw client text. Malformed input is dropped.
    pub fn handle_json(&mut self, conn: ConnectionId, json: &str) -> Vec<Outbound> {
        match ClientMessage::from_json(json) {
            Ok(message) => self.handle(conn, message),
            Err(err) => {
                log::debug!("dropping message from {:?}: {}", conn, err);
                Vec::new()
            }
        }
    }

    pub fn handle(&mut self, conn: ConnectionId, message: ClientMessage) -> Vec<Outbound> {
        let mut out = Vec::new();
        match message {
            ClientMessage::CreateRoom => self.create_room(conn, &mut out),
            ClientMessage::JoinRoom(join) => self.join_room(conn, join.room_id, &mut out),
            ClientMessage::PlayerInput(input) => self.player_input(conn, &input.direction, &mut out),
        }
        out
    }

    /// Remove `conn` from its room. The room is dropped once empty, otherwise
    /// its level restarts for whoever remains.
    pub fn disconnect(&mut self, conn: ConnectionId) -> Vec<Outbound> {
        let mut out = Vec::new();
        self.leave(conn, &mut out);
        out
    }

    fn leave(&mut self, conn: ConnectionId, out: &mut Vec<Outbound>) {
        let Some((room_id, agent)) = self.members.remove(&conn) else {
            return;
        };
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return;
        };

        room.seats[agent] = None;
        if room.members().next().is_none() {
            self.rooms.remove(&room_id);
            log::info!("room {} closed", room_id);
        } else {
            room.session.reset();
            room.broadcast(&room_id, out);
        }
    }

    fn create_room(&mut self, conn: ConnectionId, out: &mut Vec<Outbound>) {
        self.leave(conn, out);

        let session = match PlaySession::new(Arc::clone(&self.catalog)) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("cannot open room: {}", err);
                out.push((conn, ServerMessage::error(err.to_string())));
                return;
            }
        };

        let room_id = self.fresh_room_id();
        let room = Room {
            session,
            seats: AgentPair::new(Some(conn), None),
        };
        self.members.insert(conn, (room_id.clone(), AgentId::First));
        log::info!("room {} opened", room_id);

        out.push((
            conn,
            ServerMessage::RoomCreated(RoomSeat {
                room_id: room_id.clone(),
                agent: AgentId::First,
            }),
        ));
        room.broadcast(&room_id, out);
        self.rooms.insert(room_id, room);
    }

    fn join_room(&mut self, conn: ConnectionId, room_id: String, out: &mut Vec<Outbound>) {
        if self.seat(conn).map(|(current, _)| current) == Some(room_id.as_str()) {
            out.push((conn, ServerMessage::error("Already in room")));
            return;
        }

        let Some(agent) = self.rooms.get(&room_id).map(Room::free_seat) else {
            out.push((conn, ServerMessage::error("Room not found")));
            return;
        };
        let Some(agent) = agent else {
            out.push((conn, ServerMessage::error("Room full")));
            return;
        };

        self.leave(conn, out);
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return;
        };
        room.seats[agent] = Some(conn);
        self.members.insert(conn, (room_id.clone(), agent));

        out.push((
            conn,
            ServerMessage::RoomJoined(RoomSeat {
                room_id: room_id.clone(),
                agent,
            }),
        ));
        room.broadcast(&room_id, out);
    }

    fn player_input(&mut self, conn: ConnectionId, direction: &str, out: &mut Vec<Outbound>) {
        let Some((room_id, agent)) = self.members.get(&conn).cloned() else {
            log::debug!("input from {:?} outside any room", conn);
            return;
        };
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return;
        };

        let outcome = room.session.command(agent, direction);
        if let Some(reason) = outcome.reason {
            log::debug!("room {}: {} {:?} rejected ({})", room_id, agent, direction, reason.code());
        }

        if room.session.completed() {
            room.broadcast(&room_id, out);
            room.session.advance();
        }
        room.broadcast(&room_id, out);
    }

    fn fresh_room_id(&mut self) -> String {
        loop {
            let id: String = (0..ROOM_ID_LEN)
                .map(|_| {
                    let i = self.rng.gen_range_usize(0..ROOM_ID_ALPHABET.len());
                    char::from(ROOM_ID_ALPHABET[i])
                })
                .collect();
            if !self.rooms.contains_key(&id) {
                return id;
            }
        }
    }
}
