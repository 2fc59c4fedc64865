//! Narrow interfaces to the collaborators the simulation drives but does not own:
//! input polling, room assets, and presentation.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::models::{PlayerState, Room, Shot};

/// One discrete player command per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Command {
    #[default]
    None,
    Jump,
    LookUp,
    Morph,
    MoveLeft,
    MoveRight,
    Shoot,
}

/// Source of player commands. Must not block: return [`Command::None`] when
/// nothing is pending.
pub trait InputSource {
    fn poll_command(&mut self) -> Command;
}

/// Replays a fixed list of commands, then reports [`Command::None`] forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Command>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_command(&mut self) -> Command {
        self.queue.pop_front().unwrap_or_default()
    }
}

/// Resolves room names to room data.
pub trait RoomLoader {
    /// Fails when the named room does not exist or is malformed. Callers never
    /// receive a partially built room.
    fn load_room(&self, name: &str) -> Result<Room, SimError>;
}

/// In-memory room set keyed by name. Every load hands out a fresh copy, so
/// re-entering a room restores its initial state.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: HashMap<String, Room>,
}

impl RoomCatalog {
    pub fn new(rooms: impl IntoIterator<Item = Room>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }

    pub fn insert(&mut self, room: Room) {
        self.rooms.insert(room.name.clone(), room);
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl RoomLoader for RoomCatalog {
    fn load_room(&self, name: &str) -> Result<Room, SimError> {
        self.rooms
            .get(name)
            .cloned()
            .ok_or_else(|| SimError::RoomMissing(name.to_string()))
    }
}

/// Side-effect-only presentation layer. Failures are handled (and reported)
/// by the implementation; the simulation never sees them.
pub trait Presenter {
    /// Start a new frame.
    fn clear(&mut self) {}

    /// Show the finished frame.
    fn present(&mut self) {}

    fn initialize_room(&mut self, room: &Room);

    fn destroy_textures(&mut self, room: &Room);

    fn load_player_texture(&mut self, _player: &PlayerState) {}

    fn load_shot_texture(&mut self, _shot: &Shot) {}

    fn render_room(&mut self, room: &Room);

    fn render_player(&mut self, player: &PlayerState);

    fn render_shots(&mut self, shots: &[Shot]);
}

/// Presenter that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn initialize_room(&mut self, _room: &Room) {}

    fn destroy_textures(&mut self, _room: &Room) {}

    fn render_room(&mut self, _room: &Room) {}

    fn render_player(&mut self, _player: &PlayerState) {}

    fn render_shots(&mut self, _shots: &[Shot]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_drains_then_idles() {
        let mut input = ScriptedInput::new([Command::Jump, Command::Shoot]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.poll_command(), Command::Jump);
        assert_eq!(input.poll_command(), Command::Shoot);
        assert_eq!(input.remaining(), 0);
        assert_eq!(input.poll_command(), Command::None);
        assert_eq!(input.poll_command(), Command::None);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn catalog_returns_fresh_copies() {
        let catalog = RoomCatalog::new([Room::new("a", vec![], vec![], vec![])]);
        let mut first = catalog.load_room("a").unwrap();
        first.name.push('!');
        assert_eq!(catalog.load_room("a").unwrap().name, "a");
    }

    #[test]
    fn catalog_missing_room_is_an_error() {
        let catalog = RoomCatalog::default();
        match catalog.load_room("nowhere") {
            Err(SimError::RoomMissing(name)) => assert_eq!(name, "nowhere"),
            other => panic!("Expected RoomMissing, got {other:?}"),
        }
    }
}
