use spacehunt_core::collab::Presenter;
use spacehunt_core::models::{PlayerState, Room, Shot};

/// Presenter for runs without a window: room lifecycle goes to the log,
/// per-frame drawing is only counted.
#[derive(Debug)]
pub struct LogPresenter {
    label: &'static str,
    frames: u64,
    sprites: u64,
}

impl LogPresenter {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            frames: 0,
            sprites: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sprites(&self) -> u64 {
        self.sprites
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self) {
        self.frames += 1;
    }

    fn initialize_room(&mut self, room: &Room) {
        tracing::debug!(
            peer = self.label,
            room = %room.name,
            blocks = room.blocks.len(),
            doors = room.doors.len(),
            enemies = room.enemies.len(),
            "Room initialized"
        );
    }

    fn destroy_textures(&mut self, room: &Room) {
        tracing::debug!(peer = self.label, room = %room.name, "Room textures released");
    }

    fn render_room(&mut self, room: &Room) {
        self.sprites += (room.blocks.len() + room.doors.len() + room.enemies.len()) as u64;
    }

    fn render_player(&mut self, _player: &PlayerState) {
        self.sprites += 1;
    }

    fn render_shots(&mut self, shots: &[Shot]) {
        self.sprites += shots.len() as u64;
    }
}
