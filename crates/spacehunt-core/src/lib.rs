pub mod collab;
pub mod config;
pub mod enemy;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod map;
pub mod models;
pub mod player;
pub mod projectile;
pub mod snapshot;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::path::PathBuf;

    use crate::collab::{Presenter, RoomCatalog};
    use crate::config::{EnemyConfig, FIELD_HEIGHT, FIELD_WIDTH, SimConfig};
    use crate::geometry::Aabb;
    use crate::models::{Block, Door, Enemy, PlayerState, Room, Shot};

    /// Top edge of the floor block in every fixture room.
    pub const FLOOR_Y: i32 = 540;

    /// Full-width floor block along the bottom of the field.
    pub fn floor() -> Block {
        Block {
            rect: Aabb::new(0, FLOOR_Y, FIELD_WIDTH, FIELD_HEIGHT - FLOOR_Y),
        }
    }

    /// An empty room with only a floor.
    pub fn floor_room(name: &str) -> Room {
        Room::new(name, vec![floor()], vec![], vec![])
    }

    /// A freshly spawned player standing on the fixture floor.
    pub fn standing_player(cfg: &SimConfig) -> PlayerState {
        let mut player = PlayerState::new(&cfg.player);
        player.rect.y = FLOOR_Y - player.rect.h;
        player.land();
        player
    }

    /// A door sitting on the fixture floor.
    pub fn floor_door(x: i32, open: bool, leads_to: &str) -> Door {
        Door {
            rect: Aabb::new(x, FLOOR_Y - 140, 40, 140),
            open,
            leads_to: leads_to.to_string(),
        }
    }

    /// Two rooms side by side. `west` (returned, and also in the catalog) has
    /// a closed door at index 0 and an open door to `east` at index 1;
    /// `east` has a closed door back to `west`.
    pub fn linked_rooms() -> (Room, RoomCatalog) {
        let west = Room::new(
            "west",
            vec![floor()],
            vec![
                floor_door(0, false, "attic"),
                floor_door(FIELD_WIDTH - 40, true, "east"),
            ],
            vec![],
        );
        let east = Room::new(
            "east",
            vec![floor()],
            vec![floor_door(0, false, "west")],
            vec![],
        );
        let catalog = RoomCatalog::new([west.clone(), east]);
        (west, catalog)
    }

    /// Catalog holding the default start room and one neighbour with enemies.
    pub fn demo_catalog() -> RoomCatalog {
        let cfg = EnemyConfig::default();
        let start = SimConfig::default().world.start_room;
        RoomCatalog::new([
            Room::new(
                start.clone(),
                vec![floor()],
                vec![floor_door(FIELD_WIDTH - 40, false, "hall")],
                vec![],
            ),
            Room::new(
                "hall",
                vec![floor()],
                vec![floor_door(0, false, &start)],
                vec![Enemy::new(300, 200, &cfg), Enemy::new(500, 250, &cfg)],
            ),
        ])
    }

    /// A save path unique to this process and `name`.
    pub fn temp_save_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spacehunt-{}-{name}.json", std::process::id()))
    }

    /// Presenter that records every call it receives.
    #[derive(Debug, Default)]
    pub struct RecordingPresenter {
        pub calls: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn clear(&mut self) {
            self.calls.push("clear".to_string());
        }

        fn present(&mut self) {
            self.calls.push("present".to_string());
        }

        fn initialize_room(&mut self, room: &Room) {
            self.calls.push(format!("initialize_room {}", room.name));
        }

        fn destroy_textures(&mut self, room: &Room) {
            self.calls.push(format!("destroy_textures {}", room.name));
        }

        fn load_player_texture(&mut self, _player: &PlayerState) {
            self.calls.push("load_player_texture".to_string());
        }

        fn load_shot_texture(&mut self, _shot: &Shot) {
            self.calls.push("load_shot_texture".to_string());
        }

        fn render_room(&mut self, room: &Room) {
            self.calls.push(format!("render_room {}", room.name));
        }

        fn render_player(&mut self, _player: &PlayerState) {
            self.calls.push("render_player".to_string());
        }

        fn render_shots(&mut self, shots: &[Shot]) {
            self.calls.push(format!("render_shots {}", shots.len()));
        }
    }
}
