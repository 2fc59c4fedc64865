use std::path::PathBuf;

use spacehunt_core::collab::{Command, Presenter, RoomCatalog, ScriptedInput};
use spacehunt_core::config::{EnemyConfig, SimConfig};
use spacehunt_core::error::SimError;
use spacehunt_core::events::SimEvent;
use spacehunt_core::game::{Game, Session};
use spacehunt_core::geometry::Aabb;
use spacehunt_core::models::{Block, Door, Enemy, PlayerState, Room, Shot};
use spacehunt_core::snapshot::SharedState;

pub type TestGame = Game<ScriptedInput, RoomCatalog, CountingPresenter>;

pub const FLOOR_Y: i32 = 540;

/// Defaults with enemy jitter switched off so runs are exact.
pub fn calm_config() -> SimConfig {
    SimConfig {
        enemy: EnemyConfig {
            jitter: 0,
            ..EnemyConfig::default()
        },
        ..SimConfig::default()
    }
}

fn floor() -> Block {
    Block {
        rect: Aabb::new(0, FLOOR_Y, 800, 60),
    }
}

fn door(x: i32, leads_to: &str) -> Door {
    Door {
        rect: Aabb::new(x, FLOOR_Y - 140, 40, 140),
        open: false,
        leads_to: leads_to.to_string(),
    }
}

/// `entrance` has a closed door on the right to `hall`; `hall` has a closed
/// door on the left back to `entrance` and two enemies.
pub fn world() -> RoomCatalog {
    let cfg = EnemyConfig::default();
    RoomCatalog::new([
        Room::new("entrance", vec![floor()], vec![door(760, "hall")], vec![]),
        Room::new(
            "hall",
            vec![floor()],
            vec![door(0, "entrance")],
            vec![Enemy::new(300, 200, &cfg), Enemy::new(500, 250, &cfg)],
        ),
    ])
}

pub fn new_game(session: Session) -> TestGame {
    Game::new(
        calm_config(),
        session,
        ScriptedInput::default(),
        world(),
        CountingPresenter::default(),
    )
    .expect("start room exists")
}

/// Queue `count` copies of `command`.
pub fn queue(game: &mut TestGame, command: Command, count: usize) {
    for _ in 0..count {
        game.input_mut().push(command);
    }
}

/// Run `frames` frames, collecting every event.
pub fn run(
    game: &mut TestGame,
    state: &mut SharedState,
    frames: usize,
) -> Result<Vec<SimEvent>, SimError> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(game.update(state)?);
    }
    Ok(events)
}

/// Run until `pred` matches an event or `max_frames` pass.
pub fn run_until(
    game: &mut TestGame,
    state: &mut SharedState,
    max_frames: usize,
    pred: impl Fn(&SimEvent) -> bool,
) -> Option<SimEvent> {
    for _ in 0..max_frames {
        let events = game.update(state).expect("frame runs");
        if let Some(hit) = events.into_iter().find(|e| pred(e)) {
            return Some(hit);
        }
    }
    None
}

/// Let the freshly spawned player fall onto the floor.
pub fn settle(game: &mut TestGame, state: &mut SharedState) {
    run(game, state, 40).expect("frames run");
    assert_eq!(game.player().rect.bottom(), FLOOR_Y, "Player should be standing");
}

pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("spacehunt-it-{}-{name}.json", std::process::id()))
}

/// Presenter that only counts what it was asked to do.
#[derive(Debug, Default)]
pub struct CountingPresenter {
    pub frames: usize,
    pub player_textures: usize,
    pub shot_textures: usize,
    pub rooms_initialized: Vec<String>,
    pub players_rendered: usize,
}

impl Presenter for CountingPresenter {
    fn present(&mut self) {
        self.frames += 1;
    }

    fn initialize_room(&mut self, room: &Room) {
        self.rooms_initialized.push(room.name.clone());
    }

    fn destroy_textures(&mut self, _room: &Room) {}

    fn load_player_texture(&mut self, _player: &PlayerState) {
        self.player_textures += 1;
    }

    fn load_shot_texture(&mut self, _shot: &Shot) {
        self.shot_textures += 1;
    }

    fn render_room(&mut self, _room: &Room) {}

    fn render_player(&mut self, _player: &PlayerState) {
        self.players_rendered += 1;
    }

    fn render_shots(&mut self, _shots: &[Shot]) {}
}
