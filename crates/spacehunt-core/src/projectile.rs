use crate::collab::Command;
use crate::config::{FieldConfig, PlayerConfig, ShotConfig};
use crate::events::SimEvent;
use crate::models::{Cooldown, PlayerState, Shot};

/// Spawn point and velocity for a new shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aim {
    pub x: i32,
    pub y: i32,
    pub vx: i32,
    pub vy: i32,
}

impl Aim {
    /// Fire from the player's centre in the direction they face.
    pub fn from_player(
        player: &PlayerState,
        player_cfg: &PlayerConfig,
        shot_cfg: &ShotConfig,
    ) -> Self {
        let (x, y) = player.rect.center();
        let speed = |sight: i32| {
            (shot_cfg.speed_multiplier * (sight * player_cfg.horizontal_step) as f32) as i32
        };
        Self {
            x,
            y,
            vx: speed(player.x_sight),
            vy: speed(player.y_sight),
        }
    }
}

/// Owns the player's live shots and the fire-rate cooldown.
///
/// Shots are kept in spawn order. Despawning only ever looks at the front of
/// the list: a shot that stops inside the field holds back every shot fired
/// after it until it leaves.
#[derive(Debug, Clone, Default)]
pub struct ShotController {
    shots: Vec<Shot>,
    cooldown: Cooldown,
}

impl ShotController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn cooldown(&self) -> Cooldown {
        self.cooldown
    }

    /// Fire a shot unless the cooldown is still running. Returns whether a
    /// shot was created.
    pub fn create_shot(&mut self, aim: Aim, cfg: &ShotConfig) -> bool {
        if !self.cooldown.ready() {
            return false;
        }
        self.shots.push(Shot::new(aim.x, aim.y, aim.vx, aim.vy, cfg.size));
        self.cooldown.trigger(cfg.cooldown);
        true
    }

    /// One frame: maybe fire, tick the cooldown, move every shot, then drop
    /// the shots at the front that have left the field.
    pub fn update(
        &mut self,
        command: Command,
        aim: Aim,
        cfg: &ShotConfig,
        field: &FieldConfig,
    ) -> Option<SimEvent> {
        let fired = command == Command::Shoot && self.create_shot(aim, cfg);

        self.cooldown.tick();

        for shot in &mut self.shots {
            shot.rect.x += shot.vx;
            shot.rect.y += shot.vy;
        }

        let gone = despawn_leading(&mut self.shots, field);
        if gone > 0 {
            tracing::trace!(gone, live = self.shots.len(), "Shots left the field");
        }

        fired.then_some(SimEvent::ShotFired {
            x: aim.x,
            y: aim.y,
        })
    }
}

/// Whether a shot's corner lies on or past any field edge.
pub fn out_of_field(shot: &Shot, field: &FieldConfig) -> bool {
    let r = &shot.rect;
    r.x <= 0 || r.y <= 0 || r.x >= field.width || r.y >= field.height
}

/// Remove the leading run of out-of-field shots. Returns how many went.
pub fn despawn_leading(shots: &mut Vec<Shot>, field: &FieldConfig) -> usize {
    let gone = shots
        .iter()
        .take_while(|s| out_of_field(s, field))
        .count();
    shots.drain(..gone);
    gone
}
