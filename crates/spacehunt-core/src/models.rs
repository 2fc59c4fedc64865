use serde::{Deserialize, Serialize};

use crate::config::{EnemyConfig, PlayerConfig};
use crate::error::SimError;
use crate::geometry::Aabb;

/// Frame countdown gating a repeated interaction (damage, firing).
///
/// Triggering sets it to a fixed value; it then drops by one per tick and
/// the interaction is allowed again once it reads zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cooldown(u32);

impl Cooldown {
    pub fn ready(&self) -> bool {
        self.0 == 0
    }

    pub fn remaining(&self) -> u32 {
        self.0
    }

    pub fn trigger(&mut self, frames: u32) {
        self.0 = frames;
    }

    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }
}

/// Subtract `amount` from `hp`, never going below zero.
pub fn apply_damage(hp: &mut i32, amount: i32) {
    *hp = (*hp - amount).max(0);
}

/// Player behavioral state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Idle,
    Morphed,
}

/// The locally controlled (or shadowed) player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub rect: Aabb,
    pub vy: i32,
    pub hp: i32,
    /// Horizontal facing: -1 left, 0 none, 1 right.
    pub x_sight: i32,
    /// Vertical facing: -1 up, 0 none, 1 down.
    pub y_sight: i32,
    pub jumping: bool,
    pub falling: bool,
    pub stance: Stance,
    #[serde(default)]
    pub damage_cooldown: Cooldown,
    pub ammo: u32,
}

impl PlayerState {
    pub fn new(cfg: &PlayerConfig) -> Self {
        Self {
            rect: Aabb::new(cfg.spawn_x, cfg.spawn_y, cfg.width, cfg.height),
            vy: 0,
            hp: cfg.max_hp,
            x_sight: 1,
            y_sight: 0,
            jumping: false,
            falling: true,
            stance: Stance::Idle,
            damage_cooldown: Cooldown::default(),
            ammo: cfg.ammo,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.jumping || self.falling
    }

    /// Take contact damage unless still immune. Returns whether it landed.
    pub fn take_damage(&mut self, amount: i32, immunity: u32) -> bool {
        if !self.damage_cooldown.ready() {
            return false;
        }
        self.damage_cooldown.trigger(immunity);
        apply_damage(&mut self.hp, amount);
        true
    }

    /// Touch down on solid ground.
    pub fn land(&mut self) {
        self.vy = 0;
        self.jumping = false;
        self.falling = false;
    }
}

/// A spring-tethered flying enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique within the room that owns the enemy.
    #[serde(default)]
    pub id: u32,
    pub rect: Aabb,
    pub vx: i32,
    pub vy: i32,
    pub ax: i32,
    pub ay: i32,
    /// Anchor the spring force pulls toward.
    pub rest_x: i32,
    pub rest_y: i32,
    pub hp: i32,
}

impl Enemy {
    /// A motionless enemy resting at its anchor.
    pub fn new(x: i32, y: i32, cfg: &EnemyConfig) -> Self {
        Self {
            id: 0,
            rect: Aabb::new(x, y, cfg.width, cfg.height),
            vx: 0,
            vy: 0,
            ax: 0,
            ay: 0,
            rest_x: x,
            rest_y: y,
            hp: cfg.hp,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }
}

/// A projectile fired by a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub rect: Aabb,
    pub vx: i32,
    pub vy: i32,
}

impl Shot {
    pub fn new(x: i32, y: i32, vx: i32, vy: i32, size: i32) -> Self {
        Self {
            rect: Aabb::new(x, y, size, size),
            vx,
            vy,
        }
    }
}

/// A door to another room. Closed doors are solid; a shot opens them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub rect: Aabb,
    pub open: bool,
    /// Name of the room on the other side.
    pub leads_to: String,
}

/// Static impassable geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Aabb,
}

/// One screen of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub blocks: Vec<Block>,
    pub doors: Vec<Door>,
    pub enemies: Vec<Enemy>,
}

impl Room {
    pub fn new(
        name: impl Into<String>,
        blocks: Vec<Block>,
        doors: Vec<Door>,
        enemies: Vec<Enemy>,
    ) -> Self {
        let mut room = Self {
            name: name.into(),
            blocks,
            doors,
            enemies,
        };
        room.renumber_enemies();
        room
    }

    /// Give every enemy a distinct id in list order.
    pub fn renumber_enemies(&mut self) {
        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.id = i as u32;
        }
    }

    /// The first door whose destination is `room`.
    pub fn door_leading_to(&self, room: &str) -> Option<&Door> {
        self.doors.iter().find(|d| d.leads_to == room)
    }

    /// Reject rooms a loader should never hand to the simulation.
    pub fn validate(&self) -> Result<(), SimError> {
        let malformed = |reason: String| SimError::RoomMalformed {
            room: self.name.clone(),
            reason,
        };
        if self.name.is_empty() {
            return Err(malformed("room has no name".to_string()));
        }
        let rects = self
            .blocks
            .iter()
            .map(|b| &b.rect)
            .chain(self.doors.iter().map(|d| &d.rect))
            .chain(self.enemies.iter().map(|e| &e.rect));
        for rect in rects {
            if rect.w < 0 || rect.h < 0 {
                return Err(malformed(format!("negative size {}x{}", rect.w, rect.h)));
            }
        }
        if let Some(i) = self.doors.iter().position(|d| d.leads_to.is_empty()) {
            return Err(malformed(format!("door {i} leads nowhere")));
        }
        Ok(())
    }
}

/// Everything an enemy collides with, blocks first, then closed doors.
pub fn solids<'a>(blocks: &'a [Block], doors: &'a [Door]) -> impl Iterator<Item = &'a Aabb> {
    blocks
        .iter()
        .map(|b| &b.rect)
        .chain(doors.iter().filter(|d| !d.open).map(|d| &d.rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_counts_down_to_zero() {
        let mut cd = Cooldown::default();
        assert!(cd.ready());
        cd.trigger(3);
        assert!(!cd.ready());
        cd.tick();
        cd.tick();
        assert_eq!(cd.remaining(), 1);
        assert!(!cd.ready());
        cd.tick();
        assert!(cd.ready());
        cd.tick();
        assert_eq!(cd.remaining(), 0, "Cooldown must not underflow");
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut hp = 15;
        apply_damage(&mut hp, 10);
        assert_eq!(hp, 5);
        apply_damage(&mut hp, 10);
        assert_eq!(hp, 0);
        apply_damage(&mut hp, 10);
        assert_eq!(hp, 0);
    }

    #[test]
    fn player_immunity_blocks_until_zero() {
        let mut player = PlayerState::new(&PlayerConfig::default());
        let start = player.hp;

        assert!(player.take_damage(10, 3));
        assert_eq!(player.hp, start - 10);

        // Still immune for exactly three ticks.
        for _ in 0..3 {
            assert!(!player.take_damage(10, 3));
            player.damage_cooldown.tick();
        }
        assert!(player.damage_cooldown.ready());
        assert!(player.take_damage(10, 3));
        assert_eq!(player.hp, start - 20);
    }

    #[test]
    fn landing_clears_air_state() {
        let mut player = PlayerState::new(&PlayerConfig::default());
        player.jumping = true;
        player.falling = true;
        player.vy = 7;
        player.land();
        assert!(!player.is_airborne());
        assert_eq!(player.vy, 0);
    }

    #[test]
    fn room_new_assigns_unique_ids() {
        let cfg = EnemyConfig::default();
        let room = Room::new(
            "lab",
            vec![],
            vec![],
            vec![
                Enemy::new(10, 10, &cfg),
                Enemy::new(20, 20, &cfg),
                Enemy::new(30, 30, &cfg),
            ],
        );
        let ids: Vec<u32> = room.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn solids_skip_open_doors() {
        let blocks = vec![Block {
            rect: Aabb::new(0, 0, 10, 10),
        }];
        let doors = vec![
            Door {
                rect: Aabb::new(20, 0, 10, 10),
                open: true,
                leads_to: "a".to_string(),
            },
            Door {
                rect: Aabb::new(40, 0, 10, 10),
                open: false,
                leads_to: "b".to_string(),
            },
        ];
        let xs: Vec<i32> = solids(&blocks, &doors).map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 40]);
    }

    #[test]
    fn validate_rejects_bad_rooms() {
        let ok = Room::new("a", vec![], vec![], vec![]);
        assert!(ok.validate().is_ok());

        let unnamed = Room::new("", vec![], vec![], vec![]);
        assert!(matches!(unnamed.validate(), Err(SimError::RoomMalformed { .. })));

        let negative = Room::new(
            "b",
            vec![Block {
                rect: Aabb::new(0, 0, -1, 10),
            }],
            vec![],
            vec![],
        );
        assert!(negative.validate().is_err());

        let dead_end = Room::new(
            "c",
            vec![],
            vec![Door {
                rect: Aabb::new(0, 0, 10, 10),
                open: false,
                leads_to: String::new(),
            }],
            vec![],
        );
        match dead_end.validate() {
            Err(SimError::RoomMalformed { room, reason }) => {
                assert_eq!(room, "c");
                assert!(reason.contains("door 0"));
            },
            other => panic!("Expected RoomMalformed, got {other:?}"),
        }
    }

    #[test]
    fn player_cooldown_defaults_when_absent_from_json() {
        let player = PlayerState::new(&PlayerConfig::default());
        let mut value = serde_json::to_value(&player).unwrap();
        value.as_object_mut().unwrap().remove("damage_cooldown");
        let back: PlayerState = serde_json::from_value(value).unwrap();
        assert!(back.damage_cooldown.ready());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn health_never_negative(
                start in 0i32..200,
                hits in proptest::collection::vec(0i32..50, 0..30),
            ) {
                let mut hp = start;
                for h in hits {
                    apply_damage(&mut hp, h);
                    prop_assert!(hp >= 0);
                }
            }
        }
    }
}
