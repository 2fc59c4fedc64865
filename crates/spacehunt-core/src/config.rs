use serde::{Deserialize, Serialize};

/// Play-field width in pixels.
pub const FIELD_WIDTH: i32 = 800;
/// Play-field height in pixels.
pub const FIELD_HEIGHT: i32 = 600;

/// Player hitbox width.
pub const PLAYER_WIDTH: i32 = 40;
/// Player hitbox height.
pub const PLAYER_HEIGHT: i32 = 60;
/// Player health on spawn.
pub const PLAYER_MAX_HP: i32 = 99;
/// Downward acceleration per frame (pixels/frame^2).
pub const GRAVITY: i32 = 2;
/// Vertical velocity applied on jump (negative is up).
pub const JUMP_VY: i32 = -24;
/// Horizontal distance covered by one move command.
pub const HORIZONTAL_STEP: i32 = 8;
/// Frames of immunity after the player takes contact damage.
pub const PLAYER_DAMAGE_COOLDOWN: u32 = 5;

/// Enemy hitbox width.
pub const ENEMY_WIDTH: i32 = 32;
/// Enemy hitbox height.
pub const ENEMY_HEIGHT: i32 = 32;
/// Enemy health on spawn.
pub const ENEMY_HP: i32 = 30;
/// Damage dealt to the player on enemy contact.
pub const ENEMY_CONTACT_DAMAGE: i32 = 10;
/// Horizontal spring stiffness pulling an enemy to its rest position.
pub const ENEMY_STIFFNESS_X: i32 = 1;
/// Vertical spring stiffness pulling an enemy to its rest position.
pub const ENEMY_STIFFNESS_Y: i32 = 1;
/// Enemy mass used by the spring force.
pub const ENEMY_MASS: i32 = 10;
/// Largest random velocity perturbation per axis per frame.
pub const ENEMY_JITTER: i32 = 7;

/// Shot hitbox size (square).
pub const SHOT_SIZE: i32 = 8;
/// Frames between two shots.
pub const SHOT_COOLDOWN: u32 = 10;
/// Damage dealt to an enemy by one shot.
pub const SHOT_DAMAGE: i32 = 10;
/// Shot speed as a multiple of the horizontal step.
pub const SHOT_SPEED_MULTIPLIER: f32 = 1.5;
/// Frames during which no enemy in the room can be hurt again.
pub const ROOM_DAMAGE_COOLDOWN: u32 = 5;

/// Gap left between the player's feet and a door's floor after a room change.
pub const DOOR_LANDING_MARGIN: i32 = 10;

/// Play-field bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Player physics and combat parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: i32,
    pub height: i32,
    pub max_hp: i32,
    pub gravity: i32,
    pub jump_vy: i32,
    pub horizontal_step: i32,
    pub damage_cooldown: u32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    pub ammo: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            max_hp: PLAYER_MAX_HP,
            gravity: GRAVITY,
            jump_vy: JUMP_VY,
            horizontal_step: HORIZONTAL_STEP,
            damage_cooldown: PLAYER_DAMAGE_COOLDOWN,
            spawn_x: 100,
            spawn_y: 100,
            ammo: 5,
        }
    }
}

/// Enemy spring model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: i32,
    pub height: i32,
    pub hp: i32,
    pub contact_damage: i32,
    pub stiffness_x: i32,
    pub stiffness_y: i32,
    pub mass: i32,
    pub jitter: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            hp: ENEMY_HP,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            stiffness_x: ENEMY_STIFFNESS_X,
            stiffness_y: ENEMY_STIFFNESS_Y,
            mass: ENEMY_MASS,
            jitter: ENEMY_JITTER,
        }
    }
}

/// Shot spawning and damage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotConfig {
    pub size: i32,
    pub cooldown: u32,
    pub damage: i32,
    pub speed_multiplier: f32,
    pub room_damage_cooldown: u32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            size: SHOT_SIZE,
            cooldown: SHOT_COOLDOWN,
            damage: SHOT_DAMAGE,
            speed_multiplier: SHOT_SPEED_MULTIPLIER,
            room_damage_cooldown: ROOM_DAMAGE_COOLDOWN,
        }
    }
}

/// Room graph and session parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub start_room: String,
    pub door_landing_margin: i32,
    pub save_path: String,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            start_room: "entrance".to_string(),
            door_landing_margin: DOOR_LANDING_MARGIN,
            save_path: "assets/save.json".to_string(),
            seed: 42,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub shots: ShotConfig,
    pub world: WorldConfig,
}

impl SimConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("SPACEHUNT_CONFIG")
            .unwrap_or_else(|_| "config/spacehunt.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                SimConfig::default()
            }),
            Err(_) => SimConfig::default(),
        }
    }

    /// Parse a TOML document and check that the values can drive a simulation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the physics divides by or the world generator lays out with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field.width", self.field.width),
            ("field.height", self.field.height),
            ("player.width", self.player.width),
            ("player.height", self.player.height),
            ("enemy.width", self.enemy.width),
            ("enemy.height", self.enemy.height),
            ("enemy.mass", self.enemy.mass),
        ];
        if let Some((key, value)) = positive.into_iter().find(|(_, v)| *v <= 0) {
            return Err(ConfigError::Invalid {
                key,
                reason: format!("must be positive, got {value}"),
            });
        }
        if self.enemy.jitter < 0 {
            return Err(ConfigError::Invalid {
                key: "enemy.jitter",
                reason: format!("must not be negative, got {}", self.enemy.jitter),
            });
        }
        Ok(())
    }
}

/// Why a config document was refused.
#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    Invalid { key: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Invalid { key, reason } => write!(f, "{key} {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = SimConfig::from_toml("").unwrap();
        assert_eq!(cfg.field, FieldConfig::default());
        assert_eq!(cfg.player.gravity, GRAVITY);
        assert_eq!(cfg.shots.cooldown, SHOT_COOLDOWN);
        assert_eq!(cfg.world.start_room, "entrance");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg = SimConfig::from_toml(
            r#"
            [player]
            gravity = 3

            [field]
            width = 1024
            "#,
        )
        .unwrap();
        assert_eq!(cfg.player.gravity, 3);
        assert_eq!(cfg.player.jump_vy, JUMP_VY);
        assert_eq!(cfg.field.width, 1024);
        assert_eq!(cfg.field.height, FIELD_HEIGHT);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let cfg = SimConfig::from_toml(include_str!("../../../config/spacehunt.toml")).unwrap();
        let defaults = SimConfig::default();
        assert_eq!(cfg.field, defaults.field);
        assert_eq!(cfg.player.jump_vy, defaults.player.jump_vy);
        assert_eq!(cfg.enemy.jitter, defaults.enemy.jitter);
        assert_eq!(cfg.shots.cooldown, defaults.shots.cooldown);
        assert_eq!(cfg.world.seed, defaults.world.seed);
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(matches!(
            SimConfig::from_toml("[player]\ngravity = \"heavy\""),
            Err(ConfigError::Parse(_))
        ));
    }

    fn rejected_key(toml: &str) -> &'static str {
        match SimConfig::from_toml(toml) {
            Err(ConfigError::Invalid { key, .. }) => key,
            other => panic!("expected {toml:?} to be invalid, got {other:?}"),
        }
    }

    #[test]
    fn zero_mass_is_rejected() {
        assert_eq!(rejected_key("[enemy]\nmass = 0"), "enemy.mass");
        assert_eq!(rejected_key("[enemy]\nmass = -10"), "enemy.mass");
    }

    #[test]
    fn empty_field_is_rejected() {
        assert_eq!(rejected_key("[field]\nwidth = 0"), "field.width");
        assert_eq!(rejected_key("[field]\nheight = -600"), "field.height");
    }

    #[test]
    fn empty_player_is_rejected() {
        assert_eq!(rejected_key("[player]\nwidth = 0"), "player.width");
        assert_eq!(rejected_key("[player]\nheight = -1"), "player.height");
    }

    #[test]
    fn empty_enemy_is_rejected() {
        assert_eq!(rejected_key("[enemy]\nwidth = 0"), "enemy.width");
        assert_eq!(rejected_key("[enemy]\nheight = 0"), "enemy.height");
    }

    #[test]
    fn negative_jitter_is_rejected() {
        assert_eq!(rejected_key("[enemy]\njitter = -1"), "enemy.jitter");
        assert!(SimConfig::from_toml("[enemy]\njitter = 0").is_ok());
    }

    #[test]
    fn invalid_value_names_the_key() {
        let err = SimConfig::from_toml("[enemy]\nmass = 0").unwrap_err();
        assert_eq!(err.to_string(), "enemy.mass must be positive, got 0");
    }

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
    }
}
