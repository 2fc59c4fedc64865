use crate::collab::Command;
use crate::config::{FieldConfig, PlayerConfig, SimConfig};
use crate::events::SimEvent;
use crate::geometry::{Side, overlaps, wall_contact};
use crate::models::{Block, Door, PlayerState, Room, Stance};

/// Interpret one command. Movement commands translate the player directly;
/// vertical motion is left to [`tick_player`].
pub fn apply_command(
    player: &mut PlayerState,
    command: Command,
    cfg: &PlayerConfig,
    field: &FieldConfig,
) {
    match command {
        Command::Jump => jump(player, cfg),
        Command::LookUp => look_up(player),
        Command::Morph => morph(player),
        Command::MoveLeft => walk(player, -1, cfg, field),
        Command::MoveRight => walk(player, 1, cfg, field),
        Command::Shoot | Command::None => {},
    }
}

fn jump(player: &mut PlayerState, cfg: &PlayerConfig) {
    if player.jumping {
        return;
    }
    player.vy = cfg.jump_vy;
    player.jumping = true;
    player.falling = false;
}

fn look_up(player: &mut PlayerState) {
    if player.stance == Stance::Morphed {
        player.stance = Stance::Idle;
        return;
    }
    player.x_sight = 0;
    player.y_sight = -1;
}

fn morph(player: &mut PlayerState) {
    // Airborne: look down instead.
    if player.is_airborne() {
        player.x_sight = 0;
        player.y_sight = 1;
        return;
    }
    player.stance = Stance::Morphed;
    player.x_sight = 0;
    player.y_sight = 0;
}

fn walk(player: &mut PlayerState, dir: i32, cfg: &PlayerConfig, field: &FieldConfig) {
    player.x_sight = dir;
    player.y_sight = 0;
    player.rect.x += dir * cfg.horizontal_step;
    player.rect.x = player.rect.x.clamp(0, (field.width - player.rect.w).max(0));
}

/// Snap the player out of every solid it ran into.
///
/// Blocks and closed doors are always solid. Open doors only let the player
/// through when it may change rooms; otherwise they stop it like a wall.
pub fn collide_with_walls(
    player: &mut PlayerState,
    blocks: &[Block],
    doors: &[Door],
    can_change_rooms: bool,
    prev_x: i32,
    prev_y: i32,
) {
    let walls = blocks.iter().map(|b| &b.rect).chain(
        doors
            .iter()
            .filter(|d| !(d.open && can_change_rooms))
            .map(|d| &d.rect),
    );
    for wall in walls {
        if let Some(side) = wall_contact(&player.rect, wall, prev_x, prev_y) {
            side.snap(&mut player.rect, wall);
            match side {
                Side::Top => player.land(),
                Side::Bottom => player.vy = 0,
                Side::Left | Side::Right => {},
            }
        }
    }
}

/// Advance the player by one frame.
///
/// Returns [`SimEvent::PlayerDamaged`] when an enemy landed a hit this frame.
/// A player at 0 hp takes no further contact hits.
pub fn tick_player(
    player: &mut PlayerState,
    command: Command,
    room: &Room,
    can_change_rooms: bool,
    cfg: &SimConfig,
) -> Option<SimEvent> {
    let prev_x = player.rect.x;
    let prev_y = player.rect.y;

    apply_command(player, command, &cfg.player, &cfg.field);

    // s += v + g/2, v += g
    player.rect.y += player.vy + cfg.player.gravity / 2;
    player.vy += cfg.player.gravity;
    if player.vy >= 0 {
        player.falling = true;
    }

    collide_with_walls(
        player,
        &room.blocks,
        &room.doors,
        can_change_rooms,
        prev_x,
        prev_y,
    );

    if player.rect.y < 0 {
        player.rect.y = 0;
    } else if player.rect.bottom() > cfg.field.height {
        player.rect.y = cfg.field.height - player.rect.h;
        player.land();
    }

    let mut event = None;
    if player.hp > 0
        && player.damage_cooldown.ready()
        && room.enemies.iter().any(|e| overlaps(&e.rect, &player.rect))
        && player.take_damage(cfg.enemy.contact_damage, cfg.player.damage_cooldown)
    {
        tracing::debug!(hp = player.hp, "Player hit by enemy");
        event = Some(SimEvent::PlayerDamaged { hp: player.hp });
    }

    player.damage_cooldown.tick();
    event
}
