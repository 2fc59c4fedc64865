use rand::Rng;

use crate::config::{EnemyConfig, ShotConfig};
use crate::events::SimEvent;
use crate::geometry::{overlaps, wall_contact};
use crate::models::{Block, Cooldown, Door, Enemy, Room, Shot, apply_damage, solids};

/// Advance one enemy by a frame: spring motion, jitter, then wall response.
pub fn step_enemy<R: Rng>(
    enemy: &mut Enemy,
    blocks: &[Block],
    doors: &[Door],
    cfg: &EnemyConfig,
    rng: &mut R,
) {
    let prev_x = enemy.rect.x;
    let prev_y = enemy.rect.y;

    // s += v + a/2
    enemy.rect.x += enemy.vx + enemy.ax / 2;
    enemy.rect.y += enemy.vy + enemy.ay / 2;

    // a = -k(s - rest)/m
    enemy.ax = -cfg.stiffness_x * (enemy.rect.x - enemy.rest_x) / cfg.mass;
    enemy.ay = -cfg.stiffness_y * (enemy.rect.y - enemy.rest_y) / cfg.mass;

    enemy.vx += enemy.ax + jitter(rng, cfg.jitter);
    enemy.vy += enemy.ay + jitter(rng, cfg.jitter);

    collide_with_walls(enemy, blocks, doors, prev_x, prev_y);
}

fn jitter<R: Rng>(rng: &mut R, amplitude: i32) -> i32 {
    if amplitude <= 0 {
        return 0;
    }
    rng.random_range(-amplitude..=amplitude)
}

/// Snap the enemy out of every solid it ran into and kill the velocity
/// component on the struck axis.
pub fn collide_with_walls(
    enemy: &mut Enemy,
    blocks: &[Block],
    doors: &[Door],
    prev_x: i32,
    prev_y: i32,
) {
    for wall in solids(blocks, doors) {
        if let Some(side) = wall_contact(&enemy.rect, wall, prev_x, prev_y) {
            side.snap(&mut enemy.rect, wall);
            if side.is_vertical() {
                enemy.vy = 0;
            } else {
                enemy.vx = 0;
            }
        }
    }
}

/// Run every enemy in the room for one frame and apply shot damage.
///
/// `cooldown` is shared by the whole room: once any enemy is hit, no enemy
/// can be hit again until it runs out. Enemies killed during the pass are
/// compacted out after every enemy has moved, so the pass never skips or
/// repeats an entry.
pub fn update_enemies<R: Rng>(
    room: &mut Room,
    shots: &[Shot],
    cooldown: &mut Cooldown,
    enemy_cfg: &EnemyConfig,
    shot_cfg: &ShotConfig,
    rng: &mut R,
) -> Vec<SimEvent> {
    let Room {
        blocks,
        doors,
        enemies,
        ..
    } = room;
    let mut events = Vec::new();

    for enemy in enemies.iter_mut() {
        step_enemy(enemy, blocks, doors, enemy_cfg, rng);

        if !cooldown.ready() {
            continue;
        }

        if shots.iter().any(|s| overlaps(&s.rect, &enemy.rect)) {
            cooldown.trigger(shot_cfg.room_damage_cooldown);
            apply_damage(&mut enemy.hp, shot_cfg.damage);
            tracing::debug!(id = enemy.id, hp = enemy.hp, "Enemy hit by shot");
            events.push(SimEvent::EnemyDamaged {
                id: enemy.id,
                hp: enemy.hp,
            });
            if enemy.is_dead() {
                events.push(SimEvent::EnemyKilled { id: enemy.id });
            }
        }
    }

    enemies.retain(|e| !e.is_dead());
    events
}
