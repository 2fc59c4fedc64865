use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use spacehunt_core::collab::RoomCatalog;
use spacehunt_core::config::SimConfig;
use spacehunt_core::geometry::Aabb;
use spacehunt_core::models::{Block, Door, Enemy, Room};

/// Floor thickness in pixels.
const FLOOR_HEIGHT: i32 = 60;
/// Door size in pixels.
const DOOR_WIDTH: i32 = 40;
const DOOR_HEIGHT: i32 = 140;
/// Names of the generated rooms after the start room, west to east.
const ROOM_NAMES: [&str; 2] = ["hall", "lab"];

/// Generate a deterministic strip of rooms from a seed.
///
/// Rooms are laid out west to east starting at the configured start room.
/// Neighbours are joined by a closed door on each side, so every door has a
/// matching door leading back.
pub fn generate_world(seed: u64, cfg: &SimConfig) -> RoomCatalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = std::iter::once(cfg.world.start_room.clone())
        .chain(ROOM_NAMES.iter().map(|n| n.to_string()))
        .collect();

    let mut catalog = RoomCatalog::default();
    for (i, name) in names.iter().enumerate() {
        let west = i.checked_sub(1).map(|j| names[j].as_str());
        let east = names.get(i + 1).map(String::as_str);
        catalog.insert(generate_room(&mut rng, name, west, east, i > 0, cfg));
    }
    catalog
}

fn generate_room(
    rng: &mut StdRng,
    name: &str,
    west: Option<&str>,
    east: Option<&str>,
    with_enemies: bool,
    cfg: &SimConfig,
) -> Room {
    let width = cfg.field.width;
    let floor_y = cfg.field.height - FLOOR_HEIGHT;

    let mut blocks = vec![Block {
        rect: Aabb::new(0, floor_y, width, FLOOR_HEIGHT),
    }];

    // A ledge or two well clear of the doors
    for _ in 0..rng.random_range(1..=2) {
        let w = rng.random_range(80..=160);
        let Some(x) = pick(rng, DOOR_WIDTH * 3, width - DOOR_WIDTH * 3 - w) else {
            continue;
        };
        let y = rng.random_range(floor_y - 220..=floor_y - 120);
        blocks.push(Block {
            rect: Aabb::new(x, y, w, 20),
        });
    }

    let door_at = |x: i32, leads_to: &str| Door {
        rect: Aabb::new(x, floor_y - DOOR_HEIGHT, DOOR_WIDTH, DOOR_HEIGHT),
        open: false,
        leads_to: leads_to.to_string(),
    };
    let mut doors = Vec::new();
    if let Some(w) = west {
        doors.push(door_at(0, w));
    }
    if let Some(e) = east {
        doors.push(door_at(width - DOOR_WIDTH, e));
    }

    let mut enemies = Vec::new();
    if with_enemies {
        for _ in 0..rng.random_range(1..=3) {
            let x = pick(rng, DOOR_WIDTH * 2, width - DOOR_WIDTH * 2 - cfg.enemy.width);
            let y = pick(rng, 60, floor_y - 260);
            if let (Some(x), Some(y)) = (x, y) {
                enemies.push(Enemy::new(x, y, &cfg.enemy));
            }
        }
    }

    Room::new(name, blocks, doors, enemies)
}

/// Uniform value in `lo..hi`, or `None` when the field is too small for it.
fn pick(rng: &mut StdRng, lo: i32, hi: i32) -> Option<i32> {
    (lo < hi).then(|| rng.random_range(lo..hi))
}
