use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collab::{Presenter, RoomLoader};
use crate::config::SimConfig;
use crate::enemy::update_enemies;
use crate::error::SimError;
use crate::events::SimEvent;
use crate::geometry::overlaps;
use crate::models::{Cooldown, Enemy, PlayerState, Room, Shot};

/// Owns the active room and everything that happens inside it.
pub struct Map {
    room: Room,
    /// Shared by every enemy in the room.
    damage_cooldown: Cooldown,
    rng: StdRng,
}

impl Map {
    pub fn new(mut room: Room, seed: u64) -> Self {
        room.renumber_enemies();
        Self {
            room,
            damage_cooldown: Cooldown::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn damage_cooldown(&self) -> Cooldown {
        self.damage_cooldown
    }

    /// Replace the room's enemies with a list published by another peer.
    /// Ids are kept as published so events on both peers name the same enemy.
    pub fn adopt_enemies(&mut self, enemies: Vec<Enemy>) {
        self.room.enemies = enemies;
    }

    /// Swap in `room`, tearing down the old room's presentation first.
    /// Returns the room that was active before.
    pub fn change_rooms<P: Presenter>(&mut self, mut room: Room, view: &mut P) -> Room {
        view.destroy_textures(&self.room);
        room.renumber_enemies();
        view.initialize_room(&room);
        view.render_room(&room);
        std::mem::replace(&mut self.room, room)
    }

    /// Advance the room by one frame.
    ///
    /// Enemies move and take shot damage, then doors are scanned in order. An
    /// open door the player stands in moves the player to the next room (only
    /// when `can_change_rooms`) and ends the scan; a closed door hit by any
    /// shot opens.
    pub fn update<L: RoomLoader, P: Presenter>(
        &mut self,
        shots: &[Shot],
        player: &mut PlayerState,
        can_change_rooms: bool,
        loader: &L,
        view: &mut P,
        cfg: &SimConfig,
    ) -> Result<Vec<SimEvent>, SimError> {
        let mut events = update_enemies(
            &mut self.room,
            shots,
            &mut self.damage_cooldown,
            &cfg.enemy,
            &cfg.shots,
            &mut self.rng,
        );
        self.damage_cooldown.tick();

        let mut destination = None;
        for (index, door) in self.room.doors.iter_mut().enumerate() {
            if door.open {
                if can_change_rooms && overlaps(&door.rect, &player.rect) {
                    destination = Some(door.leads_to.clone());
                    break;
                }
            } else if shots.iter().any(|s| overlaps(&s.rect, &door.rect)) {
                door.open = true;
                tracing::debug!(room = %self.room.name, index, "Door opened by shot");
                events.push(SimEvent::DoorOpened { index });
            }
        }

        if let Some(to) = destination {
            events.push(self.enter(&to, player, loader, view, cfg)?);
        }

        view.render_room(&self.room);
        Ok(events)
    }

    /// Load `to`, make it the active room, and stand the player in front of
    /// the door leading back.
    fn enter<L: RoomLoader, P: Presenter>(
        &mut self,
        to: &str,
        player: &mut PlayerState,
        loader: &L,
        view: &mut P,
        cfg: &SimConfig,
    ) -> Result<SimEvent, SimError> {
        let next = loader.load_room(to)?;
        next.validate()?;
        let from = self.change_rooms(next, view).name;
        tracing::info!(%from, %to, "Changed rooms");

        match self.room.door_leading_to(&from) {
            Some(back) => {
                player.rect.x = back.rect.x + back.rect.w / 2;
                player.rect.y =
                    back.rect.y + back.rect.h - player.rect.h - cfg.world.door_landing_margin;
            },
            None => {
                tracing::warn!("Room {to} has no door back to {from}, player left in place");
            },
        }

        Ok(SimEvent::RoomChanged {
            from,
            to: to.to_string(),
        })
    }
}
