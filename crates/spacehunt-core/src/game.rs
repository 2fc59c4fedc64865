use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collab::{InputSource, Presenter, RoomLoader};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::events::SimEvent;
use crate::map::Map;
use crate::models::{PlayerState, Room, Shot};
use crate::player::tick_player;
use crate::projectile::{Aim, ShotController};
use crate::snapshot::{PeerState, SharedState};

/// Who this instance is and who else is playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: String,
    pub is_host: bool,
    /// Other peers' identities. For a client the first entry is the host.
    pub peers: Vec<String>,
}

impl Session {
    /// A single-player session.
    pub fn solo(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            is_host: true,
            peers: Vec::new(),
        }
    }

    pub fn host(identity: impl Into<String>, clients: Vec<String>) -> Self {
        Self {
            identity: identity.into(),
            is_host: true,
            peers: clients,
        }
    }

    pub fn client(identity: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            is_host: false,
            peers: vec![host.into()],
        }
    }

    /// The peer whose room and enemies a client follows.
    pub fn primary(&self) -> Option<&str> {
        self.peers.first().map(String::as_str)
    }
}

/// Contents of the save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub player: PlayerState,
    pub room: Room,
}

/// One running instance of the game: the local player, their shots, the
/// active room, and the shadows of every other peer.
pub struct Game<I, L, P> {
    config: SimConfig,
    session: Session,
    player: PlayerState,
    shots: ShotController,
    map: Map,
    shadows: HashMap<String, PlayerState>,
    input: I,
    loader: L,
    view: P,
}

impl<I: InputSource, L: RoomLoader, P: Presenter> Game<I, L, P> {
    /// Load the configured start room and spawn the player.
    pub fn new(
        config: SimConfig,
        session: Session,
        input: I,
        loader: L,
        mut view: P,
    ) -> Result<Self, SimError> {
        let room = loader.load_room(&config.world.start_room)?;
        room.validate()?;
        let player = PlayerState::new(&config.player);

        view.initialize_room(&room);
        view.render_room(&room);
        view.load_player_texture(&player);
        tracing::info!(
            identity = %session.identity,
            host = session.is_host,
            room = %room.name,
            "Game started"
        );

        Ok(Self {
            map: Map::new(room, config.world.seed),
            config,
            session,
            player,
            shots: ShotController::new(),
            shadows: HashMap::new(),
            input,
            loader,
            view,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn shots(&self) -> &[Shot] {
        self.shots.shots()
    }

    pub fn room(&self) -> &Room {
        self.map.room()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Last known state of another peer's player.
    pub fn shadow(&self, peer: &str) -> Option<&PlayerState> {
        self.shadows.get(peer)
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn view(&self) -> &P {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut P {
        &mut self.view
    }

    /// Run one frame against the shared peer state.
    ///
    /// Reads the other peers' records, simulates the local player, shots and
    /// room, then overwrites this peer's record. Only room loading can fail.
    pub fn update(&mut self, state: &mut SharedState) -> Result<Vec<SimEvent>, SimError> {
        let mut events = Vec::new();
        self.view.clear();

        if !self.session.is_host {
            events.extend(self.follow_primary(state)?);
        }

        let command = self.input.poll_command();

        if let Some(event) = tick_player(
            &mut self.player,
            command,
            self.map.room(),
            self.session.is_host,
            &self.config,
        ) {
            events.push(event);
        }
        self.view.render_player(&self.player);

        let aim = Aim::from_player(&self.player, &self.config.player, &self.config.shots);
        let fired = self
            .shots
            .update(command, aim, &self.config.shots, &self.config.field);
        if let Some(event) = fired {
            tracing::debug!(x = aim.x, y = aim.y, "Shot fired");
            if let Some(shot) = self.shots.shots().last() {
                self.view.load_shot_texture(shot);
            }
            events.push(event);
        }
        self.view.render_shots(self.shots.shots());

        events.extend(self.map.update(
            self.shots.shots(),
            &mut self.player,
            self.session.is_host,
            &self.loader,
            &mut self.view,
            &self.config,
        )?);

        self.render_peers(state);
        self.publish(state);

        self.view.present();
        Ok(events)
    }

    /// Client only: move to the host's room when it changes, and take the
    /// host's enemies while in the same room.
    fn follow_primary(&mut self, state: &SharedState) -> Result<Option<SimEvent>, SimError> {
        let Some(primary) = self.session.primary() else {
            return Ok(None);
        };
        let Some(record) = state.get(primary) else {
            return Ok(None);
        };

        let mut adopted = None;
        if let (Some(room), Some(host_player)) = (&record.room, &record.player)
            && *room != self.map.room().name
        {
            let next = self.loader.load_room(room)?;
            next.validate()?;
            self.map.change_rooms(next, &mut self.view);
            self.player.rect.x = host_player.rect.x;
            self.player.rect.y = host_player.rect.y;
            tracing::info!(room = %room, host = %primary, "Followed host into room");
            adopted = Some(SimEvent::RoomAdopted { room: room.clone() });
        }

        if let (Some(room), Some(enemies)) = (&record.room, &record.enemies)
            && *room == self.map.room().name
        {
            self.map.adopt_enemies(enemies.clone());
        }

        Ok(adopted)
    }

    /// Refresh and draw a shadow for every peer that published a player and
    /// shots.
    fn render_peers(&mut self, state: &SharedState) {
        for peer in &self.session.peers {
            let Some(PeerState {
                player: Some(player),
                shots: Some(shots),
                ..
            }) = state.get(peer)
            else {
                continue;
            };

            match self.shadows.get_mut(peer) {
                Some(shadow) => shadow.clone_from(player),
                None => {
                    self.view.load_player_texture(player);
                    self.shadows.insert(peer.clone(), player.clone());
                    tracing::debug!(%peer, "Created shadow player");
                },
            }
            if let Some(shadow) = self.shadows.get(peer) {
                self.view.render_player(shadow);
            }

            let peer_shots: Vec<Shot> = shots.clone();
            for shot in &peer_shots {
                self.view.load_shot_texture(shot);
            }
            self.view.render_shots(&peer_shots);
        }
    }

    /// Overwrite this peer's record. The host also publishes its room and
    /// enemies.
    fn publish(&self, state: &mut SharedState) {
        let host = self.session.is_host;
        state.insert(
            self.session.identity.clone(),
            PeerState {
                room: host.then(|| self.map.room().name.clone()),
                player: Some(self.player.clone()),
                shots: Some(self.shots.shots().to_vec()),
                enemies: host.then(|| self.map.room().enemies.clone()),
            },
        );
    }

    /// Write the player and active room to the configured save path.
    pub fn save(&self) -> Result<(), SimError> {
        self.save_to(&self.config.world.save_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        let file = SaveFile {
            player: self.player.clone(),
            room: self.map.room().clone(),
        };
        let json =
            serde_json::to_string_pretty(&file).map_err(|e| SimError::SaveIo(e.to_string()))?;
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| SimError::SaveIo(e.to_string()))?;
        }
        std::fs::write(path, json).map_err(|e| SimError::SaveIo(e.to_string()))?;
        tracing::info!(path = %path.display(), room = %file.room.name, "Game saved");
        Ok(())
    }

    /// Restore from the configured save path.
    pub fn load(&mut self) -> Result<(), SimError> {
        let path = self.config.world.save_path.clone();
        self.load_from(path)
    }

    /// Restore the player's state and the saved room. Nothing changes when
    /// the file is missing or malformed.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| SimError::SaveIo(e.to_string()))?;
        let SaveFile { player, room } =
            serde_json::from_str(&contents).map_err(|e| SimError::SaveMalformed(e.to_string()))?;
        room.validate().map_err(|e| SimError::SaveMalformed(e.to_string()))?;

        self.player.hp = player.hp;
        self.player.falling = player.falling;
        self.player.jumping = player.jumping;
        self.player.ammo = player.ammo;
        self.player.rect.x = player.rect.x;
        self.player.rect.y = player.rect.y;
        self.player.stance = player.stance;
        self.player.vy = player.vy;
        self.player.x_sight = player.x_sight;
        self.player.y_sight = player.y_sight;

        tracing::info!(path = %path.display(), room = %room.name, "Game loaded");
        self.map.change_rooms(room, &mut self.view);
        Ok(())
    }
}
