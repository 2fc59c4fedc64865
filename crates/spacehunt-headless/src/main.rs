mod bot;
mod presenter;
mod world;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use spacehunt_core::collab::RoomCatalog;
use spacehunt_core::config::SimConfig;
use spacehunt_core::error::SimError;
use spacehunt_core::events::SimEvent;
use spacehunt_core::game::{Game, Session};
use spacehunt_core::snapshot::{SharedState, decode_shared_state, encode_shared_state};

use bot::BotInput;
use presenter::LogPresenter;

const HOST: &str = "host";
const GUEST: &str = "guest";
const DEFAULT_FRAMES: u64 = 600;

type HeadlessGame = Game<BotInput, RoomCatalog, LogPresenter>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimConfig::load();
    let frames = parse_arg("--frames=").unwrap_or(DEFAULT_FRAMES);
    let seed = parse_arg("--seed=").unwrap_or(config.world.seed);

    tracing::info!("Spacehunt headless run: {frames} frames, seed {seed}");

    match run(config, seed, frames) {
        Ok(summary) => {
            tracing::info!(
                frames = summary.frames,
                host_room = %summary.host_room,
                guest_room = %summary.guest_room,
                events = summary.events,
                largest_state = summary.largest_state,
                sprites = summary.sprites,
                "Run finished"
            );
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Run failed: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Value of the first `--name=value` argument that parses.
fn parse_arg<T: std::str::FromStr>(prefix: &str) -> Option<T> {
    std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix(prefix).and_then(|v| v.parse().ok()))
}

#[derive(Debug)]
struct Summary {
    frames: u64,
    events: usize,
    largest_state: usize,
    sprites: u64,
    host_room: String,
    guest_room: String,
}

/// Drive a host and a guest against one shared state, then save the host.
fn run(config: SimConfig, seed: u64, frames: u64) -> Result<Summary, SimError> {
    let world = world::generate_world(seed, &config);

    let mut host: HeadlessGame = Game::new(
        config.clone(),
        Session::host(HOST, vec![GUEST.to_string()]),
        BotInput::new(seed),
        world.clone(),
        LogPresenter::new(HOST),
    )?;
    let mut guest: HeadlessGame = Game::new(
        config,
        Session::client(GUEST, HOST),
        BotInput::new(seed.wrapping_add(1)),
        world,
        LogPresenter::new(GUEST),
    )?;

    let mut state = SharedState::new();
    let mut events = 0;
    let mut largest_state = 0;

    for frame in 0..frames {
        for (peer, game) in [(HOST, &mut host), (GUEST, &mut guest)] {
            let frame_events = game.update(&mut state)?;
            for event in &frame_events {
                log_event(peer, frame, event);
            }
            events += frame_events.len();

            // Stand-in for the transport: every record crosses the wire.
            let bytes = encode_shared_state(&state)?;
            largest_state = largest_state.max(bytes.len());
            state = decode_shared_state(&bytes)?;
        }
    }

    host.save()?;

    Ok(Summary {
        frames: host.view().frames(),
        events,
        largest_state,
        sprites: host.view().sprites() + guest.view().sprites(),
        host_room: host.room().name.clone(),
        guest_room: guest.room().name.clone(),
    })
}

fn log_event(peer: &str, frame: u64, event: &SimEvent) {
    match event {
        SimEvent::RoomChanged { from, to } => {
            tracing::info!(peer, frame, "Moved from {from} to {to}");
        },
        SimEvent::RoomAdopted { room } => {
            tracing::info!(peer, frame, "Followed host into {room}");
        },
        SimEvent::EnemyKilled { id } => {
            tracing::info!(peer, frame, id, "Enemy killed");
        },
        other => tracing::debug!(peer, frame, ?other, "Event"),
    }
}
