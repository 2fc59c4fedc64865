//! State exchanged between peers each frame.
//!
//! Every peer writes its own record under its identity and reads everyone
//! else's. Merging is last-writer-wins with no ordering guarantees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::models::{Enemy, PlayerState, Shot};

/// Leading byte of every encoded frame.
pub const STATE_VERSION: u8 = 1;

/// Maximum encoded shared state size in bytes.
pub const MAX_STATE_SIZE: usize = 64 * 1024; // 64 KiB

/// One peer's published record. Any field may be absent: a client never
/// publishes `room` or `enemies`, and a peer that has not run a frame yet
/// publishes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<Vec<Shot>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemies: Option<Vec<Enemy>>,
}

/// Peer records keyed by identity.
pub type SharedState = BTreeMap<String, PeerState>;

/// Encode shared state as a version byte followed by MessagePack.
pub fn encode_shared_state(state: &SharedState) -> Result<Vec<u8>, SimError> {
    let payload = rmp_serde::to_vec_named(state).map_err(|e| SimError::Codec(e.to_string()))?;
    let total = 1 + payload.len();
    if total > MAX_STATE_SIZE {
        return Err(SimError::PayloadTooLarge(total));
    }
    let mut buf = Vec::with_capacity(total);
    buf.push(STATE_VERSION);
    buf.extend_from_slice(&payload);
    Ok(buf)
}

/// Decode a frame produced by [`encode_shared_state`].
pub fn decode_shared_state(data: &[u8]) -> Result<SharedState, SimError> {
    let Some((&version, payload)) = data.split_first() else {
        return Err(SimError::Codec("empty frame".to_string()));
    };
    if version != STATE_VERSION {
        return Err(SimError::Codec(format!(
            "unknown state version: 0x{version:02x}"
        )));
    }
    if data.len() > MAX_STATE_SIZE {
        return Err(SimError::PayloadTooLarge(data.len()));
    }
    rmp_serde::from_slice(payload).map_err(|e| SimError::Codec(e.to_string()))
}
