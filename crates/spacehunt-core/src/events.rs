use serde::{Deserialize, Serialize};

/// Something notable that happened during a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    PlayerDamaged { hp: i32 },
    ShotFired { x: i32, y: i32 },
    EnemyDamaged { id: u32, hp: i32 },
    EnemyKilled { id: u32 },
    DoorOpened { index: usize },
    RoomChanged { from: String, to: String },
    /// A client followed the primary peer into another room.
    RoomAdopted { room: String },
}
