use crate::snapshot::MAX_STATE_SIZE;

/// Errors surfaced by the simulation core.
///
/// Absent input and absent peer data are not errors; they are the no-op case.
#[derive(Debug)]
pub enum SimError {
    /// A room asset does not exist.
    RoomMissing(String),
    /// A room asset exists but could not be parsed.
    RoomMalformed { room: String, reason: String },
    /// The save file could not be read or written.
    SaveIo(String),
    /// The save file was read but does not describe a valid snapshot.
    SaveMalformed(String),
    /// Shared state could not be encoded or decoded.
    Codec(String),
    /// Encoded shared state exceeds [`MAX_STATE_SIZE`].
    PayloadTooLarge(usize),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomMissing(name) => write!(f, "room not found: {name}"),
            Self::RoomMalformed { room, reason } => write!(f, "room {room} is malformed: {reason}"),
            Self::SaveIo(e) => write!(f, "save file i/o error: {e}"),
            Self::SaveMalformed(e) => write!(f, "save file is malformed: {e}"),
            Self::Codec(e) => write!(f, "shared state codec error: {e}"),
            Self::PayloadTooLarge(size) => {
                write!(
                    f,
                    "shared state too large: {size} bytes (max {MAX_STATE_SIZE})"
                )
            },
        }
    }
}

impl std::error::Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_room() {
        let err = SimError::RoomMissing("hangar".to_string());
        assert_eq!(err.to_string(), "room not found: hangar");

        let err = SimError::RoomMalformed {
            room: "hangar".to_string(),
            reason: "no blocks".to_string(),
        };
        assert!(err.to_string().contains("hangar"));
        assert!(err.to_string().contains("no blocks"));
    }

    #[test]
    fn payload_too_large_reports_limit() {
        let msg = SimError::PayloadTooLarge(MAX_STATE_SIZE + 1).to_string();
        assert!(msg.contains(&MAX_STATE_SIZE.to_string()));
    }
}
