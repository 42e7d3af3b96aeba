use crate::config::Where;
use crate::media_player::Source;
use serde::{Deserialize, Serialize};

/// Highest raw volume level the amplifier reports
pub const MAX_RAW_VOLUME: u8 = 31;

/// Outbound command value addressed to one amplifier
///
/// Commands are plain typed values; encoding them onto the bus is the
/// transport's concern, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioCommand {
    /// Bus address of the target amplifier
    #[serde(rename = "where")]
    pub where_: Where,

    pub what: CommandKind,
}

/// The intent a command carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    /// Query current state; answers arrive later as events
    Status,
    Play,
    Stop,
    VolumeUp,
    VolumeDown,
    /// Set volume to a raw 0-31 level
    VolumeSet { level: u8 },
    SelectSource { source: Source },
    NextTrack,
    PreviousTrack,
}

impl AudioCommand {
    fn new(where_: impl Into<Where>, what: CommandKind) -> Self {
        Self {
            where_: where_.into(),
            what,
        }
    }

    /// Status query for the amplifier at `where_`
    pub fn status(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::Status)
    }

    pub fn play(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::Play)
    }

    pub fn stop(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::Stop)
    }

    pub fn volume_up(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::VolumeUp)
    }

    pub fn volume_down(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::VolumeDown)
    }

    /// Volume-set command from a normalized level in [0.0, 1.0]
    ///
    /// The normalized level is scaled to the amplifier's raw 0-31 domain and
    /// rounded to the nearest step.
    pub fn volume_set(where_: impl Into<Where>, volume: f64) -> Self {
        Self::new(
            where_,
            CommandKind::VolumeSet {
                level: raw_volume(volume),
            },
        )
    }

    pub fn select_source(where_: impl Into<Where>, source: Source) -> Self {
        Self::new(where_, CommandKind::SelectSource { source })
    }

    pub fn next_track(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::NextTrack)
    }

    pub fn prev_track(where_: impl Into<Where>) -> Self {
        Self::new(where_, CommandKind::PreviousTrack)
    }
}

/// Scale a normalized volume to the raw 0-31 domain
fn raw_volume(volume: f64) -> u8 {
    (volume.clamp(0.0, 1.0) * f64::from(MAX_RAW_VOLUME)).round() as u8
}
