use crate::config::Where;
use serde::{Deserialize, Serialize};

/// Inbound decoded notification from the gateway
///
/// Events are produced by the (out-of-scope) transport decoder and routed to
/// the adapter whose address matches. Each event carries exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEvent {
    /// Bus address the event originated from
    #[serde(rename = "where")]
    pub where_: Where,

    pub kind: AudioEventKind,
}

/// Payload of an audio event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioEventKind {
    /// Raw volume reading in the 0-31 domain
    Volume(u8),
    /// Raw on/off indicator; zero means off, anything else playing
    State(u8),
    /// Station / track label currently tuned
    Station(String),
}

impl AudioEvent {
    pub fn volume(where_: impl Into<Where>, raw: u8) -> Self {
        Self {
            where_: where_.into(),
            kind: AudioEventKind::Volume(raw),
        }
    }

    pub fn state(where_: impl Into<Where>, raw: u8) -> Self {
        Self {
            where_: where_.into(),
            kind: AudioEventKind::State(raw),
        }
    }

    pub fn station(where_: impl Into<Where>, station: impl Into<String>) -> Self {
        Self {
            where_: where_.into(),
            kind: AudioEventKind::Station(station.into()),
        }
    }
}
