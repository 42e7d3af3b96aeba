use crate::command::AudioCommand;
use crate::error::{AudioError, Result};
use tokio::sync::mpsc;

/// Outbound message handed to the transport task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Fire-and-forget command
    Command(AudioCommand),
    /// Status query; the answer arrives later as events
    StatusRequest(AudioCommand),
}

/// Handle to the gateway's outbound command channel
///
/// The handler owns no socket itself; it queues commands for the transport
/// task that serializes them onto the bus. Sends are fire-and-forget: the
/// only failure surfaced here is the transport being gone entirely.
#[derive(Debug, Clone)]
pub struct GatewayHandler {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl GatewayHandler {
    /// Create a handler together with the receiving half for the transport
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a command for the bus
    pub async fn send(&self, command: AudioCommand) -> Result<()> {
        tracing::debug!(?command, "sending command");
        self.tx
            .send(Outbound::Command(command))
            .map_err(|_| AudioError::GatewayClosed)
    }

    /// Queue a status request; the reply is delivered via `handle_event`
    pub async fn send_status_request(&self, command: AudioCommand) -> Result<()> {
        tracing::debug!(?command, "sending status request");
        self.tx
            .send(Outbound::StatusRequest(command))
            .map_err(|_| AudioError::GatewayClosed)
    }
}
