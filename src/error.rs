use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Errors that can occur when driving MyHome audio amplifiers
#[derive(Error, Debug)]
pub enum AudioError {
    /// The gateway's outbound channel is gone (transport task stopped)
    #[error("gateway connection closed")]
    GatewayClosed,

    /// The entity whose updates were being watched has been dropped
    #[error("entity dropped")]
    EntityDropped,

    /// Update channel fell behind or otherwise failed
    #[error("channel error: {0}")]
    ChannelError(String),

    /// Source name not in the amplifier's source list
    #[error("unknown source: {0}")]
    UnknownSource(String),
}
