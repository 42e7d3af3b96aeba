//! Rust adapter binding MyHome gateway audio amplifiers to a media-player
//! entity model
//!
//! This library translates high-level media-player intents into outbound
//! MyHome audio commands and inbound decoded events into cached display
//! state. It supports:
//!
//! - Per-device entity construction from explicit configuration
//! - Playback control (play, stop, turn on/off)
//! - Volume control (step, absolute set in a normalized 0.0-1.0 domain)
//! - Source selection (Radio / Stream)
//! - Track skipping (next / previous)
//! - Event-driven state updates with change notifications
//!
//! Encoding frames onto the bus and managing the physical connection are
//! the transport's concern; this crate only produces typed command values
//! and consumes typed events.
//!
//! # Quick Start
//!
//! ```no_run
//! use myhome_audio::{setup_platform, AudioEvent, GatewayHandler, PlatformConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config: PlatformConfig = serde_json::from_str(
//!         r#"{ "devices": { "lounge_amp": { "name": "Lounge", "where": "11" } } }"#,
//!     )?;
//!
//!     // The receiving half goes to the transport task that owns the bus
//!     let (gateway, mut outbound) = GatewayHandler::channel();
//!     let mut players = setup_platform(&config, &gateway);
//!
//!     // Ask every amplifier for its current status
//!     for player in &players {
//!         player.refresh().await?;
//!     }
//!
//!     // Decoded events flow back in through handle_event
//!     players[0].handle_event(&AudioEvent::station("11", "Jazz FM"));
//!     assert_eq!(players[0].media_title(), "Jazz FM");
//!
//!     while let Some(message) = outbound.recv().await {
//!         println!("to transport: {:?}", message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several layers:
//!
//! - **Platform**: setup/teardown and event routing
//! - **MediaPlayer**: per-device adapter holding cached display state
//! - **Gateway**: outbound command channel to the transport task
//! - **Command / Event**: typed protocol values
//! - **Entity**: device identity and update notification
//! - **Config**: explicit per-device configuration records

mod command;
mod config;
mod entity;
mod error;
mod event;
mod gateway;
mod media_player;
mod platform;

// Public exports
pub use command::{AudioCommand, CommandKind, MAX_RAW_VOLUME};
pub use config::{DeviceConfig, DeviceId, PlatformConfig, Where, Who};
pub use entity::{DeviceInfo, Entity, EntityUpdate, UpdateReceiver};
pub use error::{AudioError, Result};
pub use event::{AudioEvent, AudioEventKind};
pub use gateway::{GatewayHandler, Outbound};
pub use media_player::{
    MediaPlayer, MediaPlayerFeatures, MediaPlayerState, MediaType, Source,
};
pub use platform::{setup_platform, unload_platform, EventDispatcher};
