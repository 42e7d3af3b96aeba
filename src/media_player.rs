use crate::command::{AudioCommand, MAX_RAW_VOLUME};
use crate::entity::{DeviceInfo, Entity, UpdateReceiver};
use crate::error::{AudioError, Result};
use crate::event::{AudioEvent, AudioEventKind};
use crate::gateway::GatewayHandler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playback state of an amplifier as cached by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MediaPlayerState {
    #[default]
    Off,
    Playing,
}

/// Audio source an amplifier can be switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Radio,
    Stream,
}

impl Source {
    /// All sources the amplifier accepts
    pub const ALL: &'static [Source] = &[Source::Radio, Source::Stream];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Radio => write!(f, "Radio"),
            Source::Stream => write!(f, "Stream"),
        }
    }
}

impl FromStr for Source {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("radio") {
            Ok(Source::Radio)
        } else if s.eq_ignore_ascii_case("stream") {
            Ok(Source::Stream)
        } else {
            Err(AudioError::UnknownSource(s.to_string()))
        }
    }
}

/// Kind of media the amplifier plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Music,
}

/// Bitset of operations an entity supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPlayerFeatures(u32);

impl MediaPlayerFeatures {
    pub const PLAY: Self = Self(1 << 0);
    pub const VOLUME_STEP: Self = Self(1 << 1);
    pub const VOLUME_SET: Self = Self(1 << 2);
    pub const TURN_ON: Self = Self(1 << 3);
    pub const TURN_OFF: Self = Self(1 << 4);
    pub const SELECT_SOURCE: Self = Self(1 << 5);
    pub const PREVIOUS_TRACK: Self = Self(1 << 6);
    pub const NEXT_TRACK: Self = Self(1 << 7);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for MediaPlayerFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Media player adapter for one MyHome audio amplifier
///
/// Translates platform intents into outbound commands and inbound events
/// into cached display state. It never waits for a protocol response:
/// intents are fire-and-forget, and cached state only changes when the
/// gateway delivers an event (except the active source, which is set
/// optimistically on selection since the bus has no source-changed event).
#[derive(Debug)]
pub struct MediaPlayer {
    entity: Entity,
    gateway: GatewayHandler,
    features: MediaPlayerFeatures,
    state: MediaPlayerState,
    volume_level: f64,
    active_source: Source,
    station: String,
}

impl MediaPlayer {
    pub fn new(info: DeviceInfo, gateway: GatewayHandler) -> Self {
        Self {
            entity: Entity::new(info),
            gateway,
            features: MediaPlayerFeatures::PLAY
                | MediaPlayerFeatures::VOLUME_STEP
                | MediaPlayerFeatures::VOLUME_SET
                | MediaPlayerFeatures::TURN_ON
                | MediaPlayerFeatures::TURN_OFF
                | MediaPlayerFeatures::SELECT_SOURCE
                | MediaPlayerFeatures::PREVIOUS_TRACK
                | MediaPlayerFeatures::NEXT_TRACK,
            state: MediaPlayerState::Off,
            volume_level: 0.5,
            active_source: Source::Radio,
            station: "Unknown Title".to_string(),
        }
    }

    // ========== Read properties ==========

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn device_id(&self) -> &str {
        &self.entity.info().device_id
    }

    /// Bus address this adapter is bound to
    pub fn where_(&self) -> &str {
        &self.entity.info().where_
    }

    pub fn supported_features(&self) -> MediaPlayerFeatures {
        self.features
    }

    pub fn state(&self) -> MediaPlayerState {
        self.state
    }

    /// Cached volume in [0.0, 1.0]
    pub fn volume_level(&self) -> f64 {
        self.volume_level
    }

    pub fn source(&self) -> Source {
        self.active_source
    }

    pub fn source_list(&self) -> &'static [Source] {
        Source::ALL
    }

    pub fn media_content_type(&self) -> MediaType {
        MediaType::Music
    }

    /// Station or track label from the most recent STATION event
    pub fn media_title(&self) -> &str {
        &self.station
    }

    pub fn media_channel(&self) -> &str {
        "Unknown Channel"
    }

    /// Subscribe to display-state change notifications for this entity
    pub fn subscribe(&self) -> UpdateReceiver {
        self.entity.subscribe()
    }

    // ========== Intents ==========

    /// Ask the amplifier for its current status
    ///
    /// Cached state is untouched; the answer arrives later as events.
    pub async fn refresh(&self) -> Result<()> {
        self.gateway
            .send_status_request(AudioCommand::status(self.where_()))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    /// Switch the amplifier to another source
    ///
    /// The cached source changes immediately; the bus never confirms a
    /// source switch, so there is nothing to wait for.
    pub async fn select_source(&mut self, source: Source) -> Result<()> {
        self.active_source = source;
        self.gateway
            .send(AudioCommand::select_source(
                self.entity.info().where_.clone(),
                source,
            ))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn next_track(&self) -> Result<()> {
        self.gateway
            .send(AudioCommand::next_track(self.where_()))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn previous_track(&self) -> Result<()> {
        self.gateway
            .send(AudioCommand::prev_track(self.where_()))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    /// Request a volume change to a normalized target in [0.0, 1.0]
    ///
    /// The cached level only changes when the amplifier reports back with a
    /// VOLUME event.
    pub async fn set_volume_level(&self, volume: f64) -> Result<()> {
        self.gateway
            .send(AudioCommand::volume_set(self.where_(), volume))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn volume_up(&self) -> Result<()> {
        self.gateway
            .send(AudioCommand::volume_up(self.where_()))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn volume_down(&self) -> Result<()> {
        self.gateway
            .send(AudioCommand::volume_down(self.where_()))
            .await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn play(&self) -> Result<()> {
        self.gateway.send(AudioCommand::play(self.where_())).await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn turn_on(&self) -> Result<()> {
        self.play().await
    }

    pub async fn stop(&self) -> Result<()> {
        self.gateway.send(AudioCommand::stop(self.where_())).await?;
        self.entity.schedule_update();
        Ok(())
    }

    pub async fn turn_off(&self) -> Result<()> {
        self.stop().await
    }

    // ========== Events ==========

    /// Apply a decoded event to the cached state
    ///
    /// Invoked by the gateway dispatcher for every event addressed to this
    /// device. Synchronous: no suspension between reading the event and
    /// mutating state.
    pub fn handle_event(&mut self, event: &AudioEvent) {
        tracing::trace!(device_id = %self.device_id(), ?event, "applying event");

        match &event.kind {
            AudioEventKind::Station(station) => {
                self.station = station.clone();
            }
            AudioEventKind::Volume(raw) => {
                self.volume_level = volume_from_raw(*raw);
            }
            AudioEventKind::State(raw) => {
                self.state = if *raw == 0 {
                    MediaPlayerState::Off
                } else {
                    MediaPlayerState::Playing
                };
            }
        }

        self.entity.schedule_update();
    }
}

/// Map a raw 0-31 volume reading to the normalized [0.0, 1.0] domain
fn volume_from_raw(raw: u8) -> f64 {
    if raw == 0 {
        0.0
    } else {
        f64::from(raw) / f64::from(MAX_RAW_VOLUME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::gateway::Outbound;
    use tokio::sync::mpsc;

    fn test_player() -> (MediaPlayer, mpsc::UnboundedReceiver<Outbound>) {
        let (gateway, rx) = GatewayHandler::channel();
        let config = DeviceConfig {
            name: "Kitchen".to_string(),
            who: "16".to_string(),
            where_: "21".to_string(),
            manufacturer: "BTicino".to_string(),
            model: "F502".to_string(),
        };
        let info = DeviceInfo::from_config("kitchen_amp", &config);
        (MediaPlayer::new(info, gateway), rx)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
    }

    #[test]
    fn test_construction_defaults() {
        let (player, _rx) = test_player();

        assert_eq!(player.state(), MediaPlayerState::Off);
        assert_close(player.volume_level(), 0.5);
        assert_eq!(player.source(), Source::Radio);
        assert_eq!(player.media_title(), "Unknown Title");
        assert_eq!(player.media_channel(), "Unknown Channel");
        assert_eq!(player.media_content_type(), MediaType::Music);
        assert_eq!(player.source_list(), &[Source::Radio, Source::Stream]);
    }

    #[test]
    fn test_supported_features() {
        let (player, _rx) = test_player();
        let features = player.supported_features();

        assert!(features.contains(MediaPlayerFeatures::PLAY));
        assert!(features.contains(
            MediaPlayerFeatures::VOLUME_SET | MediaPlayerFeatures::SELECT_SOURCE
        ));
        assert!(features.contains(
            MediaPlayerFeatures::PREVIOUS_TRACK | MediaPlayerFeatures::NEXT_TRACK
        ));
    }

    #[test]
    fn test_volume_event_full_raw_domain() {
        let (mut player, _rx) = test_player();

        player.handle_event(&AudioEvent::volume("21", 0));
        assert_close(player.volume_level(), 0.0);

        for raw in 1..=31u8 {
            player.handle_event(&AudioEvent::volume("21", raw));
            assert_close(player.volume_level(), f64::from(raw) / 31.0);
        }
        assert_close(player.volume_level(), 1.0);
    }

    #[test]
    fn test_state_event_zero_and_nonzero() {
        let (mut player, _rx) = test_player();

        player.handle_event(&AudioEvent::state("21", 1));
        assert_eq!(player.state(), MediaPlayerState::Playing);

        player.handle_event(&AudioEvent::state("21", 0));
        assert_eq!(player.state(), MediaPlayerState::Off);

        player.handle_event(&AudioEvent::state("21", 255));
        assert_eq!(player.state(), MediaPlayerState::Playing);
    }

    #[test]
    fn test_station_event_leaves_other_fields_alone() {
        let (mut player, _rx) = test_player();

        player.handle_event(&AudioEvent::station("21", "Jazz FM"));

        assert_eq!(player.media_title(), "Jazz FM");
        assert_eq!(player.state(), MediaPlayerState::Off);
        assert_close(player.volume_level(), 0.5);
        assert_eq!(player.source(), Source::Radio);
    }

    #[tokio::test]
    async fn test_select_source_is_optimistic() {
        let (mut player, mut rx) = test_player();

        player.select_source(Source::Stream).await.unwrap();

        // Source flips before any event confirms it
        assert_eq!(player.source(), Source::Stream);
        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Command(AudioCommand::select_source("21", Source::Stream))
        );
        assert!(rx.try_recv().is_err(), "exactly one command expected");
    }

    #[tokio::test]
    async fn test_refresh_sends_status_request_only() {
        let (player, mut rx) = test_player();

        player.refresh().await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::StatusRequest(AudioCommand::status("21"))
        );
        assert!(rx.try_recv().is_err());
        // Cached state untouched until events arrive
        assert_eq!(player.state(), MediaPlayerState::Off);
        assert_close(player.volume_level(), 0.5);
    }

    #[tokio::test]
    async fn test_set_volume_does_not_touch_cache() {
        let (player, mut rx) = test_player();

        player.set_volume_level(1.0).await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Command(AudioCommand::volume_set("21", 1.0))
        );
        assert_close(player.volume_level(), 0.5);
    }

    #[tokio::test]
    async fn test_play_does_not_flip_playback_state() {
        let (player, mut rx) = test_player();

        player.play().await.unwrap();

        // Only a STATE event moves the cached state
        assert_eq!(player.state(), MediaPlayerState::Off);
        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Command(AudioCommand::play("21"))
        );
    }

    #[tokio::test]
    async fn test_turn_on_and_off_map_to_play_and_stop() {
        let (player, mut rx) = test_player();

        player.turn_on().await.unwrap();
        player.turn_off().await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Command(AudioCommand::play("21"))
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            Outbound::Command(AudioCommand::stop("21"))
        );
    }

    #[tokio::test]
    async fn test_events_notify_subscribers() {
        let (mut player, _rx) = test_player();
        let mut updates = player.subscribe();

        player.handle_event(&AudioEvent::station("21", "Radio Uno"));

        let update = updates.try_recv().unwrap().unwrap();
        assert_eq!(update.device_id, "kitchen_amp");
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("Radio".parse::<Source>().unwrap(), Source::Radio);
        assert_eq!("stream".parse::<Source>().unwrap(), Source::Stream);
        assert!(matches!(
            "Aux".parse::<Source>(),
            Err(AudioError::UnknownSource(_))
        ));
    }
}
