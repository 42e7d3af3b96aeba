use crate::config::PlatformConfig;
use crate::entity::DeviceInfo;
use crate::event::AudioEvent;
use crate::gateway::GatewayHandler;
use crate::media_player::MediaPlayer;

/// Build one media player per configured device
///
/// A configuration with no devices is a successful no-op producing no
/// entities. Each adapter gets its own clone of the gateway handle.
pub fn setup_platform(config: &PlatformConfig, gateway: &GatewayHandler) -> Vec<MediaPlayer> {
    let mut players = Vec::with_capacity(config.len());

    for (device_id, device) in &config.devices {
        tracing::info!(%device_id, where_ = %device.where_, "setting up media player");
        let info = DeviceInfo::from_config(device_id.clone(), device);
        players.push(MediaPlayer::new(info, gateway.clone()));
    }

    players
}

/// Drop the per-device configuration entries for this platform
///
/// No-op when nothing is configured.
pub fn unload_platform(config: &mut PlatformConfig) {
    config.devices.clear();
}

/// Routes decoded gateway events to the matching media player
///
/// Owns the platform's adapters and matches on the bus address each event
/// carries. Events for addresses nothing is bound to are dropped.
#[derive(Debug)]
pub struct EventDispatcher {
    players: Vec<MediaPlayer>,
}

impl EventDispatcher {
    pub fn new(players: Vec<MediaPlayer>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[MediaPlayer] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [MediaPlayer] {
        &mut self.players
    }

    /// Deliver an event to the player bound to its address
    ///
    /// Returns true when a player accepted the event.
    pub fn dispatch(&mut self, event: &AudioEvent) -> bool {
        match self
            .players
            .iter_mut()
            .find(|p| p.where_() == event.where_)
        {
            Some(player) => {
                player.handle_event(event);
                true
            }
            None => {
                tracing::warn!(where_ = %event.where_, "event for unknown address dropped");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_player::{MediaPlayerState, Source};

    fn two_device_config() -> PlatformConfig {
        serde_json::from_str(
            r#"{
                "devices": {
                    "kitchen_amp": { "name": "Kitchen", "where": "21" },
                    "lounge_amp": { "name": "Lounge", "where": "22", "model": "F502" }
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_setup_with_empty_config_creates_nothing() {
        let (gateway, _rx) = GatewayHandler::channel();
        let players = setup_platform(&PlatformConfig::default(), &gateway);
        assert!(players.is_empty());
    }

    #[test]
    fn test_setup_creates_one_player_per_device() {
        let (gateway, _rx) = GatewayHandler::channel();
        let players = setup_platform(&two_device_config(), &gateway);

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].device_id(), "kitchen_amp");
        assert_eq!(players[0].where_(), "21");
        assert_eq!(players[1].where_(), "22");
    }

    #[test]
    fn test_unload_clears_device_entries() {
        let mut config = two_device_config();
        unload_platform(&mut config);
        assert!(config.is_empty());

        // Second unload is a no-op
        unload_platform(&mut config);
        assert!(config.is_empty());
    }

    #[test]
    fn test_dispatch_routes_by_address() {
        let (gateway, _rx) = GatewayHandler::channel();
        let players = setup_platform(&two_device_config(), &gateway);
        let mut dispatcher = EventDispatcher::new(players);

        assert!(dispatcher.dispatch(&AudioEvent::state("22", 1)));

        let players = dispatcher.players();
        assert_eq!(players[0].state(), MediaPlayerState::Off);
        assert_eq!(players[1].state(), MediaPlayerState::Playing);
        assert_eq!(players[1].source(), Source::Radio);
    }

    #[test]
    fn test_dispatch_drops_unknown_address() {
        let (gateway, _rx) = GatewayHandler::channel();
        let players = setup_platform(&two_device_config(), &gateway);
        let mut dispatcher = EventDispatcher::new(players);

        assert!(!dispatcher.dispatch(&AudioEvent::volume("99", 10)));
    }
}
