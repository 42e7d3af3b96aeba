use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protocol domain identifier ("who"); audio amplifiers are WHO 16
pub type Who = String;

/// Protocol address of a device on the bus ("where")
pub type Where = String;

/// Opaque per-device identifier assigned by the hosting platform
pub type DeviceId = String;

/// Configuration record for a single amplifier
///
/// One record per physical device, keyed by device id in [`PlatformConfig`].
/// All fields are fixed at setup time; the adapter never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Display name shown by the hosting platform
    pub name: String,

    /// Protocol domain, defaults to the audio domain
    #[serde(default = "default_who")]
    pub who: Who,

    /// Bus address of the amplifier
    #[serde(rename = "where")]
    pub where_: Where,

    #[serde(default = "default_manufacturer")]
    pub manufacturer: String,

    #[serde(default)]
    pub model: String,
}

fn default_who() -> Who {
    "16".to_string()
}

fn default_manufacturer() -> String {
    "BTicino".to_string()
}

/// Media player platform configuration for one gateway
///
/// Maps device ids to their configuration records. An empty map is valid and
/// means the platform has nothing to set up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default)]
    pub devices: BTreeMap<DeviceId, DeviceConfig>,
}

impl PlatformConfig {
    /// Number of configured devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True when no devices are configured for this platform
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_device() {
        let config: PlatformConfig = serde_json::from_str(
            r#"{ "devices": { "living_room_amp": { "name": "Living Room", "where": "01" } } }"#,
        )
        .unwrap();

        let device = &config.devices["living_room_amp"];
        assert_eq!(device.name, "Living Room");
        assert_eq!(device.who, "16");
        assert_eq!(device.where_, "01");
        assert_eq!(device.manufacturer, "BTicino");
        assert_eq!(device.model, "");
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: PlatformConfig = serde_json::from_str("{}").unwrap();
        assert!(config.is_empty());
    }
}
