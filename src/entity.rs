use crate::config::{DeviceConfig, DeviceId, Where, Who};
use crate::error::{AudioError, Result};
use tokio::sync::broadcast;

/// Immutable identity of one configured device
///
/// Built once from the configuration record at setup and never mutated.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub device_id: DeviceId,
    pub who: Who,
    pub where_: Where,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
}

impl DeviceInfo {
    pub fn from_config(device_id: impl Into<DeviceId>, config: &DeviceConfig) -> Self {
        Self {
            device_id: device_id.into(),
            who: config.who.clone(),
            where_: config.where_.clone(),
            name: config.name.clone(),
            manufacturer: config.manufacturer.clone(),
            model: config.model.clone(),
        }
    }
}

/// Notification that an entity's display state changed
#[derive(Debug, Clone)]
pub struct EntityUpdate {
    pub device_id: DeviceId,
}

/// Generic entity capability record
///
/// Holds the device identity and the update-notification channel the hosting
/// platform subscribes to. Adapters are composed with one of these rather
/// than inheriting host-framework behavior.
#[derive(Debug)]
pub struct Entity {
    info: DeviceInfo,
    updates: broadcast::Sender<EntityUpdate>,
}

impl Entity {
    pub fn new(info: DeviceInfo) -> Self {
        let (updates, _) = broadcast::channel(16);
        Self { info, updates }
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Subscribe to display-state change notifications
    ///
    /// Multiple subscriptions can be active simultaneously.
    pub fn subscribe(&self) -> UpdateReceiver {
        UpdateReceiver {
            rx: self.updates.subscribe(),
        }
    }

    /// Tell subscribers the display state changed
    ///
    /// A send with no live subscribers is fine; the host may not be
    /// listening yet.
    pub(crate) fn schedule_update(&self) {
        let _ = self.updates.send(EntityUpdate {
            device_id: self.info.device_id.clone(),
        });
    }
}

/// Receiver for entity update notifications
pub struct UpdateReceiver {
    rx: broadcast::Receiver<EntityUpdate>,
}

impl UpdateReceiver {
    /// Receive the next update notification
    pub async fn recv(&mut self) -> Result<EntityUpdate> {
        self.rx.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => AudioError::EntityDropped,
            broadcast::error::RecvError::Lagged(n) => {
                AudioError::ChannelError(format!("Lagged by {} messages", n))
            }
        })
    }

    /// Try to receive an update without blocking
    ///
    /// Returns `Ok(None)` if no notification is pending.
    pub fn try_recv(&mut self) -> Result<Option<EntityUpdate>> {
        match self.rx.try_recv() {
            Ok(update) => Ok(Some(update)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Closed) => Err(AudioError::EntityDropped),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                Err(AudioError::ChannelError(format!("Lagged by {} messages", n)))
            }
        }
    }
}
