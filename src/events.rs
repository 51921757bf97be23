//! Session event listeners

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};

use crate::{error::SdkError, model::SdkEvent};

pub trait EventListener: Send + Sync {
    fn on_event(&self, event: SdkEvent);
}

/// Listener that logs every event it receives
#[derive(Debug, Default)]
pub struct LogListener;

impl EventListener for LogListener {
    fn on_event(&self, event: SdkEvent) {
        log::info!("Received event: {:?}", event);
    }
}

/// Listener forwarding events into a channel
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<SdkEvent>,
}

impl ChannelListener {
    pub fn new(sender: mpsc::UnboundedSender<SdkEvent>) -> Self {
        Self { sender }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SdkEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl EventListener for ChannelListener {
    fn on_event(&self, event: SdkEvent) {
        // The receiving side may be gone already.
        let _ = self.sender.send(event);
    }
}

/// Registered listeners of a session, keyed by listener id
#[derive(Default)]
pub struct EventManager {
    listeners: RwLock<HashMap<String, Box<dyn EventListener>>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, listener: Box<dyn EventListener>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.listeners.write().await.insert(id.clone(), listener);
        log::debug!("Added event listener {}", id);
        id
    }

    pub async fn remove(&self, id: &str) -> Result<(), SdkError> {
        match self.listeners.write().await.remove(id) {
            Some(_) => {
                log::debug!("Removed event listener {}", id);
                Ok(())
            }
            None => Err(SdkError::EventListenerFailed(format!(
                "No listener with id {}",
                id
            ))),
        }
    }

    pub async fn notify(&self, event: SdkEvent) {
        for listener in self.listeners.read().await.values() {
            listener.on_event(event.clone());
        }
    }

    pub async fn count(&self) -> usize {
        self.listeners.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_reaches_registered_listeners() {
        let manager = EventManager::new();
        let (listener, mut receiver) = ChannelListener::channel();
        let id = manager.add(Box::new(listener)).await;
        assert_eq!(manager.count().await, 1);

        manager.notify(SdkEvent::Synced).await;
        assert_eq!(receiver.recv().await, Some(SdkEvent::Synced));

        manager.remove(&id).await.unwrap();
        assert_eq!(manager.count().await, 0);
        // Dropping the last listener closes the channel.
        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test]
    async fn removing_unknown_listener_fails() {
        let manager = EventManager::new();
        assert!(matches!(
            manager.remove("missing").await,
            Err(SdkError::EventListenerFailed(_))
        ));
    }
}
