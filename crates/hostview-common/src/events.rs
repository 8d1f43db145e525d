use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{PixelSize, WindowHandle};

/// Lifecycle notifications published by the embedding core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    RendererLaunched { pid: u32 },
    RendererEmbedded(WindowHandle),
    DiscoveryTimedOut { attempts: u32 },
    LaunchFailed(String),
    ViewportResized { viewport: PixelSize, render: PixelSize },
    RendererExited,
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
