//! Event bus for xpboard using tokio::broadcast
//!
//! The render coordinator publishes every lifecycle transition here so that
//! summary sinks and loggers can follow along without coupling to it.

use tokio::sync::broadcast;

/// Why a render pass ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTrigger {
    /// A load just completed
    Load,
    /// Debounced viewport resize
    Resize,
}

/// Why a resize did not re-render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing has been loaded yet (or the user logged out)
    NoDataset,
    /// A load is in flight and will render fresh data when it lands
    LoadInFlight,
}

/// Events emitted by the render coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    LoadStarted,
    /// A dataset was cached; carries its record count
    LoadCompleted { records: usize },
    LoadFailed(String),
    /// Both charts were pushed to the surface
    ChartsRendered { trigger: RenderTrigger },
    ResizeSkipped(SkipReason),
    LoggedOut,
}

/// Event bus for broadcasting dashboard events
pub struct EventBus {
    sender: broadcast::Sender<DashboardEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (64 events)
    pub fn default_capacity() -> Self {
        Self::new(64)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: DashboardEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
