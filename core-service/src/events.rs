//! # Event Bus
//!
//! Decoupled notifications for hosts embedding the carousel core, built on
//! `tokio::sync::broadcast`. UI layers subscribe to re-render on gallery and
//! rotation changes without polling.
//!
//! Subscribers that fall behind receive `RecvError::Lagged` and can simply
//! continue; `RecvError::Closed` signals shutdown.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Top-level event enum encompassing all event categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CarouselEvent {
    /// Gallery collection events
    Gallery(GalleryEvent),
    /// Rotation state events
    Rotation(RotationEvent),
}

impl CarouselEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &'static str {
        match self {
            CarouselEvent::Gallery(e) => e.description(),
            CarouselEvent::Rotation(e) => e.description(),
        }
    }
}

/// Events emitted after committed gallery mutations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum GalleryEvent {
    /// A new image was inserted at the end of the order.
    ImageAdded { id: String },
    /// An image's metadata or media was updated in place.
    ImageUpdated { id: String },
    /// An image was removed and survivors were resequenced.
    ImageRemoved { id: String },
    /// The display order changed (reorder or removal side effect).
    OrderChanged { order: Vec<String> },
}

impl GalleryEvent {
    pub fn description(&self) -> &'static str {
        match self {
            GalleryEvent::ImageAdded { .. } => "Image added to gallery",
            GalleryEvent::ImageUpdated { .. } => "Image updated",
            GalleryEvent::ImageRemoved { .. } => "Image removed from gallery",
            GalleryEvent::OrderChanged { .. } => "Display order changed",
        }
    }
}

/// Events emitted when the rotation pointer or play state changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum RotationEvent {
    /// The pointer advanced (timer tick or manual navigation).
    Advanced { index: usize },
    /// Automatic rotation paused.
    Paused,
    /// Automatic rotation resumed.
    Resumed,
    /// The user jumped directly to an index.
    Selected { index: usize },
    /// The rotation interval was reconfigured.
    IntervalChanged { interval_ms: u64 },
}

impl RotationEvent {
    pub fn description(&self) -> &'static str {
        match self {
            RotationEvent::Advanced { .. } => "Rotation advanced",
            RotationEvent::Paused => "Rotation paused",
            RotationEvent::Resumed => "Rotation resumed",
            RotationEvent::Selected { .. } => "Item selected",
            RotationEvent::IntervalChanged { .. } => "Rotation interval changed",
        }
    }
}

/// Central broadcast channel for carousel events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CarouselEvent>,
}

impl EventBus {
    /// Create an event bus with the given channel buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers that received it. Emitting with no
    /// subscribers is not an error worth surfacing.
    pub fn emit(&self, event: CarouselEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> Receiver<CarouselEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}
