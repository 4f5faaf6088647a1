//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{MatchEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Engine events (avatar picks, starts, attacks, heals, victories, resets)
    Battle,
    /// Turn hand-offs
    Turn,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Battle(MatchEvent),
    Turn(TurnEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Battle(_) => Topic::Battle,
            Event::Turn(_) => Topic::Turn,
        }
    }
}

struct Channels {
    battle: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Turn => &self.turn,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                battle: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
