//! # Event bus for broadcasting runtime events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from multiple sources (arbiter, gate,
//! student tasks).
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; slow receivers get `RecvError::Lagged(n)` and skip `n`
//!   oldest items.
//! - **No persistence**: events are lost if there are no active subscribers
//!   at send time. The admission core never depends on event delivery.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for runtime events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); multiple
/// publishers can publish concurrently, and each subscriber receives clones
/// of each event.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to ≥ 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// If there are no receivers the event is dropped; this function still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that observes subsequent events.
    ///
    /// Each call creates an independent receiver; it only sees events sent
    /// after it subscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(Event::now(EventKind::ArbiterStarted));
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::ArbiterStarted);
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let bus = Bus::new(1);
        bus.publish(Event::now(EventKind::SimulationDone));
    }
}
