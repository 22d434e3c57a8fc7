//! Subscribers: hooks into the runtime event stream.
//!
//! A [`Subscribe`] implementation receives every [`Event`] the simulation's
//! bus listener observes. [`SubscriberSet`] fans one event out to all
//! registered subscribers; [`LogWriter`] is the built-in human-readable
//! stdout subscriber.

mod log;

use std::sync::Arc;

use crate::events::Event;

pub use log::LogWriter;

/// Receives runtime events observed by the simulation's bus listener.
///
/// Handlers run on the listener task and should return quickly; heavy work
/// belongs on a channel of the subscriber's own.
pub trait Subscribe: Send + Sync {
    /// Called once per observed event.
    fn on_event(&self, ev: &Event);
}

/// Fans one event out to every registered subscriber, in order.
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Delivers `ev` to all subscribers.
    pub fn emit(&self, ev: &Event) {
        for sub in &self.subs {
            sub.on_event(ev);
        }
    }

    /// True if no subscribers are registered (listener can be skipped).
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::events::EventKind;

    struct Counter(AtomicUsize);

    impl Subscribe for Counter {
        fn on_event(&self, _ev: &Event) {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let a = Arc::new(Counter(AtomicUsize::new(0)));
        let b = Arc::new(Counter(AtomicUsize::new(0)));
        let set = SubscriberSet::new(vec![a.clone(), b.clone()]);
        set.emit(&Event::now(EventKind::SimulationDone));
        assert_eq!(a.0.load(Ordering::Relaxed), 1);
        assert_eq!(b.0.load(Ordering::Relaxed), 1);
    }
}
