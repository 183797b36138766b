//! Synchronous event fan-out.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::events::ParkingEvent;

/// A listener that reacts to parking events.
///
/// Listeners are called synchronously on the publishing thread, while the
/// parking lot still holds its registry lock. They must therefore:
/// - return quickly,
/// - never call back into the parking lot that published the event,
/// - never panic. The bus does not isolate failures; a panicking listener
///   unwinds through the publishing call.
pub trait ParkingListener: Send + Sync {
    /// Returns the name of this listener.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    fn on_event(&self, event: &ParkingEvent);
}

/// Ordered, synchronous delivery of events to registered listeners.
///
/// The bus holds weak registrations only: it never keeps a listener alive,
/// and a listener dropped by its owner silently falls out of the list.
/// Every live listener has observed the event by the time
/// [`publish`](Self::publish) returns.
#[derive(Default)]
pub struct EventBus {
    listeners: RwLock<Vec<Weak<dyn ParkingListener>>>,
}

impl EventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener at the end of the delivery order.
    ///
    /// Registration is idempotent by identity: subscribing the same `Arc`
    /// twice keeps a single entry. Returns whether the listener was added.
    pub fn subscribe<L: ParkingListener + 'static>(&self, listener: &Arc<L>) -> bool {
        let listener: Arc<dyn ParkingListener> = listener.clone();
        let weak = Arc::downgrade(&listener);

        let mut listeners = self.listeners.write();
        if listeners.iter().any(|entry| same_listener(entry, &weak)) {
            return false;
        }
        tracing::debug!(listener = listener.name(), "listener subscribed");
        listeners.push(weak);
        true
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe<L: ParkingListener + 'static>(&self, listener: &Arc<L>) -> bool {
        let listener: Arc<dyn ParkingListener> = listener.clone();
        let weak = Arc::downgrade(&listener);

        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|entry| !same_listener(entry, &weak));
        before != listeners.len()
    }

    /// Delivers the event to every live listener in registration order.
    ///
    /// Returns the number of listeners that received it.
    pub fn publish(&self, event: &ParkingEvent) -> usize {
        // Deliver outside the list lock so listeners may (un)subscribe.
        let live: Vec<Arc<dyn ParkingListener>> = {
            let mut listeners = self.listeners.write();
            listeners.retain(|entry| entry.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };

        for listener in &live {
            listener.on_event(event);
        }

        metrics::counter!("parking_events_published_total", "event_type" => event.event_type())
            .increment(1);
        live.len()
    }

    /// Returns the number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .iter()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

fn same_listener(a: &Weak<dyn ParkingListener>, b: &Weak<dyn ParkingListener>) -> bool {
    std::ptr::addr_eq(a.as_ptr(), b.as_ptr())
}
