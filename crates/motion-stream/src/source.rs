//! Pointer event sources.
//!
//! An [`EventSource`] is the subscription primitive motion streams are built
//! on: it accepts listeners and delivers each pointer event to them
//! synchronously. [`PointerBus`] is the in-process implementation, and can
//! be fed from any [`PointerBackend`].

use mousemotion_common::error::MotionResult;
use mousemotion_model::event::PointerEvent;

use crate::backends::PointerBackend;

/// Callback registered with an event source.
pub type Listener = Box<dyn FnMut(&PointerEvent)>;

/// Something that delivers pointer events to subscribed listeners.
pub trait EventSource {
    /// Returned by [`subscribe`](Self::subscribe); identifies the
    /// subscription for [`unsubscribe`](Self::unsubscribe).
    type Handle;

    /// Register a listener for all subsequent events.
    fn subscribe(&mut self, listener: Listener) -> Self::Handle;

    /// Remove a listener, dropping it and any state it owns.
    /// Returns false if the handle was not subscribed.
    fn unsubscribe(&mut self, handle: &Self::Handle) -> bool;
}

/// Identifies one listener on a [`PointerBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous in-process event source.
///
/// Listeners run in subscription order, on the caller's thread, before
/// [`emit`](Self::emit) returns. A panicking listener unwinds through `emit`.
#[derive(Default)]
pub struct PointerBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    events_emitted: u64,
}

impl PointerBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one event to every current listener.
    pub fn emit(&mut self, event: &PointerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
        self.events_emitted += 1;
    }

    /// Drain `backend` into this bus until it has no more events ready.
    ///
    /// Returns the number of events emitted by this call.
    pub fn pump(&mut self, backend: &mut dyn PointerBackend) -> MotionResult<u64> {
        tracing::debug!(backend = %backend.name(), "Pumping pointer backend");

        let mut pumped = 0;
        loop {
            match backend.poll() {
                Ok(Some(event)) => {
                    self.emit(&event);
                    pumped += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(backend = %backend.name(), error = %e, "Pointer backend error");
                    return Err(e);
                }
            }
        }

        tracing::debug!(backend = %backend.name(), events = pumped, "Pointer backend drained");
        Ok(pumped)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of events emitted so far.
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted
    }
}

impl EventSource for PointerBus {
    type Handle = SubscriptionId;

    fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, handle: &SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| id != handle);
        self.listeners.len() != before
    }
}
