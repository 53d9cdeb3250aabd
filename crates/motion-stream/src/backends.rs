//! Raw pointer input backends.
//!
//! A backend is polled for events; [`PointerBus::pump`](crate::source::PointerBus::pump)
//! forwards whatever it yields to subscribed listeners.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, TryRecvError};

use mousemotion_common::error::{MotionError, MotionResult};
use mousemotion_model::event::PointerEvent;

/// Trait for pointer input backends.
pub trait PointerBackend {
    /// Poll for the next pointer event. Returns `None` if no event is available.
    fn poll(&mut self) -> MotionResult<Option<PointerEvent>>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Backend that replays a fixed script of events.
#[derive(Debug, Clone, Default)]
pub struct StubBackend {
    events: VecDeque<PointerEvent>,
}

impl StubBackend {
    /// Create a stub backend with pre-loaded events.
    pub fn new(events: impl IntoIterator<Item = PointerEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Create an empty stub that never produces events.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Events not yet polled.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl PointerBackend for StubBackend {
    fn poll(&mut self) -> MotionResult<Option<PointerEvent>> {
        Ok(self.events.pop_front())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Backend fed by another thread through a channel.
///
/// Typically the producing side sits on a platform input thread while the
/// bus and its motion handlers run on the consumer's thread.
#[derive(Debug)]
pub struct ChannelBackend {
    receiver: Receiver<PointerEvent>,
}

impl ChannelBackend {
    pub fn new(receiver: Receiver<PointerEvent>) -> Self {
        Self { receiver }
    }
}

impl PointerBackend for ChannelBackend {
    fn poll(&mut self) -> MotionResult<Option<PointerEvent>> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(MotionError::backend("pointer event channel disconnected"))
            }
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}
