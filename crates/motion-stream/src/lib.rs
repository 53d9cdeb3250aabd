//! MouseMotion Stream
//!
//! Turns a pointer event source into a stream of motion frames:
//!
//! - **Sources:** [`EventSource`] is the subscribe/unsubscribe primitive;
//!   [`PointerBus`] implements it in-process and can be pumped from a
//!   polled [`PointerBackend`].
//! - **Throttle:** [`Throttle`] admits at most one callback per wait
//!   interval and silently drops the rest.
//! - **Streams:** [`MotionStream`] keeps the last frame per subscription
//!   and hands each handler the raw event together with its derived
//!   [`Frame`](mousemotion_model::frame::Frame).
//!
//! Everything runs synchronously on the thread that emits events.

pub mod backends;
pub mod source;
pub mod stream;
pub mod throttle;

pub use backends::{ChannelBackend, PointerBackend, StubBackend};
pub use source::{EventSource, Listener, PointerBus, SubscriptionId};
pub use stream::{on_motion, MotionEvent, MotionOptions, MotionStream};
pub use throttle::{throttle, Throttle, ThrottleGate};
