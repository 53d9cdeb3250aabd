//! Motion streams: pointer events in, `(event, frame)` pairs out.
//!
//! Each attached handler gets its own binding holding the last frame of its
//! sequence. Every raw event advances that frame, including events the
//! throttle keeps from the handler, so deltas always span consecutive
//! samples. Throttling limits how often the handler runs; it never changes
//! what the frames measure.

use serde_json::Value;

use mousemotion_common::clock::{Clock, SystemClock};
use mousemotion_common::config::MotionConfig;
use mousemotion_model::event::PointerEvent;
use mousemotion_model::frame::{Frame, MotionTracker};

use crate::source::EventSource;
use crate::throttle::Throttle;

/// Per-binding options, resolved once when the handler is attached.
///
/// Besides a full [`MotionConfig`], `true`/`false` and
/// `(should_throttle, wait_ms)` convert into options.
pub type MotionOptions = MotionConfig;

/// The event half of what a motion handler receives.
#[derive(Debug, Clone, Copy)]
pub struct MotionEvent<'a> {
    /// The raw pointer event.
    pub pointer: &'a PointerEvent,
    /// Data supplied when the handler was attached.
    pub data: Option<&'a Value>,
}

/// Attaches motion handlers to event sources.
#[derive(Debug, Clone, Default)]
pub struct MotionStream<C = SystemClock> {
    clock: C,
}

impl MotionStream {
    /// A stream timed by the wall clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock + Clone + 'static> MotionStream<C> {
    /// Use `clock` for throttling and for events that arrive unstamped.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Subscribe `handler` to `source`, deriving a frame for every event.
    ///
    /// Returns whatever the source's subscribe call returned; pass it to
    /// [`detach`](Self::detach) to stop the stream.
    pub fn attach<S, H>(
        &self,
        source: &mut S,
        data: Option<Value>,
        handler: H,
        options: impl Into<MotionOptions>,
    ) -> S::Handle
    where
        S: EventSource + ?Sized,
        H: FnMut(&MotionEvent<'_>, &Frame) + 'static,
    {
        let options = options.into();
        tracing::debug!(
            should_throttle = options.should_throttle,
            throttle_wait_ms = options.throttle_wait_ms,
            has_data = data.is_some(),
            "Attaching motion handler"
        );

        let mut binding = MotionBinding::new(data, handler, options, self.clock.clone());
        source.subscribe(Box::new(move |event: &PointerEvent| binding.dispatch(event)))
    }

    /// Unsubscribe a handler attached by this stream. Its last-frame state
    /// is dropped with it.
    pub fn detach<S>(&self, source: &mut S, handle: &S::Handle) -> bool
    where
        S: EventSource + ?Sized,
    {
        let removed = source.unsubscribe(handle);
        tracing::debug!(removed, "Detaching motion handler");
        removed
    }
}

/// Attach `handler` to `source` with default options and the wall clock.
pub fn on_motion<S, H>(source: &mut S, handler: H) -> S::Handle
where
    S: EventSource + ?Sized,
    H: FnMut(&MotionEvent<'_>, &Frame) + 'static,
{
    MotionStream::new().attach(source, None, handler, MotionOptions::default())
}

enum Dispatch<H, C> {
    Direct(H),
    Throttled(Throttle<H, C>),
}

/// State owned by one subscription.
struct MotionBinding<H, C> {
    tracker: MotionTracker,
    data: Option<Value>,
    clock: C,
    handler: Dispatch<H, C>,
}

impl<H, C> MotionBinding<H, C>
where
    H: FnMut(&MotionEvent<'_>, &Frame),
    C: Clock + Clone,
{
    fn new(data: Option<Value>, handler: H, options: MotionOptions, clock: C) -> Self {
        let handler = if options.should_throttle {
            Dispatch::Throttled(Throttle::with_clock(
                handler,
                options.throttle_wait_ms,
                clock.clone(),
            ))
        } else {
            Dispatch::Direct(handler)
        };

        Self {
            tracker: MotionTracker::new(),
            data,
            clock,
            handler,
        }
    }

    fn dispatch(&mut self, pointer: &PointerEvent) {
        let t = pointer.timestamp_or_else(|| self.clock.now_ms());
        let frame = self.tracker.observe(pointer.x, pointer.y, t);
        let event = MotionEvent {
            pointer,
            data: self.data.as_ref(),
        };

        match &mut self.handler {
            Dispatch::Direct(handler) => handler(&event, &frame),
            Dispatch::Throttled(throttle) => {
                throttle.call_with(|handler| handler(&event, &frame));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PointerBus;
    use mousemotion_common::clock::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Seen = Rc<RefCell<Vec<Frame>>>;

    fn collect_frames(seen: &Seen) -> impl FnMut(&MotionEvent<'_>, &Frame) + 'static {
        let seen = Rc::clone(seen);
        move |_: &MotionEvent<'_>, frame: &Frame| seen.borrow_mut().push(*frame)
    }

    #[test]
    fn test_unthrottled_sees_every_event() {
        let seen = Seen::default();
        let mut bus = PointerBus::new();
        let stream = MotionStream::with_clock(ManualClock::new(0.0));
        stream.attach(&mut bus, None, collect_frames(&seen), false);

        for i in 0..5 {
            bus.emit(&PointerEvent::new(i as f64, 0.0, i as f64 * 10.0));
        }

        let frames = seen.borrow();
        assert_eq!(frames.len(), 5);
        assert!(!frames[0].has_motion());
        assert!(frames[1..].iter().all(|f| f.dx() == Some(1.0)));
    }

    #[test]
    fn test_throttled_frames_span_dropped_events() {
        let clock = ManualClock::new(0.0);
        let seen = Seen::default();
        let mut bus = PointerBus::new();
        let stream = MotionStream::with_clock(clock.clone());
        stream.attach(&mut bus, None, collect_frames(&seen), (true, 50.0));

        for (i, t) in [0.0, 10.0, 20.0, 60.0].into_iter().enumerate() {
            clock.set_ms(t);
            bus.emit(&PointerEvent::new(i as f64 * 10.0, 0.0, t));
        }

        let frames = seen.borrow();
        assert_eq!(frames.len(), 2);
        // the delivered frame is measured against the dropped event at t=20
        assert_eq!(frames[1].dx(), Some(10.0));
        assert_eq!(frames[1].dt(), Some(40.0));
    }

    #[test]
    fn test_unstamped_events_use_stream_clock() {
        let clock = ManualClock::new(500.0);
        let seen = Seen::default();
        let mut bus = PointerBus::new();
        MotionStream::with_clock(clock.clone()).attach(
            &mut bus,
            None,
            collect_frames(&seen),
            MotionOptions::unthrottled(),
        );

        bus.emit(&PointerEvent::unstamped(0.0, 0.0));
        clock.advance_ms(20.0);
        bus.emit(&PointerEvent::unstamped(4.0, 3.0));

        let frames = seen.borrow();
        assert_eq!(frames[0].t, 500.0);
        assert_eq!(frames[1].dt(), Some(20.0));
        assert_eq!(frames[1].speed(), Some(0.25));
    }

    #[test]
    fn test_event_data_reaches_handler() {
        let data_seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&data_seen);
        let mut bus = PointerBus::new();
        MotionStream::with_clock(ManualClock::new(0.0)).attach(
            &mut bus,
            Some(serde_json::json!({ "target": "canvas" })),
            move |event: &MotionEvent<'_>, _: &Frame| {
                *sink.borrow_mut() = event.data.cloned();
            },
            false,
        );

        bus.emit(&PointerEvent::new(0.0, 0.0, 0.0));
        assert_eq!(
            *data_seen.borrow(),
            Some(serde_json::json!({ "target": "canvas" }))
        );
    }

    #[test]
    fn test_bindings_keep_separate_state() {
        let first = Seen::default();
        let second = Seen::default();
        let mut bus = PointerBus::new();
        let stream = MotionStream::with_clock(ManualClock::new(0.0));

        stream.attach(&mut bus, None, collect_frames(&first), false);
        bus.emit(&PointerEvent::new(0.0, 0.0, 0.0));
        stream.attach(&mut bus, None, collect_frames(&second), false);
        bus.emit(&PointerEvent::new(1.0, 0.0, 1.0));

        assert!(first.borrow()[1].has_motion());
        assert!(!second.borrow()[0].has_motion());
    }

    #[test]
    fn test_detach() {
        let seen = Seen::default();
        let mut bus = PointerBus::new();
        let stream = MotionStream::with_clock(ManualClock::new(0.0));
        let handle = stream.attach(&mut bus, None, collect_frames(&seen), false);

        assert!(stream.detach(&mut bus, &handle));
        assert!(!stream.detach(&mut bus, &handle));
        bus.emit(&PointerEvent::new(0.0, 0.0, 0.0));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_on_motion_uses_default_throttle() {
        let seen = Seen::default();
        let mut bus = PointerBus::new();
        on_motion(&mut bus, collect_frames(&seen));

        // Back-to-back emits land well inside the default 100ms window.
        bus.emit(&PointerEvent::new(0.0, 0.0, 0.0));
        bus.emit(&PointerEvent::new(1.0, 0.0, 1.0));

        assert_eq!(seen.borrow().len(), 1);
    }
}
