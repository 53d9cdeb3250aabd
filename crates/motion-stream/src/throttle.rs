//! Rate limiting for callbacks.
//!
//! A throttled callback runs at most once per wait interval. Calls that land
//! too soon after the last accepted one are dropped outright: there is no
//! queue and no trailing call, so the final event of a burst may never be
//! delivered. Latency stays bounded at the cost of that last update.

use mousemotion_common::clock::{Clock, SystemClock};

/// Admission state of a throttle.
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    wait_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl ThrottleGate {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            last_accepted_ms: None,
        }
    }

    /// Decide whether a call at `now_ms` may proceed.
    ///
    /// Returns true and records `now_ms` if ready. The first call is always
    /// admitted; later calls need `now_ms > last + wait` (a call exactly on
    /// the boundary is dropped).
    pub fn admit(&mut self, now_ms: f64) -> bool {
        let ready = match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms > last + self.wait_ms,
        };
        if ready {
            self.last_accepted_ms = Some(now_ms);
        }
        ready
    }

    pub fn wait_ms(&self) -> f64 {
        self.wait_ms
    }

    pub fn last_accepted_ms(&self) -> Option<f64> {
        self.last_accepted_ms
    }
}

/// A callback behind a [`ThrottleGate`], timed by a [`Clock`].
#[derive(Debug)]
pub struct Throttle<F, C = SystemClock> {
    inner: F,
    gate: ThrottleGate,
    clock: C,
}

impl<F> Throttle<F> {
    /// Throttle `inner` against wall-clock time.
    pub fn new(inner: F, wait_ms: f64) -> Self {
        Self::with_clock(inner, wait_ms, SystemClock)
    }
}

impl<F, C: Clock> Throttle<F, C> {
    pub fn with_clock(inner: F, wait_ms: f64, clock: C) -> Self {
        Self {
            inner,
            gate: ThrottleGate::new(wait_ms),
            clock,
        }
    }

    /// Invoke the wrapped callback with `arg` if the gate admits the call.
    ///
    /// Returns the callback's result, or `None` if the call was dropped.
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        self.call_with(|inner| inner(arg))
    }

    /// Like [`call`](Self::call), but lets the caller decide how the wrapped
    /// callback is invoked. Useful for callbacks taking several arguments.
    pub fn call_with<R>(&mut self, invoke: impl FnOnce(&mut F) -> R) -> Option<R> {
        let now = self.clock.now_ms();
        if self.gate.admit(now) {
            Some(invoke(&mut self.inner))
        } else {
            tracing::trace!(
                now_ms = now,
                wait_ms = self.gate.wait_ms(),
                "Throttled call dropped"
            );
            None
        }
    }

    pub fn wait_ms(&self) -> f64 {
        self.gate.wait_ms()
    }

    pub fn last_accepted_ms(&self) -> Option<f64> {
        self.gate.last_accepted_ms()
    }

    /// Unwrap the callback, discarding the throttle state.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

/// Wrap `f` so it runs at most once per `wait_ms` of wall-clock time.
pub fn throttle<A, R>(f: impl FnMut(A) -> R, wait_ms: f64) -> impl FnMut(A) -> Option<R> {
    let mut throttled = Throttle::new(f, wait_ms);
    move |arg| throttled.call(arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mousemotion_common::clock::ManualClock;
    use proptest::prelude::*;

    #[test]
    fn test_gate_fifty_ms_schedule() {
        let mut gate = ThrottleGate::new(50.0);
        let accepted: Vec<f64> = [0.0, 10.0, 60.0, 70.0, 130.0]
            .into_iter()
            .filter(|&t| gate.admit(t))
            .collect();
        assert_eq!(accepted, vec![0.0, 60.0, 130.0]);
        assert_eq!(gate.last_accepted_ms(), Some(130.0));
    }

    #[test]
    fn test_gate_boundary_is_strict() {
        let mut gate = ThrottleGate::new(50.0);
        assert!(gate.admit(0.0));
        assert!(!gate.admit(50.0));
        assert!(gate.admit(50.5));
    }

    #[test]
    fn test_zero_wait_rejects_repeated_timestamp() {
        let mut gate = ThrottleGate::new(0.0);
        assert!(gate.admit(1.0));
        assert!(gate.admit(2.0));
        assert!(!gate.admit(2.0));
        assert!(gate.admit(3.0));
    }

    #[test]
    fn test_dropped_calls_do_not_move_the_window() {
        let mut gate = ThrottleGate::new(100.0);
        assert!(gate.admit(0.0));
        assert!(!gate.admit(90.0));
        assert!(gate.admit(101.0));
    }

    #[test]
    fn test_throttle_propagates_return_value() {
        let clock = ManualClock::new(1_000.0);
        let mut calls = 0;
        let mut doubled = Throttle::with_clock(
            |n: i32| {
                calls += 1;
                n * 2
            },
            50.0,
            clock.clone(),
        );

        assert_eq!(doubled.call(21), Some(42));
        clock.advance_ms(10.0);
        assert_eq!(doubled.call(5), None);
        clock.advance_ms(41.0);
        assert_eq!(doubled.call(5), Some(10));
        assert_eq!(doubled.last_accepted_ms(), Some(1_051.0));

        drop(doubled);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_call_with_multiple_arguments() {
        let clock = ManualClock::new(0.0);
        let mut sum = Throttle::with_clock(|a: i32, b: i32| a + b, 10.0, &clock);
        assert_eq!(sum.call_with(|f| f(1, 2)), Some(3));
        assert_eq!(sum.call_with(|f| f(3, 4)), None);
        assert_eq!(sum.wait_ms(), 10.0);
    }

    #[test]
    fn test_throttle_fn_admits_first_call() {
        let mut seen = Vec::new();
        {
            let mut push = throttle(|v: u8| seen.push(v), 60_000.0);
            assert_eq!(push(1), Some(()));
            // a minute has not passed
            assert_eq!(push(2), None);
        }
        assert_eq!(seen, vec![1]);
    }

    proptest! {
        #[test]
        fn prop_admitted_calls_are_spaced(
            wait in 0.0..200.0f64,
            times in prop::collection::vec(0.0..10_000.0f64, 1..64),
        ) {
            let mut times = times;
            times.sort_by(f64::total_cmp);
            let mut gate = ThrottleGate::new(wait);
            let admitted: Vec<f64> = times.iter().copied().filter(|&t| gate.admit(t)).collect();

            prop_assert_eq!(admitted[0], times[0]);
            for pair in admitted.windows(2) {
                prop_assert!(pair[1] > pair[0] + wait);
            }
        }
    }
}
