//! Blocking wait until a target instant
//!
//! Polls the clock at a fixed interval. Each sleep is capped to the time
//! remaining, so the loop wakes at the target instead of up to one interval late.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use time::PrimitiveDateTime;

use crate::clock::Clock;

/// Default polling interval between clock checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Suspends the current thread
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Sleeper backed by `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Shared flag that aborts a running wait at its next check
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How a wait finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The clock reached or passed the target
    Reached,
    /// The cancel token fired first
    Cancelled,
}

/// Block until `clock` reports an instant at or after `target`.
///
/// Returns on the first check where `now >= target`. A cancelled token is
/// only honored while the target is still in the future. A zero
/// `poll_interval` falls back to [`DEFAULT_POLL_INTERVAL`].
pub fn wait_until<C, S>(
    clock: &C,
    sleeper: &S,
    target: PrimitiveDateTime,
    poll_interval: Duration,
    cancel: &CancelToken,
) -> WaitOutcome
where
    C: Clock + ?Sized,
    S: Sleeper + ?Sized,
{
    let poll_interval = if poll_interval.is_zero() {
        DEFAULT_POLL_INTERVAL
    } else {
        poll_interval
    };

    let mut polls: u64 = 0;
    loop {
        let now = clock.now();
        if now >= target {
            tracing::debug!(polls, %now, %target, "target reached");
            return WaitOutcome::Reached;
        }
        if cancel.is_cancelled() {
            tracing::debug!(polls, %now, %target, "wait cancelled");
            return WaitOutcome::Cancelled;
        }

        // `now < target`, so the remainder is positive
        let remaining = Duration::try_from(target - now).unwrap_or(poll_interval);
        sleeper.sleep(remaining.min(poll_interval));
        polls += 1;
    }
}
