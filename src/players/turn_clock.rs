//! Time source and cancellation for delayed turns.
//!
//! A `CpuTurn` never sleeps itself; whoever drives it asks a `TurnClock` to
//! wait until the next deadline. `SystemTurnClock` really waits,
//! `SteppedTurnClock` jumps straight to the deadline.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Granularity at which a sleeping system clock re-checks cancellation.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Shared flag asking an in-flight turn to wrap up early.
#[derive(Debug, Clone, Default)]
pub struct TurnCancelToken {
    cancelled: Arc<AtomicBool>,
}

impl TurnCancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

pub trait TurnClock {
    fn now(&self) -> Instant;

    /// Block until `deadline` or until `cancel` fires, whichever comes first.
    fn sleep_until(&self, deadline: Instant, cancel: &TurnCancelToken);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTurnClock;

impl TurnClock for SystemTurnClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant, cancel: &TurnCancelToken) {
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep((deadline - now).min(CANCEL_POLL_INTERVAL));
        }
    }
}

/// Virtual clock that advances only when asked to sleep.
#[derive(Debug)]
pub struct SteppedTurnClock {
    now: Mutex<Instant>,
}

impl Default for SteppedTurnClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SteppedTurnClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl TurnClock for SteppedTurnClock {
    fn now(&self) -> Instant {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn sleep_until(&self, deadline: Instant, _cancel: &TurnCancelToken) {
        if let Ok(mut now) = self.now.lock() {
            if deadline > *now {
                *now = deadline;
            }
        }
    }
}
