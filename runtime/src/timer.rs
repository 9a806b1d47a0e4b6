//! Timer Slot - One live timer per typer
//!
//! Every timed effect (typing, removal, sleep) must arm the slot before it
//! creates its tokio timer. The returned guard disarms on drop, which also
//! covers the driver future being dropped when the task is aborted.

use autotyper_core::event::clamp_delay;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

#[derive(Debug, Default)]
pub struct TimerSlot {
    armed: AtomicBool,
    arms: AtomicU64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for one timed effect.
    ///
    /// Only the driver task arms, and it drops each guard before the next
    /// effect starts, so the slot is always free here.
    pub fn arm(&self) -> TimerGuard<'_> {
        let was_armed = self.armed.swap(true, Ordering::AcqRel);
        debug_assert!(!was_armed, "timer slot armed twice");
        self.arms.fetch_add(1, Ordering::AcqRel);
        TimerGuard { slot: self }
    }

    /// How many times the slot was armed so far.
    pub fn arms(&self) -> u64 {
        self.arms.load(Ordering::Acquire)
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::Release);
    }

    /// Number of live timers, always 0 or 1.
    pub fn live(&self) -> usize {
        usize::from(self.armed.load(Ordering::Acquire))
    }
}

#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct TimerGuard<'a> {
    slot: &'a TimerSlot,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.slot.disarm();
    }
}

/// Repeating timer whose first tick fires one `period` from now.
///
/// Missed ticks burst so a late driver catches up to the wall clock cadence.
pub fn ticker(period: Duration) -> Interval {
    let period = clamp_delay(period);
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
    interval
}
