//! Deferred command timing
//!
//! Every HD44780 instruction keeps the controller busy for a while: 1.64 ms
//! for clear and home, about 40 µs for most others. Instead of sleeping right
//! after each write, the driver records when the controller will be ready and
//! only waits if the next write comes sooner. Callers that pause between
//! commands pay nothing.

use log::debug;

/// Minimum execution time of any instruction or data write
pub const SETTLE_US: u32 = 38;

/// Longest single wait before a transfer
///
/// No instruction in this driver needs more, so a larger value can only come
/// from a clock anomaly.
pub const MAX_WAIT_US: u32 = 10_000;

/// Tracks the earliest time the controller accepts the next transfer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scheduler {
    /// Tick (µs) when the next transfer may start; 0 when nothing is pending
    next_ready: u64,
}

impl Scheduler {
    /// Create a scheduler with nothing pending
    pub const fn new() -> Self {
        Self { next_ready: 0 }
    }

    /// Tick when the next transfer may start
    pub fn next_ready(&self) -> u64 {
        self.next_ready
    }

    /// How long to wait at `now` before transferring, capped at [`MAX_WAIT_US`]
    pub fn pending(&self, now: u64) -> u32 {
        let remaining = self.next_ready.saturating_sub(now);
        if remaining > u64::from(MAX_WAIT_US) {
            debug!(
                "Calculated delay of {}us, but capping at {}us",
                remaining, MAX_WAIT_US
            );
            MAX_WAIT_US
        } else {
            remaining as u32
        }
    }

    /// Record a completed write at `now` needing `settle_us` before the next
    pub fn complete(&mut self, now: u64, settle_us: u32) {
        self.next_ready = now.saturating_add(u64::from(settle_us.max(SETTLE_US)));
    }

    /// Forget pending timing after a failed transfer
    pub fn invalidate(&mut self) {
        self.next_ready = 0;
    }
}
