//! Time source abstraction
//!
//! The driver needs two things from the platform: a blocking delay of at least
//! the requested number of microseconds (provided through
//! [`embedded_hal::delay::DelayNs`]) and a monotonic microsecond tick used by
//! the [`Scheduler`](crate::scheduler::Scheduler) to skip waits that already
//! elapsed.

use embedded_hal::delay::DelayNs;

/// Monotonic clock with a blocking delay
pub trait Clock: DelayNs {
    /// Microseconds since an arbitrary fixed origin
    ///
    /// Must never go backwards.
    fn now_micros(&self) -> u64;
}

/// Clock for platforms that only offer a delay
///
/// The tick is pinned at zero, so every command waits its full execution time
/// before the next transfer. Always correct, never the fastest.
#[derive(Debug)]
pub struct DelayClock<D> {
    delay: D,
}

impl<D: DelayNs> DelayClock<D> {
    /// Wrap a delay provider
    pub fn new(delay: D) -> Self {
        Self { delay }
    }

    /// Hand the delay provider back
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> DelayNs for DelayClock<D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

impl<D: DelayNs> Clock for DelayClock<D> {
    fn now_micros(&self) -> u64 {
        0
    }
}

/// Clock backed by [`std::time::Instant`] and [`std::thread::sleep`]
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Start a clock whose origin is now
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl DelayNs for StdClock {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(core::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_micros(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}
