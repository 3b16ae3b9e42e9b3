//! Test doubles for the transport, clock and lock capabilities

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use embedded_hal::delay::DelayNs;

use crate::clock::Clock;
use crate::config::BusSettings;
use crate::lock::{Lock, OwnedLock};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// What the mock bus saw, plus programmed failures
#[derive(Debug, Default)]
pub struct BusLog {
    /// Bytes that were written successfully
    pub writes: Vec<u8>,
    /// Every write attempt, successful or not
    pub attempts: usize,
    /// Fail this attempt index and every later one
    pub fail_from: Option<usize>,
    /// Refuse to open
    pub fail_open: bool,
    /// Address the transport was opened with
    pub address: Option<u8>,
}

impl BusLog {
    /// Decode the logical bytes (upper nibble first) from groups of four writes
    pub fn bytes(&self) -> Vec<(u8, bool)> {
        self.writes
            .chunks_exact(4)
            .map(|w| ((w[0] & 0xF0) | (w[2] >> 4), w[0] & 0x01 != 0))
            .collect()
    }
}

pub type SharedLog = Rc<RefCell<BusLog>>;

#[derive(Debug)]
pub struct MockTransport {
    log: SharedLog,
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        record_drop("transport");
    }
}

impl Transport for MockTransport {
    type Config = SharedLog;
    type Error = MockError;

    fn open(address: u8, _settings: BusSettings, log: SharedLog) -> Result<Self, MockError> {
        if log.borrow().fail_open {
            return Err(MockError);
        }
        log.borrow_mut().address = Some(address);
        Ok(Self { log })
    }

    fn write_byte(&mut self, value: u8) -> Result<(), MockError> {
        let mut log = self.log.borrow_mut();
        let attempt = log.attempts;
        log.attempts += 1;
        if log.fail_from.is_some_and(|from| attempt >= from) {
            return Err(MockError);
        }
        log.writes.push(value);
        Ok(())
    }
}

/// Simulated time: only advances when something delays
#[derive(Debug, Default)]
pub struct MockClock {
    pub now: u64,
    pub delays: Vec<u32>,
}

impl DelayNs for MockClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now += u64::from(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.delays.push(us);
        self.now += u64::from(us);
    }
}

impl Clock for MockClock {
    fn now_micros(&self) -> u64 {
        self.now
    }
}

std::thread_local! {
    static LOCKS_CREATED: Cell<usize> = const { Cell::new(0) };
    static LOCK_ACQUIRES: Cell<usize> = const { Cell::new(0) };
    static DROPS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

/// Locks created on this thread so far
pub fn locks_created() -> usize {
    LOCKS_CREATED.with(Cell::get)
}

/// Lock acquisitions on this thread so far
pub fn lock_acquires() -> usize {
    LOCK_ACQUIRES.with(Cell::get)
}

fn record_drop(what: &'static str) {
    DROPS.with(|d| d.borrow_mut().push(what));
}

/// Mock resources dropped on this thread since the last call, in order
pub fn take_drops() -> Vec<&'static str> {
    DROPS.with(RefCell::take)
}

#[derive(Debug, Default)]
pub struct MockLock {
    held: Cell<bool>,
    acquires: Cell<usize>,
}

impl MockLock {
    pub fn is_held(&self) -> bool {
        self.held.get()
    }

    pub fn acquires(&self) -> usize {
        self.acquires.get()
    }
}

impl Lock for MockLock {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        assert!(!self.held.get(), "lock taken twice");
        self.held.set(true);
        self.acquires.set(self.acquires.get() + 1);
        LOCK_ACQUIRES.with(|c| c.set(c.get() + 1));
        let result = f();
        self.held.set(false);
        result
    }
}

impl OwnedLock for MockLock {
    fn create() -> Option<Self> {
        LOCKS_CREATED.with(|c| c.set(c.get() + 1));
        Some(Self::default())
    }
}

impl Drop for MockLock {
    fn drop(&mut self) {
        record_drop("lock");
    }
}

/// Lock whose creation always fails
#[derive(Debug)]
pub struct UnavailableLock;

impl Lock for UnavailableLock {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

impl OwnedLock for UnavailableLock {
    fn create() -> Option<Self> {
        None
    }
}
