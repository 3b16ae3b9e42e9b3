//! Mutual exclusion for multi-step transfers
//!
//! One byte reaches the controller as four expander writes spread over tens of
//! microseconds. The display holds its [`Lock`] around each logical byte so
//! that another user of the same transport cannot slip a write in between the
//! two nibbles.
//!
//! Any `embassy-sync` raw mutex works through [`MutexLock`]. To serialize a
//! transport shared with other code, hand the display a reference to a lock
//! that the other code also takes:
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use lcd1602::{Lock, MutexLock};
//!
//! let bus_lock: MutexLock<NoopRawMutex> = MutexLock::new(());
//! let shared = &bus_lock;
//! assert_eq!(Lock::lock(&shared, || 7), 7);
//! ```

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Lock capability used by a display
pub trait Lock {
    /// Run `f` with the lock held
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// Lock the display creates for itself in [`Display::init`](crate::Display::init)
///
/// Destroyed when the display is dropped.
pub trait OwnedLock: Lock + Sized {
    /// Create the lock, or `None` if the platform could not provide one
    fn create() -> Option<Self>;
}

/// Lock built on any `embassy-sync` raw mutex
///
/// `MutexLock<CriticalSectionRawMutex>` is safe from any context,
/// `MutexLock<ThreadModeRawMutex>` from thread mode only.
pub type MutexLock<M> = Mutex<M, ()>;

impl<M: RawMutex> Lock for Mutex<M, ()> {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        Mutex::lock(self, |_| f())
    }
}

impl<M: RawMutex> OwnedLock for Mutex<M, ()> {
    fn create() -> Option<Self> {
        Some(Mutex::new(()))
    }
}

impl<L: Lock> Lock for &L {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        (**self).lock(f)
    }
}

/// Lock for a display with a single owner
///
/// `&mut self` on every display operation already serializes access when
/// nothing else shares the transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl Lock for NoLock {
    fn lock<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

impl OwnedLock for NoLock {
    fn create() -> Option<Self> {
        Some(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLock;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    #[test]
    fn test_lock_released_after_closure() {
        let lock = MockLock::create().unwrap();
        let value = Lock::lock(&lock, || {
            assert!(lock.is_held());
            3
        });
        assert_eq!(value, 3);
        assert!(!lock.is_held());
        assert_eq!(lock.acquires(), 1);
    }

    #[test]
    fn test_reference_takes_the_same_lock() {
        let lock = MockLock::create().unwrap();
        let first = &lock;
        let second = &lock;
        Lock::lock(&first, || ());
        Lock::lock(&second, || ());
        assert_eq!(lock.acquires(), 2);
    }

    #[test]
    fn test_no_lock_runs_closure() {
        let lock = NoLock::create().unwrap();
        assert_eq!(Lock::lock(&lock, || 42), 42);
    }

    #[test]
    fn test_mutex_lock_serializes_threads() {
        let lock = MutexLock::<CriticalSectionRawMutex>::create().unwrap();
        let inside = AtomicUsize::new(0);
        let total = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        Lock::lock(&lock, || {
                            assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                            total.fetch_add(1, Ordering::SeqCst);
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                });
            }
        });

        assert_eq!(total.load(Ordering::SeqCst), 400);
    }
}
