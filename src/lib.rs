//! HD44780 Character LCD Driver over I2C
//!
//! A driver for 16x2 and 20x4 HD44780 character displays wired to a PCF8574
//! "I2C backpack" in 4-bit mode.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Deferred command timing: waits only when commands actually arrive back-to-back
//! - Pluggable transport, clock and lock (any `embassy-sync` raw mutex)
//! - Linux `/dev/i2c-N` backend (with `linux` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::{I2c, Operation};
//! use lcd1602::{ADDRESS_ALTERNATE, Builder, DelayClock, Display, I2cTransport, NoLock};
//!
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(
//! #         &mut self,
//! #         _address: u8,
//! #         _operations: &mut [Operation<'_>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let i2c = MockI2c;
//! # let delay = MockDelay;
//! let config = Builder::new().address(ADDRESS_ALTERNATE).build();
//! let mut lcd: Display<I2cTransport<MockI2c>, _, NoLock> =
//!     match Display::init(&config, i2c, DelayClock::new(delay)) {
//!         Ok(lcd) => lcd,
//!         Err(_) => return,
//!     };
//!
//! let _ = lcd.write_string("Zorxx Software");
//! let _ = lcd.set_cursor(1, 0);
//! let _ = lcd.write_string("LCD1602 Library");
//! let _ = lcd.set_display(true, true, true);
//! lcd.deinit();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

/// Character ROM codes
pub mod charset;
/// Time source abstraction
pub mod clock;
/// HD44780 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Nibble encoding for the expander interface
pub mod encoder;
/// Error types for the driver
pub mod error;
/// Mutual exclusion for multi-step transfers
pub mod lock;
/// Deferred command timing
pub mod scheduler;
/// Bus transport abstraction
pub mod transport;

/// Linux character-device backend (requires `linux` feature)
#[cfg(feature = "linux")]
pub mod linux;

#[cfg(test)]
mod mock;

pub use clock::{Clock, DelayClock};
pub use command::{Command, ScrollDirection, ScrollTarget};
pub use config::{
    ADDRESS_ALTERNATE, ADDRESS_DEFAULT, Builder, BusSettings, COLUMN_COUNT, Config,
    MAX_STRING_LEN, ROW_COUNT, ROW_OFFSETS,
};
pub use display::Display;
pub use error::Error;
pub use lock::{Lock, MutexLock, NoLock, OwnedLock};
pub use transport::{I2cTransport, Transport};

#[cfg(feature = "std")]
pub use clock::StdClock;

#[cfg(feature = "linux")]
pub use linux::{LinuxConfig, LinuxError, LinuxTransport};
