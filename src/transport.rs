//! Bus transport abstraction
//!
//! This module provides the [`Transport`] trait and the [`I2cTransport`]
//! backend for any `embedded-hal` v1.0 I2C bus.
//!
//! ## Hardware
//!
//! The display sits behind a PCF8574 port expander. Each I2C write sets all
//! eight expander pins at once:
//!
//! | Bit | Pin           |
//! |-----|---------------|
//! | 7-4 | D7-D4         |
//! | 3   | Backlight     |
//! | 2   | E (enable)    |
//! | 1   | R/W           |
//! | 0   | RS            |
//!
//! A transport therefore only needs to move single bytes to a fixed address.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::i2c::{I2c, Operation};
//! use lcd1602::{BusSettings, I2cTransport, Transport, ADDRESS_DEFAULT};
//! # use core::convert::Infallible;
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
//! let mut transport = match I2cTransport::open(ADDRESS_DEFAULT, BusSettings::default(), MockI2c) {
//!     Ok(transport) => transport,
//!     Err(_) => return,
//! };
//!
//! // Backlight on, everything else low
//! let _ = transport.write_byte(0x08);
//! ```

use core::fmt::Debug;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::config::BusSettings;

/// Trait for the byte transport to the port expander
///
/// A transport is bound to one device address when it is opened and closed
/// when it is dropped. The display holds exactly one open transport.
///
/// ## Implementing
///
/// For most cases, use [`I2cTransport`] with your HAL's I2C bus. Implement
/// this trait yourself to reach the display through something else, such as a
/// bus multiplexer or a test double.
pub trait Transport: Sized {
    /// Backend-specific configuration consumed by [`open`](Self::open)
    type Config;

    /// Error type for transport operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Open the backend and bind it to `address`
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or device could not be opened or claimed.
    fn open(address: u8, settings: BusSettings, config: Self::Config) -> Result<Self, Self::Error>;

    /// Write one byte to the bound device
    ///
    /// Implementations must give up and report an error once the configured
    /// timeout elapses rather than block forever.
    ///
    /// # Errors
    ///
    /// Returns an error if the write did not complete.
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;
}

/// Transport over an `embedded-hal` v1.0 I2C bus
///
/// The bus itself is the backend configuration: create it with your HAL
/// (port, SDA/SCL pins, clock rate), or pass a shared-bus device such as
/// `embedded_hal_bus::i2c::CriticalSectionDevice` to reuse an existing bus.
///
/// ## Type Parameters
///
/// * `I2C` - I2C bus implementing [`I2c`]
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    /// I2C bus
    i2c: I2C,
    /// 7-bit device address
    address: u8,
    /// Bus parameters requested at open
    settings: BusSettings,
}

impl<I2C> I2cTransport<I2C>
where
    I2C: I2c,
{
    /// Bound device address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Bus parameters requested at open
    pub fn settings(&self) -> BusSettings {
        self.settings
    }

    /// Close the transport and hand the bus back
    pub fn release(self) -> I2C {
        debug!("Releasing I2C bus for {:#04x}", self.address);
        self.i2c
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where
    I2C: I2c,
{
    type Config = I2C;
    type Error = I2C::Error;

    fn open(address: u8, settings: BusSettings, i2c: I2C) -> Result<Self, Self::Error> {
        debug!(
            "Binding I2C device {:#04x} ({} Hz, {} ms timeout)",
            address, settings.speed_hz, settings.timeout_ms
        );
        Ok(Self {
            i2c,
            address,
            settings,
        })
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::i2c::{ErrorType, Operation};

    #[derive(Debug, Default)]
    struct RecordingI2c {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl ErrorType for RecordingI2c {
        type Error = core::convert::Infallible;
    }

    impl I2c for RecordingI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_byte_targets_bound_address() {
        let mut transport =
            I2cTransport::open(0x3F, BusSettings::default(), RecordingI2c::default()).unwrap();
        transport.write_byte(0xA5).unwrap();
        transport.write_byte(0x08).unwrap();

        let i2c = transport.release();
        assert_eq!(
            i2c.writes,
            alloc::vec![(0x3F, alloc::vec![0xA5]), (0x3F, alloc::vec![0x08])]
        );
    }

    #[test]
    fn test_open_keeps_settings() {
        let settings = BusSettings {
            speed_hz: 400_000,
            timeout_ms: 10,
        };
        let transport = I2cTransport::open(0x27, settings, RecordingI2c::default()).unwrap();
        assert_eq!(transport.address(), 0x27);
        assert_eq!(transport.settings(), settings);
    }
}
