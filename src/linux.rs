//! Linux character-device backend (`/dev/i2c-N`)
//!
//! Requires the `linux` feature. Opening usually needs root or membership in
//! the `i2c` group.
//!
//! ```rust,ignore
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use lcd1602::{
//!     ADDRESS_ALTERNATE, Builder, Display, LinuxConfig, LinuxTransport, MutexLock, StdClock,
//! };
//!
//! let config = Builder::new().address(ADDRESS_ALTERNATE).build();
//! let mut lcd: Display<LinuxTransport, StdClock, MutexLock<CriticalSectionRawMutex>> =
//!     Display::init(&config, LinuxConfig::new("/dev/i2c-0"), StdClock::new())?;
//! lcd.write_string("LCD1602 Library")?;
//! ```

use std::path::PathBuf;

use embedded_hal::i2c::ErrorType;
use linux_embedded_hal::I2cdev;
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use log::{debug, error};

use crate::config::BusSettings;
use crate::transport::{I2cTransport, Transport};

/// Which character device to open
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinuxConfig {
    /// Device path, e.g. `/dev/i2c-1`
    pub device: PathBuf,
}

impl LinuxConfig {
    /// Config for the given device path
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

/// Errors from the Linux backend
#[derive(Debug)]
pub enum LinuxError {
    /// The device node could not be opened
    Open(LinuxI2CError),
    /// A transfer on the open device failed
    Bus(<I2cdev as ErrorType>::Error),
}

impl core::fmt::Display for LinuxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Open(e) => write!(f, "Failed to open I2C device: {e}"),
            Self::Bus(e) => write!(f, "I2C transfer failed: {e:?}"),
        }
    }
}

impl std::error::Error for LinuxError {}

/// Transport over a Linux I2C character device
///
/// The kernel adapter driver owns the bus clock rate and transfer timeout, so
/// the requested [`BusSettings`] are only recorded.
pub struct LinuxTransport {
    inner: I2cTransport<I2cdev>,
    device: PathBuf,
}

impl core::fmt::Debug for LinuxTransport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinuxTransport")
            .field("device", &self.device)
            .field("address", &self.inner.address())
            .finish_non_exhaustive()
    }
}

impl LinuxTransport {
    /// Device path this transport opened
    pub fn device(&self) -> &std::path::Path {
        &self.device
    }
}

impl Transport for LinuxTransport {
    type Config = LinuxConfig;
    type Error = LinuxError;

    fn open(address: u8, settings: BusSettings, config: LinuxConfig) -> Result<Self, LinuxError> {
        let i2c = I2cdev::new(&config.device).map_err(|e| {
            error!("Failed to open device '{}': {}", config.device.display(), e);
            LinuxError::Open(e)
        })?;
        debug!("Opened {} for {:#04x}", config.device.display(), address);
        let inner = I2cTransport::open(address, settings, i2c).map_err(LinuxError::Bus)?;
        Ok(Self {
            inner,
            device: config.device,
        })
    }

    fn write_byte(&mut self, value: u8) -> Result<(), LinuxError> {
        self.inner.write_byte(value).map_err(LinuxError::Bus)
    }
}

impl Drop for LinuxTransport {
    fn drop(&mut self) {
        debug!("Closing {}", self.device.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_debug<T: core::fmt::Debug>() {}

    #[test]
    fn test_transport_and_errors_are_debug() {
        // Error<T> needs T::Error: Debug, LinuxTransport is used in logs
        assert_debug::<LinuxTransport>();
        assert_debug::<LinuxError>();
        assert_debug::<crate::Error<LinuxTransport>>();
    }

    #[test]
    fn test_open_missing_device_fails() {
        let result = LinuxTransport::open(
            0x27,
            BusSettings::default(),
            LinuxConfig::new("/dev/i2c-does-not-exist"),
        );
        assert!(matches!(result, Err(LinuxError::Open(_))));
    }
}
