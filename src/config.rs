//! Display configuration types and builder

/// Address of most PCF8574T backpacks
pub const ADDRESS_DEFAULT: u8 = 0x27;

/// Address of PCF8574AT backpacks
pub const ADDRESS_ALTERNATE: u8 = 0x3F;

/// Default I2C clock (standard mode)
pub const DEFAULT_SPEED_HZ: u32 = 100_000;

/// Give up on a single I2C transaction after this long
pub const DEFAULT_TIMEOUT_MS: u32 = 50;

/// Number of addressable rows
pub const ROW_COUNT: u8 = 4;

/// Number of addressable columns per row
pub const COLUMN_COUNT: u8 = 20;

/// DDRAM base address of each physical row
///
/// Rows 2 and 3 continue rows 0 and 1 in DDRAM, which is why the table is
/// not monotonic.
pub const ROW_OFFSETS: [u8; ROW_COUNT as usize] = [0x00, 0x40, 0x14, 0x54];

/// Longest run of characters written by one `write_string` call
pub const MAX_STRING_LEN: usize = 256;

/// Bus parameters handed to [`Transport::open`](crate::transport::Transport::open)
///
/// Backends apply what their platform lets them control. On Linux the kernel
/// adapter owns the clock rate; on microcontrollers the HAL configures it when
/// the bus is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusSettings {
    /// SCL frequency in Hz
    pub speed_hz: u32,
    /// Per-transaction timeout in milliseconds
    pub timeout_ms: u32,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            speed_hz: DEFAULT_SPEED_HZ,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Display configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// 7-bit I2C address of the backpack
    pub address: u8,
    /// Backlight state applied from the very first transfer
    pub backlight: bool,
    /// Bus parameters
    pub settings: BusSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: ADDRESS_DEFAULT,
            backlight: true,
            settings: BusSettings::default(),
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use lcd1602::{ADDRESS_ALTERNATE, Builder};
///
/// let config = Builder::new()
///     .address(ADDRESS_ALTERNATE)
///     .backlight(false)
///     .build();
/// assert_eq!(config.address, 0x3F);
/// assert!(!config.backlight);
/// assert_eq!(config.settings.speed_hz, 100_000);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the I2C address
    ///
    /// Any value is accepted; [`ADDRESS_DEFAULT`] and [`ADDRESS_ALTERNATE`]
    /// cover the common backpacks.
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Set the initial backlight state
    pub fn backlight(mut self, on: bool) -> Self {
        self.config.backlight = on;
        self
    }

    /// Set the I2C clock frequency
    pub fn speed_hz(mut self, speed_hz: u32) -> Self {
        self.config.settings.speed_hz = speed_hz;
        self
    }

    /// Set the per-transaction timeout
    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.config.settings.timeout_ms = timeout_ms;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Builder::new().build();
        assert_eq!(config.address, ADDRESS_DEFAULT);
        assert!(config.backlight);
        assert_eq!(config.settings.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_builder_accepts_any_address() {
        let config = Builder::new().address(0x20).speed_hz(400_000).build();
        assert_eq!(config.address, 0x20);
        assert_eq!(config.settings.speed_hz, 400_000);
    }

    #[test]
    fn test_row_offsets() {
        assert_eq!(ROW_OFFSETS, [0x00, 0x40, 0x14, 0x54]);
    }
}
