//! Nibble encoding for the 4-bit expander interface
//!
//! The expander drives only D7-D4, so every byte goes out as two nibbles,
//! upper first. Each nibble is clocked in by a falling edge on E:
//!
//! ```text
//! write  nibble<<4 | control | E    (E high)
//! wait   >= 450 ns                   (pulse width)
//! write  nibble<<4 | control         (E low, latched)
//! ```
//!
//! The control bits in the low half of every write carry the backlight state
//! and RS (instruction or data).
//!
//! ## Example
//!
//! ```
//! use lcd1602::encoder::{control_bits, frames};
//!
//! // 'A' (0x41) as data with the backlight on
//! let control = control_bits(true, true);
//! assert_eq!(frames(0x4, control), [0x4D, 0x49]);
//! assert_eq!(frames(0x1, control), [0x1D, 0x19]);
//! ```

use log::{debug, error};

use crate::clock::Clock;
use crate::error::Error;
use crate::scheduler::{SETTLE_US, Scheduler};
use crate::transport::Transport;

/// Backlight on (off if clear)
pub const BACKLIGHT: u8 = 0b0000_1000;
/// Enable line; the controller latches on its falling edge
pub const ENABLE: u8 = 0b0000_0100;
/// Read (write if clear); never set by this driver
pub const READ: u8 = 0b0000_0010;
/// Register select: data (instruction if clear)
pub const RS_DATA: u8 = 0b0000_0001;

/// Minimum width of the enable pulse (450 ns rounded up)
pub const ENABLE_PULSE_US: u32 = 1;

/// Control bits for the low half of every expander write
pub const fn control_bits(backlight: bool, is_data: bool) -> u8 {
    (if backlight { BACKLIGHT } else { 0 }) | (if is_data { RS_DATA } else { 0 })
}

/// The two expander writes that clock in one nibble: enable high, then low
pub const fn frames(nibble: u8, control: u8) -> [u8; 2] {
    let value = ((nibble << 4) & 0xF0) | (control & !ENABLE);
    [value | ENABLE, value]
}

/// Byte writer owning the transport, clock and timing state
pub(crate) struct Encoder<T, C> {
    pub(crate) transport: T,
    pub(crate) clock: C,
    pub(crate) backlight: bool,
    pub(crate) scheduler: Scheduler,
}

impl<T, C> Encoder<T, C>
where
    T: Transport,
    C: Clock,
{
    pub(crate) fn new(transport: T, clock: C, backlight: bool) -> Self {
        Self {
            transport,
            clock,
            backlight,
            scheduler: Scheduler::new(),
        }
    }

    pub(crate) fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }

    /// Clock in the low 4 bits of `nibble`
    ///
    /// The caller owns the settle delay before the next transfer.
    pub(crate) fn write_nibble(&mut self, nibble: u8, is_data: bool) -> Result<(), Error<T>> {
        self.send_nibble(nibble, is_data).map_err(|e| {
            error!("Failed to transfer nibble {:#03x}", nibble & 0x0F);
            self.scheduler.invalidate();
            Error::Transfer(e)
        })
    }

    /// Send a full byte after waiting out the previous command
    ///
    /// `settle_us` is how long the controller needs afterwards; the wait is
    /// taken by the next write, not this one.
    pub(crate) fn write_byte(
        &mut self,
        value: u8,
        is_data: bool,
        settle_us: u32,
    ) -> Result<(), Error<T>> {
        debug!(
            "{} value {:#04x}",
            if is_data { "Data" } else { "Command" },
            value
        );

        let wait = self.scheduler.pending(self.clock.now_micros());
        if wait > 0 {
            self.clock.delay_us(wait);
        }

        let result = self.send_nibble(value >> 4, is_data).and_then(|()| {
            self.clock.delay_us(SETTLE_US);
            self.send_nibble(value & 0x0F, is_data)
        });

        match result {
            Ok(()) => {
                self.scheduler.complete(self.clock.now_micros(), settle_us);
                Ok(())
            }
            Err(e) => {
                error!("Failed to write {:#04x}: {:?}", value, e);
                self.scheduler.invalidate();
                Err(Error::Transfer(e))
            }
        }
    }

    /// Single expander write with E low; nothing is latched
    pub(crate) fn write_raw(&mut self, value: u8) -> Result<(), Error<T>> {
        self.transport.write_byte(value & !ENABLE).map_err(|e| {
            error!("Failed to write expander byte {:#04x}: {:?}", value, e);
            self.scheduler.invalidate();
            Error::Transfer(e)
        })
    }

    pub(crate) fn into_parts(self) -> (T, C) {
        (self.transport, self.clock)
    }

    fn send_nibble(&mut self, nibble: u8, is_data: bool) -> Result<(), T::Error> {
        let [high, low] = frames(nibble, control_bits(self.backlight, is_data));
        self.transport.write_byte(high)?;
        self.clock.delay_us(ENABLE_PULSE_US);
        self.transport.write_byte(low)
    }
}
