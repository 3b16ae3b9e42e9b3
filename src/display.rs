//! Core display operations

use core::fmt;

use log::{debug, error};

use crate::clock::Clock;
use crate::command::{Command, ScrollDirection, ScrollTarget};
use crate::config::{BusSettings, COLUMN_COUNT, Config, MAX_STRING_LEN, ROW_COUNT, ROW_OFFSETS};
use crate::encoder::{Encoder, control_bits};
use crate::error::Error;
use crate::lock::{Lock, NoLock, OwnedLock};
use crate::scheduler::SETTLE_US;
use crate::transport::Transport;

type DisplayResult<T> = core::result::Result<(), Error<T>>;

/// Wait after power-up before the first transfer (VCC above 4.5 V)
const POWER_ON_DELAY_US: u32 = 15_000;
/// Wait after the first 8-bit function set
const FIRST_WAKE_DELAY_US: u32 = 4_100;
/// Wait after the second 8-bit function set
const SECOND_WAKE_DELAY_US: u32 = 100;

/// HD44780 character display behind an I2C port expander
///
/// Owns one instance of each platform capability: the [`Transport`] bound to
/// the display's address, the [`Clock`] used for timing, and the [`Lock`]
/// held around each logical byte.
///
/// ## Concurrency
///
/// The lock is taken once per byte, not once per call. A
/// [`write_string`](Self::write_string) therefore releases it between
/// characters, and anything else sharing the transport may interleave its own
/// writes there. To share the lock with that other code, build the display
/// with [`init_with_lock`](Self::init_with_lock) and a reference to it.
pub struct Display<T, C, L = NoLock>
where
    T: Transport,
    C: Clock,
    L: Lock,
{
    /// Transport, clock and timing state; dropped before the lock
    encoder: Encoder<T, C>,
    /// Serializes the transfers of one byte
    lock: L,
    /// 7-bit I2C address
    address: u8,
    /// Bus parameters the transport was opened with
    settings: BusSettings,
}

impl<T, C, L> Display<T, C, L>
where
    T: Transport,
    C: Clock,
    L: Lock,
{
    /// Open the backend, create the lock and run the power-on sequence
    ///
    /// On failure everything acquired so far is released again before the
    /// error is returned, transport first.
    ///
    /// # Errors
    ///
    /// - [`Error::BackendOpen`] if the transport could not be opened
    /// - [`Error::Allocation`] if the lock could not be created
    /// - [`Error::InitSequence`] if any step of [`reset`](Self::reset) failed
    pub fn init(config: &Config, backend: T::Config, clock: C) -> Result<Self, Error<T>>
    where
        L: OwnedLock,
    {
        Self::open_with(config, backend, clock, L::create)
    }

    /// Like [`init`](Self::init), with a lock supplied by the caller
    ///
    /// Pass a reference (`&MutexLock<_>`) to serialize the display's bytes
    /// against other users of the same bus.
    ///
    /// # Errors
    ///
    /// - [`Error::BackendOpen`] if the transport could not be opened
    /// - [`Error::InitSequence`] if any step of [`reset`](Self::reset) failed
    pub fn init_with_lock(
        config: &Config,
        backend: T::Config,
        clock: C,
        lock: L,
    ) -> Result<Self, Error<T>> {
        Self::open_with(config, backend, clock, || Some(lock))
    }

    fn open_with(
        config: &Config,
        backend: T::Config,
        clock: C,
        make_lock: impl FnOnce() -> Option<L>,
    ) -> Result<Self, Error<T>> {
        let transport = T::open(config.address, config.settings, backend).map_err(|e| {
            error!("I2C low-level initialization failed: {:?}", e);
            Error::BackendOpen(e)
        })?;

        let Some(lock) = make_lock() else {
            error!("Mutex low-level initialization failed");
            return Err(Error::Allocation);
        };

        let mut display = Self {
            encoder: Encoder::new(transport, clock, config.backlight),
            lock,
            address: config.address,
            settings: config.settings,
        };

        if let Err(e) = display.reset() {
            error!("Display reset failed: {}", e);
            return Err(e);
        }

        debug!("Display ready at {:#04x}", display.address);
        Ok(display)
    }

    /// Release the transport and lock
    pub fn deinit(self) {
        debug!("Closing display at {:#04x}", self.address);
    }

    /// Release the lock and hand back the transport and clock
    pub fn release(self) -> (T, C) {
        debug!("Releasing display at {:#04x}", self.address);
        let Self { encoder, .. } = self;
        encoder.into_parts()
    }

    /// Run the HD44780 4-bit initialization sequence
    ///
    /// Leaves the display in 2-line mode, display on, cursor and blink off,
    /// cleared, with left-to-right entry and no auto-scroll.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InitSequence`] on the first failed transfer; no step
    /// is retried.
    pub fn reset(&mut self) -> DisplayResult<T> {
        debug!("Resetting display at {:#04x}", self.address);
        self.run_reset().map_err(Error::into_init)
    }

    fn run_reset(&mut self) -> DisplayResult<T> {
        self.encoder.delay_us(POWER_ON_DELAY_US);

        // Two 8-bit function-set nibbles bring the controller to a known
        // state whatever mode it was in, then 0x2 switches it to 4-bit.
        self.write_nibble(0x03)?;
        self.encoder.delay_us(FIRST_WAKE_DELAY_US);
        self.write_nibble(0x03)?;
        self.encoder.delay_us(SECOND_WAKE_DELAY_US);
        self.write_nibble(0x02)?;
        self.encoder.delay_us(SETTLE_US);

        self.command(Command::FunctionSet {
            eight_bit: false,
            two_lines: true,
            large_font: false,
        })?;
        self.set_display(true, false, false)?;
        self.clear()?;
        self.set_entry_mode(true, false)
    }

    /// Clear the display and return the cursor home
    pub fn clear(&mut self) -> DisplayResult<T> {
        self.command(Command::Clear)
    }

    /// Return the cursor home and undo any display shift
    pub fn home(&mut self) -> DisplayResult<T> {
        self.command(Command::Home)
    }

    /// Switch display, cursor and blink on or off
    ///
    /// All flags off is valid and blanks the display without losing DDRAM.
    pub fn set_display(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> DisplayResult<T> {
        self.command(Command::DisplayControl {
            display: display_on,
            cursor: cursor_on,
            blink: blink_on,
        })
    }

    /// Set text direction and auto-scroll
    pub fn set_entry_mode(
        &mut self,
        left_to_right: bool,
        auto_scroll: bool,
    ) -> DisplayResult<T> {
        self.command(Command::EntryModeSet {
            left_to_right,
            auto_scroll,
        })
    }

    /// Move the cursor to `row`, `column` (both zero-based)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] without touching the bus if
    /// `row >= ROW_COUNT` or `column >= COLUMN_COUNT`.
    pub fn set_cursor(&mut self, row: u8, column: u8) -> DisplayResult<T> {
        if row >= ROW_COUNT || column >= COLUMN_COUNT {
            return Err(Error::InvalidArgument { row, column });
        }
        let offset = ROW_OFFSETS[usize::from(row)];
        self.command(Command::SetDdramAddress(column + offset))
    }

    /// Shift the display contents or the cursor by one position
    pub fn scroll(
        &mut self,
        target: ScrollTarget,
        direction: ScrollDirection,
    ) -> DisplayResult<T> {
        self.command(Command::Shift { target, direction })
    }

    /// Switch the backlight
    ///
    /// Takes effect immediately with a single expander write that leaves E
    /// low, so nothing is latched into the controller. The stored state only
    /// changes once that write went through.
    pub fn set_backlight(&mut self, enable: bool) -> DisplayResult<T> {
        let encoder = &mut self.encoder;
        self.lock.lock(|| {
            encoder
                .write_raw(control_bits(enable, false))
                .map(|()| encoder.backlight = enable)
        })
    }

    /// Write one character code at the cursor
    ///
    /// Codes map to the controller's character ROM: ASCII for 0x20-0x7D, see
    /// [`charset`](crate::charset) for the rest.
    pub fn write_char(&mut self, c: u8) -> DisplayResult<T> {
        self.write(c, true, 0)
    }

    /// Write a string starting at the cursor
    ///
    /// Stops after [`MAX_STRING_LEN`] bytes or at a NUL byte, whichever comes
    /// first. Bytes are sent as-is, so non-ASCII text shows whatever the
    /// character ROM holds at those codes.
    ///
    /// # Errors
    ///
    /// Returns the first failure. Characters before it are already on the
    /// display and are not rolled back.
    pub fn write_string(&mut self, s: &str) -> DisplayResult<T> {
        self.write_bytes(s.as_bytes())
    }

    /// Write raw character codes, same limits as [`write_string`](Self::write_string)
    pub fn write_bytes(&mut self, bytes: &[u8]) -> DisplayResult<T> {
        for (index, &byte) in bytes
            .iter()
            .take(MAX_STRING_LEN)
            .take_while(|&&b| b != 0)
            .enumerate()
        {
            if let Err(e) = self.write_char(byte) {
                error!("Failed to write character index {} ({})", index, e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// I2C address of the display
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Current backlight state
    pub fn backlight(&self) -> bool {
        self.encoder.backlight
    }

    /// Bus parameters the transport was opened with
    pub fn settings(&self) -> BusSettings {
        self.settings
    }

    fn command(&mut self, cmd: Command) -> DisplayResult<T> {
        self.write(cmd.opcode(), false, cmd.settle_us())
    }

    fn write(&mut self, value: u8, is_data: bool, settle_us: u32) -> DisplayResult<T> {
        let encoder = &mut self.encoder;
        self.lock.lock(|| encoder.write_byte(value, is_data, settle_us))
    }

    fn write_nibble(&mut self, nibble: u8) -> DisplayResult<T> {
        let encoder = &mut self.encoder;
        self.lock.lock(|| encoder.write_nibble(nibble, false))
    }
}

impl<T, C, L> fmt::Write for Display<T, C, L>
where
    T: Transport,
    C: Clock,
    L: Lock,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_string(s).map_err(|_| fmt::Error)
    }
}
