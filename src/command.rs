//! HD44780 command definitions
//!
//! Instruction bytes are sent with RS low; character bytes with RS high. Every
//! instruction has a mandatory execution time before the controller accepts
//! the next one. The driver does not sleep it off immediately; the wait is
//! deferred to the next transfer (see [`crate::scheduler`]).
//!
//! ## Example
//!
//! ```
//! use lcd1602::command::{Command, ScrollDirection, ScrollTarget};
//!
//! let cmd = Command::DisplayControl { display: true, cursor: false, blink: false };
//! assert_eq!(cmd.opcode(), 0x0C);
//! assert_eq!(cmd.settle_us(), 4_100);
//!
//! let shift = Command::Shift { target: ScrollTarget::Display, direction: ScrollDirection::Left };
//! assert_eq!(shift.opcode(), 0x1C);
//! ```

// Instruction opcodes

/// Clear display (0x01)
///
/// Fills DDRAM with spaces and returns the cursor to address 0.
pub const CLEAR: u8 = 0x01;

/// Return home (0x02)
///
/// Returns the cursor to address 0 and undoes any display shift.
pub const HOME: u8 = 0x02;

/// Entry mode set (0x04)
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Display on/off control (0x08)
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Cursor or display shift (0x10)
pub const SHIFT: u8 = 0x10;

/// Function set (0x20)
pub const FUNCTION_SET: u8 = 0x20;

/// Set CGRAM address (0x40), low 6 bits carry the address
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// Set DDRAM address (0x80), low 7 bits carry the address
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags

/// Cursor moves right after each write (left-to-right text)
pub const ENTRY_INCREMENT: u8 = 0x02;
/// Display shifts with each write (auto-scroll)
pub const ENTRY_SHIFT: u8 = 0x01;

// Display control flags

/// Display on
pub const DISPLAY_ON: u8 = 0x04;
/// Underline cursor visible
pub const CURSOR_ON: u8 = 0x02;
/// Cursor position blinks
pub const BLINK_ON: u8 = 0x01;

// Shift flags

/// Shift the whole display (cursor only if clear)
pub const SHIFT_DISPLAY: u8 = 0x08;
/// Shift left (right if clear)
pub const SHIFT_LEFT: u8 = 0x04;

// Function set flags

/// 8-bit bus (4-bit if clear)
pub const FUNCTION_8BIT: u8 = 0x10;
/// Two display lines (one if clear)
pub const FUNCTION_2LINE: u8 = 0x08;
/// 5x10 font (5x8 if clear)
pub const FUNCTION_5X10: u8 = 0x04;

// Execution times in microseconds

/// Execution time of clear display
pub const DELAY_CLEAR_US: u32 = 1_640;
/// Execution time of return home
pub const DELAY_HOME_US: u32 = 1_640;
/// Wait after display control and entry mode changes
pub const DELAY_MODE_US: u32 = 4_100;

/// Target of a shift instruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Shift the whole display contents
    #[default]
    Display,
    /// Move only the cursor
    Cursor,
}

/// Direction of a shift instruction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Towards lower addresses
    #[default]
    Left,
    /// Towards higher addresses
    Right,
}

/// The closed set of HD44780 instructions this driver issues
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Clear the display
    Clear,
    /// Return the cursor home
    Home,
    /// Set text direction and auto-scroll
    EntryModeSet {
        /// Cursor advances to the right after each character
        left_to_right: bool,
        /// Display shifts instead of the cursor
        auto_scroll: bool,
    },
    /// Switch the display, cursor and blink on or off
    DisplayControl {
        /// Display on
        display: bool,
        /// Underline cursor visible
        cursor: bool,
        /// Cursor blink
        blink: bool,
    },
    /// Shift the display or cursor by one position
    Shift {
        /// What to move
        target: ScrollTarget,
        /// Which way
        direction: ScrollDirection,
    },
    /// Select bus width, line count and font
    FunctionSet {
        /// 8-bit bus
        eight_bit: bool,
        /// Two lines
        two_lines: bool,
        /// 5x10 dot font
        large_font: bool,
    },
    /// Point the address counter into CGRAM
    SetCgramAddress(u8),
    /// Point the address counter into DDRAM
    SetDdramAddress(u8),
}

impl Command {
    /// Instruction byte sent on the wire
    pub fn opcode(&self) -> u8 {
        match *self {
            Self::Clear => CLEAR,
            Self::Home => HOME,
            Self::EntryModeSet {
                left_to_right,
                auto_scroll,
            } => {
                ENTRY_MODE_SET
                    | flag(left_to_right, ENTRY_INCREMENT)
                    | flag(auto_scroll, ENTRY_SHIFT)
            }
            Self::DisplayControl {
                display,
                cursor,
                blink,
            } => {
                DISPLAY_CONTROL
                    | flag(display, DISPLAY_ON)
                    | flag(cursor, CURSOR_ON)
                    | flag(blink, BLINK_ON)
            }
            Self::Shift { target, direction } => {
                SHIFT
                    | flag(target == ScrollTarget::Display, SHIFT_DISPLAY)
                    | flag(direction == ScrollDirection::Left, SHIFT_LEFT)
            }
            Self::FunctionSet {
                eight_bit,
                two_lines,
                large_font,
            } => {
                FUNCTION_SET
                    | flag(eight_bit, FUNCTION_8BIT)
                    | flag(two_lines, FUNCTION_2LINE)
                    | flag(large_font, FUNCTION_5X10)
            }
            Self::SetCgramAddress(addr) => SET_CGRAM_ADDR | (addr & 0x3F),
            Self::SetDdramAddress(addr) => SET_DDRAM_ADDR | (addr & 0x7F),
        }
    }

    /// Command-specific wait before the controller accepts the next transfer
    ///
    /// Zero means only the common settle floor applies.
    pub fn settle_us(&self) -> u32 {
        match self {
            Self::Clear => DELAY_CLEAR_US,
            Self::Home => DELAY_HOME_US,
            Self::EntryModeSet { .. } | Self::DisplayControl { .. } => DELAY_MODE_US,
            _ => 0,
        }
    }
}

const fn flag(set: bool, bit: u8) -> u8 {
    if set { bit } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_control_all_off_is_bare_opcode() {
        let cmd = Command::DisplayControl {
            display: false,
            cursor: false,
            blink: false,
        };
        assert_eq!(cmd.opcode(), DISPLAY_CONTROL);
    }

    #[test]
    fn test_display_control_all_on() {
        let cmd = Command::DisplayControl {
            display: true,
            cursor: true,
            blink: true,
        };
        assert_eq!(cmd.opcode(), 0x0F);
    }

    #[test]
    fn test_entry_mode_left_to_right_no_scroll() {
        let cmd = Command::EntryModeSet {
            left_to_right: true,
            auto_scroll: false,
        };
        assert_eq!(cmd.opcode(), 0x06);
    }

    #[test]
    fn test_shift_variants() {
        let opcode = |target, direction| Command::Shift { target, direction }.opcode();
        assert_eq!(opcode(ScrollTarget::Display, ScrollDirection::Left), 0x1C);
        assert_eq!(opcode(ScrollTarget::Display, ScrollDirection::Right), 0x18);
        assert_eq!(opcode(ScrollTarget::Cursor, ScrollDirection::Left), 0x14);
        assert_eq!(opcode(ScrollTarget::Cursor, ScrollDirection::Right), 0x10);
    }

    #[test]
    fn test_function_set_two_lines_four_bit() {
        let cmd = Command::FunctionSet {
            eight_bit: false,
            two_lines: true,
            large_font: false,
        };
        assert_eq!(cmd.opcode(), 0x28);
    }

    #[test]
    fn test_address_commands_mask_out_of_range_bits() {
        assert_eq!(Command::SetDdramAddress(0x54).opcode(), 0xD4);
        assert_eq!(Command::SetDdramAddress(0xFF).opcode(), 0xFF);
        assert_eq!(Command::SetCgramAddress(0xFF).opcode(), 0x7F);
    }

    #[test]
    fn test_settle_times() {
        assert_eq!(Command::Clear.settle_us(), 1_640);
        assert_eq!(Command::Home.settle_us(), 1_640);
        assert_eq!(
            Command::EntryModeSet {
                left_to_right: true,
                auto_scroll: false
            }
            .settle_us(),
            4_100
        );
        assert_eq!(Command::SetDdramAddress(0).settle_us(), 0);
    }
}
