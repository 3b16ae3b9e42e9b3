//! Character ROM codes beyond ASCII (A00 ROM, the common one on 1602/2004 modules)
//!
//! ```
//! use lcd1602::charset;
//!
//! let reading = [b'2', b'1', charset::DEGREE, b'C'];
//! assert_eq!(reading[2], 0xDF);
//! ```

/// Lower-case alpha
pub const ALPHA: u8 = 0b1110_0000;
/// Lower-case beta
pub const BETA: u8 = 0b1110_0010;
/// Lower-case theta
pub const THETA: u8 = 0b1111_0010;
/// Lower-case pi
pub const PI: u8 = 0b1111_0111;
/// Upper-case omega
pub const OMEGA: u8 = 0b1111_0100;
/// Upper-case sigma
pub const SIGMA: u8 = 0b1111_0110;
/// Infinity
pub const INFINITY: u8 = 0b1111_0011;
/// Degree sign
pub const DEGREE: u8 = 0b1101_1111;
/// Arrow pointing right
pub const ARROW_RIGHT: u8 = 0b0111_1110;
/// Arrow pointing left
pub const ARROW_LEFT: u8 = 0b0111_1111;
/// Square outline
pub const SQUARE: u8 = 0b1101_1011;
/// Centred dot
pub const DOT: u8 = 0b1010_0101;
/// Division sign
pub const DIVIDE: u8 = 0b1111_1101;
/// 5x8 filled block
pub const BLOCK: u8 = 0b1111_1111;
