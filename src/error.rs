//! Error types for the driver
//!
//! [`Error`] is generic over the [`Transport`] so callers can match on the
//! underlying bus error.
//!
//! ## Example
//!
//! ```
//! use core::convert::Infallible;
//! use lcd1602::{BusSettings, Error, Transport};
//!
//! struct Sink;
//! impl Transport for Sink {
//!     type Config = ();
//!     type Error = Infallible;
//!     fn open(_: u8, _: BusSettings, _: ()) -> Result<Self, Infallible> { Ok(Sink) }
//!     fn write_byte(&mut self, _: u8) -> Result<(), Infallible> { Ok(()) }
//! }
//!
//! let err: Error<Sink> = Error::InvalidArgument { row: 4, column: 0 };
//! assert!(!err.is_transport());
//! ```

use core::fmt;

use crate::transport::Transport;

/// Errors that can occur when interacting with the display
pub enum Error<T: Transport> {
    /// The lock protecting the display could not be created
    Allocation,
    /// The bus or device could not be opened or claimed
    BackendOpen(T::Error),
    /// A single byte write to the bus did not complete
    ///
    /// The controller may have latched only part of the byte; its state is
    /// unknown until the next [`reset`](crate::Display::reset).
    Transfer(T::Error),
    /// A step of the power-on initialization sequence failed
    InitSequence(T::Error),
    /// Cursor position outside the addressable area
    InvalidArgument {
        /// Requested row
        row: u8,
        /// Requested column
        column: u8,
    },
}

impl<T: Transport> Error<T> {
    /// Whether the error came from the bus rather than from argument checks
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::BackendOpen(_) | Self::Transfer(_) | Self::InitSequence(_)
        )
    }

    /// Re-tag a transfer error as an initialization failure
    pub(crate) fn into_init(self) -> Self {
        match self {
            Self::Transfer(e) => Self::InitSequence(e),
            other => other,
        }
    }
}

impl<T: Transport> fmt::Debug for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation => f.write_str("Allocation"),
            Self::BackendOpen(e) => f.debug_tuple("BackendOpen").field(e).finish(),
            Self::Transfer(e) => f.debug_tuple("Transfer").field(e).finish(),
            Self::InitSequence(e) => f.debug_tuple("InitSequence").field(e).finish(),
            Self::InvalidArgument { row, column } => f
                .debug_struct("InvalidArgument")
                .field("row", row)
                .field("column", column)
                .finish(),
        }
    }
}

impl<T: Transport> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation => write!(f, "Failed to create display lock"),
            Self::BackendOpen(e) => write!(f, "Failed to open I2C backend: {e:?}"),
            Self::Transfer(e) => write!(f, "I2C transfer failed: {e:?}"),
            Self::InitSequence(e) => write!(f, "Display initialization failed: {e:?}"),
            Self::InvalidArgument { row, column } => {
                write!(f, "Cursor position out of range: row={row}, column={column}")
            }
        }
    }
}

impl<T: Transport> core::error::Error for Error<T> {}
