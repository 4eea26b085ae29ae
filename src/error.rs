//! Crate-wide error type.

use derive_more::{Display, Error};

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors reported by `led-reel`.
///
/// Almost every operation in this crate treats bad input as a silent no-op or
/// clamps it. Only display initialization and explicit conversions fail.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The display sink refused to start.
    #[display("display initialization failed")]
    DisplayInit,

    /// A rotation other than 0, 90, 180 or 270 degrees was requested.
    #[display("invalid rotation: {degrees} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation {
        /// The rejected angle.
        degrees: u16,
    },
}
