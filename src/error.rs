//! Error type shared by the pin-driving parts of the crate.

use core::fmt;

/// The I/O line that refused an operation.
///
/// Every pin on the RP2040 is infallible, so on real hardware none of these
/// are ever produced; they exist because the `embedded-hal` traits return
/// `Result` and other boards may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Shift-register latch (storage clock) output
    Latch,
    /// Shift-register clock output
    Clock,
    /// Shift-register serial data output
    Data,
    /// Reset button input
    ResetInput,
    /// Mode toggle input
    ToggleInput,
    /// Analog sensor conversion
    Sensor,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match self {
            Error::Latch => "latch output",
            Error::Clock => "clock output",
            Error::Data => "data output",
            Error::ResetInput => "reset input",
            Error::ToggleInput => "toggle input",
            Error::Sensor => "sensor",
        };
        write!(f, "{} failed", line)
    }
}
