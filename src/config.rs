//! Compile-time tunables.
//!
//! Nothing here is adjustable at runtime; change a value and reflash.

/// Period of the elapsed-time tick, in microseconds (1 Hz).
pub const TICK_PERIOD_US: u32 = 1_000_000;

/// Period of the display refresh request, in microseconds (500 Hz).
pub const REFRESH_PERIOD_US: u32 = 2_000;

/// Elapsed seconds wrap back to zero on reaching this value (100 minutes).
pub const ELAPSED_WRAP_SECS: u16 = 6000;

/// Sensor voltage at a normalised reading of 1.0.
pub const SENSOR_FULL_SCALE_V: f32 = 3.3;

/// Largest millivolt value that fits on four digits.
pub const MAX_DISPLAY_MV: u16 = 9999;

/// Highest count returned by the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// External crystal on the Pico board.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;
