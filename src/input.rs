//! Button and sensor sampling.
//!
//! Both buttons are wired to ground with the internal pull-up enabled, so a
//! pressed button reads low. Reset acts on the press edge only; the mode
//! toggle is a switch and is followed level for level. No debouncing.

use embedded_hal::digital::v2::InputPin;

use crate::config::ADC_FULL_SCALE;
use crate::display::Mode;
use crate::error::Error;

/// Source of a normalised analog reading in `[0.0, 1.0]`.
pub trait AnalogSensor {
    fn read_normalized(&mut self) -> Result<f32, Error>;
}

/// Converts a raw 12-bit conversion to the normalised range.
pub fn normalize(raw: u16) -> f32 {
    f32::from(raw.min(ADC_FULL_SCALE)) / f32::from(ADC_FULL_SCALE)
}

/// Detects released-to-pressed transitions on an active-low line.
#[derive(Debug, Clone, Copy)]
pub struct PressEdge {
    last_high: bool,
}

impl PressEdge {
    /// Starts out released, so a button held at power-up counts as a press.
    pub const fn new() -> Self {
        Self { last_high: true }
    }

    /// Feeds the current level; true exactly once per press.
    pub fn update(&mut self, high: bool) -> bool {
        let pressed = self.last_high && !high;
        self.last_high = high;
        pressed
    }
}

impl Default for PressEdge {
    fn default() -> Self {
        Self::new()
    }
}

/// One pass over the inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Reset button went down since the previous sample
    pub reset: bool,
    /// Mode selected by the toggle right now
    pub mode: Mode,
}

pub struct InputSampler<RESET, TOGGLE, SENSOR> {
    reset: RESET,
    toggle: TOGGLE,
    sensor: SENSOR,
    reset_edge: PressEdge,
}

impl<RESET, TOGGLE, SENSOR> InputSampler<RESET, TOGGLE, SENSOR>
where
    RESET: InputPin,
    TOGGLE: InputPin,
    SENSOR: AnalogSensor,
{
    pub fn new(reset: RESET, toggle: TOGGLE, sensor: SENSOR) -> Self {
        Self {
            reset,
            toggle,
            sensor,
            reset_edge: PressEdge::new(),
        }
    }

    /// Reads both buttons. The sensor is left alone so a failing
    /// conversion can never swallow a reset press.
    pub fn sample(&mut self) -> Result<Sample, Error> {
        let reset_high = self.reset.is_high().map_err(|_| Error::ResetInput)?;
        let reset = self.reset_edge.update(reset_high);

        let mode = if self.toggle.is_low().map_err(|_| Error::ToggleInput)? {
            Mode::Voltage
        } else {
            Mode::Time
        };

        Ok(Sample { reset, mode })
    }

    /// Normalised sensor reading, only needed in voltage mode.
    pub fn read_sensor(&mut self) -> Result<f32, Error> {
        self.sensor.read_normalized()
    }
}
