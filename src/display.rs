use crate::clock::minutes_seconds;
use crate::config::{MAX_DISPLAY_MV, SENSOR_FULL_SCALE_V};
use crate::segments::{digit_segments, digit_segments_with_dot, DIGIT_NONE, DIGIT_POS, SEG_BLANK};

/// What the four digits show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Elapsed time as mm.ss
    #[default]
    Time,
    /// Sensor voltage as v.vvv
    Voltage,
}

/// Physical digit currently being driven, 0 is leftmost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position(u8);

impl Position {
    pub const COUNT: u8 = 4;

    /// Returns `None` unless `index < 4`.
    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Self(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Round-robin successor: 0, 1, 2, 3, 0, ...
    pub fn next(self) -> Self {
        Self((self.0 + 1) % Self::COUNT)
    }
}

/// One 16-bit word for the register chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Active-low segment byte, shifted first
    pub segments: u8,
    /// Digit select byte, shifted second
    pub select: u8,
}

impl Frame {
    /// All segments dark on every digit.
    pub const BLANK: Frame = Frame {
        segments: SEG_BLANK,
        select: DIGIT_NONE,
    };

    /// The word as it leaves the data pin, most significant bit first.
    pub fn to_word(self) -> u16 {
        (u16::from(self.segments) << 8) | u16::from(self.select)
    }
}

/// Converts a normalised sensor reading to millivolts, capped at 9999.
///
/// Negative and NaN readings show as zero.
pub fn millivolts(reading: f32) -> u16 {
    let volts = reading * SENSOR_FULL_SCALE_V;
    // float-to-int casts saturate, so huge or infinite readings cannot wrap
    let mv = (volts * 1000.0) as u32;
    mv.min(u32::from(MAX_DISPLAY_MV)) as u16
}

/// Computes the frame for one digit position.
///
/// Time mode shows minutes and seconds with the dot after the minutes.
/// Voltage mode shows whole volts with the dot after it, followed by three
/// fractional digits.
pub fn render(mode: Mode, elapsed: u16, reading: f32, position: Position) -> Frame {
    let digits: [u8; 4];
    let dot: u8;

    match mode {
        Mode::Time => {
            let (m, s) = minutes_seconds(elapsed);
            digits = [m / 10, m % 10, s / 10, s % 10];
            dot = 1;
        }
        Mode::Voltage => {
            let mv = millivolts(reading);
            let whole = (mv / 1000) as u8;
            let part = mv % 1000;
            digits = [whole, (part / 100) as u8, (part % 100 / 10) as u8, (part % 10) as u8];
            dot = 0;
        }
    }

    let pos = position.index();
    let digit = digits[usize::from(pos)];
    let segments = if pos == dot {
        digit_segments_with_dot(digit)
    } else {
        digit_segments(digit)
    };

    Frame {
        segments,
        select: DIGIT_POS[usize::from(pos)],
    }
}
