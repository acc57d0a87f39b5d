//! Bit patterns for the two 74HC595 registers behind the display.
//!
//! Segment byte, common anode, a cleared bit lights the segment:
//!
//! ```text
//!  bit  7  6  5  4  3  2  1  0
//!      DP  G  F  E  D  C  B  A
//! ```

/// Segment patterns for the digits 0 through 9.
pub const NUM_TO_SEG: [u8; 10] = [0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x90];

/// Digit enable patterns for positions 0 (leftmost) through 3.
///
/// The low nibble drives the four digit transistors, one per position; the
/// unused high nibble is held high.
pub const DIGIT_POS: [u8; 4] = [0xF1, 0xF2, 0xF4, 0xF8];

/// Segment byte with every segment dark.
pub const SEG_BLANK: u8 = 0xFF;

/// Select byte that enables no digit.
pub const DIGIT_NONE: u8 = 0xF0;

/// Mask that clears the decimal point bit, lighting the dot.
pub const DP_ON: u8 = 0x7F;

/// Segment pattern for a single decimal digit.
///
/// Panics if `digit > 9`; callers reduce their values first.
#[inline]
pub fn digit_segments(digit: u8) -> u8 {
    NUM_TO_SEG[usize::from(digit)]
}

/// Segment pattern for a digit with its decimal point lit.
#[inline]
pub fn digit_segments_with_dot(digit: u8) -> u8 {
    digit_segments(digit) & DP_ON
}
