//! Bit-banged driver for two daisy-chained 74HC595 shift registers.

use embedded_hal::digital::v2::OutputPin;

use crate::display::Frame;
use crate::error::Error;

/// Three-wire (data, clock, latch) shift register chain.
pub struct ShiftRegister<DATA, CLOCK, LATCH> {
    data: DATA,
    clock: CLOCK,
    latch: LATCH,
}

impl<DATA, CLOCK, LATCH> ShiftRegister<DATA, CLOCK, LATCH>
where
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    pub fn new(data: DATA, clock: CLOCK, latch: LATCH) -> Self {
        Self { data, clock, latch }
    }

    /// Shifts the segment byte then the select byte, MSB first, and latches.
    ///
    /// The latch is held low for all 16 bits so the outputs only change
    /// once the whole word is in place.
    pub fn send(&mut self, frame: Frame) -> Result<(), Error> {
        self.latch.set_low().map_err(|_| Error::Latch)?;
        self.shift_byte(frame.segments)?;
        self.shift_byte(frame.select)?;
        self.latch.set_high().map_err(|_| Error::Latch)
    }

    fn shift_byte(&mut self, byte: u8) -> Result<(), Error> {
        for bit in (0..8).rev() {
            let result = if (byte >> bit) & 0x01 != 0 {
                self.data.set_high()
            } else {
                self.data.set_low()
            };
            result.map_err(|_| Error::Data)?;

            self.clock.set_low().map_err(|_| Error::Clock)?;
            self.clock.set_high().map_err(|_| Error::Clock)?;
        }
        Ok(())
    }
}
