//! Stopwatch and voltmeter on a four digit, seven segment display.
//!
//! The display hangs off two 74HC595 shift registers (segment byte, then
//! digit select byte) and is multiplexed one digit at a time. A 1 Hz tick
//! advances elapsed time, a 500 Hz tick requests the next digit, and the
//! main loop samples the buttons and sensor and does the drawing.
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`clock`] | Elapsed time and refresh flag shared with the timer interrupts |
//! | [`display`] | Digit rendering for both modes |
//! | [`segments`] | Segment and digit select lookup tables |
//! | [`shift`] | Bit-banged shift register transmitter |
//! | [`input`] | Button edge detection and sensor sampling |
//! | [`controller`] | One main-loop iteration |
//!
//! Everything here is board-independent; the RP2040 wiring lives in the
//! firmware binary.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod input;
pub mod segments;
pub mod shift;

pub use clock::TimeBase;
pub use controller::{Controller, Outcome};
pub use display::{Frame, Mode, Position};
pub use error::Error;
pub use input::{AnalogSensor, InputSampler};
pub use shift::ShiftRegister;
