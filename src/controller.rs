//! The cooperative main loop body.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::clock::TimeBase;
use crate::display::{render, Frame, Mode, Position};
use crate::error::Error;
use crate::input::{AnalogSensor, InputSampler};
use crate::shift::ShiftRegister;

/// What one call to [`Controller::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Elapsed time was cleared by a reset press
    pub reset: bool,
    /// Mode in effect for this pass
    pub mode: Mode,
    /// Frame shifted out, if a refresh was due
    pub frame: Option<Frame>,
}

/// Owns the display position and the I/O, sharing [`TimeBase`] with the
/// timer interrupts.
pub struct Controller<'a, RESET, TOGGLE, SENSOR, DATA, CLOCK, LATCH> {
    time: &'a TimeBase,
    inputs: InputSampler<RESET, TOGGLE, SENSOR>,
    register: ShiftRegister<DATA, CLOCK, LATCH>,
    position: Position,
}

impl<'a, RESET, TOGGLE, SENSOR, DATA, CLOCK, LATCH> Controller<'a, RESET, TOGGLE, SENSOR, DATA, CLOCK, LATCH>
where
    RESET: InputPin,
    TOGGLE: InputPin,
    SENSOR: AnalogSensor,
    DATA: OutputPin,
    CLOCK: OutputPin,
    LATCH: OutputPin,
{
    pub fn new(
        time: &'a TimeBase,
        inputs: InputSampler<RESET, TOGGLE, SENSOR>,
        register: ShiftRegister<DATA, CLOCK, LATCH>,
    ) -> Self {
        Self {
            time,
            inputs,
            register,
            position: Position::default(),
        }
    }

    /// Clears whatever the registers held at power-up.
    pub fn blank(&mut self) -> Result<(), Error> {
        self.register.send(Frame::BLANK)
    }

    /// Position of the next digit to be drawn.
    pub fn position(&self) -> Position {
        self.position
    }

    /// One main-loop iteration: sample inputs, then draw the next digit if
    /// the refresh tick asked for one.
    ///
    /// A reset press is applied before the sensor is touched, and the sensor
    /// is only read in voltage mode. A failed conversion leaves the refresh
    /// request pending. The position only advances after a frame has been
    /// latched.
    pub fn poll(&mut self) -> Result<Outcome, Error> {
        let sample = self.inputs.sample()?;
        if sample.reset {
            self.time.reset();
        }

        let reading = match sample.mode {
            Mode::Voltage => self.inputs.read_sensor()?,
            Mode::Time => 0.0,
        };

        let frame = if self.time.take_frame_request() {
            let frame = render(sample.mode, self.time.elapsed(), reading, self.position);
            self.register.send(frame)?;
            self.position = self.position.next();
            Some(frame)
        } else {
            None
        };

        Ok(Outcome {
            reset: sample.reset,
            mode: sample.mode,
            frame,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::mock::{DeadSensor, FixedSensor, LevelPin};
    use crate::segments::DIGIT_POS;
    use crate::shift::mock::{latched_words, traced_register, BrokenPin, Line, Trace, TracePin};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    struct Rig {
        reset: LevelPin,
        toggle: LevelPin,
        sensor: FixedSensor,
        trace: Trace,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                reset: LevelPin::released(),
                toggle: LevelPin::released(),
                sensor: FixedSensor::at(0.0),
                trace: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn controller<'a>(
            &self,
            time: &'a TimeBase,
        ) -> Controller<'a, LevelPin, LevelPin, FixedSensor, TracePin, TracePin, TracePin> {
            let inputs = InputSampler::new(self.reset.clone(), self.toggle.clone(), self.sensor.clone());
            Controller::new(time, inputs, traced_register(&self.trace))
        }

        fn words(&self) -> Vec<u16> {
            latched_words(&self.trace.borrow())
        }
    }

    fn tick_n(time: &TimeBase, n: u16) {
        for _ in 0..n {
            time.tick();
        }
    }

    /// Requests and draws four digits, returning the frames in order.
    fn draw_cycle<R, T, S, D, C, L>(time: &TimeBase, ctl: &mut Controller<'_, R, T, S, D, C, L>) -> [Frame; 4]
    where
        R: InputPin,
        T: InputPin,
        S: AnalogSensor,
        D: OutputPin,
        C: OutputPin,
        L: OutputPin,
    {
        let mut frames = [Frame::BLANK; 4];
        for slot in frames.iter_mut() {
            time.request_frame();
            *slot = ctl.poll().unwrap().frame.unwrap();
        }
        frames
    }

    #[test]
    fn test_idle_without_refresh_request() {
        let rig = Rig::new();
        let time = TimeBase::new();
        let mut ctl = rig.controller(&time);

        let outcome = ctl.poll().unwrap();
        assert_eq!(
            outcome,
            Outcome {
                reset: false,
                mode: Mode::Time,
                frame: None
            }
        );
        assert!(rig.trace.borrow().is_empty());
        assert_eq!(ctl.position(), Position::default());
    }

    #[test]
    fn test_time_display_cycle() {
        let rig = Rig::new();
        let time = TimeBase::new();
        tick_n(&time, 125);
        let mut ctl = rig.controller(&time);

        let frames = draw_cycle(&time, &mut ctl);
        let segs = frames.map(|f| f.segments);
        assert_eq!(segs, [0xC0, 0x24, 0xC0, 0x92]);
        assert_eq!(frames.map(|f| f.select), DIGIT_POS);
        assert_eq!(rig.words(), [0xC0F1, 0x24F2, 0xC0F4, 0x92F8]);
    }

    #[test]
    fn test_voltage_display_cycle() {
        let rig = Rig::new();
        rig.toggle.press();
        rig.sensor.0.set(1.0);
        let time = TimeBase::new();
        let mut ctl = rig.controller(&time);

        let frames = draw_cycle(&time, &mut ctl);
        assert_eq!(frames.map(|f| f.segments), [0x30, 0xB0, 0xC0, 0xC0]);
    }

    #[test]
    fn test_position_wraps_after_four_frames() {
        let rig = Rig::new();
        let time = TimeBase::new();
        let mut ctl = rig.controller(&time);

        draw_cycle(&time, &mut ctl);
        assert_eq!(ctl.position().index(), 0);
        time.request_frame();
        ctl.poll().unwrap();
        assert_eq!(ctl.position().index(), 1);
    }

    #[test]
    fn test_one_frame_per_request() {
        let rig = Rig::new();
        let time = TimeBase::new();
        let mut ctl = rig.controller(&time);

        time.request_frame();
        assert!(ctl.poll().unwrap().frame.is_some());
        assert!(ctl.poll().unwrap().frame.is_none());
        assert!(ctl.poll().unwrap().frame.is_none());
        assert_eq!(rig.words().len(), 1);
    }

    #[test]
    fn test_held_reset_clears_once() {
        let rig = Rig::new();
        let time = TimeBase::new();
        tick_n(&time, 300);
        let mut ctl = rig.controller(&time);

        rig.reset.press();
        assert!(ctl.poll().unwrap().reset);
        assert_eq!(time.elapsed(), 0);

        tick_n(&time, 7);
        assert!(!ctl.poll().unwrap().reset);
        assert!(!ctl.poll().unwrap().reset);
        assert_eq!(time.elapsed(), 7);

        rig.reset.release();
        ctl.poll().unwrap();
        rig.reset.press();
        assert!(ctl.poll().unwrap().reset);
        assert_eq!(time.elapsed(), 0);
    }

    #[test]
    fn test_reset_applies_before_draw() {
        let rig = Rig::new();
        let time = TimeBase::new();
        tick_n(&time, 125);
        let mut ctl = rig.controller(&time);

        // skip to the ones-of-seconds digit
        for _ in 0..3 {
            time.request_frame();
            ctl.poll().unwrap();
        }
        rig.reset.press();
        time.request_frame();
        let frame = ctl.poll().unwrap().frame.unwrap();
        assert_eq!(frame.segments, 0xC0);
    }

    #[test]
    fn test_mode_switch_mid_cycle() {
        let rig = Rig::new();
        rig.sensor.0.set(1.0);
        let time = TimeBase::new();
        tick_n(&time, 125);
        let mut ctl = rig.controller(&time);

        time.request_frame();
        assert_eq!(ctl.poll().unwrap().frame.unwrap().segments, 0xC0);
        rig.toggle.press();
        time.request_frame();
        let outcome = ctl.poll().unwrap();
        assert_eq!(outcome.mode, Mode::Voltage);
        // position 1 in voltage mode: hundreds of millivolts
        assert_eq!(outcome.frame.unwrap().segments, 0xB0);
    }

    #[test]
    fn test_blank_frame() {
        let rig = Rig::new();
        let time = TimeBase::new();
        let mut ctl = rig.controller(&time);
        ctl.blank().unwrap();
        assert_eq!(rig.words(), [0xFFF0]);
        assert_eq!(ctl.position(), Position::default());
    }

    #[test]
    fn test_failed_transmit_keeps_position() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let time = TimeBase::new();
        let inputs = InputSampler::new(LevelPin::released(), LevelPin::released(), FixedSensor::at(0.0));
        let register = ShiftRegister::new(
            TracePin::new(Line::Data, &trace),
            TracePin::new(Line::Clock, &trace),
            BrokenPin,
        );
        let mut ctl = Controller::new(&time, inputs, register);

        time.request_frame();
        assert_eq!(ctl.poll(), Err(Error::Latch));
        assert_eq!(ctl.position().index(), 0);
    }

    fn dead_sensor_controller<'a>(
        time: &'a TimeBase,
        reset: &LevelPin,
        toggle: &LevelPin,
        trace: &Trace,
    ) -> Controller<'a, LevelPin, LevelPin, DeadSensor, TracePin, TracePin, TracePin> {
        let inputs = InputSampler::new(reset.clone(), toggle.clone(), DeadSensor);
        Controller::new(time, inputs, traced_register(trace))
    }

    #[test]
    fn test_time_mode_never_reads_sensor() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let time = TimeBase::new();
        tick_n(&time, 125);
        let mut ctl = dead_sensor_controller(&time, &LevelPin::released(), &LevelPin::released(), &trace);

        let frames = draw_cycle(&time, &mut ctl);
        assert_eq!(frames.map(|f| f.segments), [0xC0, 0x24, 0xC0, 0x92]);
    }

    #[test]
    fn test_sensor_failure_keeps_request_pending() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let time = TimeBase::new();
        let toggle = LevelPin::released();
        toggle.press();
        let mut ctl = dead_sensor_controller(&time, &LevelPin::released(), &toggle, &trace);

        time.request_frame();
        assert_eq!(ctl.poll(), Err(Error::Sensor));
        assert!(trace.borrow().is_empty());

        // back in time mode the pending request is served
        toggle.release();
        assert!(ctl.poll().unwrap().frame.is_some());
        assert_eq!(words_of(&trace).len(), 1);
    }

    #[test]
    fn test_reset_survives_sensor_failure() {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let time = TimeBase::new();
        tick_n(&time, 300);
        let reset = LevelPin::released();
        let toggle = LevelPin::released();
        toggle.press();
        let mut ctl = dead_sensor_controller(&time, &reset, &toggle, &trace);

        reset.press();
        assert_eq!(ctl.poll(), Err(Error::Sensor));
        assert_eq!(time.elapsed(), 0);

        tick_n(&time, 4);
        assert_eq!(ctl.poll(), Err(Error::Sensor));
        assert_eq!(time.elapsed(), 4);
    }

    fn words_of(trace: &Trace) -> Vec<u16> {
        latched_words(&trace.borrow())
    }
}
