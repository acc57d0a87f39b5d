#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_halt as _;
use rtic::app;

use embedded_hal::adc::OneShot;
use rp_pico::hal::adc::{Adc, AdcPin};
use rp_pico::hal::gpio::{bank0::Gpio26, FunctionSio, Pin, PullNone, SioInput};
use segclock::input::{normalize, AnalogSensor};
use segclock::Error;

/// ADC0 on GP26, full scale at 3.3 V.
pub struct Sensor {
    adc: Adc,
    pin: AdcPin<Pin<Gpio26, FunctionSio<SioInput>, PullNone>>,
}

impl AnalogSensor for Sensor {
    fn read_normalized(&mut self) -> Result<f32, Error> {
        let raw: u16 = self.adc.read(&mut self.pin).map_err(|_| Error::Sensor)?;
        Ok(normalize(raw))
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use defmt::{info, trace, warn};
    use embedded_hal::digital::v2::ToggleableOutputPin;
    use rp_pico::hal::{
        clocks::init_clocks_and_plls,
        fugit::ExtU32,
        gpio::{
            bank0::{Gpio14, Gpio15, Gpio25, Gpio4, Gpio7, Gpio8},
            PullDown, PullUp, SioOutput,
        },
        sio::Sio,
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };
    use segclock::config::{REFRESH_PERIOD_US, TICK_PERIOD_US, XTAL_FREQ_HZ};
    use segclock::{Controller, InputSampler, Mode, ShiftRegister, TimeBase};

    type OutPin<I> = Pin<I, FunctionSio<SioOutput>, PullDown>;
    type ButtonPin<I> = Pin<I, FunctionSio<SioInput>, PullUp>;

    type Display = Controller<
        'static,
        ButtonPin<Gpio14>,
        ButtonPin<Gpio15>,
        Sensor,
        OutPin<Gpio8>,
        OutPin<Gpio7>,
        OutPin<Gpio4>,
    >;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        tick_alarm: Alarm0,
        tick_time: &'static TimeBase,
        led: OutPin<Gpio25>,
        refresh_alarm: Alarm1,
        refresh_time: &'static TimeBase,
        display: Display,
    }

    #[init(local = [time: TimeBase = TimeBase::new()])]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let clocks = init_clocks_and_plls(
            XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();

        let register = ShiftRegister::new(
            pins.gpio8.into_push_pull_output(),
            pins.gpio7.into_push_pull_output(),
            pins.gpio4.into_push_pull_output(),
        );

        let sensor = Sensor {
            adc: Adc::new(pac.ADC, &mut pac.RESETS),
            pin: AdcPin::new(pins.gpio26.into_floating_input()).unwrap(),
        };
        let inputs = InputSampler::new(
            pins.gpio14.into_pull_up_input(),
            pins.gpio15.into_pull_up_input(),
            sensor,
        );

        let time: &'static TimeBase = ctx.local.time;
        let mut display = Controller::new(time, inputs, register);
        if let Err(e) = display.blank() {
            warn!("could not blank display: {}", e);
        }

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

        let mut tick_alarm = timer.alarm_0().unwrap();
        tick_alarm.schedule(TICK_PERIOD_US.micros()).unwrap();
        tick_alarm.enable_interrupt();

        let mut refresh_alarm = timer.alarm_1().unwrap();
        refresh_alarm.schedule(REFRESH_PERIOD_US.micros()).unwrap();
        refresh_alarm.enable_interrupt();

        info!("segclock up: data=GP8 clock=GP7 latch=GP4 reset=GP14 mode=GP15 sensor=GP26");

        (
            Shared {},
            Local {
                tick_alarm,
                tick_time: time,
                led,
                refresh_alarm,
                refresh_time: time,
                display,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: 1 Hz elapsed-time tick
    #[task(binds = TIMER_IRQ_0, priority = 1, local = [tick_alarm, tick_time, led])]
    fn time_tick(ctx: time_tick::Context) {
        let alarm = ctx.local.tick_alarm;
        alarm.clear_interrupt();
        if alarm.schedule(TICK_PERIOD_US.micros()).is_err() {
            warn!("tick alarm not rearmed");
        }

        ctx.local.led.toggle().ok();
        ctx.local.tick_time.tick();
    }

    // Hardware Task: 500 Hz display refresh request
    #[task(binds = TIMER_IRQ_1, priority = 1, local = [refresh_alarm, refresh_time])]
    fn refresh_tick(ctx: refresh_tick::Context) {
        let alarm = ctx.local.refresh_alarm;
        alarm.clear_interrupt();
        if alarm.schedule(REFRESH_PERIOD_US.micros()).is_err() {
            warn!("refresh alarm not rearmed");
        }

        ctx.local.refresh_time.request_frame();
    }

    // Main loop: poll inputs, draw one digit whenever a refresh is due
    #[idle(local = [display])]
    fn idle(ctx: idle::Context) -> ! {
        let display = ctx.local.display;
        let mut mode = Mode::Time;

        loop {
            match display.poll() {
                Ok(outcome) => {
                    if outcome.reset {
                        info!("elapsed time reset");
                    }
                    if outcome.mode != mode {
                        info!("mode: {}", outcome.mode);
                        mode = outcome.mode;
                    }
                    if let Some(frame) = outcome.frame {
                        trace!("frame {=u16:#x}", frame.to_word());
                    }
                }
                Err(e) => warn!("display pass failed: {}", e),
            }
        }
    }
}
