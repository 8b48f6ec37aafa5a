use panic_halt as _;

// Pulls in the baudrate and usart traits default_serial! leans on.
use arduino_hal::prelude::*;

use core::cell::RefCell;

use arduino_hal::hal::pac::USART0;
use arduino_hal::hal::port::mode::{Input, Output};
use arduino_hal::hal::port::{Pin, PB0, PD0, PD1};

use crate::controller::Controller;
use crate::{clock, sequence, trigger};

type Serial = arduino_hal::usart::Usart<USART0, Pin<Input, PD0>, Pin<Output, PD1>>;

static CONTROLLER: avr_device::interrupt::Mutex<RefCell<Controller>> =
    avr_device::interrupt::Mutex::new(RefCell::new(Controller::new()));

/// Run `f` on the shared controller state with interrupts masked. The
/// minute counter is 16 bits wide on an 8-bit machine, so even plain reads
/// need the critical section.
pub fn with_controller<F, R>(f: F) -> R
where
    F: FnOnce(&mut Controller) -> R,
{
    avr_device::interrupt::free(|cs| f(&mut CONTROLLER.borrow(cs).borrow_mut()))
}

pub struct Devices {
    serial: Serial,
    delay: arduino_hal::Delay,
    valve: Pin<Output, PB0>,
}

impl Devices {
    pub fn new() -> Self {
        let dp = arduino_hal::Peripherals::take().unwrap();
        let pins = arduino_hal::pins!(dp);
        let serial = arduino_hal::default_serial!(dp, pins, 57600);

        // Led, shared with the heartbeat
        let led = pins.d13.into_output();

        // Button
        let button = pins.a4.into_pull_up_input();

        // Valve relay
        let valve = pins.d8.into_output();

        unsafe {
            // SAFETY: interrupts are still disabled here. Both init calls
            // stash their pins in state the ISRs read, and nothing fires
            // before the enable below.
            clock::init(dp.TC1, led);
            trigger::init(dp.EXINT, button);
            avr_device::interrupt::enable();
        }

        let mut res = Devices {
            serial,
            delay: arduino_hal::Delay::new(),
            valve,
        };
        res.reinit();
        res
    }

    /// Drive the valve shut, so a reset mid-dump doesn't leave it open.
    pub fn reinit(&mut self) {
        self.valve.set_low();
    }

    pub fn serial(&mut self) -> &mut Serial {
        &mut self.serial
    }

    pub fn log(&mut self, msg: &str) {
        let _ = ufmt::uwriteln!(self.serial, "{}", msg);
    }

    pub fn led_on(&mut self) {
        clock::led_on();
    }

    pub fn led_off(&mut self) {
        clock::led_off();
    }

    /// Minutes since boot or since the last scheduled dump.
    pub fn minutes(&mut self) -> u16 {
        with_controller(|c| c.minutes())
    }

    pub fn scheduled_due(&mut self) -> bool {
        with_controller(|c| c.scheduled_due())
    }

    pub fn manual_due(&mut self) -> bool {
        with_controller(|c| c.manual_due())
    }

    pub fn clear_manual(&mut self) {
        with_controller(|c| c.clear_manual())
    }

    /// Run the blow off. Blocks for the full nine seconds.
    pub fn dump_valve(&mut self) {
        let _ = sequence::dump_valve(&mut self.valve, &mut self.delay);
    }

    #[inline(always)]
    pub fn delay_ms(&self, time: u16) {
        arduino_hal::delay_ms(time)
    }
}
