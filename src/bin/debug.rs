#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

//! Bring-up aid: report the tick counter and the manual flag over serial
//! once a second, so you can watch the heartbeat count and mash the
//! button without waiting a week.

#[cfg(target_arch = "avr")]
mod firmware {
    use blowoff_controller::Devices;

    #[arduino_hal::entry]
    fn main() -> ! {
        let mut dev = Devices::new();

        loop {
            let minutes = dev.minutes();
            let manual = if dev.manual_due() { "pending" } else { "-" };
            let _ = ufmt::uwriteln!(dev.serial(), "minutes: {} manual: {}", minutes, manual);
            dev.delay_ms(1000);
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
