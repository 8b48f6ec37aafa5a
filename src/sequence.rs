//! The valve actuation sequence: one long pull to dump the condensate,
//! then three short pulses as an audible "done" signal.
//!
//! Generic over the embedded-hal pin and delay traits so tests can swap in
//! a recording pin and a clock that advances instantly.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

const DUMP_MILLIS: u16 = 5000;
const SETTLE_MILLIS: u16 = 1000;
const CONFIRM_PULSES: u8 = 3;
const CONFIRM_MILLIS: u16 = 500;

/// Open the valve long enough to blow the moisture out, then rattle it
/// three times. Purely time-driven; there is no sensor to confirm the
/// valve actually moved. Runs to completion once started.
pub fn dump_valve<V, D>(valve: &mut V, delay: &mut D) -> Result<(), V::Error>
where
    V: OutputPin,
    D: DelayMs<u16>,
{
    valve.set_high()?;
    delay.delay_ms(DUMP_MILLIS);
    valve.set_low()?;
    delay.delay_ms(SETTLE_MILLIS);

    for _ in 0..CONFIRM_PULSES {
        valve.set_high()?;
        delay.delay_ms(CONFIRM_MILLIS);
        valve.set_low()?;
        delay.delay_ms(CONFIRM_MILLIS);
    }
    Ok(())
}
