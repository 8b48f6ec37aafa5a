//! Pin-change interrupt for the manual dump button.

use core::mem;

use arduino_hal::hal::port::mode::{Input, PullUp};
use arduino_hal::hal::port::{Pin, PC4};
use avr_device::atmega328p::EXINT;

/// Settle time after a detected press. Contact bounce inside this window
/// collapses into the one request.
const DEBOUNCE_MILLIS: u16 = 50;

type DumpButton = Pin<Input<PullUp>, PC4>;

struct InterruptState {
    button: DumpButton,
}

static mut INTERRUPT_STATE: mem::MaybeUninit<InterruptState> = mem::MaybeUninit::uninit();

#[avr_device::interrupt(atmega328p)]
#[allow(non_snake_case)]
fn PCINT1() {
    let state = unsafe {
        // SAFETY: We _know_ that interrupts will only be enabled after the
        // INTERRUPT_STATE is initialized in our init function, so this ISR
        // will never run when INTERRUPT_STATE is uninitialized.
        &mut *INTERRUPT_STATE.as_mut_ptr()
    };

    // Fires on both edges; only the press (pin pulled to ground) counts.
    // Asking again while a dump is already pending is a no-op, so a held
    // button can't queue a second run.
    if state.button.is_low() {
        crate::with_controller(|c| c.manual_press());
        arduino_hal::delay_ms(DEBOUNCE_MILLIS);
    }
}

/// SAFETY: This function can only be called with interrupts disabled.
#[allow(non_snake_case)]
pub unsafe fn init(EXINT: EXINT, button: DumpButton) {
    INTERRUPT_STATE = mem::MaybeUninit::new(InterruptState { button });

    // PCINT12 (PC4, pin A4) lives in pin-change bank 1.
    EXINT.pcicr.write(|w| unsafe { w.bits(0b010) });
    EXINT.pcmsk1.write(|w| unsafe { w.bits(0b010000) });
}
