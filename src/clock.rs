//! Timer1 is the tick source: one overflow every 4 s, fifteen overflows to
//! the minute. On the minute it pulses the heartbeat LED and bumps the
//! shared counter.

use core::mem;
use core::sync::atomic::{AtomicU8, Ordering};

use arduino_hal::hal::pac::TC1;
use arduino_hal::hal::port::mode::Output;
use arduino_hal::hal::port::{Pin, PB5};

// Timer1 counts F_CPU/1024 = 15625 Hz, so a full 16-bit sweep is only
// ~4.19 s and a whole minute needs a software divider on top: preload for
// exactly 62500 counts (4.000 s) per overflow, fifteen overflows per
// minute.
const TICK_PRELOAD: u16 = 0x0BDC; // 65536 - 62500
const OVERFLOWS_PER_MINUTE: u8 = 15;

/// How long the heartbeat holds the LED, once a minute. This runs inside
/// the ISR and has to stay well under the 4 s overflow period.
const HEARTBEAT_MILLIS: u16 = 500;

struct InterruptState {
    tc1: TC1,
    led: Pin<Output, PB5>,
}

static mut INTERRUPT_STATE: mem::MaybeUninit<InterruptState> = mem::MaybeUninit::uninit();

static OVERFLOWS: AtomicU8 = AtomicU8::new(0);

#[avr_device::interrupt(atmega328p)]
#[allow(non_snake_case)]
fn TIMER1_OVF() {
    let state = unsafe {
        // SAFETY: We _know_ that interrupts will only be enabled after
        // init() has filled INTERRUPT_STATE, so this ISR never runs while
        // it is uninitialized.
        &mut *INTERRUPT_STATE.as_mut_ptr()
    };

    // Reload straight away so the heartbeat delay below doesn't push the
    // next overflow out.
    state.tc1.tcnt1.write(|w| unsafe { w.bits(TICK_PRELOAD) });

    let n = OVERFLOWS.load(Ordering::Relaxed) + 1;
    if n < OVERFLOWS_PER_MINUTE {
        OVERFLOWS.store(n, Ordering::Relaxed);
        return;
    }
    OVERFLOWS.store(0, Ordering::Relaxed);

    state.led.set_high();
    arduino_hal::delay_ms(HEARTBEAT_MILLIS);
    state.led.set_low();

    crate::with_controller(|c| c.tick());
}

/// SAFETY: This function can only be called with interrupts disabled.
pub unsafe fn init(tc1: TC1, led: Pin<Output, PB5>) {
    tc1.tcnt1.write(|w| unsafe { w.bits(TICK_PRELOAD) });
    tc1.timsk1.write(|w| w.toie1().set_bit());
    tc1.tccr1b.write(|w| w.cs1().prescale_1024());

    INTERRUPT_STATE = mem::MaybeUninit::new(InterruptState { tc1, led });
}

/// Turn the LED on from the main loop. The heartbeat owns the pin, so
/// this borrows it with interrupts masked; a tick landing mid-dump can
/// still flick the LED for its own pulse, which is harmless.
pub fn led_on() {
    avr_device::interrupt::free(|_cs| {
        // SAFETY: only reachable after init(), and the ISR that shares
        // this state can't preempt us inside the critical section.
        let state = unsafe { &mut *INTERRUPT_STATE.as_mut_ptr() };
        state.led.set_high();
    })
}

/// Turn the LED off from the main loop.
pub fn led_off() {
    avr_device::interrupt::free(|_cs| {
        // SAFETY: as for led_on.
        let state = unsafe { &mut *INTERRUPT_STATE.as_mut_ptr() };
        state.led.set_low();
    })
}
