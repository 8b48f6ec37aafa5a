#![no_std]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod controller;
pub mod sequence;

pub use controller::Controller;

#[cfg(target_arch = "avr")]
pub mod clock;
#[cfg(target_arch = "avr")]
pub mod trigger;

#[cfg(target_arch = "avr")]
mod devices;
#[cfg(target_arch = "avr")]
pub use devices::{with_controller, Devices};
