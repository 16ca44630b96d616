//! Drivers for 7-segment LED displays controlled by the HT16K33.
//!
//! Both a blocking driver (over `embedded_hal::i2c::I2c`) and an asynchronous driver (over
//! `embedded_hal_async::i2c::I2c`) are provided. Numbers, floats and temperatures are formatted
//! into segment patterns right-aligned on the display.
//!
//! # Features
//! - `defmt`: trace logging of bus traffic and `defmt::Format` on public types
#![cfg_attr(not(test), no_std)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod initalization;
