//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in fcb-core for the badge's peripherals:
//!
//! - Tri-colour e-paper panel (SSD1680-class controller over SPI)
//! - CAP1296 six-pad capacitive touch controller (I2C)
//! - ADT75 temperature sensor (I2C)
//! - Serial console over any `embedded-io` stream
//! - Flash-backed owner record store

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate alloc;

#[macro_use]
mod fmt;

pub mod console;
pub mod epd;
pub mod sensor;
pub mod store;
pub mod touch;

pub use console::SerialConsole;
pub use epd::{Border, Epd, EpdConfig, Framebuffer, WaveformProfile};
pub use sensor::Adt75;
pub use store::FlashConfigStore;
pub use touch::{Cap1296, Cap1296Config};
