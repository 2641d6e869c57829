//! RP2040-specific HAL for the badge firmware
//!
//! Buses and pins come straight from `embassy-rp`, whose drivers already
//! implement the `embedded-hal` traits that `fcb-hal` adapts. What remains
//! chip-specific is persistent storage:
//!
//! - Flash storage driver (implements `fcb_hal::FlashStorage`)

#![no_std]

pub mod flash;

pub use fcb_hal::{FlashStorage as FlashStorageTrait, StorageKey};
pub use flash::Rp2040FlashStorage;
