//! FCB Hardware Abstraction Layer
//!
//! This crate defines the narrow bus and storage interfaces the badge
//! drivers are written against. Chip-specific crates (and the
//! `embedded-hal` adapters in this crate) implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Drivers (fcb-drivers: EPD, CAP1296...) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  fcb-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ fcb-hal-      │
//! │ I2C / SPI     │       │   rp2040      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::RegisterBus`] - Register-addressed read/write (I2C peripherals)
//! - [`spi::CommandBus`] - Command/data writes with a mode select line (SPI displays)
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use i2c::{BusError, I2cRegisterBus, RegisterBus};
pub use spi::{CommandBus, Mode, SpiCommandBus};
