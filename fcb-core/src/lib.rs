//! Board-agnostic core logic for the badge firmware
//!
//! This crate contains everything that does not depend on a specific
//! board or peripheral:
//!
//! - Device traits (panel display, touch controller, temperature sensor,
//!   console, configuration store)
//! - Input events, key mapping and the event queue
//! - The cooperative app runtime and the capability handle apps draw through
//! - The owner record persisted by the setup flow
//! - Serial line editing for console prompts
//! - Built-in apps (setup flow, home screen, circle demo)

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod apps;
pub mod color;
pub mod config;
pub mod line;
pub mod runtime;
pub mod state;
pub mod traits;

pub use color::TriColor;
pub use runtime::{App, AppRegistry, Badge, Board, Runtime, RuntimeError, StepOutcome};
pub use state::{Event, EventError, EventQueue, KeyMap, SpecialKey};
