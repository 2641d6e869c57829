//! Cooperative app runtime
//!
//! One app is active at a time. Each loop step drains serial input into
//! the event queue, delivers every queued event to the app, lets it
//! redraw, and refreshes the panel if the framebuffer is dirty.
//!
//! Apps reach the hardware only through the [`Badge`] capability handle.

pub mod app;
pub mod badge;
pub mod board;
pub mod executor;

#[cfg(test)]
pub(crate) mod mock;

pub use app::{App, AppFactory, AppRegistry, MAX_APPS};
pub use badge::{AppRequest, Badge};
pub use board::Board;
pub use executor::{Runtime, RuntimeError, StepOutcome};
