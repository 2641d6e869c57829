//! Input events and the queue that feeds the active app
//!
//! Touch alerts and serial bytes are merged into one FIFO of [`Event`]s.
//! The runtime drains the whole queue into the app once per loop step.

pub mod events;
pub mod keymap;
pub mod queue;

pub use events::{Event, EventError, SpecialKey};
pub use keymap::KeyMap;
pub use queue::{EventQueue, QUEUE_CAPACITY};
