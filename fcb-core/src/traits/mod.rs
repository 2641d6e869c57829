//! Hardware abstraction traits
//!
//! These traits define the interface between the runtime and apps on one
//! side and the board's drivers on the other.

pub mod console;
pub mod display;
pub mod sensor;
pub mod store;
pub mod touch;

pub use console::{Console, ConsoleError};
pub use display::{DisplayError, PanelDisplay};
pub use sensor::{SensorError, TemperatureSensor};
pub use store::{ConfigStore, StoreError};
pub use touch::{Keys, TouchController, TouchError, TouchSink};
