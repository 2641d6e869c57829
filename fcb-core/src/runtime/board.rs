//! Board description

use crate::traits::{ConfigStore, Console, PanelDisplay, TemperatureSensor, TouchController};

/// The set of devices a badge is built from
///
/// Implemented by a marker type per board; the runtime and apps are
/// generic over it so every driver call is statically dispatched.
pub trait Board {
    type Display: PanelDisplay;
    type Touch: TouchController;
    type Sensor: TemperatureSensor;
    type Console: Console;
    type Store: ConfigStore;
}
