//! Capacitive touch controller trait

use heapless::Vec;

/// Errors that can occur with the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// Bus transfer to the controller failed
    Bus,
    /// Key index outside the controller's pads
    InvalidKey(u8),
    /// Simultaneous touch limit outside 1..=4
    InvalidTouchCount(u8),
}

/// Decoded pad indices, ascending
pub type Keys = Vec<u8, 8>;

/// Receiver for keys decoded from a touch alert
///
/// Injected into [`TouchController::service_interrupt`] so the driver
/// never depends on the runtime that consumes its keys.
pub trait TouchSink {
    /// Called once per alert with the pads currently asserted
    fn keys_pressed(&mut self, keys: &[u8]);
}

/// Trait for capacitive touch controllers
pub trait TouchController {
    /// Enable sensing on the given pads; an empty slice selects the default set
    fn enable_keys(&mut self, keys: &[u8]) -> Result<(), TouchError>;

    /// Enable the alert line for the given pads; an empty slice selects the default set
    fn enable_interrupt(&mut self, keys: &[u8]) -> Result<(), TouchError>;

    /// Configure multi-touch blocking
    ///
    /// When `enable` is false, at most `simultaneous_touches` (1..=4) pads
    /// are reported at once.
    fn enable_multitouch(&mut self, enable: bool, simultaneous_touches: u8)
        -> Result<(), TouchError>;

    /// Read the raw status bitmask and re-arm detection
    fn read_status(&mut self) -> Result<u8, TouchError>;

    /// Read the pressed pads among the first `key_count` and re-arm detection
    fn read_keys(&mut self, key_count: u8) -> Result<Keys, TouchError>;

    /// Handle an alert: read the pressed pads and forward them to `sink`
    ///
    /// Performs only the status read and the re-arm write; never blocks.
    fn service_interrupt(&mut self, sink: &mut dyn TouchSink) -> Result<(), TouchError>;
}
