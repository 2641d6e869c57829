//! Panel display trait

use core::convert::Infallible;

use embedded_graphics::prelude::DrawTarget;

use super::sensor::TemperatureSensor;
use crate::color::TriColor;

/// Errors that can occur while refreshing the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Command/data bus transfer failed
    Bus,
    /// Reset or busy pin could not be driven or read
    Pin,
    /// Busy line stayed asserted past the configured timeout
    BusyTimeout,
}

/// A framebuffered tri-colour panel
///
/// Drawing only touches the framebuffer and marks it dirty. Nothing
/// reaches the glass until [`show`](PanelDisplay::show) runs the full
/// refresh cycle.
///
/// The raw primitives take the colour as its cell code. Codes other than
/// 0 (white), 1 (black) and 2 (red) are ignored without touching the
/// framebuffer or the dirty flag. Coordinates outside the panel are
/// clipped.
pub trait PanelDisplay: DrawTarget<Color = TriColor, Error = Infallible> {
    /// Set one pixel
    fn set_pixel(&mut self, x: i32, y: i32, color: u8);

    /// Draw `len` pixels to the right of (x, y)
    fn hline(&mut self, x: i32, y: i32, len: u32, color: u8);

    /// Draw `len` pixels below (x, y)
    fn vline(&mut self, x: i32, y: i32, len: u32, color: u8);

    /// Paint the whole framebuffer
    fn fill(&mut self, color: TriColor);

    /// Read back a pixel, `None` outside the panel
    fn pixel(&self, x: i32, y: i32) -> Option<TriColor>;

    /// Check if the framebuffer changed since the last completed refresh
    fn is_dirty(&self) -> bool;

    /// Run a full refresh cycle, blocking until the panel is asleep again
    ///
    /// The sensor supplies the ambient temperature for waveform
    /// compensation. The dirty flag is cleared only when the whole cycle
    /// completes.
    fn show<S: TemperatureSensor + ?Sized>(&mut self, sensor: &mut S) -> Result<(), DisplayError>;
}
