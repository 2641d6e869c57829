//! Capability handle passed to apps
//!
//! [`Badge`] owns every device. Apps draw, configure touch, read the
//! temperature, talk on the console and request app switches through it;
//! they never hold a driver themselves.

use core::fmt::Write as _;

use heapless::String;

use super::board::Board;
use crate::color::TriColor;
use crate::config::BadgeConfig;
use crate::line::{Feed, LineEditor, MAX_LINE_LEN};
use crate::traits::console::ConsoleWriter;
use crate::traits::{
    ConfigStore, Console, ConsoleError, DisplayError, PanelDisplay, SensorError, StoreError,
    TemperatureSensor, TouchController, TouchError, TouchSink,
};

/// App switch requested by the active app
///
/// Applied by the runtime as soon as the app call that made it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppRequest {
    /// Load the named app
    Load(&'static str),
    /// Return to the home app
    Exit,
}

/// Devices of one badge plus the app-facing operations on them
pub struct Badge<B: Board> {
    display: B::Display,
    touch: B::Touch,
    sensor: B::Sensor,
    console: B::Console,
    store: B::Store,
    debug: bool,
    request: Option<AppRequest>,
}

impl<B: Board> Badge<B> {
    /// Take ownership of the board's devices
    pub fn new(
        display: B::Display,
        touch: B::Touch,
        sensor: B::Sensor,
        console: B::Console,
        store: B::Store,
    ) -> Self {
        Self {
            display,
            touch,
            sensor,
            console,
            store,
            debug: false,
            request: None,
        }
    }

    // Drawing

    /// The display as an `embedded-graphics` draw target
    pub fn display(&mut self) -> &mut B::Display {
        &mut self.display
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        self.display.set_pixel(x, y, color);
    }

    pub fn hline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        self.display.hline(x, y, len, color);
    }

    pub fn vline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        self.display.vline(x, y, len, color);
    }

    /// Paint the whole framebuffer
    pub fn clear(&mut self, color: TriColor) {
        self.display.fill(color);
    }

    pub fn is_dirty(&self) -> bool {
        self.display.is_dirty()
    }

    /// Run a full panel refresh with the current temperature
    pub(crate) fn refresh(&mut self) -> Result<(), DisplayError> {
        self.display.show(&mut self.sensor)
    }

    // Touch

    pub fn enable_keys(&mut self, keys: &[u8]) -> Result<(), TouchError> {
        self.touch.enable_keys(keys)
    }

    pub fn enable_interrupt(&mut self, keys: &[u8]) -> Result<(), TouchError> {
        self.touch.enable_interrupt(keys)
    }

    pub fn enable_multitouch(&mut self, enable: bool, simultaneous_touches: u8) -> Result<(), TouchError> {
        self.touch.enable_multitouch(enable, simultaneous_touches)
    }

    pub(crate) fn service_touch(&mut self, sink: &mut dyn TouchSink) -> Result<(), TouchError> {
        self.touch.service_interrupt(sink)
    }

    // Temperature

    /// Ambient temperature with 0.1 °C resolution
    pub fn temperature_x10(&mut self) -> Result<i16, SensorError> {
        self.sensor.read_celsius_x10()
    }

    // Console

    pub fn console(&mut self) -> &mut B::Console {
        &mut self.console
    }

    /// Write text to the console, ignoring transmit errors
    pub fn print(&mut self, text: &str) {
        if self.console.write_str(text).is_err() {
            warn!("Console write failed");
        }
    }

    /// Block until `editor` holds a complete line, then take it
    ///
    /// Bytes already fed to the editor (from character events) are kept,
    /// so a line may be typed partly before and partly during the read.
    pub fn read_line(&mut self, editor: &mut LineEditor) -> Result<String<MAX_LINE_LEN>, ConsoleError> {
        while !editor.is_complete() {
            let byte = self.console.read_byte()?;
            if editor.feed(byte, &mut self.console)? == Feed::Complete {
                break;
            }
        }
        Ok(editor.take())
    }

    pub(crate) fn poll_byte(&mut self) -> Result<Option<u8>, ConsoleError> {
        self.console.poll_byte()
    }

    // Configuration

    pub fn load_config(&mut self) -> Result<Option<BadgeConfig>, StoreError> {
        self.store.load()
    }

    pub fn save_config(&mut self, config: &BadgeConfig) -> Result<(), StoreError> {
        self.store.save(config)
    }

    // App switching

    /// Replace the active app once the current app call returns
    pub fn load_app(&mut self, name: &'static str) {
        self.request = Some(AppRequest::Load(name));
    }

    /// Return to the home app once the current app call returns
    pub fn app_exit(&mut self) {
        self.request = Some(AppRequest::Exit);
    }

    pub(crate) fn take_request(&mut self) -> Option<AppRequest> {
        self.request.take()
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut B::Store {
        &mut self.store
    }

    #[cfg(test)]
    pub(crate) fn touch_mut(&mut self) -> &mut B::Touch {
        &mut self.touch
    }

    // Debug channel

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Print a diagnostic line on the console when debug mode is on
    pub fn debug(&mut self, args: core::fmt::Arguments<'_>) {
        if !self.debug {
            return;
        }
        let mut out = ConsoleWriter(&mut self.console);
        if out.write_fmt(args).and_then(|_| out.write_str("\r\n")).is_err() {
            warn!("Debug write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::mock::{self, MockBoard};

    #[test]
    fn test_debug_gated() {
        let mut badge = mock::badge();
        badge.debug(format_args!("hidden {}", 1));
        assert!(badge.console().output.is_empty());

        badge.set_debug(true);
        badge.debug(format_args!("shown {}", 2));
        assert_eq!(badge.console().output, b"shown 2\r\n");
    }

    #[test]
    fn test_read_line_blocks_until_terminator() {
        let mut badge = mock::badge();
        badge.console().queue_input(b"Bob\r\n");

        let mut editor = LineEditor::new();
        assert_eq!(badge.read_line(&mut editor).unwrap().as_str(), "Bob");
        assert_eq!(badge.console().output, b"Bob\r\n");
    }

    #[test]
    fn test_read_line_keeps_prefed_bytes() {
        let mut badge = mock::badge();
        let mut editor = LineEditor::new();
        editor.feed(b'B', badge.console()).unwrap();
        badge.console().queue_input(b"ob\n");

        assert_eq!(badge.read_line(&mut editor).unwrap().as_str(), "Bob");
    }

    #[test]
    fn test_read_line_propagates_console_error() {
        let mut badge = mock::badge();
        let mut editor = LineEditor::new();
        assert_eq!(badge.read_line(&mut editor), Err(ConsoleError::WouldBlock));
    }

    #[test]
    fn test_app_requests() {
        let mut badge: Badge<MockBoard> = mock::badge();
        assert_eq!(badge.take_request(), None);
        badge.load_app("circle");
        badge.app_exit();
        assert_eq!(badge.take_request(), Some(AppRequest::Exit));
        assert_eq!(badge.take_request(), None);
    }

    #[test]
    fn test_drawing_marks_dirty() {
        let mut badge = mock::badge();
        assert!(!badge.is_dirty());
        badge.set_pixel(1, 1, 3);
        assert!(!badge.is_dirty());
        badge.hline(0, 0, 4, TriColor::Red.bits());
        assert!(badge.is_dirty());
        badge.refresh().unwrap();
        assert!(!badge.is_dirty());
    }
}
