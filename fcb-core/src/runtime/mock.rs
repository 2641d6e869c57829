//! In-memory board used by the runtime and app tests

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::prelude::*;

use super::badge::Badge;
use super::board::Board;
use crate::color::TriColor;
use crate::config::BadgeConfig;
use crate::traits::{
    ConfigStore, Console, ConsoleError, DisplayError, Keys, PanelDisplay, SensorError,
    StoreError, TemperatureSensor, TouchController, TouchError, TouchSink,
};

pub const WIDTH: i32 = 296;
pub const HEIGHT: i32 = 128;

/// Framebuffer-only display; `show` just counts refreshes
pub struct MockDisplay {
    pub cells: Vec<u8>,
    pub dirty: bool,
    pub shows: usize,
    pub fail_show: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            cells: vec![0; (WIDTH * HEIGHT) as usize],
            dirty: false,
            shows: 0,
            fail_show: false,
        }
    }

    /// Number of pixels holding `color`
    pub fn count(&self, color: TriColor) -> usize {
        self.cells.iter().filter(|&&c| c == color.bits()).count()
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for MockDisplay {
    type Color = TriColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.bits());
        }
        Ok(())
    }
}

impl PanelDisplay for MockDisplay {
    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if TriColor::from_bits(color).is_none() || !(0..WIDTH).contains(&x) || !(0..HEIGHT).contains(&y) {
            return;
        }
        self.cells[(y * WIDTH + x) as usize] = color;
        self.dirty = true;
    }

    fn hline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        for i in 0..len as i32 {
            self.set_pixel(x + i, y, color);
        }
    }

    fn vline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        for i in 0..len as i32 {
            self.set_pixel(x, y + i, color);
        }
    }

    fn fill(&mut self, color: TriColor) {
        self.cells.fill(color.bits());
        self.dirty = true;
    }

    fn pixel(&self, x: i32, y: i32) -> Option<TriColor> {
        if !(0..WIDTH).contains(&x) || !(0..HEIGHT).contains(&y) {
            return None;
        }
        TriColor::from_bits(self.cells[(y * WIDTH + x) as usize])
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn show<S: TemperatureSensor + ?Sized>(&mut self, sensor: &mut S) -> Result<(), DisplayError> {
        if self.fail_show {
            return Err(DisplayError::BusyTimeout);
        }
        let _ = sensor.read_sixteenths();
        self.shows += 1;
        self.dirty = false;
        Ok(())
    }
}

/// Touch controller reporting a fixed status bitmask
#[derive(Default)]
pub struct MockTouch {
    pub pressed: u8,
    pub enabled: u8,
}

impl TouchController for MockTouch {
    fn enable_keys(&mut self, keys: &[u8]) -> Result<(), TouchError> {
        self.enabled = keys.iter().fold(0, |mask, k| mask | (1 << k));
        Ok(())
    }

    fn enable_interrupt(&mut self, _keys: &[u8]) -> Result<(), TouchError> {
        Ok(())
    }

    fn enable_multitouch(&mut self, _enable: bool, _simultaneous_touches: u8) -> Result<(), TouchError> {
        Ok(())
    }

    fn read_status(&mut self) -> Result<u8, TouchError> {
        Ok(self.pressed)
    }

    fn read_keys(&mut self, key_count: u8) -> Result<Keys, TouchError> {
        let mut keys = Keys::new();
        for bit in 0..key_count.min(8) {
            if self.pressed & (1 << bit) != 0 {
                let _ = keys.push(bit);
            }
        }
        Ok(keys)
    }

    fn service_interrupt(&mut self, sink: &mut dyn TouchSink) -> Result<(), TouchError> {
        let keys = self.read_keys(6)?;
        sink.keys_pressed(&keys);
        Ok(())
    }
}

pub struct MockSensor(pub i16);

impl TemperatureSensor for MockSensor {
    fn read_sixteenths(&mut self) -> Result<i16, SensorError> {
        Ok(self.0)
    }
}

/// Console fed from a byte script; reads past the end would block
#[derive(Default)]
pub struct MockConsole {
    pub input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl MockConsole {
    pub fn queue_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }
}

impl Console for MockConsole {
    fn poll_byte(&mut self) -> Result<Option<u8>, ConsoleError> {
        Ok(self.input.pop_front())
    }

    fn read_byte(&mut self) -> Result<u8, ConsoleError> {
        self.input.pop_front().ok_or(ConsoleError::WouldBlock)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockStore {
    pub record: Option<BadgeConfig>,
    pub load_error: Option<StoreError>,
    pub fail_save: bool,
    pub saves: usize,
}

impl ConfigStore for MockStore {
    fn load(&mut self) -> Result<Option<BadgeConfig>, StoreError> {
        match self.load_error {
            Some(e) => Err(e),
            None => Ok(self.record.clone()),
        }
    }

    fn save(&mut self, config: &BadgeConfig) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(StoreError::Storage);
        }
        self.record = Some(config.clone());
        self.saves += 1;
        Ok(())
    }
}

pub struct MockBoard;

impl Board for MockBoard {
    type Display = MockDisplay;
    type Touch = MockTouch;
    type Sensor = MockSensor;
    type Console = MockConsole;
    type Store = MockStore;
}

/// Badge at 20 °C with an empty store and no pending input
pub fn badge() -> Badge<MockBoard> {
    Badge::new(
        MockDisplay::new(),
        MockTouch::default(),
        MockSensor(20 * 16),
        MockConsole::default(),
        MockStore::default(),
    )
}
