//! Tri-colour e-paper panel driver
//!
//! Drives a 296x128 black/white/red panel with an SSD1680-class
//! controller. Drawing only touches the in-memory [`Framebuffer`]; every
//! [`show`](PanelDisplay::show) runs the controller's whole cycle:
//!
//! ```text
//! RESET -> SOFT_RESET_WAIT -> BLOCK_CONTROL -> GATE_CONFIG -> RAM_WINDOW
//!       -> PLANE(black) -> PLANE(red) -> TEMPERATURE -> UPDATE -> BUSY_WAIT
//!       -> DEEP_SLEEP
//! ```
//!
//! A full refresh takes tens of seconds with the red waveform, and the
//! panel sleeps between refreshes, so there is no partial update path.

use core::convert::Infallible;

use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use fcb_core::traits::{DisplayError, PanelDisplay, TemperatureSensor};
use fcb_core::TriColor;
use fcb_hal::CommandBus;

pub mod framebuffer;
pub mod planes;
pub mod waveform;

pub use framebuffer::{Framebuffer, HEIGHT, WIDTH};
pub use planes::{pack_plane, pack_row, unpack_planes, Plane, PANEL_COLS, PANEL_ROWS, PLANE_LEN, ROW_BYTES};
pub use waveform::{WaveformProfile, LUT_LEN};

/// Controller command opcodes
pub mod cmd {
    /// Gate count and scan direction
    pub const DRIVER_OUTPUT_CONTROL: u8 = 0x01;
    /// Gate driving voltage
    pub const GATE_DRIVING_VOLTAGE: u8 = 0x03;
    /// Analog power on
    pub const POWER_ON: u8 = 0x04;
    /// Enter deep sleep
    pub const DEEP_SLEEP: u8 = 0x10;
    /// RAM address increment direction
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    /// Soft reset
    pub const SOFT_RESET: u8 = 0x12;
    /// Temperature for waveform compensation
    pub const WRITE_TEMPERATURE: u8 = 0x1B;
    /// Run the update sequence selected by `DISPLAY_UPDATE_CONTROL`
    pub const MASTER_ACTIVATION: u8 = 0x20;
    /// Update sequence selection
    pub const DISPLAY_UPDATE_CONTROL: u8 = 0x22;
    /// Black/white RAM (plane A)
    pub const WRITE_RAM_BLACK: u8 = 0x24;
    /// Red RAM (plane B)
    pub const WRITE_RAM_RED: u8 = 0x26;
    /// VCOM voltage
    pub const WRITE_VCOM: u8 = 0x2C;
    /// Waveform table
    pub const WRITE_LUT: u8 = 0x32;
    /// Dummy line period
    pub const DUMMY_LINE_PERIOD: u8 = 0x3A;
    /// Gate line width
    pub const GATE_LINE_WIDTH: u8 = 0x3B;
    /// Border waveform
    pub const BORDER_WAVEFORM: u8 = 0x3C;
    /// RAM X start/end, in bytes
    pub const RAM_X_RANGE: u8 = 0x44;
    /// RAM Y start/end, in gate lines
    pub const RAM_Y_RANGE: u8 = 0x45;
    /// RAM X address counter
    pub const RAM_X_COUNTER: u8 = 0x4E;
    /// RAM Y address counter
    pub const RAM_Y_COUNTER: u8 = 0x4F;
    /// Analog block control
    pub const ANALOG_BLOCK_CONTROL: u8 = 0x74;
    /// Digital block control
    pub const DIGITAL_BLOCK_CONTROL: u8 = 0x7E;
}

/// Busy line poll interval
const BUSY_POLL_MS: u32 = 10;
/// Reset pulse width and recovery time
const RESET_MS: u32 = 100;
/// Settle time between triggering the update and polling busy
const UPDATE_SETTLE_MS: u32 = 50;

/// Colour driven on the panel's border area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Border {
    Black,
    Red,
    Yellow,
    #[default]
    White,
}

impl Border {
    /// Border waveform register value
    pub fn value(self) -> u8 {
        match self {
            Border::Black => 0x00,
            Border::Red | Border::Yellow => 0x33,
            Border::White => 0xFF,
        }
    }
}

/// Default bound on a single busy wait
///
/// The red waveform keeps the controller busy for well over ten seconds,
/// so this leaves room for the slowest profile.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 40_000;

/// Panel driver configuration
#[derive(Debug, Clone)]
pub struct EpdConfig {
    /// Waveform table loaded on every refresh
    pub profile: WaveformProfile,
    /// Border colour
    pub border: Border,
    /// Give up on a busy controller after this long; `None` waits forever
    pub busy_timeout_ms: Option<u32>,
}

impl Default for EpdConfig {
    fn default() -> Self {
        Self {
            profile: WaveformProfile::Default,
            border: Border::White,
            busy_timeout_ms: Some(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

/// E-paper panel over a command/data bus
pub struct Epd<BUS, RST, BUSY, DELAY> {
    bus: BUS,
    reset: RST,
    busy: BUSY,
    delay: DELAY,
    fb: Framebuffer,
    config: EpdConfig,
}

impl<BUS, RST, BUSY, DELAY> Epd<BUS, RST, BUSY, DELAY> {
    /// Take ownership of the panel's bus and pins
    ///
    /// The framebuffer starts white and clean; nothing is sent until the
    /// first refresh.
    pub fn new(bus: BUS, reset: RST, busy: BUSY, delay: DELAY, config: EpdConfig) -> Self {
        Self {
            bus,
            reset,
            busy,
            delay,
            fb: Framebuffer::new(),
            config,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn config(&self) -> &EpdConfig {
        &self.config
    }

    /// Border colour used from the next refresh on
    pub fn set_border(&mut self, border: Border) {
        self.config.border = border;
    }

    /// Release the bus, pins and delay
    pub fn release(self) -> (BUS, RST, BUSY, DELAY) {
        (self.bus, self.reset, self.busy, self.delay)
    }
}

impl<BUS, RST, BUSY, DELAY> Epd<BUS, RST, BUSY, DELAY>
where
    BUS: CommandBus,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    /// Send a command followed by its parameters
    fn send(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.bus.command(command).map_err(|_| DisplayError::Bus)?;
        if !data.is_empty() {
            self.bus.data(data).map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    /// Poll the busy line until the controller is idle
    fn busy_wait(&mut self) -> Result<(), DisplayError> {
        let mut waited = 0u32;
        while self.busy.is_high().map_err(|_| DisplayError::Pin)? {
            if let Some(limit) = self.config.busy_timeout_ms {
                if waited >= limit {
                    warn!("EPD busy for {} ms, giving up", waited);
                    return Err(DisplayError::BusyTimeout);
                }
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited = waited.saturating_add(BUSY_POLL_MS);
        }
        Ok(())
    }

    /// Hardware reset pulse, then soft reset
    fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.reset.set_low().map_err(|_| DisplayError::Pin)?;
        self.delay.delay_ms(RESET_MS);
        self.reset.set_high().map_err(|_| DisplayError::Pin)?;
        self.delay.delay_ms(RESET_MS);

        self.send(cmd::SOFT_RESET, &[])?;
        self.busy_wait()
    }

    fn configure(&mut self) -> Result<(), DisplayError> {
        let [rows_lo, rows_hi] = (PANEL_ROWS as u16).to_le_bytes();

        self.send(cmd::ANALOG_BLOCK_CONTROL, &[0x54])?;
        self.send(cmd::DIGITAL_BLOCK_CONTROL, &[0x3B])?;

        self.send(cmd::DRIVER_OUTPUT_CONTROL, &[rows_lo, rows_hi, 0x00])?;
        self.send(cmd::GATE_DRIVING_VOLTAGE, &[0x10, 0x01])?;
        self.send(cmd::DUMMY_LINE_PERIOD, &[0x07])?;
        self.send(cmd::GATE_LINE_WIDTH, &[0x04])?;
        // X/Y increment
        self.send(cmd::DATA_ENTRY_MODE, &[0x03])?;
        self.send(cmd::POWER_ON, &[])?;
        self.send(cmd::WRITE_VCOM, &[0x3C])?;
        self.send(cmd::BORDER_WAVEFORM, &[0x00])?;
        self.send(cmd::BORDER_WAVEFORM, &[self.config.border.value()])?;
        self.send(cmd::WRITE_LUT, self.config.profile.lut())?;

        self.send(cmd::RAM_X_RANGE, &[0x00, (ROW_BYTES - 1) as u8])?;
        self.send(cmd::RAM_Y_RANGE, &[0x00, 0x00, rows_lo, rows_hi])
    }

    /// Stream one plane into controller RAM, a panel row at a time
    fn write_plane(&mut self, plane: Plane) -> Result<(), DisplayError> {
        self.send(cmd::RAM_X_COUNTER, &[0x00])?;
        self.send(cmd::RAM_Y_COUNTER, &[0x00, 0x00])?;

        let ram = match plane {
            Plane::Black => cmd::WRITE_RAM_BLACK,
            Plane::Red => cmd::WRITE_RAM_RED,
        };
        self.send(ram, &[])?;

        let mut row_buf = [0u8; ROW_BYTES];
        for row in 0..PANEL_ROWS {
            pack_row(&self.fb, plane, row, &mut row_buf);
            self.bus.data(&row_buf).map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    /// Load the ambient temperature for waveform compensation
    ///
    /// Skipped when the sensor cannot be read; the controller then keeps
    /// its previous value.
    fn write_temperature<S: TemperatureSensor + ?Sized>(&mut self, sensor: &mut S) -> Result<(), DisplayError> {
        match sensor.read_sixteenths() {
            Ok(t) => {
                let [hi, lo] = t.to_be_bytes();
                self.send(cmd::WRITE_TEMPERATURE, &[lo, (hi & 0x0F) << 4])
            }
            Err(e) => {
                warn!("Temperature read failed, skipping compensation: {}", e);
                Ok(())
            }
        }
    }

    fn refresh<S: TemperatureSensor + ?Sized>(&mut self, sensor: &mut S) -> Result<(), DisplayError> {
        self.hard_reset()?;
        self.configure()?;
        for plane in Plane::ALL {
            self.write_plane(plane)?;
        }
        self.write_temperature(sensor)?;

        self.send(cmd::DISPLAY_UPDATE_CONTROL, &[0xC7])?;
        self.send(cmd::MASTER_ACTIVATION, &[])?;
        self.delay.delay_ms(UPDATE_SETTLE_MS);
        let updated = self.busy_wait();

        // Sleep even after a timeout; the next refresh starts with a reset
        self.send(cmd::DEEP_SLEEP, &[0x01])?;
        updated
    }
}

impl<BUS, RST, BUSY, DELAY> OriginDimensions for Epd<BUS, RST, BUSY, DELAY> {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl<BUS, RST, BUSY, DELAY> DrawTarget for Epd<BUS, RST, BUSY, DELAY> {
    type Color = TriColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.fb.set(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fb.fill(color);
        Ok(())
    }
}

impl<BUS, RST, BUSY, DELAY> PanelDisplay for Epd<BUS, RST, BUSY, DELAY>
where
    BUS: CommandBus,
    RST: OutputPin,
    BUSY: InputPin,
    DELAY: DelayNs,
{
    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        self.fb.set_pixel(x, y, color);
    }

    fn hline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        self.fb.hline(x, y, len, color);
    }

    fn vline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        self.fb.vline(x, y, len, color);
    }

    fn fill(&mut self, color: TriColor) {
        self.fb.fill(color);
    }

    fn pixel(&self, x: i32, y: i32) -> Option<TriColor> {
        self.fb.pixel(x, y)
    }

    fn is_dirty(&self) -> bool {
        self.fb.is_dirty()
    }

    fn show<S: TemperatureSensor + ?Sized>(&mut self, sensor: &mut S) -> Result<(), DisplayError> {
        debug!("EPD refresh, profile {}", self.config.profile);
        self.refresh(sensor)?;
        self.fb.mark_clean();
        debug!("EPD refresh done");
        Ok(())
    }
}
