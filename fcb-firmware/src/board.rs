//! Concrete device types of the RP2040 badge
//!
//! Pin map:
//!
//! | Function        | Pin     |
//! |-----------------|---------|
//! | I2C0 SDA / SCL  | 4 / 5   |
//! | Touch ALERT     | 10      |
//! | UART0 TX / RX   | 12 / 13 |
//! | EPD SCK / MOSI  | 14 / 11 |
//! | EPD CS / DC     | 15 / 8  |
//! | EPD RESET       | 0       |
//! | EPD BUSY        | 16      |
//!
//! The touch controller and the temperature sensor share I2C0.

use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, SPI1};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::BufferedUart;
use embassy_time::Delay;
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};

use fcb_core::Board;
use fcb_drivers::{Adt75, Cap1296, Epd, FlashConfigStore, SerialConsole};
use fcb_hal::{I2cRegisterBus, SpiCommandBus};
use fcb_hal_rp2040::Rp2040FlashStorage;

/// I2C bus frequency
pub const I2C_FREQUENCY: u32 = 100_000;

/// EPD SPI clock
pub const SPI_FREQUENCY: u32 = 4_000_000;

/// Console baud rate
pub const CONSOLE_BAUD: u32 = 115_200;

pub type I2cBus = I2c<'static, I2C0, i2c::Blocking>;
pub type SharedI2c = RefCellDevice<'static, I2cBus>;

pub type PanelSpi = ExclusiveDevice<Spi<'static, SPI1, spi::Blocking>, Output<'static>, NoDelay>;
pub type Panel = Epd<SpiCommandBus<PanelSpi, Output<'static>>, Output<'static>, Input<'static>, Delay>;

/// The FCB badge on an RP2040
pub struct Rp2040Board;

impl Board for Rp2040Board {
    type Display = Panel;
    type Touch = Cap1296<I2cRegisterBus<SharedI2c>>;
    type Sensor = Adt75<I2cRegisterBus<SharedI2c>>;
    type Console = SerialConsole<BufferedUart>;
    type Store = FlashConfigStore<Rp2040FlashStorage<'static>>;
}
