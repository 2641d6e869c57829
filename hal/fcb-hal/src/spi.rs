//! Command/data bus abstractions
//!
//! E-paper controllers share one SPI data line between command opcodes
//! and their parameters; a separate D/C pin tells the controller which
//! one it is receiving.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::i2c::BusError;

/// Interpretation of bytes sent over a [`CommandBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// D/C low: opcode bytes
    Command,
    /// D/C high: parameter or RAM bytes
    Data,
}

/// Half-duplex write-only bus with a mode select line
pub trait CommandBus {
    /// Write `bytes` with the given mode selected
    fn write(&mut self, bytes: &[u8], mode: Mode) -> Result<(), BusError>;

    /// Write a single command opcode
    fn command(&mut self, opcode: u8) -> Result<(), BusError> {
        self.write(&[opcode], Mode::Command)
    }

    /// Write parameter bytes
    fn data(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.write(bytes, Mode::Data)
    }
}

/// [`CommandBus`] over an `embedded-hal` SPI device and a D/C pin
pub struct SpiCommandBus<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI: SpiDevice, DC: OutputPin> SpiCommandBus<SPI, DC> {
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Release the SPI device and D/C pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI: SpiDevice, DC: OutputPin> CommandBus for SpiCommandBus<SPI, DC> {
    fn write(&mut self, bytes: &[u8], mode: Mode) -> Result<(), BusError> {
        let level = match mode {
            Mode::Command => self.dc.set_low(),
            Mode::Data => self.dc.set_high(),
        };
        level.map_err(|_| BusError::Transfer)?;
        self.spi.write(bytes).map_err(|_| BusError::Transfer)
    }
}
