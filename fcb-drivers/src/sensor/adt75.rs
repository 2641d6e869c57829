//! ADT75 digital temperature sensor
//!
//! 12-bit two's complement reading in the top bits of the 16-bit
//! temperature register, 0.0625 °C per LSB.

use fcb_core::traits::{SensorError, TemperatureSensor};
use fcb_hal::RegisterBus;

/// Default I2C address (A0-A2 tied low)
pub const ADDRESS: u8 = 0x48;

/// ADT75 register addresses
pub mod reg {
    /// Temperature value, read-only
    pub const TEMPERATURE: u8 = 0x00;
}

/// Specified operating range, in 1/16 °C
const MIN_SIXTEENTHS: i16 = -55 * 16;
const MAX_SIXTEENTHS: i16 = 125 * 16;

/// Convert the raw temperature register to 1/16 °C
pub fn raw_to_sixteenths(raw: [u8; 2]) -> i16 {
    i16::from_be_bytes(raw) >> 4
}

pub struct Adt75<BUS> {
    bus: BUS,
}

impl<BUS: RegisterBus> Adt75<BUS> {
    pub fn new(bus: BUS) -> Self {
        Self { bus }
    }

    /// Release the underlying bus
    pub fn release(self) -> BUS {
        self.bus
    }
}

impl<BUS: RegisterBus> TemperatureSensor for Adt75<BUS> {
    fn read_sixteenths(&mut self) -> Result<i16, SensorError> {
        let mut raw = [0u8; 2];
        self.bus
            .read(reg::TEMPERATURE, &mut raw)
            .map_err(|_| SensorError::Bus)?;

        let t = raw_to_sixteenths(raw);
        if !(MIN_SIXTEENTHS..=MAX_SIXTEENTHS).contains(&t) {
            warn!("ADT75 reading out of range: {}", t);
            return Err(SensorError::OutOfRange);
        }
        Ok(t)
    }
}
