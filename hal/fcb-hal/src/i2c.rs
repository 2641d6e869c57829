//! Register-addressed bus abstractions
//!
//! Most I2C peripherals on the badge expose a flat register map: write a
//! register address, then read or write a few bytes. [`RegisterBus`] is
//! that primitive, bound to one device.

use embedded_hal::i2c::I2c;

/// Errors from bus transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Device did not acknowledge its address or data
    NoAcknowledge,
    /// Transfer failed (arbitration, overrun, bus fault)
    Transfer,
    /// Payload larger than the transfer buffer
    TooLong,
}

/// Register-addressed bus bound to a single device
pub trait RegisterBus {
    /// Write `data` starting at `register`
    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), BusError>;

    /// Read `buf.len()` bytes starting at `register`
    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError>;

    /// Write a single register
    fn write_u8(&mut self, register: u8, value: u8) -> Result<(), BusError> {
        self.write(register, &[value])
    }

    /// Read a single register
    fn read_u8(&mut self, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.read(register, &mut buf)?;
        Ok(buf[0])
    }
}

/// Largest register write accepted by [`I2cRegisterBus`]
pub const MAX_WRITE_LEN: usize = 16;

/// [`RegisterBus`] over an `embedded-hal` I2C master at a fixed address
pub struct I2cRegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cRegisterBus<I2C> {
    /// Bind a bus to a 7-bit device address
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address this bus talks to
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying I2C master
    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn map_error<E: embedded_hal::i2c::Error>(e: E) -> BusError {
    match e.kind() {
        embedded_hal::i2c::ErrorKind::NoAcknowledge(_) => BusError::NoAcknowledge,
        _ => BusError::Transfer,
    }
}

impl<I2C: I2c> RegisterBus for I2cRegisterBus<I2C> {
    fn write(&mut self, register: u8, data: &[u8]) -> Result<(), BusError> {
        if data.len() > MAX_WRITE_LEN {
            return Err(BusError::TooLong);
        }
        let mut frame = [0u8; MAX_WRITE_LEN + 1];
        frame[0] = register;
        frame[1..=data.len()].copy_from_slice(data);
        self.i2c
            .write(self.address, &frame[..=data.len()])
            .map_err(map_error)
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .map_err(map_error)
    }
}
