//! Serial console over a blocking byte stream
//!
//! Wraps anything speaking `embedded-io` (a buffered UART on the badge)
//! and exposes it as the runtime's [`Console`]. `poll_byte` relies on
//! `ReadReady` so the main loop never stalls on an idle line.

use embedded_io::{Read, ReadReady, Write};
use fcb_core::traits::{Console, ConsoleError};

pub struct SerialConsole<U> {
    uart: U,
}

impl<U> SerialConsole<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Release the underlying stream
    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: Read + ReadReady + Write> Console for SerialConsole<U> {
    fn poll_byte(&mut self) -> Result<Option<u8>, ConsoleError> {
        if !self.uart.read_ready().map_err(|_| ConsoleError::Io)? {
            return Ok(None);
        }
        self.read_byte().map(Some)
    }

    fn read_byte(&mut self) -> Result<u8, ConsoleError> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte) {
            Ok(0) => Err(ConsoleError::WouldBlock),
            Ok(_) => Ok(byte[0]),
            Err(_) => Err(ConsoleError::Io),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.uart.write_all(bytes).map_err(|_| ConsoleError::Io)
    }
}
