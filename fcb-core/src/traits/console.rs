//! Serial console trait

/// Errors from the serial console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// UART reported a framing, parity or overrun error
    Io,
    /// No byte available and the console cannot block
    WouldBlock,
}

/// Byte-oriented duplex serial stream
pub trait Console {
    /// Return a buffered byte without waiting, `None` when nothing is pending
    fn poll_byte(&mut self) -> Result<Option<u8>, ConsoleError>;

    /// Wait for the next byte
    fn read_byte(&mut self) -> Result<u8, ConsoleError>;

    /// Write all bytes
    fn write(&mut self, bytes: &[u8]) -> Result<(), ConsoleError>;

    /// Write a string
    fn write_str(&mut self, s: &str) -> Result<(), ConsoleError> {
        self.write(s.as_bytes())
    }
}

/// Adapter so `core::fmt` machinery can target a [`Console`]
pub(crate) struct ConsoleWriter<'a, C: Console + ?Sized>(pub &'a mut C);

impl<C: Console + ?Sized> core::fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.write(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}
