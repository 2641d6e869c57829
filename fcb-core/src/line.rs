//! Serial line editing
//!
//! Minimal terminal line discipline for prompts on the serial console:
//! printable ASCII is echoed and appended, backspace/delete erase one
//! character, CR or LF end the line. The LF of a CRLF pair is swallowed
//! so it does not end an empty second line.

use heapless::String;

use crate::config::MAX_FIELD_LEN;
use crate::traits::{Console, ConsoleError};

/// Longest line kept; further bytes are dropped until the line ends
pub const MAX_LINE_LEN: usize = MAX_FIELD_LEN;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Echo that visually erases the character left of the cursor
const ERASE: &[u8] = b"\x08 \x08";

/// Result of feeding one byte to a [`LineEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Line still open
    Pending,
    /// Terminator received; the line is ready to [`take`](LineEditor::take)
    Complete,
}

/// Accumulates one line of console input
#[derive(Debug, Default)]
pub struct LineEditor {
    line: String<MAX_LINE_LEN>,
    complete: bool,
    after_cr: bool,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one input byte, echoing to `console`
    pub fn feed<C: Console + ?Sized>(
        &mut self,
        byte: u8,
        console: &mut C,
    ) -> Result<Feed, ConsoleError> {
        if self.complete {
            self.line.clear();
            self.complete = false;
        }

        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');

        match byte {
            b'\n' if after_cr => Ok(Feed::Pending),
            b'\r' | b'\n' => {
                console.write(b"\r\n")?;
                self.complete = true;
                Ok(Feed::Complete)
            }
            BACKSPACE | DELETE => {
                if self.line.pop().is_some() {
                    console.write(ERASE)?;
                }
                Ok(Feed::Pending)
            }
            0x20..=0x7E => {
                if self.line.push(byte as char).is_ok() {
                    console.write(&[byte])?;
                }
                Ok(Feed::Pending)
            }
            _ => Ok(Feed::Pending),
        }
    }

    /// Text typed so far (or the finished line)
    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Take the finished line and start a new one
    pub fn take(&mut self) -> String<MAX_LINE_LEN> {
        self.complete = false;
        core::mem::take(&mut self.line)
    }
}
