//! Panel colours
//!
//! The panel stores two bits per pixel in the framebuffer. Only three
//! codes are meaningful; the fourth is never written.

use embedded_graphics::pixelcolor::raw::RawU2;
use embedded_graphics::pixelcolor::{BinaryColor, PixelColor};

/// One framebuffer cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TriColor {
    #[default]
    White = 0,
    Black = 1,
    /// Accent colour (red on this panel)
    Red = 2,
}

impl TriColor {
    /// All legal colours, in code order
    pub const ALL: [TriColor; 3] = [TriColor::White, TriColor::Black, TriColor::Red];

    /// Decode a raw cell value, rejecting the unused code 3 and anything wider
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(TriColor::White),
            1 => Some(TriColor::Black),
            2 => Some(TriColor::Red),
            _ => None,
        }
    }

    /// Raw cell value
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl PixelColor for TriColor {
    type Raw = RawU2;
}

/// Monochrome drawings land as black ink on white paper
impl From<BinaryColor> for TriColor {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => TriColor::Black,
            BinaryColor::Off => TriColor::White,
        }
    }
}
