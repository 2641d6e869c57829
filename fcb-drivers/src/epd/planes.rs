//! Framebuffer to panel RAM bit-plane conversion
//!
//! The controller's RAM is portrait: 128 source columns by 296 gate rows,
//! one bit per pixel, eight pixels per byte with the leftmost in the MSB.
//! The logical framebuffer is the same image turned on its side, so panel
//! pixel (col, row) is logical pixel (x = row, y = col).
//!
//! Colour is split over two planes: plane A has a bit set for every black
//! pixel, plane B for every red one. White is clear in both.

use fcb_core::TriColor;

use super::framebuffer::Framebuffer;

/// Source lines (panel RAM columns)
pub const PANEL_COLS: usize = 128;
/// Gate lines (panel RAM rows)
pub const PANEL_ROWS: usize = 296;
/// Bytes per panel RAM row
pub const ROW_BYTES: usize = PANEL_COLS / 8;
/// Bytes per plane
pub const PLANE_LEN: usize = ROW_BYTES * PANEL_ROWS;

/// One of the two controller RAM planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Plane {
    /// Plane A, black/white RAM
    Black,
    /// Plane B, red RAM
    Red,
}

impl Plane {
    pub const ALL: [Plane; 2] = [Plane::Black, Plane::Red];

    /// Colour whose pixels set bits in this plane
    pub fn color(self) -> TriColor {
        match self {
            Plane::Black => TriColor::Black,
            Plane::Red => TriColor::Red,
        }
    }
}

/// Pack one panel RAM row of `plane`
pub fn pack_row(fb: &Framebuffer, plane: Plane, row: usize, out: &mut [u8; ROW_BYTES]) {
    let color = Some(plane.color());
    for (byte_index, byte) in out.iter_mut().enumerate() {
        *byte = 0;
        for bit in 0..8 {
            let col = byte_index * 8 + bit;
            if fb.pixel(row as i32, col as i32) == color {
                *byte |= 0x80 >> bit;
            }
        }
    }
}

/// Pack a whole plane
pub fn pack_plane(fb: &Framebuffer, plane: Plane, out: &mut [u8; PLANE_LEN]) {
    let mut row_buf = [0u8; ROW_BYTES];
    for (row, chunk) in out.chunks_exact_mut(ROW_BYTES).enumerate() {
        pack_row(fb, plane, row, &mut row_buf);
        chunk.copy_from_slice(&row_buf);
    }
}

/// Rebuild a framebuffer from its two planes
///
/// A bit in plane B reads back as red even when plane A has the same bit
/// set; such pixels never come out of [`pack_plane`].
pub fn unpack_planes(black: &[u8; PLANE_LEN], red: &[u8; PLANE_LEN]) -> Framebuffer {
    let mut fb = Framebuffer::new();
    for row in 0..PANEL_ROWS {
        for col in 0..PANEL_COLS {
            let index = row * ROW_BYTES + col / 8;
            let mask = 0x80 >> (col % 8);
            let color = if red[index] & mask != 0 {
                TriColor::Red
            } else if black[index] & mask != 0 {
                TriColor::Black
            } else {
                continue;
            };
            fb.set(row as i32, col as i32, color);
        }
    }
    fb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epd::framebuffer::{HEIGHT, WIDTH};
    use proptest::prelude::*;

    fn packed(fb: &Framebuffer) -> ([u8; PLANE_LEN], [u8; PLANE_LEN]) {
        let mut black = [0u8; PLANE_LEN];
        let mut red = [0u8; PLANE_LEN];
        pack_plane(fb, Plane::Black, &mut black);
        pack_plane(fb, Plane::Red, &mut red);
        (black, red)
    }

    fn assert_round_trip(fb: &Framebuffer) {
        let (black, red) = packed(fb);
        let rebuilt = unpack_planes(&black, &red);
        assert_eq!(rebuilt.as_bytes(), fb.as_bytes());
    }

    #[test]
    fn test_dimensions_transpose() {
        assert_eq!(PANEL_ROWS, WIDTH as usize);
        assert_eq!(PANEL_COLS, HEIGHT as usize);
        assert_eq!(PLANE_LEN, 4736);
    }

    #[test]
    fn test_white_is_clear_in_both_planes() {
        let fb = Framebuffer::new();
        let (black, red) = packed(&fb);
        assert!(black.iter().all(|&b| b == 0));
        assert!(red.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_solid_fills() {
        let mut fb = Framebuffer::new();
        fb.fill(TriColor::Black);
        let (black, red) = packed(&fb);
        assert!(black.iter().all(|&b| b == 0xFF));
        assert!(red.iter().all(|&b| b == 0));
        assert_round_trip(&fb);

        fb.fill(TriColor::Red);
        let (black, red) = packed(&fb);
        assert!(black.iter().all(|&b| b == 0));
        assert!(red.iter().all(|&b| b == 0xFF));
        assert_round_trip(&fb);
    }

    #[test]
    fn test_transposed_bit_position() {
        let mut fb = Framebuffer::new();
        // Logical (x = 2, y = 9) lands on panel row 2, column 9
        fb.set(2, 9, TriColor::Black);
        // Logical (x = 0, y = 0) is the MSB of the first byte
        fb.set(0, 0, TriColor::Red);

        let (black, red) = packed(&fb);
        assert_eq!(black[2 * ROW_BYTES + 1], 0b0100_0000);
        assert_eq!(black.iter().filter(|&&b| b != 0).count(), 1);
        assert_eq!(red[0], 0x80);
        assert_eq!(red.iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn test_checkerboard_round_trip() {
        let mut fb = Framebuffer::new();
        for y in 0..HEIGHT as i32 {
            for x in 0..WIDTH as i32 {
                let color = if (x + y) % 2 == 0 { TriColor::Black } else { TriColor::White };
                fb.set(x, y, color);
            }
        }
        let (black, red) = packed(&fb);
        assert_eq!(black[0], 0b1010_1010);
        assert_eq!(black[ROW_BYTES], 0b0101_0101);
        assert!(red.iter().all(|&b| b == 0));
        assert_round_trip(&fb);
    }

    #[test]
    fn test_red_wins_when_both_bits_set() {
        let black = [0xFFu8; PLANE_LEN];
        let mut red = [0u8; PLANE_LEN];
        red[0] = 0x80;
        let fb = unpack_planes(&black, &red);
        assert_eq!(fb.pixel(0, 0), Some(TriColor::Red));
        assert_eq!(fb.pixel(0, 1), Some(TriColor::Black));
    }

    #[test]
    fn test_pack_row_matches_plane() {
        let mut fb = Framebuffer::new();
        fb.vline(7, 0, HEIGHT, TriColor::Red.bits());
        let (_, red) = packed(&fb);

        let mut row = [0u8; ROW_BYTES];
        pack_row(&fb, Plane::Red, 7, &mut row);
        assert_eq!(&red[7 * ROW_BYTES..8 * ROW_BYTES], &row);
        assert!(row.iter().all(|&b| b == 0xFF));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_round_trip(pixels in proptest::collection::vec((0..WIDTH as i32, 0..HEIGHT as i32, 0u8..3), 0..512)) {
            let mut fb = Framebuffer::new();
            for (x, y, c) in pixels {
                fb.set_pixel(x, y, c);
            }
            let (black, red) = packed(&fb);
            let rebuilt = unpack_planes(&black, &red);
            prop_assert_eq!(rebuilt.as_bytes(), fb.as_bytes());
        }
    }
}
