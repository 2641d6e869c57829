//! Packed 2 bits-per-pixel framebuffer
//!
//! Logical layout is landscape, 296 x 128, row-major with four pixels per
//! byte and the first pixel in the two most significant bits.

use fcb_core::TriColor;

/// Logical width in pixels
pub const WIDTH: u32 = 296;
/// Logical height in pixels
pub const HEIGHT: u32 = 128;

const PIXELS_PER_BYTE: usize = 4;

/// Framebuffer size in bytes
pub const BUFFER_LEN: usize = (WIDTH * HEIGHT) as usize / PIXELS_PER_BYTE;

/// Drawing surface plus the dirty flag that gates panel refreshes
pub struct Framebuffer {
    buf: [u8; BUFFER_LEN],
    dirty: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// All-white, clean framebuffer
    pub const fn new() -> Self {
        Self {
            buf: [0; BUFFER_LEN],
            dirty: false,
        }
    }

    /// Byte index and bit shift of an in-bounds pixel
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let index = y as usize * WIDTH as usize + x as usize;
        let shift = 6 - 2 * (index % PIXELS_PER_BYTE) as u8;
        Some((index / PIXELS_PER_BYTE, shift))
    }

    /// Pixel colour, `None` outside the grid
    pub fn pixel(&self, x: i32, y: i32) -> Option<TriColor> {
        let (byte, shift) = Self::locate(x, y)?;
        TriColor::from_bits((self.buf[byte] >> shift) & 0b11)
    }

    fn put(&mut self, x: i32, y: i32, color: TriColor) -> bool {
        let Some((byte, shift)) = Self::locate(x, y) else {
            return false;
        };
        self.buf[byte] = (self.buf[byte] & !(0b11 << shift)) | (color.bits() << shift);
        self.dirty = true;
        true
    }

    /// Set one pixel from a raw cell code
    ///
    /// Returns whether a pixel was written; invalid codes and clipped
    /// coordinates leave the buffer and the dirty flag alone.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) -> bool {
        match TriColor::from_bits(color) {
            Some(color) => self.put(x, y, color),
            None => false,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: TriColor) -> bool {
        self.put(x, y, color)
    }

    pub fn hline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        let Some(color) = TriColor::from_bits(color) else {
            return;
        };
        for i in 0..len.min(WIDTH) as i32 {
            self.put(x.saturating_add(i), y, color);
        }
    }

    pub fn vline(&mut self, x: i32, y: i32, len: u32, color: u8) {
        let Some(color) = TriColor::from_bits(color) else {
            return;
        };
        for i in 0..len.min(HEIGHT) as i32 {
            self.put(x, y.saturating_add(i), color);
        }
    }

    /// Paint every pixel
    pub fn fill(&mut self, color: TriColor) {
        let c = color.bits();
        self.buf.fill(c << 6 | c << 4 | c << 2 | c);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Raw packed cells
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_white_and_clean() {
        let fb = Framebuffer::new();
        assert!(!fb.is_dirty());
        assert_eq!(fb.pixel(0, 0), Some(TriColor::White));
        assert_eq!(fb.pixel(295, 127), Some(TriColor::White));
    }

    #[test]
    fn test_first_pixel_in_msbs() {
        let mut fb = Framebuffer::new();
        assert!(fb.set_pixel(0, 0, TriColor::Red.bits()));
        assert!(fb.set_pixel(3, 0, TriColor::Black.bits()));
        assert_eq!(fb.as_bytes()[0], 0b10_00_00_01);

        // Row 1 starts WIDTH pixels in
        fb.set_pixel(0, 1, TriColor::Black.bits());
        assert_eq!(fb.as_bytes()[WIDTH as usize / 4], 0b01_00_00_00);
    }

    #[test]
    fn test_overwrite_pixel() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(5, 5, TriColor::Red.bits());
        fb.set_pixel(5, 5, TriColor::Black.bits());
        assert_eq!(fb.pixel(5, 5), Some(TriColor::Black));
        assert_eq!(fb.pixel(4, 5), Some(TriColor::White));
        assert_eq!(fb.pixel(6, 5), Some(TriColor::White));
    }

    #[test]
    fn test_invalid_color_ignored() {
        let mut fb = Framebuffer::new();
        assert!(!fb.set_pixel(1, 1, 3));
        assert!(!fb.set_pixel(1, 1, 0xFF));
        fb.hline(0, 0, 10, 7);
        fb.vline(0, 0, 10, 3);
        assert!(!fb.is_dirty());
        assert_eq!(fb.pixel(1, 1), Some(TriColor::White));
    }

    #[test]
    fn test_out_of_bounds_clipped() {
        let mut fb = Framebuffer::new();
        assert!(!fb.set_pixel(-1, 0, 1));
        assert!(!fb.set_pixel(0, HEIGHT as i32, 1));
        assert!(!fb.set_pixel(WIDTH as i32, 0, 1));
        assert!(!fb.is_dirty());
        assert_eq!(fb.pixel(-1, 0), None);

        // Partially visible line: only the visible part is drawn
        fb.hline(-5, 10, 10, TriColor::Black.bits());
        assert!(fb.is_dirty());
        assert_eq!(fb.pixel(4, 10), Some(TriColor::Black));
        assert_eq!(fb.pixel(5, 10), Some(TriColor::White));
    }

    #[test]
    fn test_lines() {
        let mut fb = Framebuffer::new();
        fb.hline(10, 20, 5, TriColor::Black.bits());
        fb.vline(50, 0, HEIGHT + 10, TriColor::Red.bits());

        for x in 10..15 {
            assert_eq!(fb.pixel(x, 20), Some(TriColor::Black));
        }
        assert_eq!(fb.pixel(15, 20), Some(TriColor::White));
        for y in 0..HEIGHT as i32 {
            assert_eq!(fb.pixel(50, y), Some(TriColor::Red));
        }
    }

    #[test]
    fn test_fill() {
        let mut fb = Framebuffer::new();
        fb.fill(TriColor::Red);
        assert!(fb.is_dirty());
        assert!(fb.as_bytes().iter().all(|&b| b == 0b10_10_10_10));
        fb.mark_clean();
        assert!(!fb.is_dirty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_set_then_read_back(x in 0..WIDTH as i32, y in 0..HEIGHT as i32, color in 0u8..3) {
            let mut fb = Framebuffer::new();
            prop_assert!(fb.set_pixel(x, y, color));
            prop_assert!(fb.is_dirty());
            prop_assert_eq!(fb.pixel(x, y), TriColor::from_bits(color));

            // Neighbours sharing the byte keep their colour
            let others = (0..WIDTH as i32)
                .filter(|&nx| nx != x && nx / 4 == x / 4)
                .all(|nx| fb.pixel(nx, y) == Some(TriColor::White));
            prop_assert!(others);
        }

        #[test]
        fn prop_invalid_color_changes_nothing(
            pixels in proptest::collection::vec((0..WIDTH as i32, 0..HEIGHT as i32, 0u8..3), 0..64),
            x in -4..WIDTH as i32 + 4,
            y in -4..HEIGHT as i32 + 4,
            color in 3u8..=255,
        ) {
            let mut fb = Framebuffer::new();
            for (px, py, c) in pixels {
                fb.set_pixel(px, py, c);
            }
            fb.mark_clean();
            let before: Vec<u8> = fb.as_bytes().to_vec();

            prop_assert!(!fb.set_pixel(x, y, color));
            fb.hline(x, y, 8, color);
            fb.vline(x, y, 8, color);
            prop_assert!(!fb.is_dirty());
            prop_assert_eq!(fb.as_bytes(), &before[..]);
        }
    }
}
