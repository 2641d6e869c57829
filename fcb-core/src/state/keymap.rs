//! Touch pad to key mapping

use super::events::SpecialKey;

/// Number of touch pads on the badge
pub const PAD_COUNT: usize = 6;

/// Maps touch pad indices to the key each pad represents
///
/// The pads are laid out around the panel, so pad order does not follow
/// key code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMap {
    keys: [SpecialKey; PAD_COUNT],
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new([
            SpecialKey::Left,
            SpecialKey::Right,
            SpecialKey::Up,
            SpecialKey::Down,
            SpecialKey::ButtonA,
            SpecialKey::ButtonB,
        ])
    }
}

impl KeyMap {
    pub const fn new(keys: [SpecialKey; PAD_COUNT]) -> Self {
        Self { keys }
    }

    /// Key for a pad index, `None` for pads the badge does not have
    pub fn get(&self, pad: u8) -> Option<SpecialKey> {
        self.keys.get(pad as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let map = KeyMap::default();
        assert_eq!(map.get(0), Some(SpecialKey::Left));
        assert_eq!(map.get(1), Some(SpecialKey::Right));
        assert_eq!(map.get(2), Some(SpecialKey::Up));
        assert_eq!(map.get(3), Some(SpecialKey::Down));
        assert_eq!(map.get(4), Some(SpecialKey::ButtonA));
        assert_eq!(map.get(5), Some(SpecialKey::ButtonB));
        assert_eq!(map.get(6), None);
    }
}
