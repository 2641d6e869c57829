//! Events delivered to apps

/// Navigation keys and buttons produced by the touch pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SpecialKey {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
    ButtonA = 4,
    ButtonB = 5,
}

impl SpecialKey {
    /// Decode the numeric key code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SpecialKey::Up),
            1 => Some(SpecialKey::Down),
            2 => Some(SpecialKey::Left),
            3 => Some(SpecialKey::Right),
            4 => Some(SpecialKey::ButtonA),
            5 => Some(SpecialKey::ButtonB),
            _ => None,
        }
    }

    /// Check if this key is one of the four arrows
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            SpecialKey::Up | SpecialKey::Down | SpecialKey::Left | SpecialKey::Right
        )
    }
}

/// Errors from building an [`Event`] out of optional parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// Neither a character nor a special key was supplied
    MissingPayload,
    /// Both a character and a special key were supplied
    AmbiguousPayload,
}

/// A single input event
///
/// Exactly one payload is carried. Events are `Copy` and never mutated
/// after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// One raw byte received on the serial console
    Char(u8),
    /// A touch pad mapped through the active key map
    Special(SpecialKey),
}

impl Event {
    /// Build an event from a payload pair, requiring exactly one of them
    pub fn new(char: Option<u8>, special: Option<SpecialKey>) -> Result<Self, EventError> {
        match (char, special) {
            (Some(c), None) => Ok(Event::Char(c)),
            (None, Some(key)) => Ok(Event::Special(key)),
            (None, None) => Err(EventError::MissingPayload),
            (Some(_), Some(_)) => Err(EventError::AmbiguousPayload),
        }
    }

    /// Character payload, if this is a serial event
    pub fn char(&self) -> Option<u8> {
        match self {
            Event::Char(c) => Some(*c),
            Event::Special(_) => None,
        }
    }

    /// Special key payload, if this is a touch event
    pub fn special(&self) -> Option<SpecialKey> {
        match self {
            Event::Special(key) => Some(*key),
            Event::Char(_) => None,
        }
    }
}

impl From<u8> for Event {
    fn from(c: u8) -> Self {
        Event::Char(c)
    }
}

impl From<SpecialKey> for Event {
    fn from(key: SpecialKey) -> Self {
        Event::Special(key)
    }
}
