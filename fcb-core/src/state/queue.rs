//! Event FIFO shared by the touch and serial producers

use heapless::Deque;

use super::events::Event;
use super::keymap::KeyMap;
use crate::traits::TouchSink;

/// Queue depth; far above what one loop step produces
pub const QUEUE_CAPACITY: usize = 64;

/// Ordered queue of pending events
///
/// Also acts as the sink for decoded touch keys, translating pad indices
/// through its [`KeyMap`].
pub struct EventQueue {
    events: Deque<Event, QUEUE_CAPACITY>,
    key_map: KeyMap,
    dropped: u32,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(KeyMap::default())
    }
}

impl EventQueue {
    pub fn new(key_map: KeyMap) -> Self {
        Self {
            events: Deque::new(),
            key_map,
            dropped: 0,
        }
    }

    /// Append an event; the newest event is dropped when the queue is full
    pub fn push(&mut self, event: Event) -> bool {
        if self.events.push_back(event).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Event queue full, dropping {}", event);
            return false;
        }
        true
    }

    /// Remove the oldest event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Slots left before pushes start dropping
    pub fn free(&self) -> usize {
        QUEUE_CAPACITY - self.events.len()
    }

    /// Discard all pending events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events lost to overflow since boot
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn set_key_map(&mut self, key_map: KeyMap) {
        self.key_map = key_map;
    }
}

impl TouchSink for EventQueue {
    fn keys_pressed(&mut self, keys: &[u8]) {
        for &pad in keys {
            match self.key_map.get(pad) {
                Some(key) => {
                    self.push(Event::Special(key));
                }
                None => warn!("Touch reported unmapped pad {}", pad),
            }
        }
    }
}
