//! Touch pad demo
//!
//! Draws a circle that the pads move and resize. Up/Down move it along
//! X, Left/Right along Y (the pads sit rotated relative to the panel),
//! ButtonA grows and ButtonB shrinks it. A `q` on the console exits.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::color::TriColor;
use crate::runtime::{App, Badge, Board};
use crate::state::{Event, SpecialKey};

const INITIAL_RADIUS: i32 = 10;
const MAX_RADIUS: i32 = 50;
const STEP: i32 = 4;

pub struct CircleApp {
    /// Centred on the first redraw, once the panel size is known
    center: Option<Point>,
    radius: i32,
    changed: bool,
}

impl Default for CircleApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CircleApp {
    pub fn new() -> Self {
        Self {
            center: None,
            radius: INITIAL_RADIUS,
            changed: true,
        }
    }

    pub fn center(&self) -> Option<Point> {
        self.center
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Keep the whole circle on a `size` panel
    fn clamp(&mut self, size: Size) {
        let (w, h) = (size.width as i32, size.height as i32);
        self.radius = self.radius.clamp(0, MAX_RADIUS.min(w / 2).min(h / 2));
        let r = self.radius;
        let c = self.center.unwrap_or(Point::new(w / 2, h / 2));
        self.center = Some(Point::new(c.x.clamp(r, w - 1 - r), c.y.clamp(r, h - 1 - r)));
    }

    fn apply(&mut self, key: SpecialKey) {
        let Some(c) = self.center.as_mut() else {
            return;
        };
        match key {
            SpecialKey::Up => c.x -= STEP,
            SpecialKey::Down => c.x += STEP,
            SpecialKey::Left => c.y -= STEP,
            SpecialKey::Right => c.y += STEP,
            SpecialKey::ButtonA => self.radius += STEP,
            SpecialKey::ButtonB => self.radius -= STEP,
        }
        self.changed = true;
    }
}

impl<B: Board> App<B> for CircleApp {
    fn handle_event(&mut self, badge: &mut Badge<B>, event: Event) {
        match event {
            Event::Char(b'q') => badge.app_exit(),
            Event::Special(key) => {
                if self.center.is_none() {
                    self.clamp(badge.display().bounding_box().size);
                }
                self.apply(key);
                self.clamp(badge.display().bounding_box().size);
            }
            Event::Char(_) => {}
        }
    }

    fn redraw(&mut self, badge: &mut Badge<B>) {
        if !self.changed {
            return;
        }
        self.changed = false;
        self.clamp(badge.display().bounding_box().size);

        let Some(center) = self.center else {
            return;
        };
        badge.clear(TriColor::White);
        let diameter = 2 * self.radius as u32 + 1;
        let _ = Circle::with_center(center, diameter)
            .into_styled(PrimitiveStyle::with_stroke(TriColor::Black, 2))
            .draw(badge.display());
    }
}
