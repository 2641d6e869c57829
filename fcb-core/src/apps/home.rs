//! Owner name card

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::apps::CIRCLE_APP;
use crate::color::TriColor;
use crate::runtime::{App, Badge, Board};
use crate::state::{Event, SpecialKey};

const MARGIN: i32 = 8;
const NAME_TOP: i32 = 16;
const UNDERLINE_Y: i32 = NAME_TOP + 22;
const DETAILS_TOP: i32 = 56;

/// Shows the stored owner record
///
/// Draws only when the card changed, so an idle badge never refreshes
/// the panel.
pub struct HomeApp {
    drawn: bool,
    accent: bool,
}

impl Default for HomeApp {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeApp {
    pub fn new() -> Self {
        Self {
            drawn: false,
            accent: false,
        }
    }

    /// Whether the red underline is shown
    pub fn accent(&self) -> bool {
        self.accent
    }
}

impl<B: Board> App<B> for HomeApp {
    fn handle_event(&mut self, badge: &mut Badge<B>, event: Event) {
        match event.special() {
            Some(SpecialKey::ButtonA) => {
                self.accent = !self.accent;
                self.drawn = false;
            }
            Some(SpecialKey::ButtonB) => badge.load_app(CIRCLE_APP),
            _ => {}
        }
    }

    fn redraw(&mut self, badge: &mut Badge<B>) {
        if self.drawn {
            return;
        }
        self.drawn = true;

        let config = match badge.load_config() {
            Ok(config) => config.filter(|c| c.is_valid()),
            Err(e) => {
                warn!("Loading owner record failed: {}", e);
                None
            }
        };

        badge.clear(TriColor::White);
        let large = MonoTextStyle::new(&FONT_10X20, TriColor::Black);
        let small = MonoTextStyle::new(&FONT_6X10, TriColor::Black);

        let Some(config) = config else {
            let _ = Text::with_baseline("No owner record", Point::new(MARGIN, NAME_TOP), large, Baseline::Top)
                .draw(badge.display());
            return;
        };

        let end = Text::with_baseline(&config.name, Point::new(MARGIN, NAME_TOP), large, Baseline::Top)
            .draw(badge.display())
            .unwrap_or(Point::new(MARGIN, NAME_TOP));

        if self.accent {
            let len = (end.x - MARGIN).max(0) as u32;
            badge.hline(MARGIN, UNDERLINE_Y, len, TriColor::Red.bits());
            badge.hline(MARGIN, UNDERLINE_Y + 1, len, TriColor::Red.bits());
        }

        let mut y = DETAILS_TOP;
        if !config.social_handle.is_empty() {
            let _ = Text::with_baseline(&config.social_handle, Point::new(MARGIN, y), small, Baseline::Top)
                .draw(badge.display());
            y += 14;
        }
        let _ = Text::with_baseline(&config.ticket_id, Point::new(MARGIN, y), small, Baseline::Top)
            .draw(badge.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BadgeConfig;
    use crate::runtime::mock::{self, MockBoard};
    use crate::runtime::AppRequest;

    fn configured() -> Badge<MockBoard> {
        let mut badge = mock::badge();
        badge.store_mut().record = Some(BadgeConfig::new("Alice", "@alice", "T-42"));
        badge
    }

    #[test]
    fn test_draws_once() {
        let mut badge = configured();
        let mut app = HomeApp::new();

        App::<MockBoard>::redraw(&mut app, &mut badge);
        assert!(badge.is_dirty());
        assert!(badge.display().count(TriColor::Black) > 0);
        assert_eq!(badge.display().count(TriColor::Red), 0);

        badge.refresh().unwrap();
        App::<MockBoard>::redraw(&mut app, &mut badge);
        assert!(!badge.is_dirty());
    }

    #[test]
    fn test_button_a_toggles_accent() {
        let mut badge = configured();
        let mut app = HomeApp::new();
        App::<MockBoard>::redraw(&mut app, &mut badge);
        badge.refresh().unwrap();

        App::<MockBoard>::handle_event(&mut app, &mut badge, Event::Special(SpecialKey::ButtonA));
        assert!(app.accent());
        App::<MockBoard>::redraw(&mut app, &mut badge);
        assert!(badge.is_dirty());
        assert!(badge.display().count(TriColor::Red) > 0);

        App::<MockBoard>::handle_event(&mut app, &mut badge, Event::Special(SpecialKey::ButtonA));
        App::<MockBoard>::redraw(&mut app, &mut badge);
        assert_eq!(badge.display().count(TriColor::Red), 0);
    }

    #[test]
    fn test_button_b_opens_circle() {
        let mut badge = configured();
        let mut app = HomeApp::new();
        App::<MockBoard>::handle_event(&mut app, &mut badge, Event::Special(SpecialKey::Up));
        assert_eq!(badge.take_request(), None);

        App::<MockBoard>::handle_event(&mut app, &mut badge, Event::Special(SpecialKey::ButtonB));
        assert_eq!(badge.take_request(), Some(AppRequest::Load(CIRCLE_APP)));
    }

    #[test]
    fn test_missing_record_placeholder() {
        let mut badge = mock::badge();
        let mut app = HomeApp::new();
        App::<MockBoard>::redraw(&mut app, &mut badge);
        assert!(badge.display().count(TriColor::Black) > 0);
    }
}
