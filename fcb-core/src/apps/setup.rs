//! First-boot setup flow
//!
//! Collects the owner record on the serial console, one prompt per state:
//!
//! ```text
//! GettingName -> GettingSocial -> GettingTicketId -> Done
//! ```
//!
//! The first redraw only draws the instructions screen and prints the
//! prompt, so the panel is refreshed before any read. Later redraws print
//! the current prompt once and block until a line is entered. Characters that reach the app as events while a prompt is
//! open go into the same line, so nothing typed early is lost. In `Done`
//! the record is saved and the app exits to the home screen; a failed
//! save is retried on the next redraw.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::color::TriColor;
use crate::config::{truncated, BadgeConfig};
use crate::line::{Feed, LineEditor, MAX_LINE_LEN};
use crate::runtime::{App, Badge, Board};
use crate::state::Event;

/// Setup progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupState {
    GettingName,
    GettingSocial,
    GettingTicketId,
    Done,
}

impl SetupState {
    /// Console prompt for this state
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            SetupState::GettingName => Some("Name: "),
            SetupState::GettingSocial => Some("Social handle: "),
            SetupState::GettingTicketId => Some("Ticket ID: "),
            SetupState::Done => None,
        }
    }
}

pub struct SetupApp {
    state: SetupState,
    record: BadgeConfig,
    editor: LineEditor,
    prompted: bool,
    screen_drawn: bool,
}

impl Default for SetupApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupApp {
    pub fn new() -> Self {
        Self {
            state: SetupState::GettingName,
            record: BadgeConfig::default(),
            editor: LineEditor::new(),
            prompted: false,
            screen_drawn: false,
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    /// Fields collected so far
    pub fn record(&self) -> &BadgeConfig {
        &self.record
    }

    fn prompt<B: Board>(&mut self, badge: &mut Badge<B>) {
        if self.prompted {
            return;
        }
        if let Some(prompt) = self.state.prompt() {
            badge.print(prompt);
            self.prompted = true;
        }
    }

    /// Store a finished line and advance
    ///
    /// Name and ticket id are required; an empty answer repeats the prompt.
    fn accept(&mut self, line: String<MAX_LINE_LEN>) {
        let line: String<MAX_LINE_LEN> = truncated(line.trim());
        let next = match self.state {
            SetupState::GettingName if !line.is_empty() => {
                self.record.name = line;
                SetupState::GettingSocial
            }
            SetupState::GettingSocial => {
                self.record.social_handle = line;
                SetupState::GettingTicketId
            }
            SetupState::GettingTicketId if !line.is_empty() => {
                self.record.ticket_id = line;
                SetupState::Done
            }
            state => state,
        };
        debug!("Setup {} -> {}", self.state, next);
        self.state = next;
        self.prompted = false;
    }

    fn finish<B: Board>(&mut self, badge: &mut Badge<B>) {
        match badge.save_config(&self.record) {
            Ok(()) => {
                info!("Owner record saved");
                badge.app_exit();
            }
            Err(e) => {
                warn!("Saving owner record failed: {}", e);
                badge.print("Saving failed, retrying\r\n");
            }
        }
    }

    fn draw_screen<B: Board>(&mut self, badge: &mut Badge<B>) {
        if self.screen_drawn {
            return;
        }
        self.screen_drawn = true;

        badge.clear(TriColor::White);
        let title = MonoTextStyle::new(&FONT_10X20, TriColor::Red);
        let body = MonoTextStyle::new(&FONT_6X10, TriColor::Black);
        let display = badge.display();
        let _ = Text::with_baseline("Badge setup", Point::new(8, 8), title, Baseline::Top).draw(display);
        let _ = Text::with_baseline(
            "Connect to the serial console\n(115200 8N1) and answer\nthe prompts.",
            Point::new(8, 40),
            body,
            Baseline::Top,
        )
        .draw(display);
    }
}

impl<B: Board> App<B> for SetupApp {
    fn handle_event(&mut self, badge: &mut Badge<B>, event: Event) {
        let Event::Char(byte) = event else {
            return;
        };
        if self.state == SetupState::Done {
            return;
        }

        self.prompt(badge);
        match self.editor.feed(byte, badge.console()) {
            Ok(Feed::Complete) => {
                let line = self.editor.take();
                self.accept(line);
                if self.state == SetupState::Done {
                    self.finish(badge);
                } else {
                    self.prompt(badge);
                }
            }
            Ok(Feed::Pending) => {}
            Err(e) => warn!("Setup echo failed: {}", e),
        }
    }

    fn redraw(&mut self, badge: &mut Badge<B>) {
        let first = !self.screen_drawn;
        self.draw_screen(badge);

        if self.state == SetupState::Done {
            self.finish(badge);
            return;
        }

        self.prompt(badge);
        if first {
            // Let the runtime refresh the panel before blocking on input
            return;
        }
        match badge.read_line(&mut self.editor) {
            Ok(line) => {
                self.accept(line);
                if self.state == SetupState::Done {
                    self.finish(badge);
                }
            }
            Err(e) => warn!("Setup input failed: {}", e),
        }
    }
}
