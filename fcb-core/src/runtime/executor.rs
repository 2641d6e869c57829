//! Main loop and app lifecycle

use alloc::boxed::Box;

use super::app::{App, AppRegistry};
use super::badge::{AppRequest, Badge};
use super::board::Board;
use crate::color::TriColor;
use crate::config::RuntimeConfig;
use crate::state::{Event, EventQueue};

/// Errors from the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RuntimeError {
    /// No app registered under the requested name
    UnknownApp,
    /// App registry has no free slot
    RegistryFull,
}

/// What one loop step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepOutcome {
    /// Serial bytes turned into events
    pub serial_bytes: usize,
    /// Events delivered to apps
    pub events: usize,
    /// A panel refresh completed
    pub refreshed: bool,
}

impl StepOutcome {
    /// Nothing arrived; the caller should sleep before the next step
    pub fn is_idle(&self) -> bool {
        self.serial_bytes == 0 && self.events == 0
    }
}

/// Single-threaded cooperative scheduler
///
/// Owns the badge, the event queue and the active app. The caller drives
/// it by calling [`step`](Runtime::step) in a loop, sleeping
/// [`RuntimeConfig::idle_sleep_ms`] after idle steps, and calling
/// [`service_touch`](Runtime::service_touch) whenever the touch alert
/// line is asserted.
pub struct Runtime<B: Board> {
    badge: Badge<B>,
    registry: AppRegistry<B>,
    queue: EventQueue,
    app: Option<Box<dyn App<B>>>,
    active: &'static str,
    config: RuntimeConfig,
}

impl<B: Board> Runtime<B> {
    pub fn new(mut badge: Badge<B>, registry: AppRegistry<B>, config: RuntimeConfig) -> Self {
        badge.set_debug(config.debug);
        Self {
            badge,
            registry,
            queue: EventQueue::default(),
            app: None,
            active: "",
            config,
        }
    }

    /// Clear the panel and start the first app
    ///
    /// Loads the home app when a valid owner record is stored, the setup
    /// flow otherwise (including when the store cannot be read).
    pub fn boot(&mut self) -> Result<(), RuntimeError> {
        info!("Booting badge runtime");

        self.badge.clear(TriColor::White);
        if let Err(e) = self.badge.refresh() {
            warn!("Boot refresh failed: {}", e);
        }

        let first = match self.badge.load_config() {
            Ok(Some(config)) if config.is_valid() => self.config.home_app,
            Ok(Some(_)) => {
                warn!("Stored owner record is incomplete, starting setup");
                self.config.setup_app
            }
            Ok(None) => {
                info!("No owner record, starting setup");
                self.config.setup_app
            }
            Err(e) => {
                warn!("Owner record unreadable ({}), starting setup", e);
                self.config.setup_app
            }
        };

        self.load_app(first)
    }

    /// Run one loop iteration
    pub fn step(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome {
            serial_bytes: self.poll_serial(),
            ..StepOutcome::default()
        };

        // Drain everything queued so far before the app redraws
        while let Some(event) = self.queue.pop() {
            self.dispatch(event);
            outcome.events += 1;
        }

        if let Some(app) = self.app.as_mut() {
            app.redraw(&mut self.badge);
        }
        self.apply_request();

        if self.badge.is_dirty() {
            match self.badge.refresh() {
                Ok(()) => outcome.refreshed = true,
                // Flag stays set, so the next step retries
                Err(e) => warn!("Panel refresh failed: {}", e),
            }
        }

        outcome
    }

    /// Read pressed keys after a touch alert and queue their events
    pub fn service_touch(&mut self) {
        if let Err(e) = self.badge.service_touch(&mut self.queue) {
            warn!("Touch read failed: {}", e);
        }
    }

    /// Replace the active app with a fresh instance of `name`
    ///
    /// On an unknown name the active app is left running.
    pub fn load_app(&mut self, name: &str) -> Result<(), RuntimeError> {
        let (name, app) = self.registry.create(name).map_err(|e| {
            warn!("Unknown app requested");
            e
        })?;
        info!("Loading app {}", name);
        self.badge.debug(format_args!("Loading app {}", name));
        self.app = Some(app);
        self.active = name;
        Ok(())
    }

    /// Return to the home app
    pub fn app_exit(&mut self) -> Result<(), RuntimeError> {
        self.load_app(self.config.home_app)
    }

    /// Queue an event as if it came from a device
    pub fn push_event(&mut self, event: Event) -> bool {
        self.queue.push(event)
    }

    /// Name of the active app, empty before boot
    pub fn active_app(&self) -> &'static str {
        self.active
    }

    pub fn badge(&mut self) -> &mut Badge<B> {
        &mut self.badge
    }

    pub fn queue(&mut self) -> &mut EventQueue {
        &mut self.queue
    }

    pub fn registry(&mut self) -> &mut AppRegistry<B> {
        &mut self.registry
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Turn currently buffered console bytes into character events
    ///
    /// Stops at the queue's free space; bytes left in the console buffer
    /// are picked up on the next step.
    fn poll_serial(&mut self) -> usize {
        let budget = self.config.serial_drain_limit.min(self.queue.free());
        let mut count = 0;
        while count < budget {
            match self.badge.poll_byte() {
                Ok(Some(byte)) => {
                    self.queue.push(Event::Char(byte));
                    count += 1;
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Console read failed: {}", e);
                    break;
                }
            }
        }
        count
    }

    fn dispatch(&mut self, event: Event) {
        if let Some(app) = self.app.as_mut() {
            app.handle_event(&mut self.badge, event);
        }
        self.apply_request();
    }

    fn apply_request(&mut self) {
        let result = match self.badge.take_request() {
            Some(AppRequest::Load(name)) => self.load_app(name),
            Some(AppRequest::Exit) => self.app_exit(),
            None => Ok(()),
        };
        if let Err(e) = result {
            warn!("App switch failed: {}", e);
        }
    }
}
