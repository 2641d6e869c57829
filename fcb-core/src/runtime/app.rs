//! App interface and the name registry apps are loaded from

use alloc::boxed::Box;
use heapless::Vec;

use super::badge::Badge;
use super::board::Board;
use super::executor::RuntimeError;
use crate::state::Event;

/// A swappable unit of UI logic
///
/// Apps are constructed when loaded and dropped when replaced; there is
/// no teardown hook.
pub trait App<B: Board> {
    /// Handle one input event
    fn handle_event(&mut self, badge: &mut Badge<B>, event: Event);

    /// Bring the framebuffer up to date
    ///
    /// Called once per loop step after all queued events were delivered.
    /// Drawing marks the display dirty; the runtime refreshes it afterwards.
    fn redraw(&mut self, badge: &mut Badge<B>);
}

/// Constructor stored in the registry
pub type AppFactory<B> = fn() -> Box<dyn App<B>>;

/// Maximum registered apps
pub const MAX_APPS: usize = 16;

/// Maps app names to constructors
pub struct AppRegistry<B: Board> {
    entries: Vec<(&'static str, AppFactory<B>), MAX_APPS>,
}

impl<B: Board> Default for AppRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Board> AppRegistry<B> {
    /// Empty registry
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Registry holding the built-in apps
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, factory) in crate::apps::builtins::<B>() {
            // MAX_APPS exceeds the built-in count
            let _ = registry.register(name, factory);
        }
        registry
    }

    /// Register an app, replacing an existing entry with the same name
    pub fn register(&mut self, name: &'static str, factory: AppFactory<B>) -> Result<(), RuntimeError> {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = factory;
            return Ok(());
        }
        self.entries
            .push((name, factory))
            .map_err(|_| RuntimeError::RegistryFull)
    }

    /// Check if an app is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Construct a fresh instance of the named app
    pub fn create(&self, name: &str) -> Result<(&'static str, Box<dyn App<B>>), RuntimeError> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(n, factory)| (*n, factory()))
            .ok_or(RuntimeError::UnknownApp)
    }
}
