//! Built-in apps
//!
//! - `setup`: first-boot owner record prompts on the serial console
//! - `home`: owner name card
//! - `circle`: touch pad demo

use alloc::boxed::Box;

use crate::runtime::{App, AppFactory, Board};

pub mod circle;
pub mod home;
pub mod setup;

pub use circle::CircleApp;
pub use home::HomeApp;
pub use setup::{SetupApp, SetupState};

/// Name of the circle demo app
pub const CIRCLE_APP: &str = "circle";

fn setup_app<B: Board>() -> Box<dyn App<B>> {
    Box::new(SetupApp::new())
}

fn home_app<B: Board>() -> Box<dyn App<B>> {
    Box::new(HomeApp::new())
}

fn circle_app<B: Board>() -> Box<dyn App<B>> {
    Box::new(CircleApp::new())
}

/// Names and constructors of the built-in apps
pub fn builtins<B: Board>() -> [(&'static str, AppFactory<B>); 3] {
    [
        (crate::config::SETUP_APP, setup_app::<B> as AppFactory<B>),
        (crate::config::HOME_APP, home_app::<B> as AppFactory<B>),
        (CIRCLE_APP, circle_app::<B> as AppFactory<B>),
    ]
}
