//! Embassy async tasks
//!
//! The runtime itself is single-threaded; the only other task turns the
//! touch ALERT line into a signal so a touch wakes an idle runtime.

pub mod runtime;
pub mod touch;

pub use runtime::runtime_task;
pub use touch::touch_alert_task;
