//! Inter-task signals

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Raised by the touch alert task while the CAP1296 holds ALERT low
pub static TOUCH_ALERT: Signal<CriticalSectionRawMutex, ()> = Signal::new();
