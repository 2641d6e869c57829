//! Touch ALERT line watcher

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::TOUCH_ALERT;

/// Signal the runtime each time ALERT is asserted
///
/// The CAP1296 holds ALERT low until the runtime clears its INT flag, so
/// the task waits for the line to release before arming again.
#[embassy_executor::task]
pub async fn touch_alert_task(mut alert: Input<'static>) {
    info!("Touch alert task started");

    loop {
        alert.wait_for_low().await;
        trace!("Touch alert asserted");
        TOUCH_ALERT.signal(());
        alert.wait_for_high().await;
    }
}
