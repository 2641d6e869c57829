//! Badge runtime loop

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use fcb_core::Runtime;

use crate::board::Rp2040Board;
use crate::channels::TOUCH_ALERT;

/// Drive the runtime forever
///
/// Services a pending touch alert, runs one step, and after an idle step
/// sleeps until the next alert or the idle interval, whichever is first.
#[embassy_executor::task]
pub async fn runtime_task(mut runtime: Runtime<Rp2040Board>) {
    info!("Runtime task started, active app: {}", runtime.active_app());

    let idle_sleep_ms = runtime.config().idle_sleep_ms as u64;

    loop {
        if TOUCH_ALERT.try_take().is_some() {
            runtime.service_touch();
        }

        let outcome = runtime.step();
        if outcome.refreshed {
            debug!("Panel refreshed");
        }

        if outcome.is_idle() {
            if let Either::First(()) = select(TOUCH_ALERT.wait(), Timer::after_millis(idle_sleep_ms)).await {
                runtime.service_touch();
            }
        }
    }
}
