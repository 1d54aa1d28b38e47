//! Panel button task
//!
//! Watches the run and stop buttons. Both are active-low with pull-ups; a
//! press only counts once the line has stayed low across several samples,
//! so switch bounce and brushed contacts never trigger a run or a stop.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_time::Timer;

use crate::channels::{RUN_REQUEST, STOP_REQUESTED};
use crate::presets::PANEL_RUN_DAY;

/// Confirmation samples, 100 ms apart
const CONFIRM_SAMPLES: u8 = 5;

/// Panel button task
#[embassy_executor::task]
pub async fn buttons_task(mut run: Input<'static>, mut stop: Input<'static>) {
    info!("Button task started");

    loop {
        match select(run.wait_for_falling_edge(), stop.wait_for_falling_edge()).await {
            Either::First(()) => {
                if confirmed(&mut run).await {
                    info!("Run button pressed");
                    RUN_REQUEST.signal(PANEL_RUN_DAY);
                }
            }
            Either::Second(()) => {
                if confirmed(&mut stop).await {
                    warn!("Stop button pressed");
                    STOP_REQUESTED.store(true, Ordering::Relaxed);
                }
            }
        }
    }
}

/// Require the line to hold low across the confirmation window
async fn confirmed(button: &mut Input<'static>) -> bool {
    for _ in 0..CONFIRM_SAMPLES {
        Timer::after_millis(100).await;
        if button.is_high() {
            return false;
        }
    }
    true
}
