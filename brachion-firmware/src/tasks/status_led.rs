//! Status LED task
//!
//! Renders machine activity on the panel LED: a short blip every few
//! seconds while idle, solid while a cycle runs, fast blink on a fault.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Ticker};

use crate::channels::{RunState, RUN_STATE};

/// Pattern tick in milliseconds
const TICK_MS: u64 = 100;

/// Status LED task
#[embassy_executor::task]
pub async fn status_led_task(mut led: Output<'static>) {
    info!("Status LED task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut state = RunState::Idle;
    let mut phase: u32 = 0;

    loop {
        if let Some(next) = RUN_STATE.try_take() {
            state = next;
            phase = 0;
        }

        let on = match state {
            // One 100 ms blip every four seconds
            RunState::Idle => phase % 40 == 0,
            RunState::Busy => true,
            // 5 Hz blink
            RunState::Fault => phase % 2 == 0,
        };
        led.set_level(on.into());

        phase = phase.wrapping_add(1);
        ticker.next().await;
    }
}
