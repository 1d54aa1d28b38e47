//! Brachion - Dispenser Arm Firmware
//!
//! Main firmware binary for RP2040-based arm control boards. One
//! parameterized motion core drives every hardware revision; the preset
//! module selects the fitted revision's configuration at build time.
//!
//! Named after the Greek "brachion" (βραχίων) meaning "arm".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use brachion_drivers::arm::ArmController;
use brachion_drivers::axis::AxisDriver;
use brachion_drivers::head::NullHead;

use crate::channels::PanelStop;
use crate::presets::machine_config;

mod channels;
mod presets;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Brachion firmware starting...");

    let p = embassy_rp::init(Default::default());
    let config = machine_config();
    info!("Configuration loaded");

    // Stepper drive pins. Assignments are board-specific (arm control
    // board: axis 1 on GPIO2/3/4, axis 2 on GPIO6/7/8). Enable lines are
    // active-low and start de-asserted so both motors stay released until
    // homing begins.
    let axis1 = AxisDriver::new(
        Output::new(p.PIN_2, Level::Low),  // step
        Output::new(p.PIN_3, Level::Low),  // dir
        Output::new(p.PIN_4, Level::High), // enable
        Delay,
        &config.axis1,
    );
    let axis2 = AxisDriver::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::High),
        Delay,
        &config.axis2,
    );

    // Both limit switches sit in series on one sense line: normally-closed
    // contacts hold the line low, and either switch tripping (or a broken
    // wire) releases it to the pull-up.
    let limit = Input::new(p.PIN_10, Pull::Up);

    let arm = ArmController::new(axis1, axis2, limit, PanelStop, config);
    info!("Arm controller initialized");

    // Panel: run/stop buttons to ground, status LED on the onboard pin
    let run_button = Input::new(p.PIN_12, Pull::Up);
    let stop_button = Input::new(p.PIN_13, Pull::Up);
    let status_led = Output::new(p.PIN_25, Level::Low);

    // Measure head driver is fitted per unit; motion-only builds run with
    // the no-op head.
    let head = NullHead;

    spawner
        .spawn(tasks::controller_task(arm, head, config))
        .unwrap();
    spawner
        .spawn(tasks::buttons_task(run_button, stop_button))
        .unwrap();
    spawner.spawn(tasks::status_led_task(status_led)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
