//! Firmware tasks

pub mod buttons;
pub mod controller;
pub mod status_led;

pub use buttons::buttons_task;
pub use controller::{controller_task, PanelArm};
pub use status_led::status_led_task;
