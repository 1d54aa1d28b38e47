//! Hardware revision presets
//!
//! Every fielded unit runs the same code; revisions differ only in this
//! configuration. Rev A boards drive the steppers without microstepping
//! through the original driver stage, rev B boards run 1/8 microstepping
//! (the core defaults). The active revision is a cargo feature.

use brachion_core::config::MachineConfig;
#[cfg(feature = "rev-a")]
use brachion_core::config::MotionConfig;
use brachion_core::schedule::Weekday;

/// Weekday assumed when a run is started from the panel button. Supervised
/// runs are expected to carry the real weekday with the run request; the
/// panel fallback matches the bench-test fill plan.
pub const PANEL_RUN_DAY: Weekday = Weekday::Thursday;

/// Configuration for the fitted control board revision
pub fn machine_config() -> MachineConfig {
    let mut config = MachineConfig::default();
    apply_revision(&mut config);
    config
}

/// Rev A: full steps only, slower base rate, short ease window
#[cfg(feature = "rev-a")]
fn apply_revision(config: &mut MachineConfig) {
    config.axis1.microsteps = 1;
    config.axis2.microsteps = 1;
    config.motion = MotionConfig {
        cruise_delay_us: 8_000,
        start_delay_us: 15_000,
        ease_window: 20,
    };
    config.homing.seek_delay_us = 16_000;
    config.homing.calibration_steps_axis1 = 8;
    config.homing.calibration_steps_axis2 = 4;
}

/// Rev B: 1/8 microstepping, core defaults apply unchanged
#[cfg(not(feature = "rev-a"))]
fn apply_revision(_config: &mut MachineConfig) {}
