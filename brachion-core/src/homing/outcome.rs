//! Homing phases and outcomes
//!
//! Both limit switches sit on one shared sense line, so the axes can only
//! be homed one at a time: whichever axis is seeking must be the only one
//! whose switch can possibly close the circuit. The phases below encode
//! that arbitration; the controller in the drivers crate executes them
//! strictly in order.

use crate::motion::AxisId;

/// Phase of the homing sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingPhase {
    /// Both axes back away from their switches (safe to run concurrently;
    /// neither switch is expected to be closed)
    BackingOff,
    /// Axis 2 seeks its switch with axis 1 de-energized
    SeekAxis2,
    /// Axis 2 retreats off its switch so the shared line opens again
    ReleaseLine,
    /// Axis 1 re-energized and seeking its own switch
    SeekAxis1,
    /// Axis 2 returns to its switch position
    RestoreAxis2,
    /// Fixed per-axis calibration offsets correct for the mechanical gap
    /// between switch trip point and true home
    CalibrationOffset,
}

/// Why a homing phase gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingFailReason {
    /// The travel bound was exhausted without the limit line tripping
    LimitNotFound,
    /// A confirmed stop request interrupted the sequence
    Stopped,
    /// GPIO write failed mid-sequence
    Gpio,
}

/// Result of one homing call
///
/// `Failed` is fatal to the run: without a found home the joint state is
/// meaningless and the arm must not move. Both axes are de-energized
/// before a failure is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// Both axes found their switches; joint state reset to zero
    Homed,
    /// The named axis could not be homed
    Failed {
        /// Axis whose phase failed
        axis: AxisId,
        /// What went wrong
        reason: HomingFailReason,
    },
}

impl HomingOutcome {
    /// True when homing completed
    pub fn is_homed(&self) -> bool {
        matches!(self, HomingOutcome::Homed)
    }
}
