//! Step planning for coordinated moves
//!
//! A move is planned by solving the target's joint angles and diffing them
//! against the current joint state through each axis's steps-per-degree
//! coefficient. The signed counts fully determine both axes' behavior for
//! one move; a plan is consumed by the move that executes it.

use libm::roundf;

use crate::config::AxisConfig;
use crate::kinematics::JointAngles;
use crate::motion::state::JointState;

/// Arm axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Shoulder joint
    Axis1,
    /// Elbow joint
    Axis2,
}

/// Stepper rotation direction
///
/// `Forward` is the direction of positive step counts, which moves a joint
/// toward its limit switch (decreasing angle). Per-axis wiring inversion is
/// handled in the axis driver, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Toward the limit switch (decreasing joint angle)
    Forward,
    /// Away from the limit switch (increasing joint angle)
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Direction of a signed step count
    pub fn of_steps(steps: i32) -> Self {
        if steps >= 0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }
}

/// Motion failures surfaced by the move controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Target outside the arm's envelope; detected before any motion
    Unreachable,
    /// No successful homing since startup (or since the motors were
    /// released), so the joint state is unknown
    NotHomed,
    /// Confirmed stop request observed mid-move; motion halted after the
    /// current step and the partial position was recorded
    Cancelled,
    /// GPIO write failed; not retried because step timing can no longer
    /// be guaranteed
    Gpio,
}

/// Signed step counts for one coordinated move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPlan {
    /// Axis 1 steps; sign is direction
    pub axis1: i32,
    /// Axis 2 steps; sign is direction
    pub axis2: i32,
}

impl StepPlan {
    /// Plan the move from the current joint state to the target angles
    pub fn toward(
        current: &JointState,
        target: &JointAngles,
        axis1: &AxisConfig,
        axis2: &AxisConfig,
    ) -> Self {
        let delta1 = current.angle(AxisId::Axis1) - target.axis1_deg;
        let delta2 = current.angle(AxisId::Axis2) - target.axis2_deg;

        Self {
            axis1: roundf(axis1.steps_per_degree() * delta1) as i32,
            axis2: roundf(axis2.steps_per_degree() * delta2) as i32,
        }
    }

    /// Signed step count for an axis
    pub fn steps(&self, axis: AxisId) -> i32 {
        match axis {
            AxisId::Axis1 => self.axis1,
            AxisId::Axis2 => self.axis2,
        }
    }

    /// True when neither axis needs to move
    pub fn is_zero(&self) -> bool {
        self.axis1 == 0 && self.axis2 == 0
    }
}
