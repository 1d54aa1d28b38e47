//! Joint-angle bookkeeping
//!
//! `JointState` is the single source of truth for where the arm physically
//! is. It is owned by the move controller and mutated only once a move's
//! outcome is known: a completed move commits the solved target angles, a
//! cancelled or faulted move walks the state by the steps each axis
//! actually performed, so the record never drifts more than one step's
//! resolution from the hardware.

use crate::kinematics::JointAngles;
use crate::motion::plan::AxisId;

/// Current absolute joint angles, degrees in the homed frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointState {
    axis1_deg: f32,
    axis2_deg: f32,
}

impl JointState {
    /// Angle of one axis in degrees
    pub fn angle(&self, axis: AxisId) -> f32 {
        match axis {
            AxisId::Axis1 => self.axis1_deg,
            AxisId::Axis2 => self.axis2_deg,
        }
    }

    /// Both angles as (axis1, axis2) degrees
    pub fn angles(&self) -> (f32, f32) {
        (self.axis1_deg, self.axis2_deg)
    }

    /// Commit solved target angles after a fully completed move
    pub fn commit(&mut self, target: &JointAngles) {
        self.axis1_deg = target.axis1_deg;
        self.axis2_deg = target.axis2_deg;
    }

    /// Reset to the post-homing zero reference
    pub fn reset(&mut self) {
        self.axis1_deg = 0.0;
        self.axis2_deg = 0.0;
    }

    /// Record `steps` signed steps performed on an axis
    ///
    /// Positive steps move toward the limit switch, decreasing the angle.
    /// Used to reconcile a partially completed move.
    pub fn apply_steps(&mut self, axis: AxisId, steps: i32, steps_per_degree: f32) {
        let delta = steps as f32 / steps_per_degree;
        match axis {
            AxisId::Axis1 => self.axis1_deg -= delta,
            AxisId::Axis2 => self.axis2_deg -= delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::fabsf;

    #[test]
    fn test_commit_and_reset() {
        let mut joints = JointState::default();
        assert_eq!(joints.angles(), (0.0, 0.0));

        joints.commit(&JointAngles {
            axis1_deg: 60.0,
            axis2_deg: 287.0,
        });
        assert_eq!(joints.angle(AxisId::Axis1), 60.0);
        assert_eq!(joints.angle(AxisId::Axis2), 287.0);

        joints.reset();
        assert_eq!(joints.angles(), (0.0, 0.0));
    }

    #[test]
    fn test_apply_steps_direction() {
        let mut joints = JointState::default();

        // Positive steps run toward the switch: angle decreases
        joints.apply_steps(AxisId::Axis1, 100, 10.0);
        assert!(fabsf(joints.angle(AxisId::Axis1) - (-10.0)) < 1e-5);

        // Negative steps back away: angle increases
        joints.apply_steps(AxisId::Axis1, -50, 10.0);
        assert!(fabsf(joints.angle(AxisId::Axis1) - (-5.0)) < 1e-5);
        assert_eq!(joints.angle(AxisId::Axis2), 0.0);
    }

    #[test]
    fn test_partial_move_reconciliation() {
        // 30 of 100 planned steps completed on axis 2 at 8.888 steps/deg
        let k = 80.0 / 20.0 * 1600.0 / 360.0;
        let mut joints = JointState::default();

        joints.apply_steps(AxisId::Axis2, 30, k);
        let expected = -30.0 / k;
        assert!(fabsf(joints.angle(AxisId::Axis2) - expected) < 1e-4);
    }
}
