//! Inverse and forward kinematics for the equal-link SCARA arm
//!
//! Law-of-cosines solution in the elbow configuration the machine is
//! assembled in. Joint angles are absolute degrees in the homed frame:
//! axis 1 is the shoulder joint, axis 2 the elbow joint, both zero at the
//! limit switches. The elbow mirror (360° − elbow) on the negative-x side
//! keeps the forearm on the correct side of the shoulder; the second
//! joint's zero reference flips handedness across the shoulder plane.

use libm::{acosf, atanf, cosf, fabsf, sinf, sqrtf};

use crate::config::ArmGeometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Below this |x| the target is treated as directly above the shoulder
const X_EPS_MM: f32 = 1e-3;

/// Nominal x run substituted when computing the bearing at the singular
/// column (see `solve`)
const NOMINAL_RUN_MM: f32 = 1.0;

/// Absolute joint angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointAngles {
    /// Shoulder joint angle
    pub axis1_deg: f32,
    /// Elbow joint angle
    pub axis2_deg: f32,
}

/// Kinematics failures, detected before any motion starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KinematicsError {
    /// Target outside the arm's physical envelope, or at the shoulder
    /// axis itself where the bearing is undefined
    Unreachable,
}

/// Solve joint angles for a planar target offset from the shoulder
///
/// Pure function of its inputs; identical inputs reproduce identical
/// angles bit for bit.
///
/// At the singular column (|x| below threshold) the bearing is computed
/// against a nominal 1 mm run so the atan ratio stays finite, while the
/// distance terms keep the true radius. This is an intentional
/// approximation: the angular error grows as the target nears the
/// shoulder, about 1.3° at the closest row of the default grid.
pub fn solve(x: f32, y: f32, arm: &ArmGeometry) -> Result<JointAngles, KinematicsError> {
    let l1 = arm.link1_mm;
    let l2 = arm.link2_mm;

    let r_sq = x * x + y * y;
    let r = sqrtf(r_sq);
    if r <= f32::EPSILON || r > arm.reach_mm() {
        return Err(KinematicsError::Unreachable);
    }

    // Angle between link 1 and the target bearing (law of cosines in the
    // shoulder-elbow-target triangle). Arguments are in [-1, 1] for any
    // reachable target; the clamp only absorbs float rounding at the
    // envelope boundary.
    let wedge = acosf(((r_sq + l1 * l1 - l2 * l2) / (2.0 * r * l1)).clamp(-1.0, 1.0)).to_degrees();
    // Interior elbow angle between the links
    let elbow = acosf(((l2 * l2 + l1 * l1 - r_sq) / (2.0 * l1 * l2)).clamp(-1.0, 1.0)).to_degrees();

    let (axis1_deg, axis2_deg) = if x > X_EPS_MM {
        (180.0 - (atanf(y / x).to_degrees() + wedge), elbow)
    } else if x < -X_EPS_MM {
        (atanf(y / fabsf(x)).to_degrees() + wedge, 360.0 - elbow)
    } else {
        (atanf(y / NOMINAL_RUN_MM).to_degrees() + wedge, 360.0 - elbow)
    };

    Ok(JointAngles {
        axis1_deg,
        axis2_deg,
    })
}

/// Reconstruct the planar target from joint angles
///
/// Inverse of `solve` over the reachable envelope; used by diagnostics and
/// to verify solved angles.
pub fn forward(angles: &JointAngles, arm: &ArmGeometry) -> (f32, f32) {
    // Absolute link bearings: link 1 points at 180° − axis1, link 2 at
    // axis2 − axis1. Holds on both sides of the shoulder because the
    // elbow mirror and the axis-1 reflection cancel.
    let phi1 = (180.0 - angles.axis1_deg).to_radians();
    let phi2 = (angles.axis2_deg - angles.axis1_deg).to_radians();

    (
        arm.link1_mm * cosf(phi1) + arm.link2_mm * cosf(phi2),
        arm.link1_mm * sinf(phi1) + arm.link2_mm * sinf(phi2),
    )
}
