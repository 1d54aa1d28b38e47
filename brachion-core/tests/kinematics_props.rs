//! Property tests for the kinematics solver
//!
//! The round-trip law: any reachable planar target, solved and fed back
//! through forward kinematics, must reproduce itself. The singular column
//! (|x| < 1 mm) is excluded because the solver intentionally approximates
//! the bearing there.

use brachion_core::config::ArmGeometry;
use brachion_core::kinematics::{forward, solve, KinematicsError};
use proptest::prelude::*;

const ARM: ArmGeometry = ArmGeometry {
    link1_mm: 330.0,
    link2_mm: 330.0,
};

proptest! {
    #[test]
    fn solve_then_forward_reproduces_target(
        x in -640.0f32..640.0,
        y in -640.0f32..640.0,
    ) {
        let r = (x * x + y * y).sqrt();
        prop_assume!(x.abs() >= 1.0);
        prop_assume!(r >= 1.0 && r <= 0.98 * ARM.reach_mm());

        let angles = solve(x, y, &ARM).unwrap();
        let (fx, fy) = forward(&angles, &ARM);

        prop_assert!(
            (fx - x).abs() < 0.5,
            "x round trip: {} -> {} (angles {:?})", x, fx, angles
        );
        prop_assert!(
            (fy - y).abs() < 0.5,
            "y round trip: {} -> {} (angles {:?})", y, fy, angles
        );
    }

    #[test]
    fn targets_beyond_reach_are_rejected(
        bearing in 0.0f32..core::f32::consts::TAU,
        excess in 1.0f32..1_000.0,
    ) {
        let r = ARM.reach_mm() + excess;
        let x = r * bearing.cos();
        let y = r * bearing.sin();

        prop_assert_eq!(solve(x, y, &ARM), Err(KinematicsError::Unreachable));
    }
}
