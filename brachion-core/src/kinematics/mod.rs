//! Two-link arm kinematics

pub mod solver;

pub use solver::{forward, solve, JointAngles, KinematicsError};
