//! Board-agnostic motion core for the Brachion dispensing arm
//!
//! This crate contains all arm logic that does not depend on specific
//! hardware implementations:
//!
//! - Inverse/forward kinematics for the two-link arm
//! - Motion profile (quadratic ease-in/out step timing)
//! - Step planning and joint-state bookkeeping
//! - Homing and motion outcome types
//! - Grid traversal and the weekly dispensing schedule
//! - Configuration type definitions
//! - Traits for external collaborators (stop input, dispense head)

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod grid;
pub mod homing;
pub mod kinematics;
pub mod motion;
pub mod schedule;
pub mod traits;
