//! Hardware driver implementations
//!
//! This crate provides the hardware-facing half of the motion core, generic
//! over `embedded-hal` pins and an async delay source so it runs unchanged
//! on any chip the firmware targets:
//!
//! - Axis driver (step/dir/enable pulse generation for one joint)
//! - Arm controller (coordinated moves and the shared-line homing protocol)
//! - Dispense head stubs

#![no_std]
#![deny(unsafe_code)]

pub mod arm;
pub mod axis;
pub mod head;
