//! Configuration types
//!
//! Board-agnostic configuration structures. One parameterized `MachineConfig`
//! subsumes all hardware revisions; firmware selects a preset at build time.

pub mod types;

pub use types::{
    ArmGeometry, AxisConfig, GridConfig, HomingConfig, MachineConfig, MotionConfig,
};
