//! Single-joint stepper axis driver

pub mod driver;

pub use driver::{AxisDriver, AxisError};
