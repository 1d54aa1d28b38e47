//! Coordinated arm control

pub mod controller;

pub use controller::ArmController;
