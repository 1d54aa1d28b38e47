//! Homing protocol types

pub mod outcome;

pub use outcome::{HomingFailReason, HomingOutcome, HomingPhase};
