//! Dispense head implementations

pub mod null;

pub use null::NullHead;
