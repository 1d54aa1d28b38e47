//! Traits for external collaborators
//!
//! These traits define the seams between the motion core and everything it
//! does not own: the operator stop control and the payload dispense head.

pub mod dispense;
pub mod stop;

pub use dispense::DispenseHead;
pub use stop::{NeverStop, StopSignal};
