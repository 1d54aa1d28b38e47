//! No-op dispense head
//!
//! Machines are shipped with different measure-head assemblies, each with
//! its own driver; bench builds and motion-only test fixtures run with this
//! head fitted in software.

use brachion_core::traits::DispenseHead;

/// Head that accepts every command and does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHead;

impl DispenseHead for NullHead {
    async fn dispense(&mut self, _measure: u8) {}

    fn park(&mut self) {}
}
