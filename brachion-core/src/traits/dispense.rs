//! Payload dispense head

/// External dispense collaborator, triggered once per visited jar
///
/// The motion core only sequences the head; what a dispense actually does
/// (servo choreography, vibration, counting) belongs to the head's own
/// driver. `measure` selects the head compartment for the day, 1..=5.
#[allow(async_fn_in_trait)]
pub trait DispenseHead {
    /// Run one dispense at the current jar
    async fn dispense(&mut self, measure: u8);

    /// Move the head to its safe/off position
    ///
    /// Called on cancellation and at shutdown; must be safe to call at any
    /// time, including mid-dispense or when nothing is active.
    fn park(&mut self);
}
