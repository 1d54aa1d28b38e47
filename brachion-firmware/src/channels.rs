//! Inter-task communication
//!
//! Static embassy-sync primitives shared between the panel, LED and
//! controller tasks, plus the latched stop flag the motion core polls.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use brachion_core::schedule::Weekday;
use brachion_core::traits::StopSignal;

/// Confirmed operator stop request, latched until the next run starts
pub static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Request to run a dispensing cycle for the given weekday
pub static RUN_REQUEST: Signal<CriticalSectionRawMutex, Weekday> = Signal::new();

/// Machine activity, rendered by the status LED task
pub static RUN_STATE: Signal<CriticalSectionRawMutex, RunState> = Signal::new();

/// Coarse machine activity for the panel LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Waiting for a run request
    Idle,
    /// Homing or dispensing
    Busy,
    /// A cycle failed; operator attention needed
    Fault,
}

/// The motion core's view of the latched panel stop flag
///
/// Debounce happens in the button task; by the time the flag is set the
/// press is already confirmed.
#[derive(Debug, Clone, Copy)]
pub struct PanelStop;

impl StopSignal for PanelStop {
    fn stop_requested(&self) -> bool {
        STOP_REQUESTED.load(Ordering::Relaxed)
    }
}
