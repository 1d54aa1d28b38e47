//! Cycle controller task
//!
//! Waits for a run request, then drives one full dispensing cycle: home,
//! clear the enclosure wall via the staging cell, visit every jar in
//! serpentine order triggering the dispense head at each, re-home, and
//! release the motors. A confirmed stop request ends the cycle after the
//! current step with the head parked and both motors released.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::Delay;

use brachion_core::config::MachineConfig;
use brachion_core::grid::{GridCell, Serpentine};
use brachion_core::homing::{HomingFailReason, HomingOutcome};
use brachion_core::motion::{AxisId, MotionError};
use brachion_core::schedule::Weekday;
use brachion_core::traits::DispenseHead;
use brachion_drivers::arm::ArmController;
use brachion_drivers::head::NullHead;

use crate::channels::{PanelStop, RunState, RUN_REQUEST, RUN_STATE, STOP_REQUESTED};

/// Arm controller over the control board's GPIO
pub type PanelArm = ArmController<Output<'static>, Input<'static>, PanelStop, Delay>;

/// Why a cycle ended early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum CycleError {
    /// Operator stop honored mid-cycle; not a fault
    Stopped,
    /// The named axis never found its switch
    Homing(AxisId, HomingFailReason),
    /// A move failed
    Motion(MotionError),
}

/// Cycle controller task
#[embassy_executor::task]
pub async fn controller_task(mut arm: PanelArm, mut head: NullHead, config: MachineConfig) {
    info!("Controller task started");
    RUN_STATE.signal(RunState::Idle);

    loop {
        let weekday = RUN_REQUEST.wait().await;
        STOP_REQUESTED.store(false, Ordering::Relaxed);
        RUN_STATE.signal(RunState::Busy);

        match run_cycle(&mut arm, &mut head, &config, weekday).await {
            Ok(()) => {
                info!("Cycle complete, {} jars served", config.grid.cols as u16 * config.grid.rows as u16);
                RUN_STATE.signal(RunState::Idle);
            }
            Err(CycleError::Stopped) => {
                warn!("Cycle stopped by operator at {:?}", arm.joints());
                head.park();
                arm.release();
                RUN_STATE.signal(RunState::Idle);
            }
            Err(e) => {
                error!("Cycle failed: {:?}", e);
                head.park();
                arm.release();
                RUN_STATE.signal(RunState::Fault);
            }
        }
    }
}

/// Run one full dispensing cycle
async fn run_cycle(
    arm: &mut PanelArm,
    head: &mut impl DispenseHead,
    config: &MachineConfig,
    weekday: Weekday,
) -> Result<(), CycleError> {
    let measure = config.schedule.measure_for(weekday);
    info!("Starting cycle for {:?}, measure {}", weekday, measure);

    home(arm).await?;
    move_to(arm, config.grid.staging_cell).await?;

    for cell in Serpentine::over(config.grid.cols, config.grid.rows) {
        move_to(arm, cell).await?;
        trace!("At jar ({}, {})", cell.col, cell.row);
        head.dispense(measure).await;
    }

    home(arm).await?;
    arm.release();
    Ok(())
}

async fn home(arm: &mut PanelArm) -> Result<(), CycleError> {
    match arm.home().await {
        HomingOutcome::Homed => Ok(()),
        HomingOutcome::Failed {
            reason: HomingFailReason::Stopped,
            ..
        } => Err(CycleError::Stopped),
        HomingOutcome::Failed { axis, reason } => Err(CycleError::Homing(axis, reason)),
    }
}

async fn move_to(arm: &mut PanelArm, cell: GridCell) -> Result<(), CycleError> {
    match arm.move_to(cell).await {
        Ok(()) => Ok(()),
        Err(MotionError::Cancelled) => Err(CycleError::Stopped),
        Err(e) => Err(CycleError::Motion(e)),
    }
}
