//! Coordinated move and homing controller
//!
//! Owns both axis drivers, the shared limit input and the joint state.
//! Moves run the two axes concurrently (one short-lived worker future per
//! axis, joined before the call returns) while homing is strictly
//! sequential: the two limit switches sit on a single sense line, so the
//! only way to know which switch tripped is to make sure the other axis
//! cannot possibly be on its switch while one is seeking.

use embassy_futures::join::join;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use brachion_core::config::MachineConfig;
use brachion_core::grid::GridCell;
use brachion_core::homing::{HomingFailReason, HomingOutcome, HomingPhase};
use brachion_core::kinematics::{self, JointAngles};
use brachion_core::motion::{AxisId, Direction, JointState, MotionError, MotionProfile, StepPlan};
use brachion_core::traits::StopSignal;

use crate::axis::AxisDriver;

/// Step timing for one axis worker
enum Pace {
    /// Ease-in/out profile for normal moves
    Profiled(MotionProfile),
    /// Fixed inter-step delay for homing phases
    Constant(u32),
}

impl Pace {
    fn delay_us(&self, step: u32) -> u32 {
        match self {
            Pace::Profiled(profile) => profile.delay_us(step),
            Pace::Constant(us) => *us,
        }
    }
}

/// How one axis worker ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisOutcome {
    Complete,
    Cancelled,
    Fault,
}

/// Result of one axis worker: how far it got and how it ended
struct AxisRun {
    completed: u32,
    outcome: AxisOutcome,
}

/// A homing phase giving up
struct HomingAbort {
    axis: AxisId,
    reason: HomingFailReason,
}

/// Step one axis through a signed step count
///
/// The stop flag is sampled before every step, so a confirmed stop is
/// honored after the current step completes and never mid-pulse.
async fn run_axis<P, D, S>(
    driver: &mut AxisDriver<P, D>,
    steps: i32,
    pace: Pace,
    stop: &S,
) -> AxisRun
where
    P: OutputPin,
    D: DelayNs,
    S: StopSignal,
{
    let total = steps.unsigned_abs();
    let direction = Direction::of_steps(steps);

    for i in 1..=total {
        if stop.stop_requested() {
            return AxisRun {
                completed: i - 1,
                outcome: AxisOutcome::Cancelled,
            };
        }
        if driver.step(direction).await.is_err() {
            return AxisRun {
                completed: i - 1,
                outcome: AxisOutcome::Fault,
            };
        }
        driver.pause(pace.delay_us(i)).await;
    }

    AxisRun {
        completed: total,
        outcome: AxisOutcome::Complete,
    }
}

/// Dual-axis SCARA arm controller
///
/// The single owner of `JointState`: the state is mutated only here, and
/// only once a move's outcome is known.
pub struct ArmController<P, L, S, D> {
    axis1: AxisDriver<P, D>,
    axis2: AxisDriver<P, D>,
    limit: L,
    stop: S,
    config: MachineConfig,
    joints: JointState,
    homed: bool,
}

impl<P, L, S, D> ArmController<P, L, S, D>
where
    P: OutputPin,
    L: InputPin,
    S: StopSignal,
    D: DelayNs,
{
    /// Create a controller over two axis drivers and the shared limit input
    pub fn new(
        axis1: AxisDriver<P, D>,
        axis2: AxisDriver<P, D>,
        limit: L,
        stop: S,
        config: MachineConfig,
    ) -> Self {
        Self {
            axis1,
            axis2,
            limit,
            stop,
            config,
            joints: JointState::default(),
            homed: false,
        }
    }

    /// Current joint angles, for diagnostics and logging by the caller
    pub fn joints(&self) -> &JointState {
        &self.joints
    }

    /// Whether a successful homing established the joint reference
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Release both motors
    ///
    /// Best effort: used on shutdown and failure paths where an earlier
    /// error takes precedence. Holding torque is lost, so the joint
    /// reference is considered stale until the next homing.
    pub fn release(&mut self) {
        let _ = self.axis1.set_enabled(false);
        let _ = self.axis2.set_enabled(false);
        self.homed = false;
    }

    /// Move the effector to a jar cell
    ///
    /// Solves the target before any motion starts, runs both axes
    /// concurrently under their own ease profiles, and commits the new
    /// joint angles only on full completion. On cancellation or a GPIO
    /// fault the joint state is reconciled from the steps each axis
    /// actually performed and both motors are released.
    pub async fn move_to(&mut self, cell: GridCell) -> Result<(), MotionError> {
        if !self.homed {
            return Err(MotionError::NotHomed);
        }

        let (x, y) = self.config.grid.cell_center(cell);
        let target =
            kinematics::solve(x, y, &self.config.arm).map_err(|_| MotionError::Unreachable)?;

        let plan = StepPlan::toward(
            &self.joints,
            &target,
            &self.config.axis1,
            &self.config.axis2,
        );

        self.exec_move(plan, &target).await
    }

    /// Run a planned move and settle the joint state
    async fn exec_move(&mut self, plan: StepPlan, target: &JointAngles) -> Result<(), MotionError> {
        if plan.is_zero() {
            self.joints.commit(target);
            return Ok(());
        }

        let motion = self.config.motion;
        let pace1 = Pace::Profiled(MotionProfile::new(plan.axis1.unsigned_abs(), &motion));
        let pace2 = Pace::Profiled(MotionProfile::new(plan.axis2.unsigned_abs(), &motion));

        let Self {
            axis1,
            axis2,
            stop,
            ..
        } = self;
        let stop = &*stop;
        let (run1, run2) = join(
            run_axis(axis1, plan.axis1, pace1, stop),
            run_axis(axis2, plan.axis2, pace2, stop),
        )
        .await;

        if run1.outcome == AxisOutcome::Complete && run2.outcome == AxisOutcome::Complete {
            self.joints.commit(target);
            return Ok(());
        }

        // Walk the state by what each axis actually did, then release.
        // The step-quantized record stays within one step of the hardware.
        self.joints.apply_steps(
            AxisId::Axis1,
            plan.axis1.signum() * run1.completed as i32,
            self.config.axis1.steps_per_degree(),
        );
        self.joints.apply_steps(
            AxisId::Axis2,
            plan.axis2.signum() * run2.completed as i32,
            self.config.axis2.steps_per_degree(),
        );
        self.release();

        if run1.outcome == AxisOutcome::Fault || run2.outcome == AxisOutcome::Fault {
            Err(MotionError::Gpio)
        } else {
            Err(MotionError::Cancelled)
        }
    }

    /// Home both axes against the shared limit line
    ///
    /// Runs the phases of the arbitration protocol strictly in order; on
    /// success the joint state is reset to the calibrated zero pair. Any
    /// failure leaves both motors released and is fatal to the run, since
    /// the arm must not move without a known home.
    pub async fn home(&mut self) -> HomingOutcome {
        self.homed = false;

        const SEQUENCE: [HomingPhase; 6] = [
            HomingPhase::BackingOff,
            HomingPhase::SeekAxis2,
            HomingPhase::ReleaseLine,
            HomingPhase::SeekAxis1,
            HomingPhase::RestoreAxis2,
            HomingPhase::CalibrationOffset,
        ];

        for phase in SEQUENCE {
            if let Err(abort) = self.run_phase(phase).await {
                self.release();
                return HomingOutcome::Failed {
                    axis: abort.axis,
                    reason: abort.reason,
                };
            }
        }

        self.joints.reset();
        self.homed = true;
        HomingOutcome::Homed
    }

    /// Execute one homing phase
    async fn run_phase(&mut self, phase: HomingPhase) -> Result<(), HomingAbort> {
        let homing = self.config.homing;
        let back1 = -((homing.backoff_deg * self.config.axis1.steps_per_degree()) as i32);
        let back2 = -((homing.backoff_deg * self.config.axis2.steps_per_degree()) as i32);

        match phase {
            HomingPhase::BackingOff => {
                // Neither axis is expected to be on its switch, so this is
                // the one phase that may run both concurrently
                self.energize(AxisId::Axis1, true)?;
                self.energize(AxisId::Axis2, true)?;
                self.constant_pair(back1, back2).await
            }
            HomingPhase::SeekAxis2 => {
                // With axis 1 released, only axis 2's switch can close the
                // shared circuit
                self.energize(AxisId::Axis1, false)?;
                self.seek(AxisId::Axis2).await
            }
            HomingPhase::ReleaseLine => {
                // Axis 2 is sitting on its switch; back it off so the line
                // opens before axis 1 seeks
                self.constant_single(AxisId::Axis2, back2).await
            }
            HomingPhase::SeekAxis1 => {
                self.energize(AxisId::Axis1, true)?;
                self.seek(AxisId::Axis1).await
            }
            HomingPhase::RestoreAxis2 => self.constant_single(AxisId::Axis2, -back2).await,
            HomingPhase::CalibrationOffset => {
                self.constant_pair(
                    homing.calibration_steps_axis1,
                    homing.calibration_steps_axis2,
                )
                .await
            }
        }
    }

    /// Seek one axis toward its switch at the constant homing rate
    ///
    /// The shared line is sampled before every step; the travel bound is
    /// the fatal backstop for a switch that never trips.
    async fn seek(&mut self, axis: AxisId) -> Result<(), HomingAbort> {
        let homing = self.config.homing;
        let (travel_deg, k) = match axis {
            AxisId::Axis1 => (
                homing.travel_axis1_deg,
                self.config.axis1.steps_per_degree(),
            ),
            AxisId::Axis2 => (
                homing.travel_axis2_deg,
                self.config.axis2.steps_per_degree(),
            ),
        };
        let bound = (travel_deg * k) as u32;

        let Self {
            axis1,
            axis2,
            limit,
            stop,
            ..
        } = self;
        let driver = match axis {
            AxisId::Axis1 => axis1,
            AxisId::Axis2 => axis2,
        };

        for _ in 0..bound {
            if limit_tripped(limit, homing.limit_active_high)
                .map_err(|()| HomingAbort { axis, reason: HomingFailReason::Gpio })?
            {
                return Ok(());
            }
            if stop.stop_requested() {
                return Err(HomingAbort {
                    axis,
                    reason: HomingFailReason::Stopped,
                });
            }
            driver
                .step(Direction::Forward)
                .await
                .map_err(|_| HomingAbort { axis, reason: HomingFailReason::Gpio })?;
            driver.pause(homing.seek_delay_us).await;
        }

        // The switch may close on the very last allowed step
        if limit_tripped(limit, homing.limit_active_high)
            .map_err(|()| HomingAbort { axis, reason: HomingFailReason::Gpio })?
        {
            return Ok(());
        }

        Err(HomingAbort {
            axis,
            reason: HomingFailReason::LimitNotFound,
        })
    }

    /// Run one axis a fixed signed step count at the homing rate
    async fn constant_single(&mut self, axis: AxisId, steps: i32) -> Result<(), HomingAbort> {
        let seek_delay = self.config.homing.seek_delay_us;
        let Self {
            axis1,
            axis2,
            stop,
            ..
        } = self;
        let driver = match axis {
            AxisId::Axis1 => axis1,
            AxisId::Axis2 => axis2,
        };

        let run = run_axis(driver, steps, Pace::Constant(seek_delay), stop).await;
        abort_for(run.outcome, axis)
    }

    /// Run both axes fixed signed step counts concurrently at the homing
    /// rate
    async fn constant_pair(&mut self, steps1: i32, steps2: i32) -> Result<(), HomingAbort> {
        let seek_delay = self.config.homing.seek_delay_us;
        let Self {
            axis1,
            axis2,
            stop,
            ..
        } = self;
        let stop = &*stop;

        let (run1, run2) = join(
            run_axis(axis1, steps1, Pace::Constant(seek_delay), stop),
            run_axis(axis2, steps2, Pace::Constant(seek_delay), stop),
        )
        .await;

        abort_for(run1.outcome, AxisId::Axis1)?;
        abort_for(run2.outcome, AxisId::Axis2)
    }

    /// Energize or release one axis, attributing faults to it
    fn energize(&mut self, axis: AxisId, enabled: bool) -> Result<(), HomingAbort> {
        let driver = match axis {
            AxisId::Axis1 => &mut self.axis1,
            AxisId::Axis2 => &mut self.axis2,
        };
        driver.set_enabled(enabled).map_err(|_| HomingAbort {
            axis,
            reason: HomingFailReason::Gpio,
        })
    }
}

/// Read the shared limit line, honoring its configured polarity
fn limit_tripped<L: InputPin>(limit: &mut L, active_high: bool) -> Result<bool, ()> {
    let high = limit.is_high().map_err(|_| ())?;
    Ok(high == active_high)
}

/// Map a worker outcome to a homing abort for the given axis
fn abort_for(outcome: AxisOutcome, axis: AxisId) -> Result<(), HomingAbort> {
    match outcome {
        AxisOutcome::Complete => Ok(()),
        AxisOutcome::Cancelled => Err(HomingAbort {
            axis,
            reason: HomingFailReason::Stopped,
        }),
        AxisOutcome::Fault => Err(HomingAbort {
            axis,
            reason: HomingFailReason::Gpio,
        }),
    }
}
