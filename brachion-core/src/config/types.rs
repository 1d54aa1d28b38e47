//! Machine configuration definitions
//!
//! All geometry, stepping and timing parameters for one arm. Defaults match
//! the production unit (11 × 7 cart, 330 mm links, 78 mm jars). Hardware
//! revisions differ only in these values, never in code paths.

use crate::grid::GridCell;
use crate::schedule::DaySchedule;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Link lengths of the two-section arm
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArmGeometry {
    /// Shoulder-to-elbow link length in mm
    pub link1_mm: f32,
    /// Elbow-to-effector link length in mm
    pub link2_mm: f32,
}

impl ArmGeometry {
    /// Maximum radial reach of the fully extended arm in mm
    pub fn reach_mm(&self) -> f32 {
        self.link1_mm + self.link2_mm
    }
}

impl Default for ArmGeometry {
    fn default() -> Self {
        Self {
            link1_mm: 330.0,
            link2_mm: 330.0,
        }
    }
}

/// Jar grid geometry, in the arm's planar frame
///
/// The shoulder axis sits at the frame origin; jar (0, 0) is the back-left
/// corner of the cart. Coordinates of a cell center are
/// `index * diameter + diameter/2 - origin` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Number of jar columns (x)
    pub cols: u8,
    /// Number of jar rows (y)
    pub rows: u8,
    /// Jar diameter (grid pitch) in mm
    pub cell_diameter_mm: f32,
    /// Shoulder offset from the grid's x reference in mm
    pub origin_x_mm: f32,
    /// Shoulder offset from the grid's y reference in mm
    pub origin_y_mm: f32,
    /// First cell visited after homing, chosen so the arm swings clear of
    /// the enclosure wall before the serpentine run starts
    pub staging_cell: GridCell,
}

impl GridConfig {
    /// Grid with the shoulder centered on the cart's x span
    pub fn shoulder_centered(cols: u8, rows: u8, cell_diameter_mm: f32, origin_y_mm: f32) -> Self {
        Self {
            cols,
            rows,
            cell_diameter_mm,
            origin_x_mm: cols as f32 * cell_diameter_mm / 2.0,
            origin_y_mm,
            staging_cell: GridCell::new(cols / 2, rows / 2),
        }
    }

    /// Planar (x, y) offset of a cell center from the shoulder, in mm
    pub fn cell_center(&self, cell: GridCell) -> (f32, f32) {
        let d = self.cell_diameter_mm;
        (
            cell.col as f32 * d + d / 2.0 - self.origin_x_mm,
            cell.row as f32 * d + d / 2.0 - self.origin_y_mm,
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            // Staging near the middle of the cart, offset one column toward
            // the door side so the first swing clears the wall
            staging_cell: GridCell::new(4, 4),
            ..Self::shoulder_centered(11, 7, 78.0, -6.0)
        }
    }
}

/// Per-axis stepper drive parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisConfig {
    /// Joint pulley tooth count
    pub pulley_teeth: u16,
    /// Motor pulley tooth count
    pub motor_teeth: u16,
    /// Full steps per motor rotation (typically 200 for 1.8° motors)
    pub full_steps_per_rotation: u16,
    /// Microsteps per full step
    pub microsteps: u8,
    /// Direction line is wired inverted on this axis
    pub dir_inverted: bool,
    /// Step pulse width (each edge held this long) in µs
    pub pulse_width_us: u32,
}

impl AxisConfig {
    /// Microsteps per degree of joint rotation
    ///
    /// pulley ratio × steps per revolution / 360, scaled by microstep mode.
    pub fn steps_per_degree(&self) -> f32 {
        let ratio = self.pulley_teeth as f32 / self.motor_teeth as f32;
        let steps_per_rev = self.full_steps_per_rotation as f32 * self.microsteps as f32;
        ratio * steps_per_rev / 360.0
    }
}

/// Motion profile timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Inter-step delay at full speed in µs
    pub cruise_delay_us: u32,
    /// Inter-step delay at rest (start/end of a move) in µs
    pub start_delay_us: u32,
    /// Number of steps over which speed ramps in and out
    pub ease_window: u16,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            cruise_delay_us: 1_000,
            start_delay_us: 4_000,
            ease_window: 160,
        }
    }
}

/// Homing protocol parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HomingConfig {
    /// Angle each axis backs away from its switch before seeking, degrees
    pub backoff_deg: f32,
    /// Constant inter-step delay during homing in µs (no easing; slower
    /// than cruise so a switch trip is never overrun)
    pub seek_delay_us: u32,
    /// Maximum axis-1 travel while seeking its switch, degrees
    pub travel_axis1_deg: f32,
    /// Maximum axis-2 travel while seeking its switch, degrees
    pub travel_axis2_deg: f32,
    /// Calibration offset applied to axis 1 after both switches are found,
    /// in steps (positive = toward the wall)
    pub calibration_steps_axis1: i32,
    /// Calibration offset applied to axis 2, in steps
    pub calibration_steps_axis2: i32,
    /// Shared limit line reads high when either switch is tripped
    pub limit_active_high: bool,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            backoff_deg: 10.0,
            seek_delay_us: 2_000,
            travel_axis1_deg: 190.0,
            travel_axis2_deg: 370.0,
            calibration_steps_axis1: 32,
            calibration_steps_axis2: 18,
            limit_active_high: true,
        }
    }
}

/// Complete machine configuration
///
/// Supplied once at startup; the motion core never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Arm link geometry
    pub arm: ArmGeometry,
    /// Jar grid geometry
    pub grid: GridConfig,
    /// First (shoulder) axis drive parameters
    pub axis1: AxisConfig,
    /// Second (elbow) axis drive parameters
    pub axis2: AxisConfig,
    /// Move timing profile
    pub motion: MotionConfig,
    /// Homing protocol parameters
    pub homing: HomingConfig,
    /// Weekday to measure-index mapping
    pub schedule: DaySchedule,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            arm: ArmGeometry::default(),
            grid: GridConfig::default(),
            // 116T and 80T joint pulleys on 20T motor pulleys, 1.8° motors,
            // 1/8 microstepping. The second axis direction line is wired
            // inverted relative to the first.
            axis1: AxisConfig {
                pulley_teeth: 116,
                motor_teeth: 20,
                full_steps_per_rotation: 200,
                microsteps: 8,
                dir_inverted: false,
                pulse_width_us: 20,
            },
            axis2: AxisConfig {
                pulley_teeth: 80,
                motor_teeth: 20,
                full_steps_per_rotation: 200,
                microsteps: 8,
                dir_inverted: true,
                pulse_width_us: 20,
            },
            motion: MotionConfig::default(),
            homing: HomingConfig::default(),
            schedule: DaySchedule::default(),
        }
    }
}
