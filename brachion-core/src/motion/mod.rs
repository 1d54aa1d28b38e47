//! Motion planning
//!
//! Step planning from joint-angle deltas, the quadratic ease-in/out timing
//! profile, and joint-state bookkeeping.

pub mod plan;
pub mod profile;
pub mod state;

pub use plan::{AxisId, Direction, MotionError, StepPlan};
pub use profile::MotionProfile;
pub use state::JointState;
