//! Weekly dispensing schedule

pub mod week;

pub use week::{DaySchedule, Weekday};
