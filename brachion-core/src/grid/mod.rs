//! Jar grid addressing and traversal

pub mod path;

pub use path::{GridCell, Serpentine};
