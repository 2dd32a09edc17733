//! Common types used across the workspace.

pub mod date_range;
pub mod id;

pub use date_range::DateRange;
pub use id::*;
