//! Core business logic for leave allocation.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached only through the [`allocation::LeaveStore`] trait.
//!
//! # Modules
//!
//! - `hr` - Leave types, leave periods and employee lookups
//! - `allocation` - Allocation validation, carry-forward and cap enforcement

pub mod allocation;
pub mod hr;

pub use allocation::{AllocationError, AllocationValidator, LeaveStore};
