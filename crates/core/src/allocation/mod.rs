//! Leave allocation rules.
//!
//! This module implements allocation validation:
//! - Allocation records and their reports
//! - Individual rule checks
//! - Carry-forward sizing
//! - Per-period cap enforcement
//! - The `LeaveStore` repository seam and an in-memory implementation
//! - The validator entry points

pub mod cap;
pub mod carry_forward;
pub mod error;
pub mod memory;
pub mod policy;
pub mod query;
pub mod rules;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod rules_props;

pub use error::AllocationError;
pub use memory::InMemoryLeaveStore;
pub use policy::AllocationPolicy;
pub use query::{AllocationOrder, AllocationQuery, DateFilter};
pub use service::AllocationValidator;
pub use store::LeaveStore;
pub use types::{
    AllocationField, AllocationSummary, AllocationWarning, CapCheck, DocStatus, LeaveAllocation,
    ReconcileReport, ValidationReport,
};
