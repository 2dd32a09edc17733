//! HR master data consumed by allocation rules.
//!
//! These records are owned elsewhere; the allocation module only reads them.

pub mod employee;
pub mod leave_type;
pub mod period;

pub use employee::EmployeeInfo;
pub use leave_type::LeaveType;
pub use period::LeavePeriod;
