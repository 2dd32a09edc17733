//! Allocation error types.
//!
//! Every rule check fails with its own variant so callers can branch on the
//! kind of violation. Variants carry the identifiers and computed values
//! needed to render a message for the user.

use chrono::NaiveDate;
use leave_shared::AppError;
use leave_shared::types::{EmployeeId, LeaveAllocationId, LeaveTypeId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating or reconciling an allocation.
#[derive(Debug, Error)]
pub enum AllocationError {
    // ========== Period Errors ==========
    /// To date is not after from date.
    #[error("To date {to_date} must be after from date {from_date}")]
    InvalidPeriod {
        /// Allocation start.
        from_date: NaiveDate,
        /// Allocation end.
        to_date: NaiveDate,
    },

    /// Carry-forward allocation spans more days than the leave type's expiry window.
    #[error(
        "Leave allocation period of {span_days} days cannot exceed carry forward expiry limit of {expiry_days} days"
    )]
    CarryForwardExpiry {
        /// Days between from and to date.
        span_days: i64,
        /// Expiry window of the leave type.
        expiry_days: u32,
    },

    // ========== Leave Type Errors ==========
    /// Leave type is leave without pay.
    #[error("Leave type {leave_type} cannot be allocated since it is leave without pay")]
    LwpNotAllocatable {
        /// Leave type name.
        leave_type: String,
    },

    /// Leave type does not allow carry-forward.
    #[error("Leave type {leave_type} cannot be carry-forwarded")]
    CarryForwardNotAllowed {
        /// Leave type name.
        leave_type: String,
    },

    // ========== Amount Errors ==========
    /// User-entered amount is not a multiple of the allocation step.
    #[error("Leaves must be allocated in multiples of {step}, got {value}")]
    Granularity {
        /// Rejected amount.
        value: Decimal,
        /// Required step.
        step: Decimal,
    },

    /// Allocation is zero for a leave type that requires a positive amount.
    #[error("Total leaves allocated is mandatory for leave type {leave_type}")]
    MandatoryAllocation {
        /// Leave type name.
        leave_type: String,
    },

    /// Allocation grants more days than the range covers.
    #[error(
        "Total allocated leaves {total_leaves_allocated} are more than the {period_days} days in the period"
    )]
    ExceedsPeriodLength {
        /// Effective allocation.
        total_leaves_allocated: Decimal,
        /// Inclusive day count of the allocation range.
        period_days: i64,
    },

    /// Allocation would push the leave period's total over the leave type's cap.
    #[error(
        "Total allocated leaves {projected_total} exceed the maximum allocation of {max_allowed} for leave type {leave_type} and employee {employee_id} in the period"
    )]
    OverAllocationCap {
        /// Employee.
        employee_id: EmployeeId,
        /// Leave type name.
        leave_type: String,
        /// Cap configured on the leave type.
        max_allowed: Decimal,
        /// Period total including the candidate.
        projected_total: Decimal,
    },

    /// Edited allocation is below leave already approved for its range.
    #[error(
        "Total allocated leaves {total_leaves_allocated} cannot be less than already approved leaves {leaves_taken} for the period"
    )]
    LessAllocation {
        /// Allocation after the edit.
        total_leaves_allocated: Decimal,
        /// Approved leave days in the range.
        leaves_taken: Decimal,
    },

    // ========== Conflict Errors ==========
    /// A submitted allocation of the same kind already covers part of the range.
    #[error(
        "{leave_type} already allocated for employee {employee_id} for period {from_date} to {to_date} (reference: {existing})"
    )]
    Overlap {
        /// Conflicting record.
        existing: LeaveAllocationId,
        /// Employee.
        employee_id: EmployeeId,
        /// Leave type name.
        leave_type: String,
        /// Requested start.
        from_date: NaiveDate,
        /// Requested end.
        to_date: NaiveDate,
    },

    /// A later carry-forward allocation already consumed this balance.
    #[error(
        "Leave cannot be allocated before {future_from_date}, as leave balance has already been carry-forwarded in the future leave allocation record {future}"
    )]
    BackDatedAllocation {
        /// The later carry-forward allocation.
        future: LeaveAllocationId,
        /// Its start date.
        future_from_date: NaiveDate,
    },

    // ========== Lookup Errors ==========
    /// Leave type not found.
    #[error("Leave type not found: {0}")]
    LeaveTypeNotFound(LeaveTypeId),

    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// Allocation not found.
    #[error("Leave allocation not found: {0}")]
    AllocationNotFound(LeaveAllocationId),

    /// Post-submission reconciliation requires a saved, submitted record.
    #[error("Leave allocation must be submitted before it can be reconciled")]
    NotSubmitted,

    // ========== Store Errors ==========
    /// Persistence layer error.
    #[error("Store error: {0}")]
    Store(String),
}

impl AllocationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::CarryForwardExpiry { .. } => "CARRY_FORWARD_EXPIRY",
            Self::LwpNotAllocatable { .. } => "LWP_NOT_ALLOCATABLE",
            Self::CarryForwardNotAllowed { .. } => "CARRY_FORWARD_NOT_ALLOWED",
            Self::Granularity { .. } => "GRANULARITY",
            Self::MandatoryAllocation { .. } => "MANDATORY_ALLOCATION",
            Self::ExceedsPeriodLength { .. } => "EXCEEDS_PERIOD_LENGTH",
            Self::OverAllocationCap { .. } => "OVER_ALLOCATION_CAP",
            Self::LessAllocation { .. } => "LESS_ALLOCATION",
            Self::Overlap { .. } => "OVERLAP",
            Self::BackDatedAllocation { .. } => "BACK_DATED_ALLOCATION",
            Self::LeaveTypeNotFound(_) => "LEAVE_TYPE_NOT_FOUND",
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::AllocationNotFound(_) => "ALLOCATION_NOT_FOUND",
            Self::NotSubmitted => "NOT_SUBMITTED",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - rule violations
            Self::InvalidPeriod { .. }
            | Self::CarryForwardExpiry { .. }
            | Self::LwpNotAllocatable { .. }
            | Self::CarryForwardNotAllowed { .. }
            | Self::Granularity { .. }
            | Self::MandatoryAllocation { .. }
            | Self::ExceedsPeriodLength { .. }
            | Self::OverAllocationCap { .. }
            | Self::LessAllocation { .. }
            | Self::NotSubmitted => 400,

            // 404 Not Found
            Self::LeaveTypeNotFound(_)
            | Self::EmployeeNotFound(_)
            | Self::AllocationNotFound(_) => 404,

            // 409 Conflict - other records stand in the way
            Self::Overlap { .. } | Self::BackDatedAllocation { .. } => 409,

            // 500 Internal Server Error
            Self::Store(_) => 500,
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            500 => Self::Database(message),
            _ => Self::Validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AllocationError::InvalidPeriod {
                from_date: d(2024, 1, 10),
                to_date: d(2024, 1, 1),
            }
            .error_code(),
            "INVALID_PERIOD"
        );
        assert_eq!(
            AllocationError::Granularity {
                value: dec!(1.3),
                step: dec!(0.5),
            }
            .error_code(),
            "GRANULARITY"
        );
        assert_eq!(AllocationError::NotSubmitted.error_code(), "NOT_SUBMITTED");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            AllocationError::MandatoryAllocation {
                leave_type: "Casual".into(),
            }
            .http_status_code(),
            400
        );
        assert_eq!(
            AllocationError::EmployeeNotFound(EmployeeId::new()).http_status_code(),
            404
        );
        assert_eq!(
            AllocationError::BackDatedAllocation {
                future: LeaveAllocationId::new(),
                future_from_date: d(2025, 1, 1),
            }
            .http_status_code(),
            409
        );
        assert_eq!(AllocationError::Store("down".into()).http_status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = AllocationError::LessAllocation {
            total_leaves_allocated: dec!(4),
            leaves_taken: dec!(6.5),
        };
        assert_eq!(
            err.to_string(),
            "Total allocated leaves 4 cannot be less than already approved leaves 6.5 for the period"
        );

        let err = AllocationError::CarryForwardExpiry {
            span_days: 45,
            expiry_days: 30,
        };
        assert_eq!(
            err.to_string(),
            "Leave allocation period of 45 days cannot exceed carry forward expiry limit of 30 days"
        );
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = AllocationError::Overlap {
            existing: LeaveAllocationId::new(),
            employee_id: EmployeeId::new(),
            leave_type: "Casual".into(),
            from_date: d(2024, 1, 1),
            to_date: d(2024, 1, 10),
        }
        .into();
        assert!(matches!(err, AppError::Conflict(_)));

        let err: AppError = AllocationError::LwpNotAllocatable {
            leave_type: "LWP".into(),
        }
        .into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = AllocationError::LeaveTypeNotFound(LeaveTypeId::new()).into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
