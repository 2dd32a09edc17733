//! Leave type configuration.

use leave_shared::types::LeaveTypeId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A configured kind of leave (casual, sick, earned, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaveType {
    /// Unique identifier.
    pub id: LeaveTypeId,
    /// Human-readable name (e.g., "Casual Leave").
    pub name: String,
    /// Leave without pay; such types can never be allocated.
    pub is_lwp: bool,
    /// Unused balance may be carried into the next allocation.
    pub is_carry_forward: bool,
    /// Days after which carried-forward leave expires. `None` or zero never expires.
    pub carry_forward_expiry_days: Option<u32>,
    /// Upper bound on leaves allocated within one leave period. `None` or zero is uncapped.
    pub max_leaves_allowed: Option<Decimal>,
    /// Balance accrues over time, so a zero allocation is legal.
    pub is_earned_leave: bool,
    /// Granted in lieu of extra work, so a zero allocation is legal.
    pub is_compensatory: bool,
    /// Approved usage may exceed the allocation with only a warning.
    pub allow_negative: bool,
}

impl LeaveType {
    /// Creates a plain leave type with every flag off.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Finite carry-forward expiry window in days.
    ///
    /// Only carry-forward types have an expiry; zero is treated as "never".
    #[must_use]
    pub fn carry_forward_expiry_days(&self) -> Option<u32> {
        if !self.is_carry_forward {
            return None;
        }
        self.carry_forward_expiry_days.filter(|days| *days > 0)
    }

    /// Per-period allocation cap, if any.
    #[must_use]
    pub fn max_leaves(&self) -> Option<Decimal> {
        self.max_leaves_allowed.filter(|max| *max > Decimal::ZERO)
    }

    /// Returns true if an allocation of zero days is acceptable for this type.
    #[must_use]
    pub fn allows_zero_allocation(&self) -> bool {
        self.is_earned_leave || self.is_compensatory
    }
}
