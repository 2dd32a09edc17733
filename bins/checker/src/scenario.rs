//! JSON scenarios: master data, existing allocations and a candidate.

use std::path::Path;

use anyhow::Context;
use leave_core::allocation::{
    AllocationError, AllocationPolicy, AllocationValidator, CapCheck, InMemoryLeaveStore,
    LeaveAllocation, ReconcileReport, ValidationReport,
};
use leave_core::hr::{EmployeeInfo, LeavePeriod, LeaveType};
use leave_shared::types::{DateRange, EmployeeId, LeaveTypeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::args::Command;

/// Approved leave recorded for every day of a range.
#[derive(Debug, Deserialize)]
pub struct ApprovedLeave {
    /// Employee on leave.
    pub employee_id: EmployeeId,
    /// Leave type taken.
    pub leave_type_id: LeaveTypeId,
    /// Days on leave.
    pub range: DateRange,
    /// Leave counted per day; 0.5 for half days.
    #[serde(default = "full_day")]
    pub per_day: Decimal,
}

fn full_day() -> Decimal {
    Decimal::ONE
}

/// Everything a run needs, as read from disk.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Leave type configuration.
    pub leave_types: Vec<LeaveType>,
    /// Employees.
    pub employees: Vec<EmployeeInfo>,
    /// Company leave periods.
    pub periods: Vec<LeavePeriod>,
    /// Existing allocation records.
    pub allocations: Vec<LeaveAllocation>,
    /// Approved leave applications.
    pub approved_leave: Vec<ApprovedLeave>,
    /// Allocation being validated or reconciled.
    pub candidate: Option<LeaveAllocation>,
}

/// Result printed for a run.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Candidate passed validation.
    Validated {
        /// Candidate with derived fields filled in.
        allocation: LeaveAllocation,
        /// Validation report.
        report: ValidationReport,
    },
    /// Candidate edit was reconciled and persisted.
    Reconciled {
        /// Candidate with the recomputed totals.
        allocation: LeaveAllocation,
        /// Reconciliation report.
        report: ReconcileReport,
    },
    /// Carry-forward preview.
    CarryForward {
        /// Unused balance of the previous allocation.
        carry_forwarded_leaves: Decimal,
    },
    /// Cap comparison.
    Cap {
        /// Cap outcome.
        cap: CapCheck,
        /// Whether the amount would be rejected.
        exceeds: bool,
    },
    /// A rule rejected the request.
    Rejected {
        /// Machine-readable error code.
        code: &'static str,
        /// HTTP status the error maps to.
        status: u16,
        /// Human-readable message.
        message: String,
    },
}

impl Outcome {
    /// Returns true if a rule rejected the request.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<AllocationError> for Outcome {
    fn from(err: AllocationError) -> Self {
        Self::Rejected {
            code: err.error_code(),
            status: err.http_status_code(),
            message: err.to_string(),
        }
    }
}

impl Scenario {
    /// Reads a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    /// Loads master data and records into a fresh store; returns the store and the candidate.
    pub fn into_store(self) -> (InMemoryLeaveStore, Option<LeaveAllocation>) {
        let store = InMemoryLeaveStore::new();
        for leave_type in self.leave_types {
            store.insert_leave_type(leave_type);
        }
        for employee in self.employees {
            store.insert_employee(employee);
        }
        for period in self.periods {
            store.insert_period(period);
        }
        for allocation in self.allocations {
            store.insert_allocation(allocation);
        }
        for leave in self.approved_leave {
            store.record_approved_leave(
                leave.employee_id,
                leave.leave_type_id,
                leave.range,
                leave.per_day,
            );
        }
        (store, self.candidate)
    }
}

/// Runs `command` against the scenario.
///
/// Rule violations become [`Outcome::Rejected`]; only malformed input is an error.
///
/// # Errors
///
/// Returns an error if the command needs a candidate and the scenario has none.
pub fn run(
    scenario: Scenario,
    command: &Command,
    policy: AllocationPolicy,
) -> anyhow::Result<Outcome> {
    let (store, candidate) = scenario.into_store();
    let validator = AllocationValidator::with_policy(&store, policy);

    let result = match command {
        Command::Validate => {
            let mut allocation = candidate.context("Scenario has no candidate allocation")?;
            validator
                .validate(&mut allocation)
                .map(|report| Outcome::Validated { allocation, report })
        }
        Command::Reconcile => {
            let mut allocation = candidate.context("Scenario has no candidate allocation")?;
            validator
                .reconcile_after_submit(&mut allocation)
                .map(|report| Outcome::Reconciled { allocation, report })
        }
        Command::CarryForward {
            employee,
            leave_type,
            as_of,
        } => validator
            .compute_carry_forward(*employee, *leave_type, *as_of)
            .map(|carry_forwarded_leaves| Outcome::CarryForward {
                carry_forwarded_leaves,
            }),
        Command::CapCheck {
            employee,
            leave_type,
            from,
            to,
            amount,
            exclude,
        } => validator
            .cap_check(
                *employee,
                *leave_type,
                DateRange::new(*from, *to),
                *amount,
                *exclude,
            )
            .map(|cap| Outcome::Cap {
                exceeds: cap.exceeds(),
                cap,
            }),
    };

    Ok(result.unwrap_or_else(Outcome::from))
}
