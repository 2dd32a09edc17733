//! [`Args`] definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use leave_shared::types::{EmployeeId, LeaveAllocationId, LeaveTypeId};
use rust_decimal::Decimal;

/// Runs leave allocation rules against a JSON scenario.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the scenario file.
    #[arg(short, long)]
    pub scenario: PathBuf,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the validator.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the scenario's candidate allocation before save.
    Validate,
    /// Reconcile the scenario's candidate as an edit of a submitted allocation.
    Reconcile,
    /// Preview the carry-forward an allocation starting on a date would receive.
    CarryForward {
        /// Employee ID.
        #[arg(long)]
        employee: EmployeeId,
        /// Leave type ID.
        #[arg(long)]
        leave_type: LeaveTypeId,
        /// Start date of the new allocation.
        #[arg(long)]
        as_of: NaiveDate,
    },
    /// Compare an amount with the leave type's per-period cap.
    CapCheck {
        /// Employee ID.
        #[arg(long)]
        employee: EmployeeId,
        /// Leave type ID.
        #[arg(long)]
        leave_type: LeaveTypeId,
        /// First day of the range.
        #[arg(long)]
        from: NaiveDate,
        /// Last day of the range.
        #[arg(long)]
        to: NaiveDate,
        /// Candidate amount in days.
        #[arg(long)]
        amount: Decimal,
        /// Allocation to leave out of the period total.
        #[arg(long)]
        exclude: Option<LeaveAllocationId>,
    },
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
