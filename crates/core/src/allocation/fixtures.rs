//! Shared builders for allocation tests.

use chrono::NaiveDate;
use leave_shared::types::{
    CompanyId, DateRange, EmployeeId, LeaveAllocationId, LeavePeriodId, LeaveTypeId,
};
use rust_decimal::Decimal;

use super::memory::InMemoryLeaveStore;
use super::types::{DocStatus, LeaveAllocation};
use crate::hr::{EmployeeInfo, LeavePeriod, LeaveType};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn range(from: NaiveDate, to: NaiveDate) -> DateRange {
    DateRange::new(from, to)
}

/// A store with one employee and one company, plus the ids needed to add records.
pub struct Fixture {
    pub store: InMemoryLeaveStore,
    pub employee: EmployeeInfo,
    pub company_id: CompanyId,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryLeaveStore::new();
        let company_id = CompanyId::new();
        let employee = EmployeeInfo {
            id: EmployeeId::new(),
            name: "Asha Rao".into(),
            company_id,
        };
        store.insert_employee(employee.clone());
        Self {
            store,
            employee,
            company_id,
        }
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee.id
    }

    pub fn leave_type(&self, leave_type: LeaveType) -> LeaveType {
        self.store.insert_leave_type(leave_type.clone());
        leave_type
    }

    pub fn period(&self, from: NaiveDate, to: NaiveDate) -> LeavePeriod {
        let period = make_period(self.company_id, from, to);
        self.store.insert_period(period.clone());
        period
    }

    /// Saves a submitted allocation of `total` days.
    pub fn submitted(
        &self,
        leave_type_id: LeaveTypeId,
        from: NaiveDate,
        to: NaiveDate,
        total: Decimal,
        carry_forward: bool,
    ) -> LeaveAllocationId {
        self.store.insert_allocation(make_submitted(
            self.employee_id(),
            leave_type_id,
            from,
            to,
            total,
            carry_forward,
        ))
    }

    /// Records approved leave of one day per date.
    pub fn approve(&self, leave_type_id: LeaveTypeId, from: NaiveDate, to: NaiveDate) {
        self.store
            .approve_leave(self.employee_id(), leave_type_id, range(from, to));
    }
}

pub fn make_leave_type(name: &str) -> LeaveType {
    LeaveType {
        id: LeaveTypeId::new(),
        ..LeaveType::new(name)
    }
}

pub fn make_capped(name: &str, max: Decimal) -> LeaveType {
    LeaveType {
        max_leaves_allowed: Some(max),
        ..make_leave_type(name)
    }
}

pub fn make_carry_forward(name: &str, expiry_days: Option<u32>) -> LeaveType {
    LeaveType {
        is_carry_forward: true,
        carry_forward_expiry_days: expiry_days,
        ..make_leave_type(name)
    }
}

pub fn make_period(company_id: CompanyId, from: NaiveDate, to: NaiveDate) -> LeavePeriod {
    LeavePeriod {
        id: LeavePeriodId::new(),
        company_id,
        name: format!("{}", from.format("%Y")),
        range: range(from, to),
        is_active: true,
    }
}

pub fn make_submitted(
    employee_id: EmployeeId,
    leave_type_id: LeaveTypeId,
    from: NaiveDate,
    to: NaiveDate,
    total: Decimal,
    carry_forward: bool,
) -> LeaveAllocation {
    let mut allocation = LeaveAllocation::draft(employee_id, leave_type_id, from, to, total);
    allocation.carry_forward = carry_forward;
    if carry_forward {
        allocation.new_leaves_allocated = Decimal::ZERO;
        allocation.carry_forwarded_leaves = total;
    }
    allocation.total_leaves_allocated = total;
    allocation.doc_status = DocStatus::Submitted;
    allocation
}
