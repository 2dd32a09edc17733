//! Employee lookup record.

use leave_shared::types::{CompanyId, EmployeeId};
use serde::{Deserialize, Serialize};

/// The slice of employee master data the allocation rules need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// Employee ID.
    pub id: EmployeeId,
    /// Display name, copied onto allocations when they are validated.
    pub name: String,
    /// Company the employee works for; scopes leave period resolution.
    pub company_id: CompanyId,
}
