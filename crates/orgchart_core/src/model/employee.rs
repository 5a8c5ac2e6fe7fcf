//! Employee record and its joined listing projection.
//!
//! # Invariants
//! - `role_id` references an existing role.
//! - `manager_id`, when set, references an existing employee, and following
//!   manager links from any employee terminates at a root (`None`).

use super::role::{RoleId, Salary};
use serde::{Deserialize, Serialize};

/// Store-assigned employee identity.
pub type EmployeeId = i64;

/// Person holding one role and optionally reporting to another employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    /// `None` for employees at the top of a reporting chain.
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated input for inserting an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    pub manager_id: Option<EmployeeId>,
}

/// Employee flattened with role, department and manager name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeListing {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub department: String,
    pub salary: Salary,
    /// Manager full name; absent when the employee has no manager.
    pub manager: Option<String>,
}

impl EmployeeListing {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

