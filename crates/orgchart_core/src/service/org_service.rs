//! Organization use-case service.
//!
//! # Responsibility
//! - Expose the list/add/update operations the shell drives.
//! - Validate text fields and every referenced identity before writing.
//! - Refuse employee creation while no role exists.
//!
//! # Invariants
//! - A failed check never leaves a partial write behind: each operation issues
//!   at most one mutating statement, after all checks pass.
//! - Manager chains reachable from a newly assigned manager must terminate.
//! - The service is storage-agnostic; it only talks to `OrgRepository`.

use crate::model::department::{Department, DepartmentId};
use crate::model::employee::{Employee, EmployeeId, EmployeeListing, NewEmployee};
use crate::model::role::{NewRole, Role, RoleId, RoleListing, Salary};
use crate::model::{normalize_text, ValidationError};
use crate::repo::org_repo::OrgRepository;
use crate::repo::RepoError;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from organization service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// A text field failed validation.
    Validation(ValidationError),
    /// Employee creation requested while the role table is empty.
    NoRolesAvailable,
    DepartmentNotFound(DepartmentId),
    RoleNotFound(RoleId),
    EmployeeNotFound(EmployeeId),
    ManagerNotFound(EmployeeId),
    /// Following manager links from `manager_id` revisits an employee.
    ManagerCycle { manager_id: EmployeeId },
    /// Repository or store failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Whether the operation was refused up front rather than failing.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoRolesAvailable)
    }

    /// Stable, content-free code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NoRolesAvailable => "no_roles",
            Self::DepartmentNotFound(_) => "department_not_found",
            Self::RoleNotFound(_) => "role_not_found",
            Self::EmployeeNotFound(_) => "employee_not_found",
            Self::ManagerNotFound(_) => "manager_not_found",
            Self::ManagerCycle { .. } => "manager_cycle",
            Self::Repo(RepoError::ConstraintViolation(_)) => "constraint_violation",
            Self::Repo(_) => "store_error",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoRolesAvailable => write!(f, "no roles available; add a role first"),
            Self::DepartmentNotFound(id) => write!(f, "department not found: {id}"),
            Self::RoleNotFound(id) => write!(f, "role not found: {id}"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::ManagerNotFound(id) => write!(f, "manager not found: {id}"),
            Self::ManagerCycle { manager_id } => write!(
                f,
                "reporting chain above employee {manager_id} loops back on itself"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                entity: "employee",
                id,
            } => Self::EmployeeNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Organization service facade over one repository.
pub struct OrgService<R: OrgRepository> {
    repo: R,
}

impl<R: OrgRepository> OrgService<R> {
    /// Creates a service from a repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all departments in store order.
    pub fn list_departments(&self) -> ServiceResult<Vec<Department>> {
        traced("department_list", || Ok(self.repo.list_departments()?))
    }

    /// Lists all roles with their department names.
    pub fn list_roles(&self) -> ServiceResult<Vec<RoleListing>> {
        traced("role_list", || Ok(self.repo.list_roles()?))
    }

    /// Lists all employees with role, department, salary and manager name.
    pub fn list_employees(&self) -> ServiceResult<Vec<EmployeeListing>> {
        traced("employee_list", || Ok(self.repo.list_employees()?))
    }

    /// Creates one department.
    ///
    /// # Errors
    /// - `Validation` when `name` is blank.
    pub fn add_department(&self, name: &str) -> ServiceResult<Department> {
        traced("department_add", || {
            let name = normalize_text("department name", name)?;
            let department = self.repo.insert_department(&name)?;
            debug!(
                "event=department_add module=service department_id={}",
                department.id
            );
            Ok(department)
        })
    }

    /// Creates one role under an existing department.
    ///
    /// # Errors
    /// - `Validation` when `title` is blank.
    /// - `DepartmentNotFound` when `department_id` is unknown; nothing is written.
    pub fn add_role(
        &self,
        title: &str,
        salary: Salary,
        department_id: DepartmentId,
    ) -> ServiceResult<Role> {
        traced("role_add", || {
            let title = normalize_text("role title", title)?;
            if !self.repo.department_exists(department_id)? {
                return Err(ServiceError::DepartmentNotFound(department_id));
            }
            let role = self.repo.insert_role(&NewRole {
                title,
                salary,
                department_id,
            })?;
            debug!(
                "event=role_add module=service role_id={} department_id={}",
                role.id, role.department_id
            );
            Ok(role)
        })
    }

    /// Refuses with `NoRolesAvailable` while the role table is empty.
    ///
    /// Callers run this before collecting employee input; the add operations
    /// run it again themselves.
    pub fn ensure_roles_available(&self) -> ServiceResult<()> {
        traced("roles_precondition", || self.check_roles_available())
    }

    fn check_roles_available(&self) -> ServiceResult<()> {
        if self.repo.count_roles()? == 0 {
            return Err(ServiceError::NoRolesAvailable);
        }
        Ok(())
    }

    /// Creates one employee, optionally reporting to an existing employee.
    ///
    /// # Errors
    /// - `NoRolesAvailable` before any other check when no role exists.
    /// - `Validation` for blank names.
    /// - `RoleNotFound` / `ManagerNotFound` for unknown references.
    /// - `ManagerCycle` when the manager's stored chain does not terminate.
    pub fn add_employee(
        &self,
        first_name: &str,
        last_name: &str,
        role_id: RoleId,
        manager_id: Option<EmployeeId>,
    ) -> ServiceResult<Employee> {
        traced("employee_add", || {
            self.insert_employee(first_name, last_name, role_id, manager_id)
        })
    }

    /// Creates one employee at the top of a reporting chain.
    pub fn add_manager(
        &self,
        first_name: &str,
        last_name: &str,
        role_id: RoleId,
    ) -> ServiceResult<Employee> {
        traced("manager_add", || {
            self.insert_employee(first_name, last_name, role_id, None)
        })
    }

    /// Moves one employee to another role; every other column is untouched.
    ///
    /// # Errors
    /// - `EmployeeNotFound` / `RoleNotFound` for unknown ids; nothing is written.
    pub fn update_employee_role(
        &self,
        employee_id: EmployeeId,
        role_id: RoleId,
    ) -> ServiceResult<()> {
        traced("employee_role_update", || {
            if self.repo.get_employee(employee_id)?.is_none() {
                return Err(ServiceError::EmployeeNotFound(employee_id));
            }
            self.ensure_role_exists(role_id)?;
            self.repo.update_employee_role(employee_id, role_id)?;
            debug!(
                "event=employee_role_update module=service employee_id={employee_id} role_id={role_id}"
            );
            Ok(())
        })
    }

    fn insert_employee(
        &self,
        first_name: &str,
        last_name: &str,
        role_id: RoleId,
        manager_id: Option<EmployeeId>,
    ) -> ServiceResult<Employee> {
        self.check_roles_available()?;
        let first_name = normalize_text("first name", first_name)?;
        let last_name = normalize_text("last name", last_name)?;
        self.ensure_role_exists(role_id)?;
        if let Some(manager_id) = manager_id {
            self.ensure_manager_chain_terminates(manager_id)?;
        }

        let employee = self.repo.insert_employee(&NewEmployee {
            first_name,
            last_name,
            role_id,
            manager_id,
        })?;
        debug!(
            "event=employee_insert module=service employee_id={} role_id={} has_manager={}",
            employee.id,
            employee.role_id,
            employee.manager_id.is_some()
        );
        Ok(employee)
    }

    fn ensure_role_exists(&self, role_id: RoleId) -> ServiceResult<()> {
        if !self.repo.role_exists(role_id)? {
            return Err(ServiceError::RoleNotFound(role_id));
        }
        Ok(())
    }

    /// Walks manager links upward from `manager_id` until a root is reached.
    fn ensure_manager_chain_terminates(&self, manager_id: EmployeeId) -> ServiceResult<()> {
        let mut visited = HashSet::new();
        let mut cursor = Some(manager_id);
        while let Some(current) = cursor {
            if !visited.insert(current) {
                return Err(ServiceError::ManagerCycle { manager_id });
            }
            let employee = match self.repo.get_employee(current)? {
                Some(employee) => employee,
                None if current == manager_id => {
                    return Err(ServiceError::ManagerNotFound(manager_id));
                }
                None => {
                    return Err(ServiceError::Repo(RepoError::InvalidData(format!(
                        "employee.manager_id points at missing employee {current}"
                    ))));
                }
            };
            cursor = employee.manager_id;
        }
        Ok(())
    }
}

fn traced<T>(
    event: &'static str,
    operation: impl FnOnce() -> ServiceResult<T>,
) -> ServiceResult<T> {
    let started_at = Instant::now();
    let result = operation();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => info!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(err) if err.is_precondition() => warn!(
            "event={event} module=service status=refused duration_ms={duration_ms} reason={}",
            err.code()
        ),
        Err(err @ ServiceError::Repo(_)) => error!(
            "event={event} module=service status=error duration_ms={duration_ms} error_code={} error={}",
            err.code(),
            err
        ),
        Err(err) => warn!(
            "event={event} module=service status=rejected duration_ms={duration_ms} error_code={}",
            err.code()
        ),
    }
    result
}
