//! Core of the orgchart administration tool.
//! Owns the organization schema, its repository and the integrity rules
//! applied before any write.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Employee, EmployeeId, EmployeeListing, NewEmployee};
pub use model::role::{NewRole, Role, RoleId, RoleListing, Salary, SalaryParseError};
pub use model::ValidationError;
pub use repo::org_repo::{OrgRepository, SqliteOrgRepository};
pub use repo::{RepoError, RepoResult};
pub use service::org_service::{OrgService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
