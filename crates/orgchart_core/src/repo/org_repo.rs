//! Organization repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read the department, role and employee tables and their joined views.
//! - Insert rows and update an employee's role.
//! - Answer the existence lookups the service uses for reference checks.
//!
//! # Invariants
//! - Listings are ordered by identity so repeated reads are stable.
//! - The manager join is a LEFT join: employees without a manager are listed
//!   with `manager = None`.
//! - No state is cached between calls.

use super::schema_check::ensure_connection_ready;
use super::{RepoError, RepoResult};
use crate::model::department::{Department, DepartmentId};
use crate::model::employee::{Employee, EmployeeId, EmployeeListing, NewEmployee};
use crate::model::role::{NewRole, Role, RoleId, RoleListing, Salary};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEPARTMENT_LIST_SQL: &str = "SELECT id, name
FROM department
ORDER BY id ASC;";

const ROLE_LIST_SQL: &str = "SELECT
    role.id AS id,
    role.title AS title,
    role.salary AS salary,
    department.name AS department
FROM role
JOIN department ON role.department_id = department.id
ORDER BY role.id ASC;";

// `||` yields NULL when the manager row is missing, which maps to `None`.
const EMPLOYEE_LIST_SQL: &str = "SELECT
    employee.id AS id,
    employee.first_name AS first_name,
    employee.last_name AS last_name,
    role.title AS title,
    department.name AS department,
    role.salary AS salary,
    manager.first_name || ' ' || manager.last_name AS manager
FROM employee
JOIN role ON employee.role_id = role.id
JOIN department ON role.department_id = department.id
LEFT JOIN employee AS manager ON employee.manager_id = manager.id
ORDER BY employee.id ASC;";

/// Data-access contract for the organization tables.
pub trait OrgRepository {
    /// Lists every department.
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
    /// Lists every role with its department name.
    fn list_roles(&self) -> RepoResult<Vec<RoleListing>>;
    /// Lists every employee with role, department and manager name.
    fn list_employees(&self) -> RepoResult<Vec<EmployeeListing>>;
    /// Inserts one department.
    fn insert_department(&self, name: &str) -> RepoResult<Department>;
    /// Inserts one role.
    fn insert_role(&self, role: &NewRole) -> RepoResult<Role>;
    /// Inserts one employee.
    fn insert_employee(&self, employee: &NewEmployee) -> RepoResult<Employee>;
    /// Points one employee at another role.
    fn update_employee_role(&self, employee_id: EmployeeId, role_id: RoleId) -> RepoResult<()>;
    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool>;
    fn role_exists(&self, id: RoleId) -> RepoResult<bool>;
    fn count_roles(&self) -> RepoResult<u64>;
    /// Loads one employee row without joins.
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
}

/// SQLite-backed organization repository borrowing the shared connection.
pub struct SqliteOrgRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrgRepository<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - Returns an error when the schema version or table shape is unexpected.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl OrgRepository for SqliteOrgRepository<'_> {
    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self.conn.prepare(DEPARTMENT_LIST_SQL)?;
        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(Department {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(departments)
    }

    fn list_roles(&self) -> RepoResult<Vec<RoleListing>> {
        let mut stmt = self.conn.prepare(ROLE_LIST_SQL)?;
        let mut rows = stmt.query([])?;
        let mut roles = Vec::new();
        while let Some(row) = rows.next()? {
            roles.push(RoleListing {
                id: row.get("id")?,
                title: row.get("title")?,
                salary: parse_salary(row, "role.salary")?,
                department: row.get("department")?,
            });
        }
        Ok(roles)
    }

    fn list_employees(&self) -> RepoResult<Vec<EmployeeListing>> {
        let mut stmt = self.conn.prepare(EMPLOYEE_LIST_SQL)?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(EmployeeListing {
                id: row.get("id")?,
                first_name: row.get("first_name")?,
                last_name: row.get("last_name")?,
                title: row.get("title")?,
                department: row.get("department")?,
                salary: parse_salary(row, "role.salary")?,
                manager: row.get("manager")?,
            });
        }
        Ok(employees)
    }

    fn insert_department(&self, name: &str) -> RepoResult<Department> {
        self.conn
            .execute("INSERT INTO department (name) VALUES (?1);", [name])?;
        Ok(Department {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn insert_role(&self, role: &NewRole) -> RepoResult<Role> {
        self.conn.execute(
            "INSERT INTO role (title, salary, department_id) VALUES (?1, ?2, ?3);",
            params![role.title, role.salary.cents(), role.department_id],
        )?;
        Ok(Role {
            id: self.conn.last_insert_rowid(),
            title: role.title.clone(),
            salary: role.salary,
            department_id: role.department_id,
        })
    }

    fn insert_employee(&self, employee: &NewEmployee) -> RepoResult<Employee> {
        self.conn.execute(
            "INSERT INTO employee (first_name, last_name, role_id, manager_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                employee.first_name,
                employee.last_name,
                employee.role_id,
                employee.manager_id,
            ],
        )?;
        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            role_id: employee.role_id,
            manager_id: employee.manager_id,
        })
    }

    fn update_employee_role(&self, employee_id: EmployeeId, role_id: RoleId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employee SET role_id = ?1 WHERE id = ?2;",
            params![role_id, employee_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "employee",
                id: employee_id,
            });
        }
        Ok(())
    }

    fn department_exists(&self, id: DepartmentId) -> RepoResult<bool> {
        row_exists(self.conn, "SELECT EXISTS(SELECT 1 FROM department WHERE id = ?1);", id)
    }

    fn role_exists(&self, id: RoleId) -> RepoResult<bool> {
        row_exists(self.conn, "SELECT EXISTS(SELECT 1 FROM role WHERE id = ?1);", id)
    }

    fn count_roles(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM role;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative role count `{count}`")))
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                "SELECT id, first_name, last_name, role_id, manager_id
                 FROM employee
                 WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Employee {
                        id: row.get("id")?,
                        first_name: row.get("first_name")?,
                        last_name: row.get("last_name")?,
                        role_id: row.get("role_id")?,
                        manager_id: row.get("manager_id")?,
                    })
                },
            )
            .optional()?;
        Ok(employee)
    }
}

fn row_exists(conn: &Connection, sql: &str, id: i64) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(sql, [id], |row| row.get(0))?;
    Ok(exists == 1)
}

fn parse_salary(row: &Row<'_>, column: &str) -> RepoResult<Salary> {
    let cents: i64 = row.get("salary")?;
    Salary::from_cents(cents)
        .map_err(|_| RepoError::InvalidData(format!("invalid salary `{cents}` in {column}")))
}
