//! Interactive menu loop.
//!
//! # Responsibility
//! - Offer the menu, collect field values, call one service operation per
//!   action and print the outcome.
//! - Keep looping after failures; stop on `Exit` or end of input.

use crate::outcome::Outcome;
use crate::prompt::{Choice, Prompter};
use crate::table::{departments_table, employees_table, roles_table};
use orgchart_core::{EmployeeId, OrgRepository, OrgService, Salary, ServiceError};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    AddManager,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::ViewDepartments,
        MenuAction::ViewRoles,
        MenuAction::ViewEmployees,
        MenuAction::AddDepartment,
        MenuAction::AddRole,
        MenuAction::AddEmployee,
        MenuAction::UpdateEmployeeRole,
        MenuAction::AddManager,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ViewDepartments => "View all departments",
            Self::ViewRoles => "View all roles",
            Self::ViewEmployees => "View all employees",
            Self::AddDepartment => "Add a department",
            Self::AddRole => "Add a role",
            Self::AddEmployee => "Add an employee",
            Self::UpdateEmployeeRole => "Update an employee role",
            Self::AddManager => "Add a manager",
            Self::Exit => "Exit",
        }
    }

    fn error_context(self) -> &'static str {
        match self {
            Self::ViewDepartments => "viewing departments",
            Self::ViewRoles => "viewing roles",
            Self::ViewEmployees => "viewing employees",
            Self::AddDepartment => "adding department",
            Self::AddRole => "adding role",
            Self::AddEmployee => "adding employee",
            Self::UpdateEmployeeRole => "updating employee role",
            Self::AddManager => "adding manager",
            Self::Exit => "exiting",
        }
    }
}

enum ActionError {
    Io(io::Error),
    Service(ServiceError),
    Cancelled,
}

impl From<io::Error> for ActionError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ServiceError> for ActionError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

type ActionResult = Result<Outcome, ActionError>;

fn answered<T>(answer: Option<T>) -> Result<T, ActionError> {
    answer.ok_or(ActionError::Cancelled)
}

pub struct Shell<'s, R: OrgRepository, I, O> {
    service: &'s OrgService<R>,
    prompter: Prompter<I, O>,
}

impl<'s, R: OrgRepository, I: BufRead, O: Write> Shell<'s, R, I, O> {
    pub fn new(service: &'s OrgService<R>, input: I, output: O) -> Self {
        Self {
            service,
            prompter: Prompter::new(input, output),
        }
    }

    /// Runs until the operator picks `Exit` or input is exhausted.
    pub fn run(&mut self) -> io::Result<()> {
        let menu: Vec<Choice<MenuAction>> = MenuAction::ALL
            .iter()
            .map(|action| Choice::new(action.label(), *action))
            .collect();

        loop {
            let Some(action) = self.prompter.select("What would you like to do?", &menu)? else {
                return Ok(());
            };
            if action == MenuAction::Exit {
                return Ok(());
            }

            let outcome = self.perform(action)?;
            outcome.render(self.prompter.output())?;
            if matches!(outcome, Outcome::Cancelled) {
                return Ok(());
            }
        }
    }

    fn perform(&mut self, action: MenuAction) -> io::Result<Outcome> {
        let result = match action {
            MenuAction::ViewDepartments => self.view_departments(),
            MenuAction::ViewRoles => self.view_roles(),
            MenuAction::ViewEmployees => self.view_employees(),
            MenuAction::AddDepartment => self.add_department(),
            MenuAction::AddRole => self.add_role(),
            MenuAction::AddEmployee => self.add_employee(),
            MenuAction::UpdateEmployeeRole => self.update_employee_role(),
            MenuAction::AddManager => self.add_manager(),
            MenuAction::Exit => Ok(Outcome::Cancelled),
        };

        match result {
            Ok(outcome) => Ok(outcome),
            Err(ActionError::Service(err)) => Ok(Outcome::failure(action.error_context(), &err)),
            Err(ActionError::Cancelled) => Ok(Outcome::Cancelled),
            Err(ActionError::Io(err)) => Err(err),
        }
    }

    fn view_departments(&mut self) -> ActionResult {
        let departments = self.service.list_departments()?;
        Ok(Outcome::Listing(departments_table(&departments)))
    }

    fn view_roles(&mut self) -> ActionResult {
        let roles = self.service.list_roles()?;
        Ok(Outcome::Listing(roles_table(&roles)))
    }

    fn view_employees(&mut self) -> ActionResult {
        let employees = self.service.list_employees()?;
        Ok(Outcome::Listing(employees_table(&employees)))
    }

    fn add_department(&mut self) -> ActionResult {
        let name = answered(self.prompter.text("Enter the department name:")?)?;
        let department = self.service.add_department(&name)?;
        Ok(Outcome::Done(format!("Added department: {}", department.name)))
    }

    fn add_role(&mut self) -> ActionResult {
        let departments = self.service.list_departments()?;
        if departments.is_empty() {
            return Ok(Outcome::Refused(
                "No departments available. Please add a department first.".to_string(),
            ));
        }
        let choices: Vec<Choice<i64>> = departments
            .into_iter()
            .map(|department| Choice::new(department.to_string(), department.id))
            .collect();

        let title = answered(self.prompter.text("Enter the role title:")?)?;
        let salary: Salary = answered(self.prompter.parsed("Enter the role salary:")?)?;
        let department_id = answered(
            self.prompter
                .select("Select the department for the role:", &choices)?,
        )?;

        let role = self.service.add_role(&title, salary, department_id)?;
        Ok(Outcome::Done(format!("Added role: {}", role.title)))
    }

    fn add_employee(&mut self) -> ActionResult {
        self.service.ensure_roles_available()?;
        let roles = self.role_choices()?;
        let mut managers: Vec<Choice<Option<EmployeeId>>> = self
            .service
            .list_employees()?
            .into_iter()
            .map(|employee| Choice::new(employee.full_name(), Some(employee.id)))
            .collect();
        managers.push(Choice::new("None", None));

        let first_name = answered(self.prompter.text("Enter the employee's first name:")?)?;
        let last_name = answered(self.prompter.text("Enter the employee's last name:")?)?;
        let role_id = answered(
            self.prompter
                .select("Select the role for the employee:", &roles)?,
        )?;
        let manager_id = answered(self.prompter.select(
            "Select the manager for the employee (or select 'None'):",
            &managers,
        )?)?;

        let employee = self
            .service
            .add_employee(&first_name, &last_name, role_id, manager_id)?;
        Ok(Outcome::Done(format!(
            "Added employee: {}",
            employee.full_name()
        )))
    }

    fn add_manager(&mut self) -> ActionResult {
        self.service.ensure_roles_available()?;
        let roles = self.role_choices()?;

        let first_name = answered(self.prompter.text("Enter the manager's first name:")?)?;
        let last_name = answered(self.prompter.text("Enter the manager's last name:")?)?;
        let role_id = answered(
            self.prompter
                .select("Select the role for the manager:", &roles)?,
        )?;

        let manager = self.service.add_manager(&first_name, &last_name, role_id)?;
        Ok(Outcome::Done(format!("Added manager: {}", manager.full_name())))
    }

    fn update_employee_role(&mut self) -> ActionResult {
        let employees: Vec<Choice<EmployeeId>> = self
            .service
            .list_employees()?
            .into_iter()
            .map(|employee| Choice::new(employee.full_name(), employee.id))
            .collect();
        if employees.is_empty() {
            return Ok(Outcome::Refused(
                "No employees available. Please add an employee first.".to_string(),
            ));
        }
        let roles = self.role_choices()?;

        let employee_id = answered(
            self.prompter
                .select("Select the employee to update:", &employees)?,
        )?;
        let role_id = answered(
            self.prompter
                .select("Select the new role for the employee:", &roles)?,
        )?;

        self.service.update_employee_role(employee_id, role_id)?;
        Ok(Outcome::Done(format!(
            "Updated employee ID {employee_id} to role ID {role_id}"
        )))
    }

    fn role_choices(&self) -> Result<Vec<Choice<i64>>, ActionError> {
        Ok(self
            .service
            .list_roles()?
            .into_iter()
            .map(|role| Choice::new(role.title, role.id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{MenuAction, Shell};
    use orgchart_core::db::open_db_in_memory;
    use orgchart_core::{OrgRepository, OrgService, Salary, SqliteOrgRepository};
    use rusqlite::Connection;
    use std::io::Cursor;

    fn service(conn: &Connection) -> OrgService<SqliteOrgRepository<'_>> {
        OrgService::new(SqliteOrgRepository::try_new(conn).unwrap())
    }

    fn run_with<R: OrgRepository>(service: &OrgService<R>, input: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        Shell::new(service, Cursor::new(input.as_bytes().to_vec()), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session(conn: &Connection, input: &str) -> String {
        run_with(&service(conn), input)
    }

    #[test]
    fn menu_lists_every_action_in_order() {
        let conn = open_db_in_memory().unwrap();
        let output = session(&conn, "9\n");

        for (index, action) in MenuAction::ALL.iter().enumerate() {
            assert!(output.contains(&format!("  {}) {}", index + 1, action.label())));
        }
    }

    #[test]
    fn scripted_session_builds_reporting_line() {
        let conn = open_db_in_memory().unwrap();
        let script = [
            "4", "Engineering", // add department
            "5", "Engineer", "80000", "1", // add role
            "8", "Ada", "Lovelace", "1", // add manager
            "6", "Grace", "Hopper", "1", "1", // add employee reporting to Ada
            "3", // view employees
            "9",
        ]
        .join("\n");

        let output = session(&conn, &script);
        assert!(output.contains("Added department: Engineering"));
        assert!(output.contains("  1) Engineering"));
        assert!(output.contains("Added role: Engineer"));
        assert!(output.contains("Added manager: Ada Lovelace"));
        assert!(output.contains("Added employee: Grace Hopper"));

        let grace_row = output
            .lines()
            .find(|line| line.starts_with("2 "))
            .unwrap();
        assert!(grace_row.contains("Engineering"));
        assert!(grace_row.contains("80000"));
        assert!(grace_row.ends_with("Ada Lovelace"));
    }

    #[test]
    fn employee_actions_are_refused_before_prompting_without_roles() {
        let conn = open_db_in_memory().unwrap();
        let output = session(&conn, "6\n8\n9\n");

        assert_eq!(
            output
                .matches("No roles available. Please add a role first.")
                .count(),
            2
        );
        assert!(!output.contains("first name"));
    }

    #[test]
    fn add_role_is_refused_without_departments() {
        let conn = open_db_in_memory().unwrap();
        let output = session(&conn, "5\n9\n");

        assert!(output.contains("No departments available."));
        assert!(!output.contains("Enter the role title:"));
    }

    #[test]
    fn invalid_salary_is_asked_again() {
        let conn = open_db_in_memory().unwrap();
        let output = session(
            &conn,
            "4\nSales\n5\nSeller\nlots\n-3\n55000,50\n55000.5\n1\n2\n9\n",
        );

        assert!(output.contains("Added role: Seller"));
        assert!(output.contains("`55000,50` is not a valid salary"));
        assert_eq!(output.matches("Enter the role salary:").count(), 4);

        let roles = service(&conn).list_roles().unwrap();
        assert_eq!(roles[0].salary, "55000.50".parse::<Salary>().unwrap());
    }

    #[test]
    fn update_employee_role_reports_ids() {
        let conn = open_db_in_memory().unwrap();
        let service = service(&conn);
        let department = service.add_department("Engineering").unwrap();
        service
            .add_role("Engineer", Salary::from_whole(80_000), department.id)
            .unwrap();
        let lead = service
            .add_role("Lead", Salary::from_whole(95_000), department.id)
            .unwrap();
        let ada = service.add_manager("Ada", "Lovelace", 1).unwrap();

        let output = run_with(&service, "7\n1\n2\n9\n");
        assert!(output.contains(&format!(
            "Updated employee ID {} to role ID {}",
            ada.id, lead.id
        )));
        assert_eq!(service.list_employees().unwrap()[0].title, "Lead");
    }

    #[test]
    fn update_is_refused_without_employees() {
        let conn = open_db_in_memory().unwrap();
        let output = session(&conn, "7\n9\n");
        assert!(output.contains("No employees available."));
    }

    #[test]
    fn end_of_input_mid_action_stops_without_writing() {
        let conn = open_db_in_memory().unwrap();
        session(&conn, "4\n");
        assert!(service(&conn).list_departments().unwrap().is_empty());
    }

    #[test]
    fn failures_are_reported_and_loop_continues() {
        let conn = open_db_in_memory().unwrap();
        let service = service(&conn);
        conn.execute_batch("DROP TABLE employee;").unwrap();

        let output = run_with(&service, "3\n1\n9\n");
        assert!(output.contains("Error viewing employees:"));
        assert!(output.contains("(no rows)"));
    }
}
