//! Plain-text tables for the three listings.

use orgchart_core::{Department, EmployeeListing, RoleListing};

/// Column-aligned text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Renders headers, a dashed rule and one line per row.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return "(no rows)\n".to_string();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let header_cells: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        push_line(&mut out, &header_cells, &widths);
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

pub fn departments_table(departments: &[Department]) -> Table {
    let mut table = Table::new(vec!["id", "name"]);
    for department in departments {
        table.push_row(vec![department.id.to_string(), department.name.clone()]);
    }
    table
}

pub fn roles_table(roles: &[RoleListing]) -> Table {
    let mut table = Table::new(vec!["id", "title", "salary", "department"]);
    for role in roles {
        table.push_row(vec![
            role.id.to_string(),
            role.title.clone(),
            role.salary.to_string(),
            role.department.clone(),
        ]);
    }
    table
}

pub fn employees_table(employees: &[EmployeeListing]) -> Table {
    let mut table = Table::new(vec![
        "id",
        "first_name",
        "last_name",
        "title",
        "department",
        "salary",
        "manager",
    ]);
    for employee in employees {
        table.push_row(vec![
            employee.id.to_string(),
            employee.first_name.clone(),
            employee.last_name.clone(),
            employee.title.clone(),
            employee.department.clone(),
            employee.salary.to_string(),
            employee.manager.clone().unwrap_or_else(|| "null".to_string()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::{employees_table, Table};
    use orgchart_core::{EmployeeListing, Salary};

    #[test]
    fn render_aligns_columns_to_widest_cell() {
        let mut table = Table::new(vec!["id", "name"]);
        table.push_row(vec!["1".to_string(), "Engineering".to_string()]);
        table.push_row(vec!["12".to_string(), "HR".to_string()]);

        assert_eq!(
            table.render(),
            "id  name\n--  -----------\n1   Engineering\n12  HR\n"
        );
    }

    #[test]
    fn empty_table_renders_placeholder() {
        assert_eq!(Table::new(vec!["id"]).render(), "(no rows)\n");
    }

    #[test]
    fn employees_without_manager_show_null() {
        let table = employees_table(&[EmployeeListing {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            title: "Engineer".to_string(),
            department: "Engineering".to_string(),
            salary: Salary::from_whole(80_000),
            manager: None,
        }]);

        let rendered = table.render();
        assert_eq!(rendered.lines().count(), 3);
        assert!(rendered.lines().nth(2).unwrap().ends_with("null"));
        assert!(rendered.contains("80000"));
    }
}
