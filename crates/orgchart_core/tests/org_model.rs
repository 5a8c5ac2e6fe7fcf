use orgchart_core::{Department, Employee, EmployeeListing, Role, Salary};

#[test]
fn employee_serializes_nullable_manager() {
    let root = Employee {
        id: 1,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        role_id: 3,
        manager_id: None,
    };
    assert_eq!(root.full_name(), "Ada Lovelace");

    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["first_name"], "Ada");
    assert_eq!(json["role_id"], 3);
    assert!(json["manager_id"].is_null());

    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, root);
}

#[test]
fn role_salary_uses_integer_cents_on_the_wire() {
    let role = Role {
        id: 2,
        title: "Engineer".to_string(),
        salary: "80000.5".parse().unwrap(),
        department_id: 1,
    };

    let json = serde_json::to_value(&role).unwrap();
    assert_eq!(json["salary"], 8_000_050);
    assert_eq!(json["department_id"], 1);
}

#[test]
fn negative_salary_is_rejected_when_decoding() {
    let json = serde_json::json!({
        "id": 9,
        "first_name": "Grace",
        "last_name": "Hopper",
        "title": "Admiral",
        "department": "Navy",
        "salary": -1,
        "manager": "Ada Lovelace"
    });

    let err = serde_json::from_value::<EmployeeListing>(json).unwrap_err();
    assert!(err.to_string().contains("negative"));
}

#[test]
fn salary_ordering_follows_amount() {
    assert!(Salary::from_whole(10) < "10.01".parse::<Salary>().unwrap());
    assert_eq!(Salary::ZERO, Salary::from_cents(0).unwrap());
}

#[test]
fn department_displays_as_its_name() {
    let department = Department {
        id: 4,
        name: "Research".to_string(),
    };
    assert_eq!(department.to_string(), "Research");
}
