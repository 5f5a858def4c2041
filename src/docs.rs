use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::Employee;
use crate::validation::attendance::AttendancePayload;
use crate::validation::employee::EmployeePayload;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS API",
        version = "0.1.0",
        description = r#"
## Employee & Attendance Management

A small HR backend that keeps an employee register and one attendance mark
per employee per day.

### Key Features
- **Employees**: list (newest first), create, delete (removes their attendance too)
- **Attendance**: mark Present/Absent for a date, list with `employee` / `date` filters

### Errors
- `400`: field name → list of messages, e.g. `{"employee_id": ["Employee ID already exists"]}`.
  Record-level problems use `non_field_errors`.
- `404`: `{"error": "Employee not found"}`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::health,

        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance
    ),
    components(
        schemas(
            Employee,
            EmployeePayload,
            Attendance,
            AttendanceStatus,
            AttendancePayload
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/health",
            "/api/employees/",
            "/api/employees/create/",
            "/api/employees/delete/{id}/",
            "/api/attendance/",
            "/api/attendance/mark/",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }
}
