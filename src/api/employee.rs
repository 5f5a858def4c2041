use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, info};

use crate::{
    error::ApiError,
    store::HrStore,
    validation::employee::{EmployeePayload, validate_employee},
};

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees/",
    responses(
        (status = 200, description = "All employees, most recently created first", body = [Employee]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "error": "Internal Server Error"
        }))
    ),
    tag = "Employee"
)]
pub async fn list_employees(store: web::Data<dyn HrStore>) -> Result<HttpResponse, ApiError> {
    let employees = store.list_employees().await?;
    debug!(count = employees.len(), "Listed employees");
    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees/create/",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "employee_id": ["Employee ID already exists"]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn HrStore>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, ApiError> {
    let new_employee = validate_employee(payload.into_inner(), store.get_ref())
        .await
        .inspect_err(|e| debug!(error = %e, "Rejected employee"))?;

    let employee = store.create_employee(&new_employee).await?;

    info!(id = employee.id, employee_id = %employee.employee_id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/delete/{id}/",
    params(
        ("id", Path, description = "Employee primary key")
    ),
    responses(
        (status = 200, description = "Employee and their attendance deleted", body = Object, example = json!({
            "message": "Employee deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn HrStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if !store.delete_employee(id).await? {
        debug!(id, "Delete of unknown employee");
        return Err(ApiError::NotFound("Employee not found"));
    }

    info!(id, "Employee deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted"
    })))
}
