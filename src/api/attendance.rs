use actix_web::{HttpResponse, web};
use tracing::{debug, info};

use crate::{
    error::ApiError,
    store::HrStore,
    validation::attendance::{AttendancePayload, AttendanceQuery, validate_attendance},
};

/// Mark Attendance
#[utoipa::path(
    post,
    path = "/api/attendance/mark/",
    request_body = AttendancePayload,
    responses(
        (status = 201, description = "Attendance marked", body = Attendance),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "non_field_errors": ["Attendance already marked for this date"]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    store: web::Data<dyn HrStore>,
    payload: web::Json<AttendancePayload>,
) -> Result<HttpResponse, ApiError> {
    let mark = validate_attendance(payload.into_inner(), store.get_ref())
        .await
        .inspect_err(|e| debug!(error = %e, "Rejected attendance"))?;

    let attendance = store.create_attendance(&mark).await?;

    info!(
        id = attendance.id,
        employee = attendance.employee,
        date = %attendance.date,
        status = %attendance.status,
        "Attendance marked"
    );
    Ok(HttpResponse::Created().json(attendance))
}

/// List Attendance
#[utoipa::path(
    get,
    path = "/api/attendance/",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching attendance with employee names", body = [Attendance]),
        (status = 400, description = "Malformed filter", body = Object, example = json!({
            "employee": ["A valid integer is required."]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    store: web::Data<dyn HrStore>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.into_inner().into_filter().map_err(ApiError::Validation)?;

    let records = store.list_attendance(&filter).await?;
    debug!(?filter, count = records.len(), "Listed attendance");
    Ok(HttpResponse::Ok().json(records))
}
