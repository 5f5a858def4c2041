use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{
    DATE_FORMAT, DUPLICATE_ATTENDANCE, FieldErrors, INVALID_DATE, INVALID_INTEGER,
    NON_FIELD_ERRORS, not_blank, trimmed,
};
use crate::{
    error::ApiError,
    model::attendance::{AttendanceFilter, AttendanceStatus, NewAttendance},
    store::HrStore,
};

/// Attendance mark body. `employee_name` is read-only and ignored if sent.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AttendancePayload {
    /// Primary key of the employee
    #[schema(example = 1, value_type = u64)]
    #[validate(required(message = "This field is required."))]
    pub employee: Option<u64>,

    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    #[validate(required(message = "This field is required."), custom = "not_blank")]
    pub date: Option<String>,

    #[schema(example = "Present", value_type = AttendanceStatus)]
    #[validate(required(message = "This field is required."), custom = "not_blank")]
    pub status: Option<String>,
}

pub fn unknown_employee_message(id: u64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

fn invalid_choice_message(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Runs the attendance rules in order and returns the record to insert.
///
/// 1. field rules: presence and blank
/// 2. `employee` must reference an existing employee
/// 3. `date` must be `YYYY-MM-DD`, `status` one of the choices
/// 4. (employee, date) must not be marked yet, only checked when every field passed
pub async fn validate_attendance(
    payload: AttendancePayload,
    store: &dyn HrStore,
) -> Result<NewAttendance, ApiError> {
    let payload = AttendancePayload {
        date: trimmed(payload.date),
        status: trimmed(payload.status),
        ..payload
    };

    let mut errors = match payload.validate() {
        Ok(()) => FieldErrors::default(),
        Err(e) => FieldErrors::from(e),
    };

    let mut employee = None;
    if let Some(id) = payload.employee {
        if store.employee_exists(id).await? {
            employee = Some(id);
        } else {
            errors.add("employee", unknown_employee_message(id));
        }
    }

    let mut date = None;
    if let Some(raw) = payload.date.as_deref().filter(|_| !errors.contains("date")) {
        match parse_date(raw) {
            Some(parsed) => date = Some(parsed),
            None => errors.add("date", INVALID_DATE),
        }
    }

    let mut status = None;
    if let Some(raw) = payload.status.as_deref().filter(|_| !errors.contains("status")) {
        match raw.parse::<AttendanceStatus>() {
            Ok(parsed) => status = Some(parsed),
            Err(_) => errors.add("status", invalid_choice_message(raw)),
        }
    }

    match (employee, date, status) {
        (Some(employee), Some(date), Some(status)) if errors.is_empty() => {
            if store.attendance_exists(employee, date).await? {
                return Err(ApiError::Validation(FieldErrors::single(
                    NON_FIELD_ERRORS,
                    DUPLICATE_ATTENDANCE,
                )));
            }
            Ok(NewAttendance { employee, date, status })
        }
        _ => Err(ApiError::Validation(errors)),
    }
}

/// Query string of the attendance listing. Empty values mean "no filter".
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Employee primary key, exact match
    #[param(example = 1, value_type = Option<u64>)]
    pub employee: Option<String>,
    /// Calendar date `YYYY-MM-DD`, exact match
    #[param(example = "2026-01-05", value_type = Option<String>, format = "date")]
    pub date: Option<String>,
}

impl AttendanceQuery {
    pub fn into_filter(self) -> Result<AttendanceFilter, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut filter = AttendanceFilter::default();

        if let Some(raw) = trimmed(self.employee).filter(|v| !v.is_empty()) {
            match raw.parse::<u64>() {
                Ok(id) => filter.employee = Some(id),
                Err(_) => errors.add("employee", INVALID_INTEGER),
            }
        }

        if let Some(raw) = trimmed(self.date).filter(|v| !v.is_empty()) {
            match parse_date(&raw) {
                Some(date) => filter.date = Some(date),
                None => errors.add("date", INVALID_DATE),
            }
        }

        if errors.is_empty() { Ok(filter) } else { Err(errors) }
    }
}
