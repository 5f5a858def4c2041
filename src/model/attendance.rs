use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee": 1,
        "employee_name": "Jane Smith",
        "date": "2026-01-05",
        "status": "Present"
    })
)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,

    /// Primary key of the employee this record belongs to
    #[schema(example = 1)]
    pub employee: u64,

    /// Read-only, resolved from the referenced employee
    #[schema(example = "Jane Smith")]
    pub employee_name: String,

    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

/// Attendance joined with the employee name, as read from SQL.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendanceRow {
    pub id: u64,
    pub employee: u64,
    pub employee_name: String,
    pub date: NaiveDate,
    pub status: String,
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<AttendanceStatus>().map_err(|_| {
            StoreError::InvalidData(format!(
                "attendance {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;

        Ok(Self {
            id: row.id,
            employee: row.employee,
            employee_name: row.employee_name,
            date: row.date,
            status,
        })
    }
}

/// A validated attendance mark that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub employee: u64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// Exact-match filters for attendance listing; `None` means unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub employee: Option<u64>,
    pub date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn matches(&self, employee: u64, date: NaiveDate) -> bool {
        self.employee.is_none_or(|id| id == employee) && self.date.is_none_or(|d| d == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn status_parses_exact_choice_names() {
        assert_eq!("Present".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Present);
        assert_eq!("Absent".parse::<AttendanceStatus>().unwrap(), AttendanceStatus::Absent);
        assert!("present".parse::<AttendanceStatus>().is_err());
        assert!("Late".parse::<AttendanceStatus>().is_err());
        assert_eq!(AttendanceStatus::Absent.as_ref(), "Absent");
    }

    #[test]
    fn row_with_unknown_status_is_invalid_data() {
        let row = AttendanceRow {
            id: 7,
            employee: 1,
            employee_name: "Jane".to_string(),
            date: date(2026, 1, 5),
            status: "Holiday".to_string(),
        };

        let err = Attendance::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }

    #[test]
    fn filter_applies_both_fields_with_and_semantics() {
        let day = date(2026, 1, 5);
        let other_day = date(2026, 1, 6);

        assert!(AttendanceFilter::default().matches(3, day));

        let by_employee = AttendanceFilter { employee: Some(3), date: None };
        assert!(by_employee.matches(3, other_day));
        assert!(!by_employee.matches(4, day));

        let both = AttendanceFilter { employee: Some(3), date: Some(day) };
        assert!(both.matches(3, day));
        assert!(!both.matches(3, other_day));
        assert!(!both.matches(4, day));
    }

    #[test]
    fn attendance_serializes_date_and_status_as_strings() {
        let record = Attendance {
            id: 1,
            employee: 2,
            employee_name: "Jane Smith".to_string(),
            date: date(2026, 1, 5),
            status: AttendanceStatus::Present,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2026-01-05");
        assert_eq!(json["status"], "Present");
        assert_eq!(json["employee_name"], "Jane Smith");
    }
}
