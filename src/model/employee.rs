use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP001",
        "full_name": "Jane Smith",
        "email": "jane@company.com",
        "department": "Engineering",
        "created_at": "2026-01-01T09:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// External employee code, unique across all employees
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "Jane Smith")]
    pub full_name: String,

    #[schema(example = "jane@company.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2026-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// A validated employee that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}
