use strum::Display;
use thiserror::Error;

/// Storage-level uniqueness constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum UniqueKey {
    #[strum(serialize = "employee_id")]
    EmployeeId,
    #[strum(serialize = "employee, date")]
    EmployeeDate,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated on ({0})")]
    Conflict(UniqueKey),
    #[error("Employee not found: {0}")]
    UnknownEmployee(u64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
