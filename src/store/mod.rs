//! Persistence for employees and attendance.
//!
//! Handlers only see the [`HrStore`] trait. Two backends implement it:
//!
//! - [`MySqlStore`]: sqlx MySQL pool, schema managed by the embedded migrations.
//! - [`InMemoryStore`]: process-local maps, used by tests and `STORE_BACKEND=memory`.
//!
//! Both backends enforce the `employee_id` and (employee, date) uniqueness
//! constraints themselves and report violations as [`StoreError::Conflict`],
//! so a request that loses the check-then-insert race still gets a 400.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

use crate::{
    config::{Config, StoreBackend},
    db,
    model::{
        attendance::{Attendance, AttendanceFilter, NewAttendance},
        employee::{Employee, NewEmployee},
    },
};

mod error;
mod memory;
mod mysql;

pub use error::{Result, StoreError, UniqueKey};
pub use memory::InMemoryStore;
pub use mysql::MySqlStore;

#[async_trait]
pub trait HrStore: Send + Sync {
    /// All employees, most recently created first.
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    /// Whether an employee with this primary key exists.
    async fn employee_exists(&self, id: u64) -> Result<bool>;

    /// Whether the external employee code is already taken.
    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool>;

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee>;

    /// Hard-deletes an employee and its attendance. Returns `false` if no such employee.
    async fn delete_employee(&self, id: u64) -> Result<bool>;

    async fn attendance_exists(&self, employee: u64, date: NaiveDate) -> Result<bool>;

    async fn create_attendance(&self, attendance: &NewAttendance) -> Result<Attendance>;

    /// Matching attendance in storage order.
    async fn list_attendance(&self, filter: &AttendanceFilter) -> Result<Vec<Attendance>>;
}

/// Builds the backend selected in the config.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn HrStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory store, data will not survive a restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
        StoreBackend::MySql => {
            let pool = db::init_db(config).await?;
            if config.run_migrations {
                db::run_migrations(&pool).await?;
            }
            Ok(Arc::new(MySqlStore::new(pool)))
        }
    }
}
