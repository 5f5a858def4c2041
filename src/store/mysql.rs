use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::MySqlPool;
use tracing::{debug, error};

use super::{HrStore, Result, StoreError, UniqueKey};
use crate::model::{
    attendance::{Attendance, AttendanceFilter, AttendanceRow, NewAttendance},
    employee::{Employee, NewEmployee},
};

const EMPLOYEE_SELECT: &str = r#"
    SELECT id, employee_id, full_name, email, department, created_at
    FROM employees
"#;

const ATTENDANCE_SELECT: &str = r#"
    SELECT a.id, a.employee_id AS employee, e.full_name AS employee_name, a.date, a.status
    FROM attendance a
    INNER JOIN employees e ON e.id = a.employee_id
"#;

#[derive(Debug, Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_employee(&self, id: u64) -> Result<Employee> {
        let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn fetch_attendance(&self, id: u64) -> Result<Attendance> {
        let sql = format!("{ATTENDANCE_SELECT} WHERE a.id = ?");
        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Attendance::try_from(row)
    }
}

/// Maps integrity violations raised by MySQL onto the store's own error kinds.
fn classify_insert_error(err: sqlx::Error, key: UniqueKey, employee: Option<u64>) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(key);
        }
        if db_err.is_foreign_key_violation() {
            if let Some(id) = employee {
                return StoreError::UnknownEmployee(id);
            }
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl HrStore for MySqlStore {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let sql = format!("{EMPLOYEE_SELECT} ORDER BY created_at DESC, id DESC");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch employees"))?;
        Ok(employees)
    }

    async fn employee_exists(&self, id: u64) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE employee_id = ?")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_id, full_name, email, department, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_insert_error(e, UniqueKey::EmployeeId, None))?;

        self.fetch_employee(result.last_insert_id()).await
    }

    async fn delete_employee(&self, id: u64) -> Result<bool> {
        // attendance rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .inspect_err(|e| error!(error = %e, id, "Failed to delete employee"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn attendance_exists(&self, employee: u64, date: NaiveDate) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND date = ?",
        )
        .bind(employee)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn create_attendance(&self, attendance: &NewAttendance) -> Result<Attendance> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(attendance.employee)
        .bind(attendance.date)
        .bind(attendance.status.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            classify_insert_error(e, UniqueKey::EmployeeDate, Some(attendance.employee))
        })?;

        self.fetch_attendance(result.last_insert_id()).await
    }

    async fn list_attendance(&self, filter: &AttendanceFilter) -> Result<Vec<Attendance>> {
        // ---------- build WHERE clause dynamically ----------
        let mut conditions = Vec::new();
        if filter.employee.is_some() {
            conditions.push("a.employee_id = ?");
        }
        if filter.date.is_some() {
            conditions.push("a.date = ?");
        }

        let where_clause = if conditions.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("{ATTENDANCE_SELECT} {where_clause} ORDER BY a.id");
        debug!(sql = %sql, ?filter, "Fetching attendance");

        let mut query = sqlx::query_as::<_, AttendanceRow>(&sql);
        if let Some(employee) = filter.employee {
            query = query.bind(employee);
        }
        if let Some(date) = filter.date {
            query = query.bind(date);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .inspect_err(|e| error!(error = %e, sql = %sql, "Failed to fetch attendance"))?;

        rows.into_iter().map(Attendance::try_from).collect()
    }
}
