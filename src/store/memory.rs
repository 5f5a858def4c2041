use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use super::{HrStore, Result, StoreError, UniqueKey};
use crate::model::{
    attendance::{Attendance, AttendanceFilter, AttendanceStatus, NewAttendance},
    employee::{Employee, NewEmployee},
};

/// In-memory storage backend.
///
/// All tables sit behind one lock, so each write checks its constraints and
/// inserts atomically. Data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, AttendanceRecord>,
    last_employee_id: u64,
    last_attendance_id: u64,
}

/// Stored attendance; the employee name is joined in on read.
#[derive(Debug, Clone)]
struct AttendanceRecord {
    id: u64,
    employee: u64,
    date: NaiveDate,
    status: AttendanceStatus,
}

impl Tables {
    fn project(&self, record: &AttendanceRecord) -> Result<Attendance> {
        let employee = self
            .employees
            .get(&record.employee)
            .ok_or(StoreError::UnknownEmployee(record.employee))?;

        Ok(Attendance {
            id: record.id,
            employee: record.employee,
            employee_name: employee.full_name.clone(),
            date: record.date,
            status: record.status,
        })
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HrStore for InMemoryStore {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        let tables = self.tables.read().await;
        let mut employees: Vec<Employee> = tables.employees.values().cloned().collect();
        employees.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(employees)
    }

    async fn employee_exists(&self, id: u64) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.employees.contains_key(&id))
    }

    async fn employee_id_exists(&self, employee_id: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .employees
            .values()
            .any(|e| e.employee_id == employee_id))
    }

    async fn create_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        let mut tables = self.tables.write().await;
        if tables
            .employees
            .values()
            .any(|e| e.employee_id == employee.employee_id)
        {
            return Err(StoreError::Conflict(UniqueKey::EmployeeId));
        }

        tables.last_employee_id += 1;
        let created = Employee {
            id: tables.last_employee_id,
            employee_id: employee.employee_id.clone(),
            full_name: employee.full_name.clone(),
            email: employee.email.clone(),
            department: employee.department.clone(),
            created_at: Utc::now(),
        };
        tables.employees.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete_employee(&self, id: u64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.employees.remove(&id).is_none() {
            return Ok(false);
        }
        tables.attendance.retain(|_, record| record.employee != id);
        Ok(true)
    }

    async fn attendance_exists(&self, employee: u64, date: NaiveDate) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance
            .values()
            .any(|r| r.employee == employee && r.date == date))
    }

    async fn create_attendance(&self, attendance: &NewAttendance) -> Result<Attendance> {
        let mut tables = self.tables.write().await;
        if !tables.employees.contains_key(&attendance.employee) {
            return Err(StoreError::UnknownEmployee(attendance.employee));
        }
        if tables
            .attendance
            .values()
            .any(|r| r.employee == attendance.employee && r.date == attendance.date)
        {
            return Err(StoreError::Conflict(UniqueKey::EmployeeDate));
        }

        tables.last_attendance_id += 1;
        let record = AttendanceRecord {
            id: tables.last_attendance_id,
            employee: attendance.employee,
            date: attendance.date,
            status: attendance.status,
        };
        let created = tables.project(&record)?;
        tables.attendance.insert(record.id, record);
        Ok(created)
    }

    async fn list_attendance(&self, filter: &AttendanceFilter) -> Result<Vec<Attendance>> {
        let tables = self.tables.read().await;
        tables
            .attendance
            .values()
            .filter(|r| filter.matches(r.employee, r.date))
            .map(|r| tables.project(r))
            .collect()
    }
}
