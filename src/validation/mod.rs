//! Request validation.
//!
//! Each entity has an ordered list of rules. Field rules come from the
//! `validator` derive on the payload, the rules that need to read the store
//! run after them, and every rule runs before anything is written. Failures
//! are collected into a [`FieldErrors`] map keyed by field name.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::store::UniqueKey;

pub mod attendance;
pub mod employee;

/// Key for errors that belong to the record as a whole.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const DUPLICATE_EMPLOYEE_ID: &str = "Employee ID already exists";
pub const DUPLICATE_ATTENDANCE: &str = "Attendance already marked for this date";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field name to the list of messages for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// The error a storage-level unique violation reports, matching the pre-insert check.
    pub fn from_conflict(key: UniqueKey) -> Self {
        match key {
            UniqueKey::EmployeeId => Self::single("employee_id", DUPLICATE_EMPLOYEE_ID),
            UniqueKey::EmployeeDate => Self::single(NON_FIELD_ERRORS, DUPLICATE_ATTENDANCE),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().map(String::as_str).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(field, message);
            }
        }
        out
    }
}

/// Trims surrounding whitespace, the way every text input is normalized before validation.
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(with_message("blank", BLANK));
    }
    Ok(())
}

pub(crate) fn email_address(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if !validator::validate_email(value) {
        return Err(with_message("email", INVALID_EMAIL));
    }
    Ok(())
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::default();
        errors.add("email", "first");
        errors.add("email", "second");
        errors.add("date", "third");

        assert_eq!(errors.get("email").unwrap(), ["first", "second"]);
        assert!(errors.contains("date"));
        assert!(!errors.contains("status"));
    }

    #[test]
    fn serializes_as_plain_map() {
        let errors = FieldErrors::single("employee_id", DUPLICATE_EMPLOYEE_ID);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "employee_id": ["Employee ID already exists"] })
        );
    }

    #[test]
    fn conflicts_map_to_the_same_messages_as_the_checks() {
        let by_code = FieldErrors::from_conflict(UniqueKey::EmployeeId);
        assert_eq!(by_code.get("employee_id").unwrap(), [DUPLICATE_EMPLOYEE_ID]);

        let by_day = FieldErrors::from_conflict(UniqueKey::EmployeeDate);
        assert_eq!(by_day.get(NON_FIELD_ERRORS).unwrap(), [DUPLICATE_ATTENDANCE]);
    }

    #[test]
    fn blank_and_email_rules() {
        assert!(not_blank("x").is_ok());
        assert_eq!(not_blank("").unwrap_err().message.as_deref(), Some(BLANK));

        assert!(email_address("jane@company.com").is_ok());
        assert_eq!(email_address("").unwrap_err().message.as_deref(), Some(BLANK));
        assert_eq!(
            email_address("not-an-email").unwrap_err().message.as_deref(),
            Some(INVALID_EMAIL)
        );
    }

    #[test]
    fn display_lists_fields() {
        let mut errors = FieldErrors::default();
        errors.add("full_name", BLANK);
        errors.add("email", INVALID_EMAIL);
        assert_eq!(errors.to_string(), "invalid fields: email, full_name");
    }
}
