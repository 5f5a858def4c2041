use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::{DUPLICATE_EMPLOYEE_ID, FieldErrors, email_address, not_blank, trimmed};
use crate::{error::ApiError, model::employee::NewEmployee, store::HrStore};

/// Employee creation body. Every field is required; `id` and `created_at` are server assigned.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct EmployeePayload {
    #[schema(example = "EMP001", value_type = String)]
    #[validate(
        required(message = "This field is required."),
        custom = "not_blank",
        length(max = 20, message = "Ensure this field has no more than 20 characters.")
    )]
    pub employee_id: Option<String>,

    #[schema(example = "Jane Smith", value_type = String)]
    #[validate(
        required(message = "This field is required."),
        custom = "not_blank",
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub full_name: Option<String>,

    #[schema(example = "jane@company.com", format = "email", value_type = String)]
    #[validate(
        required(message = "This field is required."),
        custom = "email_address",
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,

    #[schema(example = "Engineering", value_type = String)]
    #[validate(
        required(message = "This field is required."),
        custom = "not_blank",
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub department: Option<String>,
}

impl EmployeePayload {
    fn trimmed(self) -> Self {
        Self {
            employee_id: trimmed(self.employee_id),
            full_name: trimmed(self.full_name),
            email: trimmed(self.email),
            department: trimmed(self.department),
        }
    }
}

/// Runs the employee rules in order and returns the record to insert.
///
/// 1. field rules: presence, blank, length, email format
/// 2. `employee_id` uniqueness, only once the code itself is well formed
pub async fn validate_employee(
    payload: EmployeePayload,
    store: &dyn HrStore,
) -> Result<NewEmployee, ApiError> {
    let payload = payload.trimmed();

    let mut errors = match payload.validate() {
        Ok(()) => FieldErrors::default(),
        Err(e) => FieldErrors::from(e),
    };

    if let Some(code) = payload.employee_id.as_deref() {
        if !errors.contains("employee_id") && store.employee_id_exists(code).await? {
            errors.add("employee_id", DUPLICATE_EMPLOYEE_ID);
        }
    }

    match payload {
        EmployeePayload {
            employee_id: Some(employee_id),
            full_name: Some(full_name),
            email: Some(email),
            department: Some(department),
        } if errors.is_empty() => Ok(NewEmployee {
            employee_id,
            full_name,
            email,
            department,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::validation::{BLANK, INVALID_EMAIL, REQUIRED};

    fn payload(code: &str, name: &str, email: &str, department: &str) -> EmployeePayload {
        EmployeePayload {
            employee_id: Some(code.to_string()),
            full_name: Some(name.to_string()),
            email: Some(email.to_string()),
            department: Some(department.to_string()),
        }
    }

    fn field_errors(err: ApiError) -> FieldErrors {
        match err {
            ApiError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_payload_is_trimmed() {
        let store = InMemoryStore::new();
        let new_employee = validate_employee(
            payload(" EMP001 ", "Jane Smith ", " jane@company.com", "Engineering"),
            &store,
        )
        .await
        .unwrap();

        assert_eq!(new_employee.employee_id, "EMP001");
        assert_eq!(new_employee.full_name, "Jane Smith");
        assert_eq!(new_employee.email, "jane@company.com");
    }

    #[tokio::test]
    async fn missing_fields_are_required() {
        let store = InMemoryStore::new();
        let errors = field_errors(
            validate_employee(EmployeePayload::default(), &store)
                .await
                .unwrap_err(),
        );

        for field in ["employee_id", "full_name", "email", "department"] {
            assert_eq!(errors.get(field).unwrap(), [REQUIRED], "field {field}");
        }
    }

    #[tokio::test]
    async fn blank_and_malformed_values() {
        let store = InMemoryStore::new();
        let errors = field_errors(
            validate_employee(payload("EMP001", "   ", "nope", "Sales"), &store)
                .await
                .unwrap_err(),
        );

        assert_eq!(errors.get("full_name").unwrap(), [BLANK]);
        assert_eq!(errors.get("email").unwrap(), [INVALID_EMAIL]);

        let errors = field_errors(
            validate_employee(payload("EMP001", "Jane", " ", "Sales"), &store)
                .await
                .unwrap_err(),
        );
        assert_eq!(errors.get("email").unwrap(), [BLANK]);
        assert!(!errors.contains("employee_id"));
        assert!(!errors.contains("department"));
    }

    #[tokio::test]
    async fn overlong_code_is_rejected() {
        let store = InMemoryStore::new();
        let long_code = "E".repeat(21);
        let errors = field_errors(
            validate_employee(payload(&long_code, "Jane", "jane@company.com", "Sales"), &store)
                .await
                .unwrap_err(),
        );

        assert_eq!(
            errors.get("employee_id").unwrap(),
            ["Ensure this field has no more than 20 characters."]
        );
    }

    #[tokio::test]
    async fn duplicate_code_reported_with_other_field_errors() {
        let store = InMemoryStore::new();
        let first = validate_employee(payload("EMP001", "Jane", "jane@company.com", "Sales"), &store)
            .await
            .unwrap();
        store.create_employee(&first).await.unwrap();

        let errors = field_errors(
            validate_employee(payload("EMP001", "John", "bad", "Sales"), &store)
                .await
                .unwrap_err(),
        );

        assert_eq!(errors.get("employee_id").unwrap(), [DUPLICATE_EMPLOYEE_ID]);
        assert_eq!(errors.get("email").unwrap(), [INVALID_EMAIL]);
    }
}
