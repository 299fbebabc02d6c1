//! Validation utilities.

use crate::TaskboardError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `TaskboardError` on failure.
    fn validate_request(&self) -> Result<(), TaskboardError> {
        self.validate().map_err(validation_errors_to_taskboard_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to a single `TaskboardError`.
///
/// Fields are reported in name order so the message is stable.
#[must_use]
pub fn validation_errors_to_taskboard_error(errors: ValidationErrors) -> TaskboardError {
    let mut field_errors: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                (
                    (*field).to_string(),
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                )
            })
        })
        .collect();
    field_errors.sort();

    let message = field_errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ");

    TaskboardError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(length(min = 3))]
        label: String,
    }

    #[test]
    fn test_validate_request_collects_fields() {
        let value = Named {
            name: String::new(),
            label: "ab".to_string(),
        };
        let err = value.validate_request().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: label: length; name: name is required");
    }

    #[test]
    fn test_validate_request_ok() {
        let value = Named {
            name: "x".to_string(),
            label: "abc".to_string(),
        };
        assert!(value.validate_request().is_ok());
    }
}
