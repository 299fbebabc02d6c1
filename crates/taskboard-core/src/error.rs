//! Unified error type for the data-access layer.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Taskboard.
///
/// Repository operations classify every failure into one of three kinds so
/// callers can branch on the kind without inspecting messages:
///
/// - [`TaskboardError::Validation`]: the input was rejected before the store
///   was contacted.
/// - [`TaskboardError::NotFound`]: the store reported zero matching rows.
/// - [`TaskboardError::Storage`]: anything else the store reported. The
///   original cause is kept as the error source.
#[derive(Error, Debug)]
pub enum TaskboardError {
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TaskboardError {
    /// Returns the HTTP status code a caller would typically map this error to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Storage(_) | Self::Configuration(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a storage error wrapping the underlying cause.
    #[must_use]
    pub fn storage<E: Into<anyhow::Error>>(cause: E) -> Self {
        Self::Storage(cause.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Checks if this error is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this error is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Checks if this error is a storage error.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Checks if a caller may reasonably retry the operation.
    ///
    /// Repositories never retry on their own.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
