// ABOUTME: Unified error handling for the backend admin workspace
// ABOUTME: Defines ErrorCode and AppError with field-level validation details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation outside the storage layer returns [`AppError`].
//! Field-level validation failures travel inside an `AppError` with
//! [`ErrorCode::ValidationFailed`] and can be recovered with
//! [`AppError::validation_errors`].

mod validation;

pub use validation::{FieldError, ValidationErrors};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic invalid input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// One or more field validations failed; details carry the field list
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed = 3004,

    // Resource Management (4000-4999)
    /// Resource not found
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Operation is deliberately not implemented
    #[serde(rename = "OPERATION_NOT_SUPPORTED")]
    OperationNotSupported = 4005,

    // Internal Errors (9000-9999)
    /// Unclassified internal error
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Storage layer failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError = 9001,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValidationFailed => "One or more fields failed validation",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::OperationNotSupported => "The requested operation is not supported",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{}: {message}", .code.description())]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured details
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Recover the field errors of a [`ErrorCode::ValidationFailed`] error
    #[must_use]
    pub fn validation_errors(&self) -> Option<ValidationErrors> {
        if self.code != ErrorCode::ValidationFailed {
            return None;
        }
        serde_json::from_value(self.details.get("fields")?.clone()).ok()
    }
}

/// Convenience constructors for common errors
impl AppError {
    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Field validation failed
    #[must_use]
    pub fn validation(errors: &ValidationErrors) -> Self {
        Self::new(
            ErrorCode::ValidationFailed,
            format!("{} field error(s)", errors.len()),
        )
        .with_details(serde_json::json!({ "fields": errors }))
    }

    /// Operation deliberately left unimplemented
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::OperationNotSupported,
            format!("\"{}\" is not implemented.", operation.into()),
        )
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_description() {
        let error = AppError::not_found("Admin 7");
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(
            error.to_string(),
            "The requested resource was not found: Admin 7 not found"
        );
    }

    #[test]
    fn test_validation_errors_round_trip_through_app_error() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "Username is invalid.");
        errors.add("email", "Email \"x\" has already been taken.");

        let error = AppError::validation(&errors);
        assert_eq!(error.code, ErrorCode::ValidationFailed);

        let recovered = error.validation_errors().unwrap();
        assert_eq!(recovered, errors);
        assert!(recovered.has("username"));
    }

    #[test]
    fn test_validation_errors_absent_for_other_codes() {
        let error = AppError::internal("boom");
        assert!(error.validation_errors().is_none());
    }

    #[test]
    fn test_not_supported_message() {
        let error = AppError::not_supported("findIdentityByAccessToken");
        assert_eq!(error.code, ErrorCode::OperationNotSupported);
        assert!(error.to_string().contains("is not implemented"));
    }
}
