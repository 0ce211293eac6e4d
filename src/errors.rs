// ABOUTME: Application error types re-exported from backend-admin-core
// ABOUTME: Adds conversions from storage-layer errors into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! `AppError`, `ErrorCode` and `ValidationErrors` live in the core crate so
//! they can be shared without pulling in sqlx; this module adds the
//! conversions that need the storage layer.

pub use backend_admin_core::errors::*;

use crate::database::DatabaseError;

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let app_error = match &error {
            DatabaseError::NotFound {
                entity_type,
                entity_id,
            } => Self::not_found(format!("{entity_type} {entity_id}")),
            DatabaseError::UniqueViolation { field, .. } => {
                let mut errors = ValidationErrors::new();
                errors.add(field.clone(), format!("{field} has already been taken."));
                Self::validation(&errors)
            }
            _ => Self::database(error.to_string()),
        };
        app_error.with_source(error)
    }
}
