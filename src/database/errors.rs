// ABOUTME: Structured error types for database operations
// ABOUTME: Classifies sqlx failures, notably unique index violations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Row addressed by key does not exist
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity
        entity_type: &'static str,
        /// Key that was looked up
        entity_id: String,
    },

    /// A unique index rejected the write
    #[error("Unique constraint violated on {table}.{field}")]
    UniqueViolation {
        /// Table holding the index
        table: String,
        /// Column covered by the index
        field: String,
    },

    /// A stored value could not be mapped into a model
    #[error("Invalid stored value for {field}: {value}")]
    InvalidData {
        /// Column name
        field: &'static str,
        /// Offending raw value
        value: String,
    },

    /// Migration up/down failed
    #[error("Migration {version} failed: {details}")]
    MigrationError {
        /// Migration version
        version: String,
        /// Failure details
        details: String,
    },

    /// Connection could not be established
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Raw driver error
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &error {
            if db_error.is_unique_violation() {
                if let Some((table, field)) = parse_unique_violation(db_error.message()) {
                    return Self::UniqueViolation { table, field };
                }
            }
        }
        Self::Sqlx(error)
    }
}

/// Extract `(table, column)` from SQLite's `UNIQUE constraint failed: t.c` message
fn parse_unique_violation(message: &str) -> Option<(String, String)> {
    let (_, columns) = message.split_once("UNIQUE constraint failed:")?;
    // composite indexes list several columns; report the first
    let first = columns.split(',').next()?.trim();
    let (table, field) = first.rsplit_once('.')?;
    Some((table.to_owned(), field.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unique_violation() {
        assert_eq!(
            parse_unique_violation("UNIQUE constraint failed: admin.username"),
            Some(("admin".into(), "username".into()))
        );
        assert_eq!(
            parse_unique_violation("UNIQUE constraint failed: bk_admin.email, bk_admin.mobile"),
            Some(("bk_admin".into(), "email".into()))
        );
        assert_eq!(parse_unique_violation("no such table: admin"), None);
    }
}
