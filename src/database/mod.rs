// ABOUTME: Database management for administrator accounts and auth items
// ABOUTME: SQLite pool wrapper with table prefixing, row mapping and repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! `Database` owns the sqlx pool and the table prefix. Entity-specific
//! queries live in sibling modules as `impl Database` blocks; callers that
//! want an interface to mock go through [`repositories`].

mod admins;
mod auth_items;
mod errors;

/// Repository traits and their `Database`-backed implementations
pub mod repositories;

pub use admins::AdminUniqueField;
pub use errors::DatabaseError;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::debug;

use crate::migrations::MigrationRunner;

/// Database manager for admin and auth item storage
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    table_prefix: String,
}

impl Database {
    /// Connect without a table prefix
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        Self::with_table_prefix(database_url, "").await
    }

    /// Connect and resolve every logical table name through `table_prefix`
    ///
    /// In-memory databases are pinned to a single long-lived connection,
    /// otherwise each pooled connection would see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix contains characters other than
    /// `[A-Za-z0-9_]`, the URL is invalid, or the connection fails
    pub async fn with_table_prefix(
        database_url: &str,
        table_prefix: &str,
    ) -> Result<Self, DatabaseError> {
        if !table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DatabaseError::InvalidData {
                field: "table_prefix",
                value: table_prefix.to_owned(),
            });
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        debug!(db.url = %database_url, db.table_prefix = %table_prefix, "Database connected");

        Ok(Self {
            pool,
            table_prefix: table_prefix.to_owned(),
        })
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Configured table prefix
    #[must_use]
    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    /// Physical name of a logical table
    #[must_use]
    pub fn table(&self, name: &str) -> String {
        format!("{}{name}", self.table_prefix)
    }

    /// Apply every pending built-in migration
    ///
    /// # Errors
    ///
    /// Returns an error if any migration fails; earlier ones stay applied
    pub async fn migrate(&self) -> Result<Vec<&'static str>, DatabaseError> {
        MigrationRunner::new(self.clone()).up(None).await
    }

    /// Whether a physical table exists
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails
    pub async fn table_exists(&self, physical_name: &str) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
        )
        .bind(physical_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    /// Names of the indexes defined on a physical table
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails
    pub async fn index_names(&self, physical_name: &str) -> Result<Vec<String>, DatabaseError> {
        let names = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = $1 ORDER BY name",
        )
        .bind(physical_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}
