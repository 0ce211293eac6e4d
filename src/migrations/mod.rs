// ABOUTME: Versioned schema migrations with a recorded history table
// ABOUTME: Migration trait, built-in migrations and the transactional MigrationRunner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Schema Migrations
//!
//! Each migration is a named pair of `up`/`down` steps. The runner records
//! applied versions in the `migration` table and executes every step inside
//! its own transaction together with the history row, so a failed step
//! leaves neither schema changes nor a history entry behind.
//!
//! `down` steps are not idempotent: reverting a migration whose table is
//! already gone is an error rather than a silent no-op.

mod create_admin_table;
mod create_backend_auth_item_table;

pub use create_admin_table::CreateAdminTable;
pub use create_backend_auth_item_table::CreateBackendAuthItemTable;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqliteConnection;
use tracing::info;

use crate::constants::tables;
use crate::database::{Database, DatabaseError};
use crate::utils::{Clock, SystemClock};

/// Resolves logical table names for a migration step
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    table_prefix: String,
}

impl MigrationContext {
    /// Context using `table_prefix`
    #[must_use]
    pub fn new(table_prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: table_prefix.into(),
        }
    }

    /// Physical name of a logical table
    #[must_use]
    pub fn table(&self, name: &str) -> String {
        format!("{}{name}", self.table_prefix)
    }
}

/// One reversible schema change
#[async_trait]
pub trait Migration: Send + Sync {
    /// Unique, lexically ordered version name
    fn version(&self) -> &'static str;

    /// Apply the change
    async fn up(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError>;

    /// Undo the change
    async fn down(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError>;

    /// Run `up` in a transaction without touching the history table
    async fn apply(&self, db: &Database) -> Result<(), DatabaseError> {
        let ctx = MigrationContext::new(db.table_prefix());
        let mut tx = db.pool().begin().await?;
        self.up(&mut *tx, &ctx).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Run `down` in a transaction without touching the history table
    async fn revert(&self, db: &Database) -> Result<(), DatabaseError> {
        let ctx = MigrationContext::new(db.table_prefix());
        let mut tx = db.pool().begin().await?;
        self.down(&mut *tx, &ctx).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Built-in migrations in application order
#[must_use]
pub fn builtin_migrations() -> Vec<Arc<dyn Migration>> {
    vec![
        Arc::new(CreateAdminTable),
        Arc::new(CreateBackendAuthItemTable),
    ]
}

/// Row of the migration history table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    /// Migration version
    pub version: String,
    /// Unix time it was applied
    pub apply_time: i64,
}

/// Applies and reverts migrations while keeping the history table current
pub struct MigrationRunner {
    db: Database,
    migrations: Vec<Arc<dyn Migration>>,
    clock: Arc<dyn Clock>,
}

impl MigrationRunner {
    /// Runner over the built-in migrations
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self::with_migrations(db, builtin_migrations())
    }

    /// Runner over an explicit migration list
    #[must_use]
    pub fn with_migrations(db: Database, mut migrations: Vec<Arc<dyn Migration>>) -> Self {
        migrations.sort_by_key(|m| m.version());
        Self {
            db,
            migrations,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for history timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn context(&self) -> MigrationContext {
        MigrationContext::new(self.db.table_prefix())
    }

    async fn ensure_history_table(&self) -> Result<(), DatabaseError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (version VARCHAR(180) PRIMARY KEY, apply_time INTEGER)",
            self.db.table(tables::MIGRATION)
        );
        sqlx::query(&sql).execute(self.db.pool()).await?;
        Ok(())
    }

    /// Applied migrations, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the history table cannot be read
    pub async fn history(&self) -> Result<Vec<AppliedMigration>, DatabaseError> {
        self.ensure_history_table().await?;
        let sql = format!(
            "SELECT version, apply_time FROM {} ORDER BY apply_time DESC, version DESC",
            self.db.table(tables::MIGRATION)
        );
        let rows = sqlx::query_as::<_, (String, i64)>(&sql)
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows
            .into_iter()
            .map(|(version, apply_time)| AppliedMigration {
                version,
                apply_time,
            })
            .collect())
    }

    /// Versions not yet applied, in application order
    ///
    /// # Errors
    ///
    /// Returns an error if the history table cannot be read
    pub async fn pending(&self) -> Result<Vec<&'static str>, DatabaseError> {
        let applied = self.history().await?;
        Ok(self
            .migrations
            .iter()
            .map(|m| m.version())
            .filter(|version| !applied.iter().any(|a| a.version == *version))
            .collect())
    }

    /// Apply up to `limit` pending migrations (all when `None`)
    ///
    /// # Errors
    ///
    /// Returns `MigrationError` for the first failing migration; migrations
    /// applied before it stay applied
    pub async fn up(&self, limit: Option<usize>) -> Result<Vec<&'static str>, DatabaseError> {
        let pending = self.pending().await?;
        let ctx = self.context();
        let history_table = self.db.table(tables::MIGRATION);
        let mut applied = Vec::new();

        for version in pending.into_iter().take(limit.unwrap_or(usize::MAX)) {
            let Some(migration) = self.find(version) else {
                continue;
            };
            info!(migration.version = %version, "Applying migration");

            let mut tx = self.db.pool().begin().await?;
            migration
                .up(&mut *tx, &ctx)
                .await
                .map_err(|e| DatabaseError::MigrationError {
                    version: version.to_owned(),
                    details: e.to_string(),
                })?;
            sqlx::query(&format!(
                "INSERT INTO {history_table} (version, apply_time) VALUES ($1, $2)"
            ))
            .bind(version)
            .bind(self.clock.timestamp())
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;

            applied.push(version);
        }

        Ok(applied)
    }

    /// Revert the `limit` most recently applied migrations
    ///
    /// # Errors
    ///
    /// Returns `MigrationError` if a recorded version is unknown or its
    /// `down` step fails
    pub async fn down(&self, limit: usize) -> Result<Vec<String>, DatabaseError> {
        let history = self.history().await?;
        let ctx = self.context();
        let history_table = self.db.table(tables::MIGRATION);
        let mut reverted = Vec::new();

        for entry in history.into_iter().take(limit) {
            let migration =
                self.find(&entry.version)
                    .ok_or_else(|| DatabaseError::MigrationError {
                        version: entry.version.clone(),
                        details: "no migration registered for this version".to_owned(),
                    })?;
            info!(migration.version = %entry.version, "Reverting migration");

            let mut tx = self.db.pool().begin().await?;
            migration
                .down(&mut *tx, &ctx)
                .await
                .map_err(|e| DatabaseError::MigrationError {
                    version: entry.version.clone(),
                    details: e.to_string(),
                })?;
            sqlx::query(&format!("DELETE FROM {history_table} WHERE version = $1"))
                .bind(&entry.version)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;

            reverted.push(entry.version);
        }

        Ok(reverted)
    }

    fn find(&self, version: &str) -> Option<&Arc<dyn Migration>> {
        self.migrations.iter().find(|m| m.version() == version)
    }
}
