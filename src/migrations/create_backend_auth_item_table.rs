// ABOUTME: Migration creating the RBAC auth item table
// ABOUTME: Roles and permissions keyed by name with a lookup index on type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::{Migration, MigrationContext};
use crate::constants::tables;
use crate::database::DatabaseError;

/// `m180516_071815_create_backend_auth_item_table`
pub struct CreateBackendAuthItemTable;

#[async_trait]
impl Migration for CreateBackendAuthItemTable {
    fn version(&self) -> &'static str {
        "m180516_071815_create_backend_auth_item_table"
    }

    async fn up(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError> {
        let table = ctx.table(tables::BACKEND_AUTH_ITEM);

        sqlx::query(&format!(
            r"
            CREATE TABLE {table} (
                name VARCHAR(64) NOT NULL,
                type TINYINT NOT NULL,
                description TEXT,
                rule_name VARCHAR(64),
                data TEXT,
                created_at BIGINT UNSIGNED NOT NULL,
                updated_at BIGINT UNSIGNED NOT NULL,
                CONSTRAINT pk PRIMARY KEY (name)
            )
            "
        ))
        .execute(&mut *conn)
        .await?;

        sqlx::query(&format!("CREATE INDEX idx_{table}_type ON {table}(type)"))
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // Not guarded with IF EXISTS: reverting twice is an error.
    async fn down(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError> {
        sqlx::query(&format!(
            "DROP TABLE {}",
            ctx.table(tables::BACKEND_AUTH_ITEM)
        ))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
