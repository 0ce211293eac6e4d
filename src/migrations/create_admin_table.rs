// ABOUTME: Migration creating the admin account table
// ABOUTME: Columns, defaults and case-insensitive unique indexes for administrator accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::{Migration, MigrationContext};
use crate::constants::tables;
use crate::database::DatabaseError;

/// `m180515_000000_create_admin_table`
pub struct CreateAdminTable;

#[async_trait]
impl Migration for CreateAdminTable {
    fn version(&self) -> &'static str {
        "m180515_000000_create_admin_table"
    }

    async fn up(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError> {
        let table = ctx.table(tables::ADMIN);

        sqlx::query(&format!(
            r"
            CREATE TABLE {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username VARCHAR(255) NOT NULL COLLATE NOCASE,
                auth_key VARCHAR(32) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                password_reset_token VARCHAR(255),
                email VARCHAR(255) COLLATE NOCASE,
                mobile VARCHAR(32),
                avatar VARCHAR(255),
                sex SMALLINT NOT NULL DEFAULT 0,
                last_login_ip VARCHAR(64),
                last_login_time INTEGER,
                status SMALLINT NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "
        ))
        .execute(&mut *conn)
        .await?;

        for column in ["username", "email", "mobile"] {
            sqlx::query(&format!(
                "CREATE UNIQUE INDEX idx_{table}_{column} ON {table}({column})"
            ))
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    async fn down(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError> {
        sqlx::query(&format!("DROP TABLE {}", ctx.table(tables::ADMIN)))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
