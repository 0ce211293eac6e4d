// ABOUTME: Integration tests for schema migrations and the migration history table
// ABOUTME: Covers apply/revert, limits, table prefixes and transactional rollback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use backend_admin::database::{Database, DatabaseError};
use backend_admin::migrations::{
    CreateAdminTable, CreateBackendAuthItemTable, Migration, MigrationContext, MigrationRunner,
};
use backend_admin::utils::FixedClock;
use common::{create_empty_database, init_test_logging, TEST_EPOCH};
use sqlx::SqliteConnection;

const ADMIN_VERSION: &str = "m180515_000000_create_admin_table";
const AUTH_ITEM_VERSION: &str = "m180516_071815_create_backend_auth_item_table";

#[tokio::test]
async fn test_migrate_creates_tables_and_history() {
    let db = create_empty_database().await.unwrap();
    let runner = MigrationRunner::new(db.clone()).with_clock(Arc::new(FixedClock::at(TEST_EPOCH)));

    assert_eq!(
        runner.pending().await.unwrap(),
        vec![ADMIN_VERSION, AUTH_ITEM_VERSION]
    );

    let applied = runner.up(None).await.unwrap();
    assert_eq!(applied, vec![ADMIN_VERSION, AUTH_ITEM_VERSION]);
    assert!(db.table_exists("admin").await.unwrap());
    assert!(db.table_exists("backend_auth_item").await.unwrap());

    let history = runner.history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].version, AUTH_ITEM_VERSION);
    assert_eq!(history[1].version, ADMIN_VERSION);
    assert!(history.iter().all(|h| h.apply_time == TEST_EPOCH));

    assert!(runner.pending().await.unwrap().is_empty());
    assert!(runner.up(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_schema_indexes() {
    let db = create_empty_database().await.unwrap();
    db.migrate().await.unwrap();

    let auth_item_indexes = db.index_names("backend_auth_item").await.unwrap();
    assert!(auth_item_indexes.contains(&"idx_backend_auth_item_type".to_owned()));

    let admin_indexes = db.index_names("admin").await.unwrap();
    for column in ["username", "email", "mobile"] {
        assert!(
            admin_indexes.contains(&format!("idx_admin_{column}")),
            "missing unique index on {column}: {admin_indexes:?}"
        );
    }
    assert!(!admin_indexes.contains(&"idx_admin_password_reset_token".to_owned()));
}

type ColumnInfo = (i64, String, String, i64, Option<String>, i64);

async fn table_columns(db: &Database, table: &str) -> Vec<(String, String, bool, bool)> {
    let rows: Vec<ColumnInfo> = sqlx::query_as(&format!("PRAGMA table_info({table})"))
        .fetch_all(db.pool())
        .await
        .unwrap();
    rows.into_iter()
        .map(|(_, name, declared, notnull, _, pk)| (name, declared, notnull == 1, pk > 0))
        .collect()
}

#[tokio::test]
async fn test_auth_item_column_contract() {
    let db = create_empty_database().await.unwrap();
    db.migrate().await.unwrap();

    let columns = table_columns(&db, "backend_auth_item").await;
    let expected = [
        ("name", "VARCHAR(64)", true, true),
        ("type", "TINYINT", true, false),
        ("description", "TEXT", false, false),
        ("rule_name", "VARCHAR(64)", false, false),
        ("data", "TEXT", false, false),
        ("created_at", "BIGINT UNSIGNED", true, false),
        ("updated_at", "BIGINT UNSIGNED", true, false),
    ];
    assert_eq!(columns.len(), expected.len());
    for ((name, declared, notnull, pk), (want_name, want_type, want_notnull, want_pk)) in
        columns.iter().zip(expected)
    {
        assert_eq!(name, want_name);
        assert_eq!(declared, want_type, "declared type of {name}");
        assert_eq!(*notnull, want_notnull, "notnull of {name}");
        assert_eq!(*pk, want_pk, "pk of {name}");
    }
}

#[tokio::test]
async fn test_admin_identity_columns_ignore_case() {
    let db = create_empty_database().await.unwrap();
    db.migrate().await.unwrap();

    let insert = "INSERT INTO admin (username, auth_key, password_hash, email, created_at, updated_at) \
                  VALUES ($1, 'k', 'h', $2, 0, 0)";
    sqlx::query(insert)
        .bind("admin1")
        .bind("admin1@example.com")
        .execute(db.pool())
        .await
        .unwrap();

    let same_username = sqlx::query(insert)
        .bind("ADMIN1")
        .bind("other@example.com")
        .execute(db.pool())
        .await;
    assert!(same_username.is_err());

    let same_email = sqlx::query(insert)
        .bind("admin2")
        .bind("ADMIN1@EXAMPLE.COM")
        .execute(db.pool())
        .await;
    assert!(same_email.is_err());
}

#[tokio::test]
async fn test_up_limit_and_down() {
    let db = create_empty_database().await.unwrap();
    let runner = MigrationRunner::new(db.clone());

    assert_eq!(runner.up(Some(1)).await.unwrap(), vec![ADMIN_VERSION]);
    assert!(db.table_exists("admin").await.unwrap());
    assert!(!db.table_exists("backend_auth_item").await.unwrap());
    assert_eq!(runner.pending().await.unwrap(), vec![AUTH_ITEM_VERSION]);

    runner.up(None).await.unwrap();
    let reverted = runner.down(1).await.unwrap();
    assert_eq!(reverted, vec![AUTH_ITEM_VERSION.to_owned()]);
    assert!(!db.table_exists("backend_auth_item").await.unwrap());
    assert!(db.table_exists("admin").await.unwrap());

    let reverted = runner.down(5).await.unwrap();
    assert_eq!(reverted, vec![ADMIN_VERSION.to_owned()]);
    assert!(!db.table_exists("admin").await.unwrap());
    assert!(runner.history().await.unwrap().is_empty());
    assert!(runner.down(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_auth_item_revert_twice_is_an_error() {
    let db = create_empty_database().await.unwrap();
    let migration = CreateBackendAuthItemTable;

    migration.apply(&db).await.unwrap();
    assert!(db.table_exists("backend_auth_item").await.unwrap());

    migration.revert(&db).await.unwrap();
    assert!(!db.table_exists("backend_auth_item").await.unwrap());

    assert!(migration.revert(&db).await.is_err());
}

#[tokio::test]
async fn test_table_prefix_applies_to_every_table() {
    init_test_logging();
    let db = Database::with_table_prefix("sqlite::memory:", "bk_")
        .await
        .unwrap();
    db.migrate().await.unwrap();

    assert!(db.table_exists("bk_admin").await.unwrap());
    assert!(db.table_exists("bk_backend_auth_item").await.unwrap());
    assert!(db.table_exists("bk_migration").await.unwrap());
    assert!(!db.table_exists("admin").await.unwrap());
    assert!(db
        .index_names("bk_backend_auth_item")
        .await
        .unwrap()
        .contains(&"idx_bk_backend_auth_item_type".to_owned()));
}

#[tokio::test]
async fn test_invalid_table_prefix_rejected() {
    init_test_logging();
    let result = Database::with_table_prefix("sqlite::memory:", "bk; DROP").await;
    assert!(matches!(result, Err(DatabaseError::InvalidData { .. })));
}

#[tokio::test]
async fn test_unknown_history_version_blocks_down() {
    let db = create_empty_database().await.unwrap();
    let runner = MigrationRunner::new(db.clone());
    runner.up(None).await.unwrap();

    sqlx::query("INSERT INTO migration (version, apply_time) VALUES ($1, $2)")
        .bind("m999999_999999_orphan")
        .bind(i64::MAX)
        .execute(db.pool())
        .await
        .unwrap();

    let error = runner.down(1).await.unwrap_err();
    assert!(matches!(error, DatabaseError::MigrationError { ref version, .. } if version == "m999999_999999_orphan"));
    assert!(db.table_exists("backend_auth_item").await.unwrap());
}

/// Creates a table, then fails
struct BrokenMigration;

#[async_trait]
impl Migration for BrokenMigration {
    fn version(&self) -> &'static str {
        "m200000_000000_broken"
    }

    async fn up(
        &self,
        conn: &mut SqliteConnection,
        ctx: &MigrationContext,
    ) -> Result<(), DatabaseError> {
        sqlx::query(&format!("CREATE TABLE {} (id INTEGER)", ctx.table("half_done")))
            .execute(&mut *conn)
            .await?;
        sqlx::query("THIS IS NOT SQL").execute(&mut *conn).await?;
        Ok(())
    }

    async fn down(
        &self,
        _conn: &mut SqliteConnection,
        _ctx: &MigrationContext,
    ) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_migration_rolls_back() {
    let db = create_empty_database().await.unwrap();
    let migrations: Vec<Arc<dyn Migration>> =
        vec![Arc::new(CreateAdminTable), Arc::new(BrokenMigration)];
    let runner = MigrationRunner::with_migrations(db.clone(), migrations);

    let error = runner.up(None).await.unwrap_err();
    assert!(matches!(error, DatabaseError::MigrationError { ref version, .. } if version == "m200000_000000_broken"));

    assert!(db.table_exists("admin").await.unwrap());
    assert!(!db.table_exists("half_done").await.unwrap());

    let history = runner.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version, ADMIN_VERSION);
    assert_eq!(runner.pending().await.unwrap(), vec!["m200000_000000_broken"]);
}

#[tokio::test]
async fn test_file_database_keeps_history_across_connections() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("backend.db").display());

    let db = Database::new(&url).await.unwrap();
    assert_eq!(db.migrate().await.unwrap().len(), 2);
    db.pool().close().await;

    let reopened = Database::new(&url).await.unwrap();
    assert!(reopened.migrate().await.unwrap().is_empty());
    assert!(reopened.table_exists("backend_auth_item").await.unwrap());
}
