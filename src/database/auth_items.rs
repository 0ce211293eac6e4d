// ABOUTME: RBAC auth item database operations on backend_auth_item
// ABOUTME: Insert, fetch by name, list by type and delete roles/permissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{Database, DatabaseError};
use crate::constants::tables;
use crate::models::{AuthItem, AuthItemType};

const AUTH_ITEM_COLUMNS: &str = "name, type, description, rule_name, data, created_at, updated_at";

fn row_to_auth_item(row: &SqliteRow) -> Result<AuthItem, DatabaseError> {
    let raw_type: i64 = row.try_get("type")?;
    Ok(AuthItem {
        name: row.try_get("name")?,
        item_type: AuthItemType::try_from(raw_type).map_err(|_| DatabaseError::InvalidData {
            field: "type",
            value: raw_type.to_string(),
        })?,
        description: row.try_get("description")?,
        rule_name: row.try_get("rule_name")?,
        data: row.try_get("data")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Insert a role or permission
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the name is taken, or an error if the
    /// query fails
    pub async fn insert_auth_item(&self, item: &AuthItem) -> Result<(), DatabaseError> {
        let sql = format!(
            "INSERT INTO {} ({AUTH_ITEM_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)",
            self.table(tables::BACKEND_AUTH_ITEM)
        );
        sqlx::query(&sql)
            .bind(&item.name)
            .bind(item.item_type.as_i64())
            .bind(&item.description)
            .bind(&item.rule_name)
            .bind(&item.data)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Fetch an item by its primary key
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored type is invalid
    pub async fn get_auth_item(&self, name: &str) -> Result<Option<AuthItem>, DatabaseError> {
        let sql = format!(
            "SELECT {AUTH_ITEM_COLUMNS} FROM {} WHERE name = $1",
            self.table(tables::BACKEND_AUTH_ITEM)
        );
        sqlx::query(&sql)
            .bind(name)
            .fetch_optional(self.pool())
            .await?
            .as_ref()
            .map(row_to_auth_item)
            .transpose()
    }

    /// All items of one type, ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored type is invalid
    pub async fn list_auth_items(
        &self,
        item_type: AuthItemType,
    ) -> Result<Vec<AuthItem>, DatabaseError> {
        let sql = format!(
            "SELECT {AUTH_ITEM_COLUMNS} FROM {} WHERE type = $1 ORDER BY name",
            self.table(tables::BACKEND_AUTH_ITEM)
        );
        sqlx::query(&sql)
            .bind(item_type.as_i64())
            .fetch_all(self.pool())
            .await?
            .iter()
            .map(row_to_auth_item)
            .collect()
    }

    /// Delete an item; returns whether a row was removed
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn delete_auth_item(&self, name: &str) -> Result<bool, DatabaseError> {
        let sql = format!(
            "DELETE FROM {} WHERE name = $1",
            self.table(tables::BACKEND_AUTH_ITEM)
        );
        let result = sqlx::query(&sql).bind(name).execute(self.pool()).await?;
        Ok(result.rows_affected() > 0)
    }
}
