// ABOUTME: Administrator account database operations
// ABOUTME: Active-account lookups, uniqueness probes, insert/update and login tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{Database, DatabaseError};
use crate::constants::{admin_fields, tables};
use crate::models::{Admin, AdminStatus, Sex};

const ADMIN_COLUMNS: &str = "id, username, auth_key, password_hash, password_reset_token, \
     email, mobile, avatar, sex, last_login_ip, last_login_time, status, created_at, updated_at";

/// Columns guarded by a unique index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminUniqueField {
    /// `username`
    Username,
    /// `email`
    Email,
    /// `mobile`
    Mobile,
}

impl AdminUniqueField {
    /// Every unique column, in validation order
    pub const ALL: [Self; 3] = [Self::Username, Self::Email, Self::Mobile];

    /// Column / attribute name
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Username => admin_fields::USERNAME,
            Self::Email => admin_fields::EMAIL,
            Self::Mobile => admin_fields::MOBILE,
        }
    }
}

fn row_to_admin(row: &SqliteRow) -> Result<Admin, DatabaseError> {
    let sex: i64 = row.try_get("sex")?;
    let status: i64 = row.try_get("status")?;

    Ok(Admin {
        id: Some(row.try_get("id")?),
        username: row.try_get("username")?,
        auth_key: row.try_get("auth_key")?,
        password_hash: row.try_get("password_hash")?,
        password_reset_token: row.try_get("password_reset_token")?,
        email: row.try_get("email")?,
        mobile: row.try_get("mobile")?,
        avatar: row.try_get("avatar")?,
        sex: Sex::try_from(sex).map_err(|_| DatabaseError::InvalidData {
            field: admin_fields::SEX,
            value: sex.to_string(),
        })?,
        last_login_ip: row.try_get("last_login_ip")?,
        last_login_time: row.try_get("last_login_time")?,
        status: AdminStatus::try_from(status).map_err(|_| DatabaseError::InvalidData {
            field: admin_fields::STATUS,
            value: status.to_string(),
        })?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl Database {
    /// Fetch an account by primary key regardless of status
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is invalid
    pub async fn get_admin(&self, id: i64) -> Result<Option<Admin>, DatabaseError> {
        let sql = format!(
            "SELECT {ADMIN_COLUMNS} FROM {} WHERE id = $1",
            self.table(tables::ADMIN)
        );
        sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .as_ref()
            .map(row_to_admin)
            .transpose()
    }

    /// Fetch an active account whose `column` equals `value`
    async fn get_active_admin_by(
        &self,
        column: &'static str,
        value: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        let sql = format!(
            "SELECT {ADMIN_COLUMNS} FROM {} WHERE {column} = $1 AND status = $2",
            self.table(tables::ADMIN)
        );
        sqlx::query(&sql)
            .bind(value)
            .bind(AdminStatus::Active.as_i64())
            .fetch_optional(self.pool())
            .await?
            .as_ref()
            .map(row_to_admin)
            .transpose()
    }

    /// Fetch an active account by primary key
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is invalid
    pub async fn get_active_admin(&self, id: i64) -> Result<Option<Admin>, DatabaseError> {
        let sql = format!(
            "SELECT {ADMIN_COLUMNS} FROM {} WHERE id = $1 AND status = $2",
            self.table(tables::ADMIN)
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(AdminStatus::Active.as_i64())
            .fetch_optional(self.pool())
            .await?
            .as_ref()
            .map(row_to_admin)
            .transpose()
    }

    /// Fetch an active account by username
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is invalid
    pub async fn get_active_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        self.get_active_admin_by(admin_fields::USERNAME, username)
            .await
    }

    /// Fetch an active account holding exactly this reset token
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is invalid
    pub async fn get_active_admin_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        self.get_active_admin_by(admin_fields::PASSWORD_RESET_TOKEN, token)
            .await
    }

    /// Whether another account already uses `value` in a unique column
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn admin_field_taken(
        &self,
        field: AdminUniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1 AND ($2 IS NULL OR id <> $2)",
            self.table(tables::ADMIN),
            field.column()
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(value)
            .bind(exclude_id)
            .fetch_one(self.pool())
            .await?;
        Ok(count > 0)
    }

    /// Insert a new account and return its generated id
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if a unique index rejects the row, or
    /// another error if the query fails
    pub async fn insert_admin(&self, admin: &Admin) -> Result<i64, DatabaseError> {
        let sql = format!(
            r"
            INSERT INTO {} (
                username, auth_key, password_hash, password_reset_token, email, mobile,
                avatar, sex, last_login_ip, last_login_time, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
            self.table(tables::ADMIN)
        );
        let result = sqlx::query(&sql)
            .bind(&admin.username)
            .bind(&admin.auth_key)
            .bind(&admin.password_hash)
            .bind(&admin.password_reset_token)
            .bind(&admin.email)
            .bind(&admin.mobile)
            .bind(&admin.avatar)
            .bind(admin.sex.as_i64())
            .bind(&admin.last_login_ip)
            .bind(admin.last_login_time)
            .bind(admin.status.as_i64())
            .bind(admin.created_at)
            .bind(admin.updated_at)
            .execute(self.pool())
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite every persisted attribute of an existing account
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account has no id or no row matched,
    /// `UniqueViolation` if a unique index rejects the change
    pub async fn update_admin(&self, admin: &Admin) -> Result<(), DatabaseError> {
        let id = admin.id.ok_or_else(|| DatabaseError::NotFound {
            entity_type: "admin",
            entity_id: "<unsaved>".to_owned(),
        })?;
        let sql = format!(
            r"
            UPDATE {} SET
                username = $2,
                auth_key = $3,
                password_hash = $4,
                password_reset_token = $5,
                email = $6,
                mobile = $7,
                avatar = $8,
                sex = $9,
                last_login_ip = $10,
                last_login_time = $11,
                status = $12,
                updated_at = $13
            WHERE id = $1
            ",
            self.table(tables::ADMIN)
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(&admin.username)
            .bind(&admin.auth_key)
            .bind(&admin.password_hash)
            .bind(&admin.password_reset_token)
            .bind(&admin.email)
            .bind(&admin.mobile)
            .bind(&admin.avatar)
            .bind(admin.sex.as_i64())
            .bind(&admin.last_login_ip)
            .bind(admin.last_login_time)
            .bind(admin.status.as_i64())
            .bind(admin.updated_at)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "admin",
                entity_id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Record a successful login
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matched, or an error if the query fails
    pub async fn update_admin_login(
        &self,
        id: i64,
        ip: Option<&str>,
        at: i64,
    ) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE {} SET last_login_ip = $2, last_login_time = $3 WHERE id = $1",
            self.table(tables::ADMIN)
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(ip)
            .bind(at)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "admin",
                entity_id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Enable or disable an account
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row matched, or an error if the query fails
    pub async fn update_admin_status(
        &self,
        id: i64,
        status: AdminStatus,
        at: i64,
    ) -> Result<(), DatabaseError> {
        let sql = format!(
            "UPDATE {} SET status = $2, updated_at = $3 WHERE id = $1",
            self.table(tables::ADMIN)
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(status.as_i64())
            .bind(at)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "admin",
                entity_id: id.to_string(),
            });
        }
        Ok(())
    }

    /// `(id, username)` of every account, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_admin_usernames(&self) -> Result<Vec<(i64, String)>, DatabaseError> {
        let sql = format!(
            "SELECT id, username FROM {} ORDER BY id",
            self.table(tables::ADMIN)
        );
        let rows = sqlx::query_as::<_, (i64, String)>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }
}
