// ABOUTME: Admin account repository implementation
// ABOUTME: Delegates AdminRepository operations to the SQLite Database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::AdminRepository;
use crate::database::{AdminUniqueField, Database, DatabaseError};
use crate::models::{Admin, AdminStatus};

/// SQLite implementation of `AdminRepository`
pub struct AdminRepositoryImpl {
    db: Database,
}

impl AdminRepositoryImpl {
    /// Create a new `AdminRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for AdminRepositoryImpl {
    async fn get(&self, id: i64) -> Result<Option<Admin>, DatabaseError> {
        self.db.get_admin(id).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, DatabaseError> {
        self.db.get_active_admin(id).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError> {
        self.db.get_active_admin_by_username(username).await
    }

    async fn find_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Admin>, DatabaseError> {
        self.db.get_active_admin_by_reset_token(token).await
    }

    async fn is_taken(
        &self,
        field: AdminUniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        self.db.admin_field_taken(field, value, exclude_id).await
    }

    async fn save(&self, admin: &mut Admin) -> Result<(), DatabaseError> {
        if admin.is_new_record() {
            let id = self.db.insert_admin(admin).await?;
            admin.id = Some(id);
            Ok(())
        } else {
            self.db.update_admin(admin).await
        }
    }

    async fn record_login(
        &self,
        id: i64,
        ip: Option<&str>,
        at: i64,
    ) -> Result<(), DatabaseError> {
        self.db.update_admin_login(id, ip, at).await
    }

    async fn set_status(
        &self,
        id: i64,
        status: AdminStatus,
        at: i64,
    ) -> Result<(), DatabaseError> {
        self.db.update_admin_status(id, status, at).await
    }

    async fn usernames(&self) -> Result<Vec<(i64, String)>, DatabaseError> {
        self.db.list_admin_usernames().await
    }
}
