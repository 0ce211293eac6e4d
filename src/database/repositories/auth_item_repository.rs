// ABOUTME: Auth item repository implementation for roles and permissions
// ABOUTME: Delegates AuthItemRepository operations to the SQLite Database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::AuthItemRepository;
use crate::database::{Database, DatabaseError};
use crate::models::{AuthItem, AuthItemType};

/// SQLite implementation of `AuthItemRepository`
pub struct AuthItemRepositoryImpl {
    db: Database,
}

impl AuthItemRepositoryImpl {
    /// Create a new `AuthItemRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthItemRepository for AuthItemRepositoryImpl {
    async fn create(&self, item: &AuthItem) -> Result<(), DatabaseError> {
        self.db.insert_auth_item(item).await
    }

    async fn get(&self, name: &str) -> Result<Option<AuthItem>, DatabaseError> {
        self.db.get_auth_item(name).await
    }

    async fn list(&self, item_type: AuthItemType) -> Result<Vec<AuthItem>, DatabaseError> {
        self.db.list_auth_items(item_type).await
    }

    async fn delete(&self, name: &str) -> Result<bool, DatabaseError> {
        self.db.delete_auth_item(name).await
    }
}
