// ABOUTME: Repository traits for admin accounts and auth items
// ABOUTME: Async interfaces the identity service depends on, plus Database-backed impls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! Each trait is the seam between domain logic and storage. The `*Impl`
//! types delegate to [`Database`](crate::database::Database); tests can
//! substitute their own implementations.

mod admin_repository;
mod auth_item_repository;

pub use admin_repository::AdminRepositoryImpl;
pub use auth_item_repository::AuthItemRepositoryImpl;

use async_trait::async_trait;

use super::{AdminUniqueField, DatabaseError};
use crate::models::{Admin, AdminStatus, AuthItem, AuthItemType};

/// Administrator account persistence
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Account by primary key regardless of status
    async fn get(&self, id: i64) -> Result<Option<Admin>, DatabaseError>;

    /// Active account by primary key
    async fn find_by_id(&self, id: i64) -> Result<Option<Admin>, DatabaseError>;

    /// Active account by username
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, DatabaseError>;

    /// Active account holding exactly `token`; does not check expiry
    async fn find_by_password_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Admin>, DatabaseError>;

    /// Whether another account already uses `value` in `field`
    async fn is_taken(
        &self,
        field: AdminUniqueField,
        value: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError>;

    /// Insert a new account (assigning its id) or overwrite an existing one
    async fn save(&self, admin: &mut Admin) -> Result<(), DatabaseError>;

    /// Store last login address and time
    async fn record_login(&self, id: i64, ip: Option<&str>, at: i64)
        -> Result<(), DatabaseError>;

    /// Change account status
    async fn set_status(&self, id: i64, status: AdminStatus, at: i64)
        -> Result<(), DatabaseError>;

    /// `(id, username)` of every account
    async fn usernames(&self) -> Result<Vec<(i64, String)>, DatabaseError>;
}

/// Role and permission persistence
#[async_trait]
pub trait AuthItemRepository: Send + Sync {
    /// Insert a new item
    async fn create(&self, item: &AuthItem) -> Result<(), DatabaseError>;

    /// Item by name
    async fn get(&self, name: &str) -> Result<Option<AuthItem>, DatabaseError>;

    /// Items of one type
    async fn list(&self, item_type: AuthItemType) -> Result<Vec<AuthItem>, DatabaseError>;

    /// Remove an item; returns whether it existed
    async fn delete(&self, name: &str) -> Result<bool, DatabaseError>;
}
