// ABOUTME: RBAC auth item model stored in the backend_auth_item table
// ABOUTME: AuthItem record and the closed AuthItemType discriminator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::constants::{auth_item_type, limits};
use crate::errors::{AppError, AppResult};

/// Discriminator between roles and permissions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AuthItemType {
    /// A role, assignable to admins
    Role,
    /// A permission, assignable to roles
    Permission,
}

impl AuthItemType {
    /// Stored `type` column value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Role => auth_item_type::ROLE,
            Self::Permission => auth_item_type::PERMISSION,
        }
    }
}

impl TryFrom<i64> for AuthItemType {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            auth_item_type::ROLE => Ok(Self::Role),
            auth_item_type::PERMISSION => Ok(Self::Permission),
            _ => Err(AppError::invalid_input(format!(
                "Invalid auth item type: {value}"
            ))),
        }
    }
}

impl Display for AuthItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Role => write!(f, "role"),
            Self::Permission => write!(f, "permission"),
        }
    }
}

/// Row of `backend_auth_item`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthItem {
    /// Unique name, primary key
    pub name: String,
    /// Role or permission
    pub item_type: AuthItemType,
    /// Free-form description
    pub description: Option<String>,
    /// Name of the business rule guarding this item
    pub rule_name: Option<String>,
    /// Serialized rule data
    pub data: Option<String>,
    /// Creation time (unix seconds)
    pub created_at: i64,
    /// Last update time (unix seconds)
    pub updated_at: i64,
}

impl AuthItem {
    /// Build a new item stamped with `now`
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or longer than the column allows
    pub fn new(name: impl Into<String>, item_type: AuthItemType, now: i64) -> AppResult<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().count() > limits::AUTH_ITEM_NAME_MAX_LEN {
            return Err(AppError::invalid_input(format!(
                "Auth item name must be 1-{} characters",
                limits::AUTH_ITEM_NAME_MAX_LEN
            )));
        }
        Ok(Self {
            name,
            item_type,
            description: None,
            rule_name: None,
            data: None,
            created_at: now,
            updated_at: now,
        })
    }
}
