// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Table names, stored enumeration values, labels and defaults for admin accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Logical table names (before the configured prefix is applied)
pub mod tables {
    /// Administrator accounts
    pub const ADMIN: &str = "admin";
    /// RBAC roles and permissions
    pub const BACKEND_AUTH_ITEM: &str = "backend_auth_item";
    /// Applied migration history
    pub const MIGRATION: &str = "migration";
}

/// Attribute names of the admin record and its form-only fields
pub mod admin_fields {
    /// Primary key
    pub const ID: &str = "id";
    /// Login name
    pub const USERNAME: &str = "username";
    /// Remember-me key
    pub const AUTH_KEY: &str = "auth_key";
    /// Stored password hash
    pub const PASSWORD_HASH: &str = "password_hash";
    /// Submitted plaintext password (form only)
    pub const PASSWORD: &str = "password";
    /// Password confirmation (form only)
    pub const PASSWORD_REPEAT: &str = "password_repeat";
    /// Password reset token
    pub const PASSWORD_RESET_TOKEN: &str = "password_reset_token";
    /// Email address
    pub const EMAIL: &str = "email";
    /// Mobile number
    pub const MOBILE: &str = "mobile";
    /// Avatar file reference
    pub const AVATAR: &str = "avatar";
    /// Sex
    pub const SEX: &str = "sex";
    /// Last login address
    pub const LAST_LOGIN_IP: &str = "last_login_ip";
    /// Last login time
    pub const LAST_LOGIN_TIME: &str = "last_login_time";
    /// Account status
    pub const STATUS: &str = "status";
    /// Creation time
    pub const CREATED_AT: &str = "created_at";
    /// Last update time
    pub const UPDATED_AT: &str = "updated_at";
    /// Assigned role (form only)
    pub const ROLE: &str = "role";
}

/// Stored values of the admin status column
pub mod admin_status {
    /// Account disabled
    pub const FORBID: i64 = 0;
    /// Account usable
    pub const ACTIVE: i64 = 1;
}

/// Stored values of the admin sex column
pub mod sex {
    /// Not disclosed
    pub const SECRET: i64 = 0;
    /// Man
    pub const MAN: i64 = 1;
    /// Woman
    pub const WOMAN: i64 = 2;
}

/// Stored values of the auth item `type` column
pub mod auth_item_type {
    /// Role
    pub const ROLE: i64 = 1;
    /// Permission
    pub const PERMISSION: i64 = 2;
}

/// Default display labels
pub mod labels {
    /// Fallback for unknown option keys
    pub const UNKNOWN: &str = "Unknown";
    /// Status `FORBID`
    pub const STATUS_FORBID: &str = "Forbid";
    /// Status `ACTIVE`
    pub const STATUS_ACTIVE: &str = "Active";
    /// Sex `SECRET`
    pub const SEX_SECRET: &str = "Secret";
    /// Sex `MAN`
    pub const SEX_MAN: &str = "Man";
    /// Sex `WOMAN`
    pub const SEX_WOMAN: &str = "Woman";
}

/// Field limits and formats
pub mod limits {
    /// Maximum auth item name / rule name length
    pub const AUTH_ITEM_NAME_MAX_LEN: usize = 64;
    /// Length of generated auth keys and reset token random parts
    pub const RANDOM_STRING_LENGTH: usize = 32;
    /// Avatar extensions accepted on upload
    pub const AVATAR_EXTENSIONS: &[&str] = &["png", "jpg"];
}

/// Configuration defaults
pub mod defaults {
    /// Password reset token lifetime in seconds
    pub const PASSWORD_RESET_TOKEN_EXPIRE_SECS: i64 = 3600;
    /// Default database location
    pub const DATABASE_URL: &str = "sqlite:./data/backend.db";
    /// Default service name for structured logs
    pub const SERVICE_NAME: &str = "backend-admin";
}
