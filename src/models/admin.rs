// ABOUTME: Administrator account models for the backend identity system
// ABOUTME: Admin record, AdminStatus, Sex, Scenario and the submitted AdminForm
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::constants::{admin_status, labels, sex};
use crate::errors::AppError;
use crate::security::tokens;

/// Account status; accounts are soft-disabled, never deleted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    /// Login forbidden
    Forbid,
    /// Account usable
    #[default]
    Active,
}

impl AdminStatus {
    /// Every status, in stored-value order
    pub const ALL: [Self; 2] = [Self::Forbid, Self::Active];

    /// Stored column value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Forbid => admin_status::FORBID,
            Self::Active => admin_status::ACTIVE,
        }
    }

    /// Default display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forbid => labels::STATUS_FORBID,
            Self::Active => labels::STATUS_ACTIVE,
        }
    }
}

impl TryFrom<i64> for AdminStatus {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            admin_status::FORBID => Ok(Self::Forbid),
            admin_status::ACTIVE => Ok(Self::Active),
            _ => Err(AppError::invalid_input(format!(
                "Invalid admin status: {value}"
            ))),
        }
    }
}

impl Display for AdminStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Forbid => write!(f, "forbid"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Declared sex of the account holder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Not disclosed
    #[default]
    Secret,
    /// Man
    Man,
    /// Woman
    Woman,
}

impl Sex {
    /// Every value, in stored-value order
    pub const ALL: [Self; 3] = [Self::Secret, Self::Man, Self::Woman];

    /// Stored column value
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Secret => sex::SECRET,
            Self::Man => sex::MAN,
            Self::Woman => sex::WOMAN,
        }
    }

    /// Default display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Secret => labels::SEX_SECRET,
            Self::Man => labels::SEX_MAN,
            Self::Woman => labels::SEX_WOMAN,
        }
    }
}

impl TryFrom<i64> for Sex {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            sex::SECRET => Ok(Self::Secret),
            sex::MAN => Ok(Self::Man),
            sex::WOMAN => Ok(Self::Woman),
            _ => Err(AppError::invalid_input(format!("Invalid sex: {value}"))),
        }
    }
}

/// Named validation context deciding which rules apply on save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Console bootstrap: format, range and uniqueness rules only
    #[default]
    Default,
    /// Administrative creation: password and confirmation required
    Create,
    /// Administrative edit of another account
    Update,
    /// Account holder editing themselves: confirmation must match
    Modify,
}

impl Scenario {
    /// Whether username, email and mobile are mandatory
    #[must_use]
    pub const fn requires_contact_fields(self) -> bool {
        matches!(self, Self::Create | Self::Update | Self::Modify)
    }

    /// Whether password and confirmation are mandatory
    #[must_use]
    pub const fn requires_password(self) -> bool {
        matches!(self, Self::Create)
    }

    /// Whether the confirmation is compared against the password
    #[must_use]
    pub const fn compares_password(self) -> bool {
        matches!(self, Self::Create | Self::Modify)
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Default => write!(f, "default"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Modify => write!(f, "modify"),
        }
    }
}

/// Persisted administrator account
///
/// `id` is `None` until the record has been inserted. Timestamps are unix
/// seconds, matching the integer columns of the `admin` table. Secrets are
/// never serialized, so the record is output-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Admin {
    /// Primary key, `None` for a new record
    pub id: Option<i64>,
    /// Unique login name
    pub username: String,
    /// Remember-me authentication key
    #[serde(skip_serializing)]
    pub auth_key: String,
    /// Salted one-way password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// `<random>_<unix-timestamp>` recovery token
    #[serde(skip_serializing)]
    pub password_reset_token: Option<String>,
    /// Unique email address
    pub email: Option<String>,
    /// Unique mobile number
    pub mobile: Option<String>,
    /// Avatar image reference
    pub avatar: Option<String>,
    /// Declared sex
    pub sex: Sex,
    /// Address of the last successful login
    pub last_login_ip: Option<String>,
    /// Unix time of the last successful login
    pub last_login_time: Option<i64>,
    /// Account status
    pub status: AdminStatus,
    /// Creation time
    pub created_at: i64,
    /// Last update time
    pub updated_at: i64,
}

impl Admin {
    /// Create an unsaved account with defaults for every optional attribute
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            auth_key: String::new(),
            password_hash: String::new(),
            password_reset_token: None,
            email: None,
            mobile: None,
            avatar: None,
            sex: Sex::default(),
            last_login_ip: None,
            last_login_time: None,
            status: AdminStatus::default(),
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Whether the record has not been inserted yet
    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    /// Identity primary key
    #[must_use]
    pub const fn get_id(&self) -> Option<i64> {
        self.id
    }

    /// Remember-me key of this identity
    #[must_use]
    pub fn get_auth_key(&self) -> &str {
        &self.auth_key
    }

    /// Compare a presented auth key against the stored one in constant time
    #[must_use]
    pub fn validate_auth_key(&self, auth_key: &str) -> bool {
        if self.auth_key.is_empty() {
            return false;
        }
        self.auth_key.as_bytes().ct_eq(auth_key.as_bytes()).into()
    }

    /// Assign a new random remember-me key
    pub fn generate_auth_key(&mut self) {
        self.auth_key = tokens::generate_random_string();
    }

    /// Assign a new reset token stamped with `now`
    pub fn generate_password_reset_token(&mut self, now: DateTime<Utc>) {
        self.password_reset_token = Some(tokens::generate_password_reset_token(now));
    }

    /// Clear the reset token
    pub fn remove_password_reset_token(&mut self) {
        self.password_reset_token = None;
    }
}

/// Submitted create/update/modify form
///
/// Enumerations arrive as raw integers so out-of-range submissions can be
/// reported as field errors instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminForm {
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Mobile number
    pub mobile: String,
    /// Plaintext password, hashed before persisting
    #[serde(skip_serializing)]
    pub password: String,
    /// Password confirmation
    #[serde(skip_serializing)]
    pub password_repeat: String,
    /// Uploaded avatar file name or reference
    pub avatar: Option<String>,
    /// Raw sex value
    pub sex: Option<i64>,
    /// Raw status value, defaults to active
    pub status: Option<i64>,
    /// Role to assign, consumed by the RBAC manager
    pub role: Option<String>,
}

impl AdminForm {
    /// Pre-fill a form from an existing account (passwords left blank)
    #[must_use]
    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            username: admin.username.clone(),
            email: admin.email.clone().unwrap_or_default(),
            mobile: admin.mobile.clone().unwrap_or_default(),
            password: String::new(),
            password_repeat: String::new(),
            avatar: admin.avatar.clone(),
            sex: Some(admin.sex.as_i64()),
            status: Some(admin.status.as_i64()),
            role: None,
        }
    }
}
