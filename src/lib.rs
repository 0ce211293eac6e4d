// ABOUTME: Main library entry point for the backend admin identity system
// ABOUTME: Admin identity model, RBAC auth item storage and versioned schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Backend Admin
//!
//! Administrator identity and RBAC storage for a web administration backend.
//!
//! ## Features
//!
//! - **Identity lookups**: active accounts by id, username or password reset token
//! - **Scenario validation**: create / update / modify rules with field-level errors
//! - **Password handling**: injected bcrypt hasher, constant-time auth key checks
//! - **Schema migrations**: `admin` and `backend_auth_item` tables with a history table
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use backend_admin::admin::AdminIdentityService;
//! use backend_admin::config::ServerConfig;
//! use backend_admin::database::Database;
//! use backend_admin::models::{AdminForm, Scenario};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let db = Database::with_table_prefix(
//!         &config.database.url.to_connection_string(),
//!         &config.database.table_prefix,
//!     )
//!     .await?;
//!     db.migrate().await?;
//!
//!     let identities = AdminIdentityService::from_database(db, config.identity);
//!     let form = AdminForm {
//!         username: "root".into(),
//!         email: "root@example.com".into(),
//!         mobile: "13800138000".into(),
//!         password: "change-me".into(),
//!         password_repeat: "change-me".into(),
//!         ..AdminForm::default()
//!     };
//!     let admin = identities.create(&form, Scenario::Create).await?;
//!     println!("created admin {:?}", admin.id);
//!     Ok(())
//! }
//! ```

/// Admin identity service, validation and labels
pub mod admin;

/// Environment-driven configuration
pub mod config;

/// Table names, stored enum values and defaults
pub mod constants;

/// SQLite storage and repositories
pub mod database;

/// Unified error handling system with standard error codes
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Versioned schema migrations
pub mod migrations;

/// Plain data models
pub mod models;

/// Password hashing and token generation
pub mod security;

/// Shared helpers
pub mod utils;
