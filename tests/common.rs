// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, a fast identity service and form fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `backend_admin`

use std::sync::{Arc, Once};

use anyhow::Result;
use backend_admin::admin::AdminIdentityService;
use backend_admin::config::IdentityConfig;
use backend_admin::database::repositories::{AdminRepository, AdminRepositoryImpl};
use backend_admin::database::Database;
use backend_admin::models::AdminForm;
use backend_admin::security::BcryptHasher;
use backend_admin::utils::FixedClock;

static INIT_LOGGER: Once = Once::new();

/// Start of every test clock: 2024-01-01T00:00:00Z
pub const TEST_EPOCH: i64 = 1_704_067_200;

/// Lowest bcrypt cost, keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database without any tables
pub async fn create_empty_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Fresh in-memory database with every built-in migration applied
pub async fn create_test_database() -> Result<Database> {
    let db = create_empty_database().await?;
    db.migrate().await?;
    Ok(db)
}

/// Identity settings used by the tests
pub const fn test_identity_config() -> IdentityConfig {
    IdentityConfig {
        password_reset_token_expire: 3600,
        bcrypt_cost: TEST_BCRYPT_COST,
    }
}

/// Identity service over `repository` with a controllable clock
pub fn service_with_repository(
    repository: Arc<dyn AdminRepository>,
    clock: Arc<FixedClock>,
) -> AdminIdentityService {
    AdminIdentityService::new(
        repository,
        Arc::new(BcryptHasher::new(TEST_BCRYPT_COST)),
        clock,
        test_identity_config(),
    )
}

/// Migrated database, identity service and the clock driving it
pub async fn create_test_service() -> Result<(Database, AdminIdentityService, Arc<FixedClock>)> {
    let db = create_test_database().await?;
    let clock = Arc::new(FixedClock::at(TEST_EPOCH));
    let service = service_with_repository(
        Arc::new(AdminRepositoryImpl::new(db.clone())),
        Arc::clone(&clock),
    );
    Ok((db, service, clock))
}

/// Complete create-scenario form; `n` keeps username, email and mobile distinct
pub fn create_form(n: u32) -> AdminForm {
    AdminForm {
        username: format!("admin{n}"),
        email: format!("admin{n}@example.com"),
        mobile: format!("1380013{n:04}"),
        password: "correct horse".into(),
        password_repeat: "correct horse".into(),
        ..AdminForm::default()
    }
}
