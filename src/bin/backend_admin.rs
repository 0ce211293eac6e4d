// ABOUTME: Command-line tool for schema migrations and console admin bootstrap
// ABOUTME: Runs migrate up/down/history/pending and creates or toggles admin accounts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Backend admin console.
//!
//! Usage:
//! ```bash
//! # Apply every pending migration
//! cargo run --bin backend-admin -- migrate up
//!
//! # Revert the most recent migration
//! cargo run --bin backend-admin -- migrate down --limit 1
//!
//! # Show applied and pending migrations
//! cargo run --bin backend-admin -- migrate history
//! cargo run --bin backend-admin -- migrate pending
//!
//! # Bootstrap the first administrator
//! cargo run --bin backend-admin -- create-admin --username root --password secret
//!
//! # Disable an account
//! cargo run --bin backend-admin -- set-status --id 1 --status forbid
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use backend_admin::admin::AdminIdentityService;
use backend_admin::config::{DatabaseUrl, ServerConfig};
use backend_admin::database::Database;
use backend_admin::errors::AppError;
use backend_admin::logging::LoggingConfig;
use backend_admin::migrations::MigrationRunner;
use backend_admin::models::{AdminForm, AdminStatus, Scenario};

#[derive(Parser)]
#[command(
    name = "backend-admin",
    about = "Backend admin schema and account management",
    long_about = "Apply or revert schema migrations and bootstrap administrator accounts from the console."
)]
struct BackendAdminArgs {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (defaults to DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },

    /// Create an administrator with the console scenario
    CreateAdmin {
        /// Login name
        #[arg(long)]
        username: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Mobile number
        #[arg(long, default_value = "")]
        mobile: String,

        /// Initial password
        #[arg(long)]
        password: String,
    },

    /// Enable or disable an administrator
    SetStatus {
        /// Account id
        #[arg(long)]
        id: i64,

        /// New status
        #[arg(long, value_enum)]
        status: StatusArg,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply pending migrations
    Up {
        /// Apply at most this many
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Revert applied migrations, most recent first
    Down {
        /// Revert this many
        #[arg(long, default_value = "1")]
        limit: usize,
    },

    /// List applied migrations
    History,

    /// List migrations not yet applied
    Pending,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Active,
    Forbid,
}

impl From<StatusArg> for AdminStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => Self::Active,
            StatusArg::Forbid => Self::Forbid,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = BackendAdminArgs::parse();

    LoggingConfig::from_env().verbose(args.verbose).init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(url).context("Invalid --database-url")?;
    }

    if let DatabaseUrl::SQLite { path } = &config.database.url {
        ensure_parent_dir(path)?;
    }

    info!(db.url = %config.database.url, "Connecting to database");
    let database = Database::with_table_prefix(
        &config.database.url.to_connection_string(),
        &config.database.table_prefix,
    )
    .await?;

    match args.command {
        Command::Migrate { action } => run_migrate(database, action).await,
        Command::CreateAdmin {
            username,
            email,
            mobile,
            password,
        } => {
            database.migrate().await?;
            let service = AdminIdentityService::from_database(database, config.identity);
            let form = AdminForm {
                username,
                email,
                mobile,
                password_repeat: password.clone(),
                password,
                ..AdminForm::default()
            };
            match service.create(&form, Scenario::Default).await {
                Ok(admin) => {
                    println!(
                        "Created admin #{} ({})",
                        admin.id.unwrap_or_default(),
                        admin.username
                    );
                    Ok(())
                }
                Err(e) => Err(report(e)),
            }
        }
        Command::SetStatus { id, status } => {
            let service = AdminIdentityService::from_database(database, config.identity);
            let status = AdminStatus::from(status);
            service.set_status(id, status).await.map_err(report)?;
            println!("Admin #{id} is now {}", status.label());
            Ok(())
        }
    }
}

async fn run_migrate(database: Database, action: MigrateAction) -> Result<()> {
    let runner = MigrationRunner::new(database);
    match action {
        MigrateAction::Up { limit } => {
            let applied = runner.up(limit).await?;
            if applied.is_empty() {
                println!("No new migrations found. Your system is up-to-date.");
            }
            for version in applied {
                println!("*** applied {version}");
            }
        }
        MigrateAction::Down { limit } => {
            let reverted = runner.down(limit).await?;
            if reverted.is_empty() {
                println!("No migration has been done before.");
            }
            for version in reverted {
                println!("*** reverted {version}");
            }
        }
        MigrateAction::History => {
            for entry in runner.history().await? {
                let applied_at = DateTime::from_timestamp(entry.apply_time, 0)
                    .map_or_else(|| entry.apply_time.to_string(), |t| t.to_rfc3339());
                println!("({applied_at}) {}", entry.version);
            }
        }
        MigrateAction::Pending => {
            for version in runner.pending().await? {
                println!("{version}");
            }
        }
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Print field errors one per line and turn the error into a process failure
fn report(error: AppError) -> anyhow::Error {
    if let Some(fields) = error.validation_errors() {
        for field in &fields {
            eprintln!("{}: {}", field.field, field.message);
        }
    }
    anyhow::Error::new(error)
}
