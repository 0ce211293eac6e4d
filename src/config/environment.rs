// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses database location, table prefix and identity settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::defaults;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns an error for an empty location or a non-SQLite scheme
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            let path = rest.trim_start_matches("//");
            return if path == ":memory:" || path.is_empty() {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path),
                })
            };
        }
        if trimmed.contains("://") {
            anyhow::bail!("Unsupported database URL scheme: {trimmed}");
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(
                defaults::DATABASE_URL
                    .strip_prefix("sqlite:")
                    .unwrap_or(defaults::DATABASE_URL),
            ),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Settings consumed by the admin identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Seconds a password reset token stays valid after issuance
    pub password_reset_token_expire: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            password_reset_token_expire: defaults::PASSWORD_RESET_TOKEN_EXPIRE_SECS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Prefix prepended to every logical table name
    pub table_prefix: String,
}

/// Complete process configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Storage settings
    pub database: DatabaseConfig,
    /// Identity settings
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL))
                    .context("Invalid DATABASE_URL value")?,
                table_prefix: env_var_or("TABLE_PREFIX", ""),
            },
            identity: IdentityConfig {
                password_reset_token_expire: env_var_or(
                    "PASSWORD_RESET_TOKEN_EXPIRE",
                    &defaults::PASSWORD_RESET_TOKEN_EXPIRE_SECS.to_string(),
                )
                .parse()
                .context("Invalid PASSWORD_RESET_TOKEN_EXPIRE value")?,
                bcrypt_cost: env_var_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
                    .parse()
                    .context("Invalid BCRYPT_COST value")?,
            },
        };

        config.validate()?;
        info!(
            config.environment = %config.environment,
            config.database = %config.database.url,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for a negative token expiry, a bcrypt cost outside
    /// 4..=31, or a table prefix with characters other than `[A-Za-z0-9_]`
    pub fn validate(&self) -> Result<()> {
        if self.identity.password_reset_token_expire < 0 {
            anyhow::bail!("PASSWORD_RESET_TOKEN_EXPIRE must not be negative");
        }
        if !(4..=31).contains(&self.identity.bcrypt_cost) {
            anyhow::bail!("BCRYPT_COST must be between 4 and 31");
        }
        if !self
            .database
            .table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            anyhow::bail!("TABLE_PREFIX may only contain letters, digits and underscores");
        }
        Ok(())
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert!(Environment::from_str_or_default("test").is_testing());
        assert_eq!(
            Environment::from_str_or_default("anything"),
            Environment::Development
        );
    }

    #[test]
    fn test_database_url_parsing() {
        let file = DatabaseUrl::parse_url("sqlite:./test.db").unwrap();
        assert_eq!(file.to_connection_string(), "sqlite:./test.db");

        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());

        let bare = DatabaseUrl::parse_url("./some/path.db").unwrap();
        assert_eq!(
            bare,
            DatabaseUrl::SQLite {
                path: PathBuf::from("./some/path.db")
            }
        );

        assert!(DatabaseUrl::parse_url("mysql://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("  ").is_err());
    }

    #[test]
    fn test_default_database_url() {
        assert_eq!(
            DatabaseUrl::default().to_connection_string(),
            defaults::DATABASE_URL
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = ServerConfig {
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
                table_prefix: "tbl_".to_owned(),
            },
            identity: IdentityConfig::default(),
        };
        assert!(config.validate().is_ok());

        config.database.table_prefix = "bad-prefix".to_owned();
        assert!(config.validate().is_err());

        config.database.table_prefix = String::new();
        config.identity.bcrypt_cost = 2;
        assert!(config.validate().is_err());

        config.identity.bcrypt_cost = 4;
        config.identity.password_reset_token_expire = -1;
        assert!(config.validate().is_err());
    }
}
