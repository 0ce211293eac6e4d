// ABOUTME: Password hashing capability injected into the identity service
// ABOUTME: PasswordHasher trait, bcrypt implementation and blocking-pool helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::errors::{AppError, AppResult};

/// One-way salted password hashing
pub trait PasswordHasher: Send + Sync {
    /// Produce a freshly salted hash of `password`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying primitive fails
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Check `password` against `hash`; malformed hashes never verify
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// bcrypt with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with the given cost (4..=31)
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        if hash.is_empty() {
            return false;
        }
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

/// Hash on the blocking pool so bcrypt does not stall the async executor
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task panics
pub async fn hash_password(hasher: Arc<dyn PasswordHasher>, password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Verify on the blocking pool; a failed task counts as a mismatch
pub async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    password: String,
    hash: String,
) -> bool {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .unwrap_or(false)
}
