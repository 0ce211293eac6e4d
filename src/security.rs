// ABOUTME: Security collaborators for the admin identity model
// ABOUTME: Password hashing capability and random token generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Security
//!
//! The identity model never reaches for global security services; the
//! hasher is injected and token generation is a pure function of the
//! thread RNG and the supplied time.

/// Password hashing capability and the bcrypt implementation
pub mod password;

/// Auth key and password reset token generation and parsing
pub mod tokens;

pub use password::{BcryptHasher, PasswordHasher};
