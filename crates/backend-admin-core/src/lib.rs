// ABOUTME: Core types and constants for the backend admin identity workspace
// ABOUTME: Foundation crate with error handling, validation errors, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Backend Admin Core
//!
//! Foundation crate providing shared types and constants for the backend
//! administrator identity model. It carries no storage or runtime
//! dependencies so it changes infrequently.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and the
//!   field-scoped `ValidationErrors` container
//! - **constants**: Admin field names, enumeration values, labels and defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;
