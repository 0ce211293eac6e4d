// ABOUTME: Application constants shared with the core crate
// ABOUTME: Re-exports table names, stored enum values, labels, limits and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Constants live in `backend-admin-core`; this module keeps the familiar
//! `crate::constants::*` paths.

pub use backend_admin_core::constants::*;
