// ABOUTME: Data models for administrator accounts and RBAC auth items
// ABOUTME: Re-exports Admin, AdminForm, AdminStatus, Sex, Scenario and AuthItem
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data structures with no persistence behaviour of their own.
//! Enumerated columns (status, sex, auth item type) are closed enums so an
//! invalid stored value is rejected at the row-mapping boundary.

/// Administrator account, its enumerations and the submitted form
pub mod admin;
/// RBAC roles and permissions
pub mod auth_item;

pub use admin::{Admin, AdminForm, AdminStatus, Scenario, Sex};
pub use auth_item::{AuthItem, AuthItemType};
