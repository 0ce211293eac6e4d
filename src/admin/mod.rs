// ABOUTME: Admin identity module organization and exports
// ABOUTME: Scenario validation, display labels and the AdminIdentityService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Admin Identity
//!
//! Everything needed to authenticate, validate and persist administrator
//! accounts on top of the [`database`](crate::database) layer.

/// Identity lookups, password handling and the save lifecycle
pub mod identity;
/// Attribute and enumeration display labels
pub mod labels;
/// Scenario-driven form validation
pub mod validation;

pub use identity::AdminIdentityService;
pub use labels::{attribute_label, sex_label, sex_options, status_label, status_options};
pub use validation::validate_form;
