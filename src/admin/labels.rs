// ABOUTME: Display labels for admin attributes and enumerations
// ABOUTME: Attribute labels plus status/sex option lists with an Unknown fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{admin_fields, labels};
use crate::models::{AdminStatus, Sex};

/// Human-readable label of an admin attribute
///
/// Unknown attributes are title-cased from their snake-case name.
#[must_use]
pub fn attribute_label(attribute: &str) -> String {
    let fixed = match attribute {
        admin_fields::ID => "ID",
        admin_fields::USERNAME => "Username",
        admin_fields::AUTH_KEY => "Auth Key",
        admin_fields::PASSWORD_HASH => "Password Hash",
        admin_fields::PASSWORD => "Password",
        admin_fields::PASSWORD_REPEAT => "Password Repeat",
        admin_fields::PASSWORD_RESET_TOKEN => "Password Reset Token",
        admin_fields::EMAIL => "Email",
        admin_fields::MOBILE => "Mobile",
        admin_fields::AVATAR => "Avatar",
        admin_fields::SEX => "Sex",
        admin_fields::LAST_LOGIN_IP => "Last Login Ip",
        admin_fields::LAST_LOGIN_TIME => "Last Login Time",
        admin_fields::STATUS => "Status",
        admin_fields::CREATED_AT => "Created At",
        admin_fields::UPDATED_AT => "Updated At",
        admin_fields::ROLE => "Role",
        other => return title_case(other),
    };
    fixed.to_owned()
}

fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `(stored value, label)` pairs for a status dropdown
#[must_use]
pub fn status_options() -> Vec<(i64, &'static str)> {
    AdminStatus::ALL
        .iter()
        .map(|status| (status.as_i64(), status.label()))
        .collect()
}

/// `(stored value, label)` pairs for a sex dropdown
#[must_use]
pub fn sex_options() -> Vec<(i64, &'static str)> {
    Sex::ALL.iter().map(|sex| (sex.as_i64(), sex.label())).collect()
}

/// Label of a raw status value, `Unknown` when out of range
#[must_use]
pub fn status_label(value: i64) -> &'static str {
    AdminStatus::try_from(value).map_or(labels::UNKNOWN, AdminStatus::label)
}

/// Label of a raw sex value, `Unknown` when out of range
#[must_use]
pub fn sex_label(value: i64) -> &'static str {
    Sex::try_from(value).map_or(labels::UNKNOWN, Sex::label)
}
