// ABOUTME: Scenario-driven validation of submitted admin forms
// ABOUTME: Required, format, comparison, range and avatar rules producing field errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Admin Form Validation
//!
//! Rules run in a fixed order and collect every failure instead of stopping
//! at the first one. A rule is skipped for a field that already failed an
//! earlier rule, and format rules are skipped for empty values (emptiness
//! is the job of the required rules).
//!
//! Uniqueness needs storage and is checked by the identity service after
//! these synchronous rules pass for the field in question.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::labels::attribute_label;
use crate::constants::{admin_fields, limits};
use crate::errors::ValidationErrors;
use crate::models::{AdminForm, AdminStatus, Scenario, Sex};

static USERNAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").ok());

static MOBILE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^1(3|4|5|7|8)[0-9][0-9]{8}$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?$",
    )
    .ok()
});

fn matches(pattern: Option<&Regex>, value: &str) -> bool {
    pattern.is_some_and(|re| re.is_match(value))
}

/// Whether `username` starts with a letter and continues with word characters
#[must_use]
pub fn is_valid_username(username: &str) -> bool {
    matches(USERNAME_PATTERN.as_ref(), username)
}

/// Whether `mobile` is an 11-digit mainland China mobile number
#[must_use]
pub fn is_valid_mobile(mobile: &str) -> bool {
    matches(MOBILE_PATTERN.as_ref(), mobile)
}

/// Whether `email` is a syntactically valid address
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    matches(EMAIL_PATTERN.as_ref(), email)
}

/// Whether `avatar` carries an allowed image extension (case-insensitive)
#[must_use]
pub fn is_allowed_avatar(avatar: &str) -> bool {
    Path::new(avatar)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            limits::AVATAR_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    fn fail(&mut self, field: &str, message: String) {
        self.errors.add(field, message);
    }

    fn open(&self, field: &str) -> bool {
        !self.errors.has(field)
    }

    fn required(&mut self, field: &str, value: &str) {
        if self.open(field) && value.trim().is_empty() {
            self.fail(field, format!("{} cannot be blank.", attribute_label(field)));
        }
    }

    fn invalid(&mut self, field: &str) {
        self.fail(field, format!("{} is invalid.", attribute_label(field)));
    }
}

/// Run every synchronous rule that applies to `scenario`
///
/// `is_new` marks a form that will insert a record: a new account always
/// needs a password to hash, even in [`Scenario::Default`].
#[must_use]
pub fn validate_form(form: &AdminForm, scenario: Scenario, is_new: bool) -> ValidationErrors {
    let mut rules = Rules {
        errors: ValidationErrors::new(),
    };

    let status = form.status.unwrap_or(AdminStatus::default().as_i64());
    if AdminStatus::try_from(status).is_err() {
        rules.invalid(admin_fields::STATUS);
    }

    if !form.username.is_empty() && !is_valid_username(&form.username) {
        rules.invalid(admin_fields::USERNAME);
    }

    if scenario.requires_contact_fields() {
        rules.required(admin_fields::USERNAME, &form.username);
        rules.required(admin_fields::EMAIL, &form.email);
        rules.required(admin_fields::MOBILE, &form.mobile);
    } else if is_new {
        rules.required(admin_fields::USERNAME, &form.username);
    }

    if scenario.requires_password() {
        rules.required(admin_fields::PASSWORD, &form.password);
        rules.required(admin_fields::PASSWORD_REPEAT, &form.password_repeat);
    } else if is_new {
        rules.required(admin_fields::PASSWORD, &form.password);
    }

    if scenario.compares_password()
        && rules.open(admin_fields::PASSWORD_REPEAT)
        && (!form.password.is_empty() || !form.password_repeat.is_empty())
        && form.password_repeat != form.password
    {
        rules.fail(
            admin_fields::PASSWORD_REPEAT,
            format!(
                "{} must be equal to \"{}\".",
                attribute_label(admin_fields::PASSWORD_REPEAT),
                attribute_label(admin_fields::PASSWORD)
            ),
        );
    }

    if rules.open(admin_fields::EMAIL) && !form.email.is_empty() && !is_valid_email(&form.email)
    {
        rules.fail(
            admin_fields::EMAIL,
            format!(
                "{} is not a valid email address.",
                attribute_label(admin_fields::EMAIL)
            ),
        );
    }

    if rules.open(admin_fields::MOBILE)
        && !form.mobile.is_empty()
        && !is_valid_mobile(&form.mobile)
    {
        rules.invalid(admin_fields::MOBILE);
    }

    if let Some(sex) = form.sex {
        if Sex::try_from(sex).is_err() {
            rules.invalid(admin_fields::SEX);
        }
    }

    if let Some(avatar) = form.avatar.as_deref().filter(|a| !a.is_empty()) {
        if !is_allowed_avatar(avatar) {
            rules.fail(
                admin_fields::AVATAR,
                format!(
                    "Only files with these extensions are allowed: {}.",
                    limits::AVATAR_EXTENSIONS.join(", ")
                ),
            );
        }
    }

    rules.errors
}
