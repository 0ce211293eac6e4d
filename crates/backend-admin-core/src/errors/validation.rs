// ABOUTME: Field-scoped validation error container
// ABOUTME: Ordered list of field/message pairs produced by scenario validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Attribute name (`username`, `email`, ...)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

/// Field-level validation failures, in the order the rules ran
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Create an empty container
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a failure for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Whether no rule failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether `field` has at least one failure
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// All messages recorded for `field`
    #[must_use]
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// First message recorded for `field`
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterate over every failure
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_rule_order() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "Username cannot be blank.");
        errors.add("email", "Email is not a valid email address.");
        errors.add("username", "Username is invalid.");

        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.messages("username"),
            vec!["Username cannot be blank.", "Username is invalid."]
        );
        assert_eq!(errors.first("email"), Some("Email is not a valid email address."));
        assert!(!errors.has("mobile"));
    }

    #[test]
    fn test_display_joins_failures() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());
        errors.add("sex", "Sex is invalid.");
        errors.add("status", "Status is invalid.");
        assert_eq!(errors.to_string(), "sex: Sex is invalid.; status: Status is invalid.");
    }
}
