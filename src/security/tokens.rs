// ABOUTME: Random auth keys and timestamped password reset tokens
// ABOUTME: Generates URL-safe random strings and parses `<random>_<unix-ts>` tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::Rng;

use crate::constants::limits::RANDOM_STRING_LENGTH;

/// URL-safe random string of `RANDOM_STRING_LENGTH` characters (`[A-Za-z0-9_-]`)
#[must_use]
pub fn generate_random_string() -> String {
    // 3 bytes encode to 4 characters
    let mut bytes = [0u8; RANDOM_STRING_LENGTH / 4 * 3];
    rand::thread_rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// `<random>_<unix-timestamp>` token issued at `now`
#[must_use]
pub fn generate_password_reset_token(now: DateTime<Utc>) -> String {
    format!("{}_{}", generate_random_string(), now.timestamp())
}

/// Issuance time embedded after the last `_` of a reset token
///
/// The random part may itself contain `_`, so only the final segment counts.
#[must_use]
pub fn reset_token_timestamp(token: &str) -> Option<i64> {
    let (_, timestamp) = token.rsplit_once('_')?;
    timestamp.parse().ok()
}

/// Whether `token` was issued no more than `expire_secs` before `now`
#[must_use]
pub fn is_password_reset_token_valid(token: &str, expire_secs: i64, now: DateTime<Utc>) -> bool {
    if token.is_empty() {
        return false;
    }
    reset_token_timestamp(token)
        .is_some_and(|issued| issued.saturating_add(expire_secs) >= now.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_random_string_shape() {
        let value = generate_random_string();
        assert_eq!(value.len(), RANDOM_STRING_LENGTH);
        assert!(value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
        assert_ne!(value, generate_random_string());
    }

    #[test]
    fn test_reset_token_embeds_timestamp() {
        let token = generate_password_reset_token(at(1_526_000_000));
        assert_eq!(reset_token_timestamp(&token), Some(1_526_000_000));
    }

    #[test]
    fn test_timestamp_uses_last_segment() {
        assert_eq!(reset_token_timestamp("ab_cd_ef_42"), Some(42));
        assert_eq!(reset_token_timestamp("no-separator"), None);
        assert_eq!(reset_token_timestamp("abc_notanumber"), None);
    }

    #[test]
    fn test_validity_window_is_inclusive() {
        let token = "x_1000";
        assert!(is_password_reset_token_valid(token, 3600, at(4600)));
        assert!(!is_password_reset_token_valid(token, 3600, at(4601)));
        assert!(is_password_reset_token_valid(token, 3600, at(1000)));
    }

    #[test]
    fn test_empty_or_malformed_tokens_are_invalid() {
        assert!(!is_password_reset_token_valid("", 3600, at(0)));
        assert!(!is_password_reset_token_valid("garbage", i64::MAX, at(0)));
    }
}
