// ABOUTME: Utility module for shared helpers
// ABOUTME: Provides the injectable clock used for timestamps and token expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Injectable time source
pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
