// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Durations**: Auto-dismiss delay per toast variant
//! - **Lifecycle**: Exit grace period
//! - **Logging**: Default tracing filter

// ==========================================================================
// Duration Defaults (milliseconds)
// ==========================================================================

/// Success toasts confirm an action; they can leave quickly.
pub const DEFAULT_SUCCESS_MS: u64 = 3_000;

/// Informational toasts.
pub const DEFAULT_INFO_MS: u64 = 4_000;

/// Warnings stay a little longer so they can be read.
pub const DEFAULT_WARNING_MS: u64 = 5_000;

/// Errors stay longest but still auto-dismiss.
pub const DEFAULT_ERROR_MS: u64 = 6_000;

/// Loading toasts live as long as their pending operation (0 = never).
pub const DEFAULT_LOADING_MS: u64 = 0;

/// Upper bound accepted from the config file for any duration.
pub const MAX_DURATION_MS: i64 = 10 * 60 * 1_000;

// ==========================================================================
// Lifecycle Defaults
// ==========================================================================

/// Delay between marking a toast as exiting and removing it.
pub const DEFAULT_GRACE_PERIOD_MS: u64 = 150;

/// Upper bound for the grace period.
pub const MAX_GRACE_PERIOD_MS: u64 = 2_000;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Tracing filter used when neither `RUST_LOG` nor the CLI sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SUCCESS_MS > 0);
    assert!(DEFAULT_INFO_MS > 0);
    assert!(DEFAULT_WARNING_MS >= DEFAULT_INFO_MS);
    assert!(DEFAULT_ERROR_MS >= DEFAULT_WARNING_MS);
    assert!(DEFAULT_LOADING_MS == 0);
    assert!(DEFAULT_ERROR_MS as i64 <= MAX_DURATION_MS);

    assert!(DEFAULT_GRACE_PERIOD_MS > 0);
    assert!(DEFAULT_GRACE_PERIOD_MS <= MAX_GRACE_PERIOD_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_are_ordered_by_severity() {
        assert!(DEFAULT_SUCCESS_MS <= DEFAULT_INFO_MS);
        assert!(DEFAULT_INFO_MS <= DEFAULT_WARNING_MS);
        assert!(DEFAULT_WARNING_MS <= DEFAULT_ERROR_MS);
    }

    #[test]
    fn grace_period_default_is_short() {
        assert_eq!(DEFAULT_GRACE_PERIOD_MS, 150);
    }
}
