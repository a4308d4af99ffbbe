//! Exit code policy for dexcrate.
//!
//! ## Lookup results (0-2)
//!
//! - `0` = Found (record printed)
//! - `1` = Suggested (a near-miss was offered but not accepted)
//! - `2` = Not found (no confident match, empty input, or fetch failure)
//!
//! Clap usage errors also exit with `2`.
//!
//! ## Operational Failures (10+)
//!
//! - `10` = General operational failure
//! - `12` = Configuration error
//!
//! This separation allows scripts to distinguish between:
//! - "That name does not exist" (results, 1-2)
//! - "We couldn't run the lookup" (operational failure, 10+)

/// Exit code: record found
pub const FOUND: i32 = 0;

/// Exit code: suggestion offered, not accepted
pub const SUGGESTED: i32 = 1;

/// Exit code: not found
pub const NOT_FOUND: i32 = 2;

/// Exit code: general operational failure
pub const OPERATIONAL_FAILURE: i32 = 10;

/// Exit code: configuration error
pub const CONFIG_ERROR: i32 = 12;

/// Exit code: interrupted by Ctrl+C (SIGINT)
pub const INTERRUPTED: i32 = 130;
