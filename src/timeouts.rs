//! Request timing and interruption.
//!
//! - `--timeout` accepts durations like "5s", "500ms", "1m"
//! - Ctrl+C exits with the INTERRUPTED code instead of leaving a prompt behind

use anyhow::{bail, Context, Result};
use std::time::Duration;

/// Parse a duration string like "5s", "500ms", "1m". A bare number is seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        bail!("Empty duration string");
    }

    let (num_part, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, "s")
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, "m")
    } else {
        (s, "s")
    };

    let num: u64 = num_part
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration number: '{}'", num_part))?;

    let duration = match unit {
        "ms" => Duration::from_millis(num),
        "s" => Duration::from_secs(num),
        "m" => match num.checked_mul(60) {
            Some(secs) => Duration::from_secs(secs),
            None => bail!("Duration too large: '{}'", s),
        },
        _ => bail!("Unknown duration unit: '{}'", unit),
    };

    if duration.is_zero() {
        bail!("Duration must be greater than zero");
    }

    Ok(duration)
}

/// Exit with INTERRUPTED on Ctrl+C (SIGINT).
///
/// Used by the interactive shell, where a pending lookup should not keep the
/// process alive after the user asks to leave.
pub fn setup_ctrlc_handler() {
    use crate::exit_codes;

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        eprintln!("\nInterrupted (Ctrl+C).");
        std::process::exit(exit_codes::INTERRUPTED);
    });
}
