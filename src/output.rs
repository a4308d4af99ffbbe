//! Output layer for dexcrate CLI.
//!
//! Centralizes stdout/stderr separation and human vs JSON output modes.
//! - stdout: data (the "answer" - records, JSON)
//! - stderr: diagnostics (progress, warnings, human-mode errors)

use serde::Serialize;
use std::io::{self, Write};

use crate::notify::Notice;
use crate::render::RecordView;
use crate::resolve::{MatchOutcome, Resolution};

/// Schema version for JSON outputs.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Tool version from Cargo.toml.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Output helper that centralizes all CLI output
#[derive(Debug, Clone)]
pub struct Output {
    pub mode: OutputMode,
    pub quiet: bool,
    pub verbose: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            mode: if json {
                OutputMode::Json
            } else {
                OutputMode::Human
            },
            quiet,
            verbose,
        }
    }

    /// Write data to stdout (the command's "answer")
    pub fn data(&self, message: &str) {
        println!("{}", message);
    }

    /// Write JSON data to stdout
    /// Returns error if serialization fails (should be propagated to become JSON error)
    pub fn json<T: Serialize>(&self, data: &T) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string_pretty(data)?;
        println!("{}", json);
        Ok(())
    }

    /// Write a diagnostic/progress message to stderr
    /// Suppressed in JSON mode and when --quiet is set
    pub fn info(&self, message: &str) {
        if self.mode == OutputMode::Json || self.quiet {
            return;
        }
        eprintln!("{}", message);
    }

    /// Write a verbose diagnostic message to stderr
    /// Only shown with --verbose in human mode
    pub fn verbose(&self, message: &str) {
        if self.mode == OutputMode::Json || self.quiet || !self.verbose {
            return;
        }
        eprintln!("{}", message);
    }

    /// Write a warning to stderr
    /// Shown in human mode unless --quiet, suppressed in JSON mode
    pub fn warn(&self, message: &str) {
        if self.mode == OutputMode::Json || self.quiet {
            return;
        }
        eprintln!("{}", message);
    }

    /// Check if we're in JSON mode
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Check if we're in quiet mode
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Flush stdout (useful before exiting)
    pub fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

// =============================================================================
// JSON Response Types
// =============================================================================

/// JSON error response (written to stdout with non-zero exit).
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub ok: bool,
    pub schema_id: &'static str,
    pub schema_version: &'static str,
    pub tool_version: &'static str,
    pub generated_at: String,
    pub errors: Vec<JsonErrorInfo>,
    /// Always null for error responses
    pub data: Option<()>,
}

#[derive(Debug, Serialize)]
pub struct JsonErrorInfo {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonError {
    pub const SCHEMA_ID: &'static str = "dexcrate.error";

    pub fn new(message: impl Into<String>) -> Self {
        Self::build("internal_error", message.into(), None)
    }

    pub fn with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::build("internal_error", message.into(), Some(details.into()))
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::build("usage_error", message.into(), None)
    }

    fn build(code: &'static str, message: String, details: Option<String>) -> Self {
        Self {
            ok: false,
            schema_id: Self::SCHEMA_ID,
            schema_version: SCHEMA_VERSION,
            tool_version: TOOL_VERSION,
            generated_at: chrono::Utc::now().to_rfc3339(),
            errors: vec![JsonErrorInfo {
                code,
                message,
                details,
            }],
            data: None,
        }
    }

    /// Print this error as JSON to stdout
    /// Panics if serialization fails (should never happen for JsonError)
    pub fn print(&self) {
        let json =
            serde_json::to_string_pretty(self).expect("JsonError serialization should never fail");
        println!("{}", json);
    }
}

/// Result status of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Found,
    Suggested,
    NotFound,
    EmptyInput,
}

/// JSON response for `lookup`
#[derive(Debug, Serialize)]
pub struct LookupResponse<'a> {
    pub ok: bool,
    pub schema_id: &'static str,
    pub query: String,
    pub status: LookupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<RecordView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'a Notice>,
}

impl<'a> LookupResponse<'a> {
    pub const SCHEMA_ID: &'static str = "dexcrate.lookup";

    pub fn found(query: &str, view: RecordView<'a>) -> Self {
        Self {
            ok: true,
            schema_id: Self::SCHEMA_ID,
            query: query.to_string(),
            status: LookupStatus::Found,
            record: Some(view),
            notice: None,
        }
    }

    pub fn with_notice(query: &str, status: LookupStatus, notice: &'a Notice) -> Self {
        Self {
            ok: false,
            schema_id: Self::SCHEMA_ID,
            query: query.to_string(),
            status,
            record: None,
            notice: Some(notice),
        }
    }
}

/// JSON response for `resolve`
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub ok: bool,
    pub schema_id: &'static str,
    pub query: String,
    /// "name" or "id"
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<MatchOutcome>,
    pub resolution: Resolution,
    pub max_distance: usize,
    pub reference_names: usize,
}

impl ResolveResponse {
    pub const SCHEMA_ID: &'static str = "dexcrate.resolve";
}

/// JSON response for `distance`
#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub ok: bool,
    pub a: String,
    pub b: String,
    pub distance: usize,
}

/// JSON response for `names`
#[derive(Debug, Serialize)]
pub struct NamesResponse {
    pub ok: bool,
    pub total: usize,
    pub names: Vec<String>,
}

// =============================================================================
// Meta UX JSON Response Types (--help, --version)
// =============================================================================

/// JSON response for --help flag
#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub ok: bool,
    pub help: String,
}

impl HelpResponse {
    pub fn new(help_text: String) -> Self {
        Self {
            ok: true,
            help: help_text,
        }
    }

    pub fn print(&self) {
        let json = serde_json::to_string_pretty(self)
            .expect("HelpResponse serialization should never fail");
        println!("{}", json);
    }
}

/// JSON response for --version flag
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub ok: bool,
    pub version: String,
}

impl VersionResponse {
    pub fn new(version: String) -> Self {
        Self { ok: true, version }
    }

    pub fn print(&self) {
        let json = serde_json::to_string_pretty(self)
            .expect("VersionResponse serialization should never fail");
        println!("{}", json);
    }
}
