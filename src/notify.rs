//! User-facing notices.
//!
//! A notice is either a plain message or a message carrying a suggested name.
//! A suggestion can be accepted until it is dismissed, either explicitly or
//! once `dismiss_after` has elapsed.

use colored::Colorize;
use serde::Serialize;
use std::time::{Duration, Instant};

/// How long a suggestion stays acceptable.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(9);

pub const MSG_EMPTY_INPUT: &str = "Please enter a name or ID.";
pub const MSG_NOT_FOUND: &str = "Not found.";
pub const MSG_TRY_AGAIN: &str = "Not found. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip)]
    shown_at: Instant,
    #[serde(skip)]
    dismiss_after: Duration,
    #[serde(skip)]
    dismissed: bool,
}

impl Notice {
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            shown_at: Instant::now(),
            dismiss_after: DEFAULT_DISMISS_AFTER,
            dismissed: false,
        }
    }

    pub fn suggestion(name: impl Into<String>, dismiss_after: Duration) -> Self {
        let name = name.into();
        Self {
            message: format!("{} Did you mean: {}?", MSG_NOT_FOUND, name),
            suggestion: Some(name),
            shown_at: Instant::now(),
            dismiss_after,
            dismissed: false,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.dismissed || now.saturating_duration_since(self.shown_at) >= self.dismiss_after
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Take the suggested name if the notice is still live. Accepting
    /// dismisses the notice, so a suggestion is accepted at most once.
    pub fn accept_at(&mut self, now: Instant) -> Option<String> {
        if self.is_expired_at(now) {
            return None;
        }
        let name = self.suggestion.clone()?;
        self.dismiss();
        Some(name)
    }

    pub fn accept(&mut self) -> Option<String> {
        self.accept_at(Instant::now())
    }

    /// Terminal rendering; the suggested name is highlighted.
    pub fn render(&self) -> String {
        match &self.suggestion {
            Some(name) => format!(
                "{} Did you mean: {}?",
                MSG_NOT_FOUND,
                name.as_str().bold().underline().cyan()
            ),
            None => self.message.clone(),
        }
    }
}
