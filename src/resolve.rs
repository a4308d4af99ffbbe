//! Typo-tolerant name resolution.
//!
//! A lookup goes through three steps:
//! - [`Query::parse`] normalizes raw input and separates numeric ids from names
//! - [`resolve`] measures the query against every reference name
//! - [`decide`] turns that measurement into a [`Resolution`]
//!
//! Everything here is pure. Fetching, prompting and rendering happen in the
//! session and CLI layers.

use serde::Serialize;

use crate::suggest::levenshtein;

/// Largest edit distance at which a near-miss is still offered as a suggestion.
pub const MAX_SUGGEST_DISTANCE: usize = 2;

/// Normalized user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// A catalog name, trimmed and lowercased.
    Name(String),
    /// A numeric catalog id. Ids are never fuzzy-matched.
    Id(u64),
}

impl Query {
    /// Normalize raw input. Returns `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        if normalized.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(id) = normalized.parse::<u64>() {
                return Some(Query::Id(id));
            }
        }
        Some(Query::Name(normalized))
    }

    /// Path segment used when fetching the record.
    pub fn as_key(&self) -> String {
        match self {
            Query::Name(name) => name.clone(),
            Query::Id(id) => id.to_string(),
        }
    }
}

/// Nearest reference name for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    /// Absent only when the reference set is empty.
    pub candidate: Option<String>,
    pub distance: Option<usize>,
    pub is_exact: bool,
}

impl MatchOutcome {
    fn none() -> Self {
        Self {
            candidate: None,
            distance: None,
            is_exact: false,
        }
    }
}

/// What the caller should do with a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "name", rename_all = "snake_case")]
pub enum Resolution {
    /// The name is valid; fetch it.
    Proceed(String),
    /// Close but not exact. Offer the name and wait for confirmation.
    Suggest(String),
    /// Nothing close enough to offer.
    Reject,
}

/// Find the reference name nearest to `query`.
///
/// Names are scanned in order and only a strictly smaller distance replaces
/// the current best, so the first name at the minimum distance wins.
pub fn resolve(query: &str, names: &[String]) -> MatchOutcome {
    let mut best: Option<(&str, usize)> = None;
    for name in names {
        let dist = levenshtein(query, name);
        let current_best = best.map(|(_, d)| d).unwrap_or(usize::MAX);
        if dist < current_best {
            best = Some((name.as_str(), dist));
            if dist == 0 {
                break;
            }
        }
    }

    match best {
        Some((name, dist)) => MatchOutcome {
            candidate: Some(name.to_string()),
            distance: Some(dist),
            is_exact: name == query,
        },
        None => MatchOutcome::none(),
    }
}

/// Map a match outcome to an action. Inexact matches are never accepted
/// silently: within `max_distance` they become a suggestion, beyond it a
/// rejection.
pub fn decide(query: &str, outcome: &MatchOutcome, max_distance: usize) -> Resolution {
    let Some(candidate) = outcome.candidate.as_deref() else {
        return Resolution::Reject;
    };
    if candidate == query {
        return Resolution::Proceed(query.to_string());
    }
    match outcome.distance {
        Some(d) if d <= max_distance => Resolution::Suggest(candidate.to_string()),
        _ => Resolution::Reject,
    }
}

/// [`resolve`] followed by [`decide`].
#[allow(dead_code)] // Used in tests
pub fn resolve_action(query: &str, names: &[String], max_distance: usize) -> Resolution {
    decide(query, &resolve(query, names), max_distance)
}
