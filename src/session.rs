//! A lookup session.
//!
//! The session owns the reference name set for its lifetime and runs one
//! search at a time through resolution and, when resolution allows it, the
//! record fetch. Results of a search that was overtaken by a newer one are
//! discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{CatalogError, CatalogProvider, Record};
use crate::notify::{
    Notice, DEFAULT_DISMISS_AFTER, MSG_EMPTY_INPUT, MSG_NOT_FOUND, MSG_TRY_AGAIN,
};
use crate::resolve::{decide, resolve, MatchOutcome, Query, Resolution, MAX_SUGGEST_DISTANCE};

/// Tunables for a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub max_distance: usize,
    pub dismiss_after: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_distance: MAX_SUGGEST_DISTANCE,
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }
}

/// The ordered set of valid names. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct ReferenceNames(Arc<Vec<String>>);

impl ReferenceNames {
    pub fn new(names: Vec<String>) -> Self {
        Self(Arc::new(names))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Hands out request tickets; only the newest ticket is current.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestTracker {
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Pipeline-only view of a query, without any fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionReport {
    pub query: Query,
    /// `None` for numeric ids, which skip name matching.
    pub outcome: Option<MatchOutcome>,
    pub resolution: Resolution,
}

/// Result of one search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    EmptyInput(Notice),
    Found(Record),
    Suggest(Notice),
    NotFound(Notice),
    /// A newer search started while this one was fetching.
    Stale,
}

/// A record fetch that has a ticket but has not run yet.
#[derive(Debug)]
pub struct PendingFetch {
    ticket: Ticket,
    key: String,
}

impl PendingFetch {
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// First half of a search: either finished, or waiting on a fetch.
#[derive(Debug)]
pub enum SearchStep {
    Ready(SearchOutcome),
    Fetch(PendingFetch),
}

/// A failure encountered while loading the reference set. The session is
/// still usable, just with an empty set.
#[derive(Debug)]
pub struct LoadWarning(pub CatalogError);

pub struct Session {
    provider: Box<dyn CatalogProvider>,
    names: ReferenceNames,
    options: SessionOptions,
    tracker: RequestTracker,
}

impl Session {
    /// Build a session with an explicit reference set (no listing fetch).
    pub fn new(
        provider: Box<dyn CatalogProvider>,
        names: ReferenceNames,
        options: SessionOptions,
    ) -> Self {
        Self {
            provider,
            names,
            options,
            tracker: RequestTracker::default(),
        }
    }

    /// Fetch the reference set once. A failed listing degrades to an empty
    /// set and is returned as a warning.
    pub async fn load(
        provider: Box<dyn CatalogProvider>,
        options: SessionOptions,
    ) -> (Self, Option<LoadWarning>) {
        let (names, warning) = match provider.list_names().await {
            Ok(names) => (ReferenceNames::new(names), None),
            Err(e) => (ReferenceNames::default(), Some(LoadWarning(e))),
        };
        (Self::new(provider, names, options), warning)
    }

    pub fn names(&self) -> &ReferenceNames {
        &self.names
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    /// Run resolution only. Returns `None` for empty input.
    pub fn resolution(&self, raw: &str) -> Option<ResolutionReport> {
        let query = Query::parse(raw)?;
        let (outcome, resolution) = match &query {
            Query::Id(_) => (None, Resolution::Proceed(query.as_key())),
            Query::Name(name) => {
                let outcome = resolve(name, self.names.as_slice());
                let resolution = decide(name, &outcome, self.options.max_distance);
                (Some(outcome), resolution)
            }
        };
        Some(ResolutionReport {
            query,
            outcome,
            resolution,
        })
    }

    /// Resolve raw input and fetch the record if resolution allows it.
    pub async fn search(&self, raw: &str) -> SearchOutcome {
        match self.begin_search(raw) {
            SearchStep::Ready(outcome) => outcome,
            SearchStep::Fetch(fetch) => self.complete(fetch).await,
        }
    }

    /// Fetch a confirmed suggestion directly, skipping resolution.
    pub async fn accept(&self, name: &str) -> SearchOutcome {
        self.complete(self.begin_accept(name)).await
    }

    /// Start a search. Never waits; any earlier fetch becomes stale.
    pub fn begin_search(&self, raw: &str) -> SearchStep {
        let ticket = self.tracker.begin();
        let Some(report) = self.resolution(raw) else {
            return SearchStep::Ready(SearchOutcome::EmptyInput(Notice::plain(MSG_EMPTY_INPUT)));
        };

        match report.resolution {
            Resolution::Proceed(key) => SearchStep::Fetch(PendingFetch { ticket, key }),
            Resolution::Suggest(name) => SearchStep::Ready(SearchOutcome::Suggest(
                Notice::suggestion(name, self.options.dismiss_after),
            )),
            Resolution::Reject => {
                SearchStep::Ready(SearchOutcome::NotFound(Notice::plain(MSG_NOT_FOUND)))
            }
        }
    }

    /// Start the fetch of a confirmed suggestion.
    pub fn begin_accept(&self, name: &str) -> PendingFetch {
        PendingFetch {
            ticket: self.tracker.begin(),
            key: name.to_string(),
        }
    }

    /// Run a started fetch. The result is `Stale` if another search began
    /// in the meantime.
    pub async fn complete(&self, fetch: PendingFetch) -> SearchOutcome {
        let result = self.provider.fetch_record(&fetch.key).await;
        if !self.tracker.is_current(fetch.ticket) {
            return SearchOutcome::Stale;
        }
        match result {
            Ok(record) => SearchOutcome::Found(record),
            Err(_) => SearchOutcome::NotFound(Notice::plain(MSG_TRY_AGAIN)),
        }
    }
}
