//! Catalog access: the reference name list and individual records.
//!
//! [`CatalogProvider`] is the seam between the session and the outside world.
//! [`PokeApiClient`] talks to a PokeAPI-compatible HTTP service, and
//! [`FileCatalog`] reads the name list from a local file for offline use.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIST_LIMIT: usize = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unexpected HTTP status {status} from {url}")]
    Http { status: u16, url: String },
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Lookup not supported: {0}")]
    Unsupported(String),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Every valid name, in catalog order.
    async fn list_names(&self) -> Result<Vec<String>, CatalogError>;
    /// Fetch one record by name or numeric id.
    async fn fetch_record(&self, key: &str) -> Result<Record, CatalogError>;
}

/// A creature record as served by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: Option<u64>,
    pub name: String,
    /// Primary image URL. The API serves `null` for some forms.
    pub image: Option<String>,
    pub types: Vec<String>,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub abilities: Vec<String>,
}

impl Record {
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
}

#[derive(Debug, Deserialize)]
struct RecordResponse {
    id: Option<u64>,
    name: String,
    sprites: Option<Sprites>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

impl From<RecordResponse> for Record {
    fn from(r: RecordResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            image: r.sprites.and_then(|s| s.front_default),
            types: r.types.into_iter().map(|t| t.kind.name).collect(),
            height: r.height,
            weight: r.weight,
            abilities: r.abilities.into_iter().map(|a| a.ability.name).collect(),
        }
    }
}

/// Parse a catalog listing body into lowercase names, preserving order.
pub fn parse_name_list(body: &str) -> Result<Vec<String>, serde_json::Error> {
    let list: ListResponse = serde_json::from_str(body)?;
    Ok(list
        .results
        .into_iter()
        .map(|r| r.name.to_lowercase())
        .collect())
}

/// Parse a single record body.
pub fn parse_record(body: &str) -> Result<Record, serde_json::Error> {
    let response: RecordResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

// =============================================================================
// HTTP provider
// =============================================================================

pub struct PokeApiClient {
    client: Client,
    base_url: Url,
    list_limit: usize,
}

impl PokeApiClient {
    pub fn new(base_url: &str, list_limit: usize, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dexcrate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            list_limit,
        })
    }

    /// `base_url` with extra path segments appended. Each segment is
    /// percent-encoded, so a key cannot alter the path or add a query.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn list_url(&self) -> String {
        let mut url = self.endpoint(&["pokemon"]);
        url.query_pairs_mut()
            .append_pair("limit", &self.list_limit.to_string());
        url.into()
    }

    pub fn record_url(&self, key: &str) -> String {
        self.endpoint(&["pokemon", key]).into()
    }

    async fn get_text(&self, url: &str, key: &str) -> Result<String, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(key.to_string()));
        }
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl CatalogProvider for PokeApiClient {
    async fn list_names(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.list_url();
        let body = self.get_text(&url, "name list").await?;
        Ok(parse_name_list(&body)?)
    }

    async fn fetch_record(&self, key: &str) -> Result<Record, CatalogError> {
        let url = self.record_url(key);
        let body = self.get_text(&url, key).await?;
        // A 200 with a body we cannot read is no more useful than a 404
        parse_record(&body).map_err(|_| CatalogError::NotFound(key.to_string()))
    }
}

// =============================================================================
// Offline provider
// =============================================================================

/// Reference names from a newline-delimited file.
///
/// Blank lines and `#` comments are skipped. Records can optionally be
/// delegated to another provider; without one every fetch is unsupported.
pub struct FileCatalog {
    path: PathBuf,
    records: Option<Box<dyn CatalogProvider>>,
}

impl FileCatalog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            records: None,
        }
    }

    pub fn with_records(mut self, provider: Box<dyn CatalogProvider>) -> Self {
        self.records = Some(provider);
        self
    }
}

/// Parse a names file body.
pub fn parse_names_file(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

#[async_trait]
impl CatalogProvider for FileCatalog {
    async fn list_names(&self) -> Result<Vec<String>, CatalogError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(parse_names_file(&contents))
    }

    async fn fetch_record(&self, key: &str) -> Result<Record, CatalogError> {
        match &self.records {
            Some(provider) => provider.fetch_record(key).await,
            None => Err(CatalogError::Unsupported(format!(
                "no record source configured for '{}'",
                key
            ))),
        }
    }
}
