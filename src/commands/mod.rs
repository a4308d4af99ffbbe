//! Command implementations for dexcrate CLI.
//!
//! Each submodule contains one command. Shared session setup lives here.

mod distance;
mod lookup;
mod names;
mod resolve_cmd;
mod shell;

pub use distance::distance;
pub use lookup::lookup;
pub use names::names;
pub use resolve_cmd::resolve;
pub use shell::shell;

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::catalog::{CatalogProvider, FileCatalog, PokeApiClient};
use crate::config::Config;
use crate::output::Output;
use crate::session::Session;
use crate::tips::{show_tip, TipContext};

/// Where the reference names and records come from.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    pub base_url: String,
    pub names_file: Option<PathBuf>,
    pub timeout: Duration,
}

/// Build the catalog provider and load the reference set.
///
/// A failed listing is reported and the session continues with an empty set,
/// so every name lookup rejects until the listing works again.
pub async fn open_session(
    config: &Config,
    source: &CatalogSource,
    output: &Output,
) -> Result<Session> {
    let client = PokeApiClient::new(&source.base_url, config.list_limit(), source.timeout)?;

    let provider: Box<dyn CatalogProvider> = match &source.names_file {
        Some(path) => {
            output.verbose(&format!("Reference names: {}", path.display()));
            Box::new(FileCatalog::new(path).with_records(Box::new(client)))
        }
        None => {
            output.verbose(&format!("Reference names: {}", client.list_url()));
            Box::new(client)
        }
    };

    let (session, warning) = Session::load(provider, config.session_options()).await;
    if let Some(warning) = warning {
        output.warn(&format!(
            "Warning: could not load reference names ({}); name lookups will not match",
            warning.0
        ));
        show_tip(TipContext::ListingFailed, output.is_quiet() || output.is_json());
    }
    output.verbose(&format!(
        "Loaded {} reference names (max distance {})",
        session.names().len(),
        session.options().max_distance
    ));

    Ok(session)
}
