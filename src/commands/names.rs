use anyhow::Result;

use crate::output::{NamesResponse, Output};
use crate::session::Session;

/// List the loaded reference names in catalog order.
pub fn names(session: &Session, limit: Option<usize>, output: &Output) -> Result<()> {
    let all = session.names().as_slice();
    let shown = &all[..limit.unwrap_or(all.len()).min(all.len())];

    if output.is_json() {
        output.json(&NamesResponse {
            ok: true,
            total: all.len(),
            names: shown.to_vec(),
        })?;
        return Ok(());
    }

    if all.is_empty() {
        output.warn("No reference names loaded.");
        return Ok(());
    }

    for name in shown {
        output.data(name);
    }
    if shown.len() < all.len() {
        output.info(&format!("... {} of {} names shown", shown.len(), all.len()));
    }
    Ok(())
}
