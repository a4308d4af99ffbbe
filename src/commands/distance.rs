use anyhow::Result;

use crate::output::{DistanceResponse, Output};
use crate::suggest::levenshtein;

/// Print the edit distance between two strings, compared exactly as given.
pub fn distance(a: &str, b: &str, output: &Output) -> Result<()> {
    let d = levenshtein(a, b);
    if output.is_json() {
        output.json(&DistanceResponse {
            ok: true,
            a: a.to_string(),
            b: b.to_string(),
            distance: d,
        })?;
    } else {
        output.data(&d.to_string());
    }
    Ok(())
}
