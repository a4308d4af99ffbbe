//! Resolution without fetching: shows what a lookup would do.

use anyhow::Result;
use colored::Colorize;

use crate::exit_codes;
use crate::notify::{Notice, MSG_EMPTY_INPUT};
use crate::output::{LookupResponse, LookupStatus, Output, ResolveResponse};
use crate::resolve::{Query, Resolution};
use crate::session::Session;

pub fn resolve(session: &Session, query: &str, output: &Output) -> Result<i32> {
    let Some(report) = session.resolution(query) else {
        let notice = Notice::plain(MSG_EMPTY_INPUT);
        if output.is_json() {
            output.json(&LookupResponse::with_notice(
                query,
                LookupStatus::EmptyInput,
                &notice,
            ))?;
        } else {
            eprintln!("{}", notice.render().yellow());
        }
        return Ok(exit_codes::NOT_FOUND);
    };

    let code = match report.resolution {
        Resolution::Proceed(_) => exit_codes::FOUND,
        Resolution::Suggest(_) => exit_codes::SUGGESTED,
        Resolution::Reject => exit_codes::NOT_FOUND,
    };

    let (normalized, kind) = match &report.query {
        Query::Name(name) => (name.clone(), "name"),
        Query::Id(id) => (id.to_string(), "id"),
    };

    if output.is_json() {
        output.json(&ResolveResponse {
            ok: true,
            schema_id: ResolveResponse::SCHEMA_ID,
            query: normalized,
            kind,
            outcome: report.outcome,
            resolution: report.resolution,
            max_distance: session.options().max_distance,
            reference_names: session.names().len(),
        })?;
        return Ok(code);
    }

    output.data(&format!("{:<11}{} ({})", "Query:", normalized, kind));
    if let Some(outcome) = &report.outcome {
        let nearest = match (&outcome.candidate, outcome.distance) {
            (Some(name), Some(d)) => format!("{} (distance {})", name, d),
            _ => "none (no reference names loaded)".to_string(),
        };
        output.data(&format!("{:<11}{}", "Nearest:", nearest));
    }
    let action = match &report.resolution {
        Resolution::Proceed(name) => format!("{} {}", "proceed".green(), name),
        Resolution::Suggest(name) => format!("{} {}", "suggest".yellow(), name),
        Resolution::Reject => "reject".red().to_string(),
    };
    output.data(&format!("{:<11}{}", "Action:", action));

    Ok(code)
}
