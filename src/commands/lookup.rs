//! One-shot lookup command.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use std::io::IsTerminal;
use std::time::Instant;

use crate::exit_codes;
use crate::notify::Notice;
use crate::output::{LookupResponse, LookupStatus, Output};
use crate::render::{render_record, RecordView};
use crate::session::{SearchOutcome, Session};
use crate::tips::{show_tip, TipContext};

/// Look up a name or id and print the record.
///
/// On a near-miss the suggestion is confirmed interactively when stdin and
/// stderr are terminals, accepted outright with `--yes`, and otherwise only
/// reported. Returns the exit code.
pub async fn lookup(session: &Session, query: &str, yes: bool, output: &Output) -> Result<i32> {
    let mut notice = match session.search(query).await {
        SearchOutcome::Suggest(notice) => notice,
        other => return report(session, query, &other, output),
    };

    let Some(confirmed_at) = confirm(&notice, yes, output)? else {
        return report(session, query, &SearchOutcome::Suggest(notice), output);
    };

    match notice.accept_at(confirmed_at) {
        Some(name) => {
            output.verbose(&format!("Accepted suggestion '{}'", name));
            let accepted = session.accept(&name).await;
            report(session, &name, &accepted, output)
        }
        None => {
            output.warn("Suggestion expired; search again.");
            Ok(exit_codes::SUGGESTED)
        }
    }
}

/// When the suggestion was confirmed, or `None` if it was not.
///
/// An answer at the prompt counts from the moment the prompt opened, so the
/// dismiss interval does not run out while the user is deciding.
fn confirm(notice: &Notice, yes: bool, output: &Output) -> Result<Option<Instant>> {
    if yes {
        return Ok(Some(Instant::now()));
    }
    if !can_prompt(output) {
        return Ok(None);
    }
    let opened = Instant::now();
    let answer = Confirm::new()
        .with_prompt(format!("{} Look it up?", notice.render()))
        .default(true)
        .interact()?;
    Ok(answer.then_some(opened))
}

fn can_prompt(output: &Output) -> bool {
    !output.is_json() && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Print a search outcome and return the matching exit code.
pub(super) fn report(
    session: &Session,
    query: &str,
    outcome: &SearchOutcome,
    output: &Output,
) -> Result<i32> {
    match outcome {
        SearchOutcome::Found(record) => {
            if output.is_json() {
                output.json(&LookupResponse::found(query, RecordView::from(record)))?;
            } else {
                output.data(&render_record(record));
            }
            Ok(exit_codes::FOUND)
        }
        SearchOutcome::Suggest(notice) => {
            print_notice(query, LookupStatus::Suggested, notice, output)?;
            show_tip(TipContext::Suggested, output.is_quiet() || output.is_json());
            Ok(exit_codes::SUGGESTED)
        }
        SearchOutcome::NotFound(notice) => {
            print_notice(query, LookupStatus::NotFound, notice, output)?;
            show_tip(
                TipContext::NotFound {
                    empty_reference: session.names().is_empty(),
                },
                output.is_quiet() || output.is_json(),
            );
            Ok(exit_codes::NOT_FOUND)
        }
        SearchOutcome::EmptyInput(notice) => {
            print_notice(query, LookupStatus::EmptyInput, notice, output)?;
            Ok(exit_codes::NOT_FOUND)
        }
        SearchOutcome::Stale => {
            output.verbose(&format!("Discarded stale result for '{}'", query));
            Ok(exit_codes::NOT_FOUND)
        }
    }
}

fn print_notice(
    query: &str,
    status: LookupStatus,
    notice: &Notice,
    output: &Output,
) -> Result<()> {
    if output.is_json() {
        output.json(&LookupResponse::with_notice(query, status, notice))?;
    } else {
        eprintln!("{}", notice.render().yellow());
    }
    Ok(())
}
