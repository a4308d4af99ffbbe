//! Interactive lookup loop.
//!
//! Reads one query per line from stdin. After a suggestion, `y` or `yes`
//! looks up the suggested name until the suggestion is dismissed (a new
//! query, or the dismiss interval elapsing). `quit`, `exit` or EOF stops
//! reading; lookups still in flight are reported before the loop ends.
//!
//! Record fetches run as background tasks so the next line is read right
//! away. A fetch overtaken by a newer query comes back stale and is dropped.

use anyhow::{Context, Result};
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use super::lookup::report;
use crate::notify::Notice;
use crate::output::Output;
use crate::session::{PendingFetch, SearchOutcome, SearchStep, Session};
use crate::timeouts::setup_ctrlc_handler;

/// What a line of shell input asks for.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Quit,
    Accept,
    Search(&'a str),
}

fn classify(line: &str) -> ShellInput<'_> {
    match line.trim().to_lowercase().as_str() {
        "quit" | "exit" | ":q" => ShellInput::Quit,
        "y" | "yes" => ShellInput::Accept,
        _ => ShellInput::Search(line),
    }
}

/// Fetches in flight, each labelled with the query it reports under.
type Fetches = JoinSet<(String, SearchOutcome)>;

fn spawn_fetch(fetches: &mut Fetches, session: &Arc<Session>, label: String, fetch: PendingFetch) {
    let session = Arc::clone(session);
    fetches.spawn(async move {
        let outcome = session.complete(fetch).await;
        (label, outcome)
    });
}

fn prompt(interactive: bool) {
    if interactive {
        eprint!("> ");
        let _ = std::io::stderr().flush();
    }
}

pub async fn shell(session: Session, output: &Output) -> Result<()> {
    setup_ctrlc_handler();

    let session = Arc::new(session);
    let interactive = std::io::stdin().is_terminal() && !output.is_json();
    if interactive {
        output.info(&format!(
            "{} names loaded. Type a name or id; 'quit' to leave.",
            session.names().len()
        ));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<Notice> = None;
    let mut fetches = Fetches::new();
    let mut reading = true;
    prompt(interactive);

    loop {
        tokio::select! {
            line = lines.next_line(), if reading => {
                let Some(line) = line.context("Failed to read input")? else {
                    reading = false;
                    continue;
                };

                // Any input dismisses the previous suggestion
                let mut previous = pending.take();
                let query = match classify(&line) {
                    ShellInput::Quit => {
                        reading = false;
                        continue;
                    }
                    ShellInput::Accept => match previous.as_mut().and_then(Notice::accept) {
                        Some(name) => {
                            let fetch = session.begin_accept(&name);
                            spawn_fetch(&mut fetches, &session, name, fetch);
                            continue;
                        }
                        // No live suggestion: treat the word as an ordinary query
                        None => line.as_str(),
                    },
                    ShellInput::Search(query) => query,
                };

                match session.begin_search(query) {
                    SearchStep::Ready(outcome) => {
                        report(&session, query.trim(), &outcome, output)?;
                        if let SearchOutcome::Suggest(notice) = outcome {
                            pending = Some(notice);
                        }
                        prompt(interactive);
                    }
                    SearchStep::Fetch(fetch) => {
                        spawn_fetch(&mut fetches, &session, query.trim().to_string(), fetch);
                    }
                }
            }
            Some(joined) = fetches.join_next() => {
                let (label, outcome) = joined.context("Lookup task failed")?;
                report(&session, &label, &outcome, output)?;
                if !matches!(outcome, SearchOutcome::Stale) {
                    prompt(interactive && reading);
                }
            }
            else => break,
        }
    }

    output.flush();
    Ok(())
}
