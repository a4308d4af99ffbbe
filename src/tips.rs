//! Contextual tips shown after commands to improve discoverability.
//!
//! Tips are shown:
//! - Only when stderr is a TTY (not in scripts/CI)
//! - Only when --quiet is not set
//! - One tip per command max
//! - Formatted subtly (dim text) so they don't look like command output

use std::io::{IsTerminal, Write};

/// Context for selecting an appropriate tip after a command.
pub enum TipContext {
    /// A suggestion was shown but not accepted
    Suggested,
    /// Nothing close enough was found
    NotFound { empty_reference: bool },
    /// The reference list could not be loaded
    ListingFailed,
}

/// Show a contextual tip if appropriate.
pub fn show_tip(ctx: TipContext, quiet: bool) {
    if quiet {
        return;
    }

    if !std::io::stderr().is_terminal() {
        return;
    }

    let tip = select_tip(ctx);

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "\n\x1b[2mTip: {}\x1b[0m", tip);
}

/// Select the most relevant tip for the given context.
fn select_tip(ctx: TipContext) -> &'static str {
    match ctx {
        TipContext::Suggested => "`dexcrate lookup <name> --yes` accepts the suggestion without asking",
        TipContext::NotFound { empty_reference } => {
            if empty_reference {
                "No reference names are loaded; check --api-url or pass --names-file"
            } else {
                "`dexcrate names` lists every valid name; numeric ids work too"
            }
        }
        TipContext::ListingFailed => {
            "`dexcrate --names-file <path>` loads reference names from a local file"
        }
    }
}
