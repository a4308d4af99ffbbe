use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser, Subcommand};
use std::path::PathBuf;

mod catalog;
mod commands;
mod config;
mod exit_codes;
mod notify;
mod output;
mod render;
mod resolve;
mod session;
mod suggest;
mod timeouts;
mod tips;
use commands::CatalogSource;
use config::Config;
use output::{HelpResponse, JsonError, Output, VersionResponse};

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "dexcrate")]
#[command(version = VERSION)]
#[command(about = "Creature lookup with typo-tolerant name matching", long_about = None)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Catalog API base URL (overrides DEXCRATE_API_URL env var and config file)
    #[arg(long = "api-url", global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Read reference names from a local file (one per line) instead of the API
    #[arg(long = "names-file", global = true, value_name = "PATH")]
    names_file: Option<PathBuf>,

    /// HTTP request timeout (e.g., "5s", "500ms"). Default: 10s
    #[arg(long, global = true, value_name = "DURATION")]
    timeout: Option<String>,

    /// Path to config file (default: ./dexcrate.toml)
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Minimal output (errors only)
    #[arg(long, global = true)]
    quiet: bool,

    /// Show requests and matching details
    #[arg(long, global = true)]
    verbose: bool,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a record by name or numeric id
    #[command(visible_alias = "find")]
    Lookup {
        /// Name or id (case and surrounding whitespace are ignored)
        query: String,
        /// Accept a suggested correction without asking
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show how a query resolves without fetching the record
    Resolve {
        /// Name or id to resolve
        query: String,
    },
    /// Print the edit distance between two strings
    Distance { a: String, b: String },
    /// List the reference names
    Names {
        /// Show at most this many names
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Interactive lookup loop
    Shell,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before parsing CLI so env vars are available)
    let _ = dotenvy::dotenv();

    // Check for --json flag early (before full parsing) for error handling
    let json_mode = std::env::args().any(|arg| arg == "--json");

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if json_mode {
                match e.kind() {
                    ErrorKind::DisplayHelp => {
                        HelpResponse::new(e.to_string()).print();
                        std::process::exit(0);
                    }
                    ErrorKind::DisplayVersion => {
                        VersionResponse::new(VERSION.to_string()).print();
                        std::process::exit(0);
                    }
                    _ => {
                        JsonError::usage(e.to_string()).print();
                        std::process::exit(2);
                    }
                }
            } else {
                e.exit();
            }
        }
    };

    let output = Output::new(cli.json, cli.quiet, cli.verbose);

    let config = match Config::load(cli.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(
            &e.context("Failed to load configuration"),
            json_mode,
            exit_codes::CONFIG_ERROR,
        ),
    };

    match run(cli, &config, &output).await {
        Ok(code) => {
            output.flush();
            std::process::exit(code);
        }
        Err(e) => fail(&e, json_mode, exit_codes::OPERATIONAL_FAILURE),
    }
}

/// Report an error in the active output mode and exit.
fn fail(e: &anyhow::Error, json_mode: bool, code: i32) -> ! {
    if json_mode {
        // Only include details if the chain adds something
        let full_chain = format!("{e:#}");
        let message = e.to_string();
        let err = if full_chain == message {
            JsonError::new(message)
        } else {
            JsonError::with_details(message, full_chain)
        };
        err.print();
    } else {
        eprintln!("Error: {e:#}");
    }
    std::process::exit(code);
}

/// Resolve where names and records come from: CLI > env > config > defaults.
fn catalog_source(
    api_url: Option<&str>,
    names_file: Option<PathBuf>,
    timeout: Option<&str>,
    config: &Config,
) -> Result<CatalogSource> {
    let timeout = timeout
        .map(timeouts::parse_duration)
        .transpose()
        .context("Invalid --timeout")?;

    Ok(CatalogSource {
        base_url: config.base_url(api_url)?,
        names_file,
        timeout: config.timeout(timeout),
    })
}

async fn run(cli: Cli, config: &Config, output: &Output) -> Result<i32> {
    let source = || {
        catalog_source(
            cli.api_url.as_deref(),
            cli.names_file.clone(),
            cli.timeout.as_deref(),
            config,
        )
    };

    match cli.command {
        Commands::Distance { a, b } => {
            commands::distance(&a, &b, output)?;
            Ok(exit_codes::FOUND)
        }
        Commands::Lookup { query, yes } => {
            let session = commands::open_session(config, &source()?, output).await?;
            commands::lookup(&session, &query, yes, output).await
        }
        Commands::Resolve { query } => {
            let session = commands::open_session(config, &source()?, output).await?;
            commands::resolve(&session, &query, output)
        }
        Commands::Names { limit } => {
            let session = commands::open_session(config, &source()?, output).await?;
            commands::names(&session, limit, output)?;
            Ok(exit_codes::FOUND)
        }
        Commands::Shell => {
            let session = commands::open_session(config, &source()?, output).await?;
            commands::shell(session, output).await?;
            Ok(exit_codes::FOUND)
        }
    }
}
