//! # Exim Desk CLI
//!
//! Command-line surface over the export-invoice workspace:
//!
//! ```text
//! exim-desk masters [--search q] [--page n] [--limit n]
//! exim-desk compute --input draft.json
//! exim-desk save    --input draft.json
//! exim-desk update  --input txn.json
//! exim-desk list    [--page n] [--limit n] [--search q]
//! exim-desk show    <id>
//! exim-desk render  <id> [--out dir]
//! exim-desk delete  <id>
//! ```
//!
//! Configuration comes from the environment (see `config.rs`); a local
//! `.env` file is honoured.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use exim_client::{ApiClient, ListParams};
use exim_core::validation::validate_search_query;

use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Parser)]
#[command(name = "exim-desk", version, about = "Export sales invoice desk")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and list all master collections
    Masters {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Compute a local draft without persisting anything
    Compute {
        /// Path to a form draft JSON file
        #[arg(long)]
        input: PathBuf,
    },
    /// Validate, compute and create a transaction upstream
    Save {
        /// Path to a form draft JSON file
        #[arg(long)]
        input: PathBuf,
    },
    /// Recompute a stored transaction from a file and replace it upstream
    Update {
        /// Path to a full transaction JSON file
        #[arg(long)]
        input: PathBuf,
    },
    /// List transactions
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch one transaction, recompute and print it
    Show { id: String },
    /// Render the invoice PDF for a transaction
    Render {
        id: String,
        /// Output directory; defaults to EXIM_OUTPUT_DIR
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a transaction upstream
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional; absence is not an error.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.code(), "{err}");
            eprintln!("error [{}]: {err}", err.code());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let client = ApiClient::new(&config.api_base_url, config.api_token.clone())?;

    match cli.command {
        Command::Masters {
            search,
            page,
            limit,
        } => {
            let params = ListParams {
                page,
                limit,
                search: checked_search(search)?,
            };
            commands::masters::run(&client, &params).await
        }
        Command::Compute { input } => commands::transaction::compute(&input).await,
        Command::Save { input } => commands::transaction::save(&client, &input).await,
        Command::Update { input } => commands::transaction::update(&client, &input).await,
        Command::List {
            page,
            limit,
            search,
        } => {
            let params = ListParams {
                page,
                limit,
                search: checked_search(search)?,
            };
            commands::transaction::list(&client, &params).await
        }
        Command::Show { id } => commands::transaction::show(&client, &id).await,
        Command::Render { id, out } => {
            let out = out.unwrap_or_else(|| config.output_dir.clone());
            commands::invoice::render(&client, &id, &out).await
        }
        Command::Delete { id } => commands::transaction::delete(&client, &id).await,
    }
}

/// Validates and trims a `--search` argument before it reaches the wire.
fn checked_search(search: Option<String>) -> AppResult<Option<String>> {
    match search {
        Some(query) => Ok(Some(validate_search_query(&query)?)),
        None => Ok(None),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_search() {
        assert_eq!(checked_search(None).unwrap(), None);
        assert_eq!(
            checked_search(Some("  cotton ".into())).unwrap(),
            Some("cotton".to_string())
        );
        assert!(checked_search(Some("q".repeat(101))).is_err());
    }
}
