//! CLI argument definitions for borsdata.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tools` | Print the tool catalogue as JSON |
//! | `call` | Invoke one tool with JSON arguments |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--api-key` | `$BORSDATA_API_KEY` | API key |
//! | `--no-retry` | `false` | Fail on the first 429 |
//! | `--max-attempts` | `5` | Attempts per request including the first |
//! | `--timeout-ms` | `30000` | Per-request timeout |
//!
//! # Examples
//!
//! ```bash
//! borsdata tools --pretty
//! borsdata call get_stock_prices --args '{"instrument_id": 3, "max_count": 5}'
//! borsdata call get_markets --no-retry
//! ```

use clap::{Args, Parser, Subcommand};

/// Borsdata API client
///
/// Lists the available tools and calls them against the Borsdata REST API.
#[derive(Debug, Parser)]
#[command(name = "borsdata", author, version, about = "Borsdata API command-line client")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// API key; defaults to BORSDATA_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Disable retries of rate-limited requests.
    #[arg(long, global = true, default_value_t = false)]
    pub no_retry: bool,

    /// Maximum attempts per request, including the first.
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the tool catalogue.
    Tools,
    /// Invoke one tool and print its result.
    Call(CallArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CallArgs {
    /// Tool name, e.g. get_stock_prices.
    pub tool: String,

    /// Tool arguments as a JSON object.
    #[arg(long)]
    pub args: Option<String>,
}
