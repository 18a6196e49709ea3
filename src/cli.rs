//! Command-line interface definitions.
//!
//! Every flag is optional. A query or hour count that is not supplied on the
//! command line is prompted for interactively, so running the binary with no
//! arguments behaves like a small interactive tool while scripts can pass
//! everything up front.

use crate::config::{DEFAULT_BASE_URL, SearchConfig};
use clap::Parser;
use dialoguer::Input;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Interactive
/// news_time_filter
///
/// # Non-interactive, last two days, also written to JSON
/// news_time_filter -q "Acme Corp" -H 48 -j ./out/acme.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Name or company to search for (prompted for when omitted)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Hours to look back (prompted for when omitted)
    #[arg(short = 'H', long, allow_negative_numbers = true)]
    pub hours: Option<i64>,

    /// Maximum number of results to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub max_results: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Lower bound of the random delay between consecutive searches
    #[arg(long, default_value_t = 2000)]
    pub min_delay_ms: u64,

    /// Upper bound of the random delay between consecutive searches
    #[arg(long, default_value_t = 5000)]
    pub max_delay_ms: u64,

    /// Search engine origin
    #[arg(long, env = "NEWS_SEARCH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Append-only log file
    #[arg(long, env = "NEWS_SEARCH_LOG_FILE", default_value = "news_search.log")]
    pub log_file: PathBuf,

    /// Also write the results to this JSON file
    #[arg(short, long)]
    pub json_output: Option<PathBuf>,
}

impl Cli {
    /// Pipeline configuration from the parsed flags.
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            base_url: self.base_url.clone(),
            max_results: self.max_results,
            timeout_seconds: self.timeout_secs,
            request_delay_ms: (self.min_delay_ms, self.max_delay_ms),
            ..Default::default()
        }
    }

    /// The query from `--query`, or from a prompt.
    ///
    /// Blank input is returned as-is; rejecting it is the request guard's job.
    pub fn query_or_prompt(&self) -> Result<String, dialoguer::Error> {
        match &self.query {
            Some(q) => Ok(q.clone()),
            None => Input::<String>::new()
                .with_prompt("Enter the name/company to search")
                .allow_empty(true)
                .interact_text(),
        }
    }

    /// The hour count from `--hours`, or from a prompt.
    ///
    /// The prompt re-asks until the input parses as an integer.
    pub fn hours_or_prompt(&self) -> Result<i64, dialoguer::Error> {
        match self.hours {
            Some(h) => Ok(h),
            None => Input::<i64>::new()
                .with_prompt("Enter hours to check back (e.g., 24 for last 24 hours)")
                .interact_text(),
        }
    }
}
