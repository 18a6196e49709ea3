//! # News Time Filter
//!
//! Looks up recent news about a name or company. The query is sent to a
//! search engine's news vertical restricted to a lookback window, the results
//! page is scraped with layered heuristics, and a deduplicated list of
//! headlines and links is printed.
//!
//! ## Usage
//!
//! ```sh
//! news_time_filter                      # prompts for query and hours
//! news_time_filter -q "Acme Corp" -H 6  # no prompts
//! ```
//!
//! ## Architecture
//!
//! 1. **Input**: flags, or interactive prompts for whatever is missing
//! 2. **Guard**: blank queries and non-positive windows are rejected here
//! 3. **Search**: [`pipeline::SearchPipeline`] fetches and extracts results
//! 4. **Output**: numbered list on stdout, optional JSON report
//!
//! Diagnostics go to an append-only log file; errors are echoed on stderr.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt as tfmt};

use news_time_filter::cli::Cli;
use news_time_filter::models::SearchReport;
use news_time_filter::outputs::{console, json};
use news_time_filter::{SearchError, SearchPipeline, SearchRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();
    let _log_guard = init_tracing(&args.log_file)?;

    let start_time = std::time::Instant::now();
    info!(log_file = %args.log_file.display(), "news_time_filter starting up");

    let mut pipeline = match SearchPipeline::new(args.search_config()) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    println!("{}", console::banner());

    let query = match args.query_or_prompt() {
        Ok(q) => q,
        Err(e) => {
            cancelled(e);
            return Ok(());
        }
    };
    if let Err(e) = SearchRequest::check_query(&query) {
        rejected(e);
        return Ok(());
    }
    let hours = match args.hours_or_prompt() {
        Ok(h) => h,
        Err(e) => {
            cancelled(e);
            return Ok(());
        }
    };
    let request = match SearchRequest::new(&query, hours) {
        Ok(r) => r,
        Err(e) => {
            rejected(e);
            return Ok(());
        }
    };

    println!("{}", console::searching_line(&request));
    let results = pipeline.search(&request).await;
    println!("{}", console::render_results(&request, &results));

    if let Some(path) = &args.json_output {
        let report = SearchReport::new(&request, results);
        match json::write_report(&report, path).await {
            Ok(()) => println!("Results written to {}", path.display()),
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to write JSON report");
                println!("Could not write results to {}: {e}", path.display());
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        searches = pipeline.calls(),
        "Execution complete"
    );
    Ok(())
}

fn cancelled(e: dialoguer::Error) {
    warn!(error = %e, "Prompt aborted");
    println!("\n\nSearch cancelled by user.");
}

fn rejected(e: SearchError) {
    warn!(error = %e, "Rejected search input");
    match e {
        SearchError::InvalidRequest(msg) => println!("Error: {msg}"),
        other => println!("Error: {other}"),
    }
}

/// Install the global subscriber.
///
/// Everything allowed by `RUST_LOG` (default `info`) is appended to
/// `log_file`; errors are also echoed to stderr. The returned guard flushes
/// the file writer on drop and must live until exit.
fn init_tracing(log_file: &Path) -> Result<WorkerGuard, Box<dyn Error>> {
    let dir = log_file
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_file
        .file_name()
        .ok_or("log file path has no file name")?
        .to_string_lossy()
        .into_owned();

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tfmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tfmt::time::UtcTime::rfc_3339());
    let stderr_layer = tfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(guard)
}
