//! # news_time_filter
//!
//! Time-windowed news search over a search engine's results page.
//!
//! A [`SearchRequest`] (query plus lookback hours) is turned into a news
//! search scoped with a `qdr:` time token, the HTML response is scraped with
//! layered heuristics ([`scrapers`]), and the records are deduplicated by
//! link into a bounded [`ResultSet`].
//!
//! ```no_run
//! # async fn example() -> news_time_filter::error::Result<()> {
//! use news_time_filter::{SearchConfig, SearchPipeline, SearchRequest};
//!
//! let mut pipeline = SearchPipeline::new(SearchConfig::default())?;
//! let request = SearchRequest::new("Acme Corp", 48)?;
//! for record in &pipeline.search(&request).await {
//!     println!("{} - {}", record.title, record.link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod scrapers;
pub mod utils;

pub use config::SearchConfig;
pub use error::SearchError;
pub use models::{ResultRecord, ResultSet, SearchRequest, TimeWindow};
pub use pipeline::SearchPipeline;
