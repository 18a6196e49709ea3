//! The time-windowed search-and-extract pipeline.
//!
//! One call to [`SearchPipeline::search`] performs at most one HTTP round
//! trip:
//!
//! 1. **Throttle**: every call after the first waits a random delay
//! 2. **Request**: `GET {base}/search?q=..&tbs=qdr:..&tbm=nws` with a rotated User-Agent
//! 3. **Extract**: layered heuristics over the parsed HTML
//! 4. **Bound**: deduplicate by link, keep first-seen order, cap the length
//!
//! Failures never escape [`search`](SearchPipeline::search): they are logged
//! and turned into an empty [`ResultSet`]. Callers that need to tell "nothing
//! matched" from "something broke" use [`try_search`](SearchPipeline::try_search).

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::http::{build_client, random_user_agent};
use crate::models::{ResultRecord, ResultSet, SearchRequest};
use crate::scrapers::{Extractor, LayeredExtractor};
use crate::utils::truncate_for_log;
use rand::Rng;
use reqwest::header::USER_AGENT;
use scraper::Html;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// News search over a single engine endpoint.
///
/// A pipeline may be reused for several searches; it remembers how many calls
/// it has made so that only the first one skips the anti-throttling delay.
/// Searches take `&mut self` and run one at a time.
pub struct SearchPipeline {
    client: reqwest::Client,
    config: SearchConfig,
    base: Url,
    extractor: LayeredExtractor,
    calls: u64,
}

impl SearchPipeline {
    /// Build a pipeline with the standard extraction strategies.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation or the
    /// HTTP client cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let base = config.base()?;
        let client = build_client(&config)?;
        let extractor = LayeredExtractor::standard(config.fallback_threshold);

        Ok(Self {
            client,
            config,
            base,
            extractor,
            calls: 0,
        })
    }

    /// Replace the extraction strategies.
    pub fn with_extractor(mut self, extractor: LayeredExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of searches attempted so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Validate raw caller input, then search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] for a blank query or a
    /// non-positive hour count; no request is issued in that case. Search
    /// failures themselves are not errors here (see [`search`](Self::search)).
    pub async fn search_for(&mut self, query: &str, lookback_hours: i64) -> Result<ResultSet> {
        let request = SearchRequest::new(query, lookback_hours)?;
        Ok(self.search(&request).await)
    }

    /// Search with the configured result cap. Never fails; see the module docs.
    pub async fn search(&mut self, request: &SearchRequest) -> ResultSet {
        let max_results = self.config.max_results;
        self.search_limited(request, max_results).await
    }

    /// Search with an explicit result cap. Never fails.
    ///
    /// # Arguments
    ///
    /// * `request` - A validated query and lookback window
    /// * `max_results` - Cap applied after deduplication
    ///
    /// # Returns
    ///
    /// The results, or an empty set if the search failed. Failures are logged
    /// at error level with the query and the cause.
    pub async fn search_limited(&mut self, request: &SearchRequest, max_results: usize) -> ResultSet {
        match self.try_search(request, max_results).await {
            Ok(results) => results,
            Err(e) => {
                error!(
                    query = %request.query(),
                    lookback_hours = request.lookback_hours(),
                    error = %e,
                    "Search failed; returning no results"
                );
                ResultSet::empty()
            }
        }
    }

    /// Search, reporting transport and extraction failures to the caller.
    ///
    /// # Arguments
    ///
    /// * `request` - A validated query and lookback window
    /// * `max_results` - Cap applied after deduplication
    ///
    /// # Returns
    ///
    /// The deduplicated results in page order. An empty set here means the
    /// page was fetched and parsed but held no recognisable results.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Transport`] if the request fails, times out or gets a
    ///   non-2xx status
    /// - [`SearchError::Extraction`] if the body cannot be decoded or parsed
    #[instrument(level = "info", skip_all, fields(query = %request.query(), hours = request.lookback_hours()))]
    pub async fn try_search(
        &mut self,
        request: &SearchRequest,
        max_results: usize,
    ) -> Result<ResultSet> {
        if let Some(delay) = self.next_delay() {
            info!(delay_ms = delay.as_millis() as u64, "Waiting before next search");
            sleep(delay).await;
        }
        self.calls += 1;

        let url = self.request_url(request);
        let window = request.time_window();
        info!(%url, %window, "Searching news");

        let t0 = Instant::now();
        let body = self.fetch(url).await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched results page"
        );

        let candidates = self.extract(&body)?;
        let raw = candidates.len();
        let results = ResultSet::from_candidates(candidates, max_results);

        if results.is_empty() {
            warn!(preview = %truncate_for_log(&body, 300), "No results extracted from page");
        }
        info!(candidates = raw, results = results.len(), "Search complete");
        Ok(results)
    }

    /// The delay to wait before the next search, if any.
    ///
    /// `None` for a pipeline that has not searched yet or whose delay range is
    /// `(0, 0)`; otherwise a duration drawn uniformly from the configured range.
    pub fn next_delay(&self) -> Option<Duration> {
        if self.calls == 0 {
            return None;
        }
        let (min, max) = self.config.request_delay_ms;
        let ms = rand::rng().random_range(min..=max);
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// The search URL for `request`.
    pub fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.base.clone();
        url.set_path("/search");
        url.set_fragment(None);
        url.query_pairs_mut()
            .clear()
            .append_pair("q", request.query())
            .append_pair("tbs", &request.time_window().token())
            .append_pair("tbm", "nws");
        url
    }

    async fn fetch(&self, url: Url) -> Result<String> {
        let mut req = self.client.get(url);
        if let Some(ua) = random_user_agent(&self.config.user_agents) {
            debug!(user_agent = ua, "Selected User-Agent");
            req = req.header(USER_AGENT, ua);
        }

        let response = req
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Transport(format!(
                "search returned status {status}"
            )));
        }

        response.text().await.map_err(|e| {
            if e.is_decode() {
                SearchError::Extraction(format!("failed to decode response body: {e}"))
            } else {
                SearchError::Transport(format!("failed to read response body: {e}"))
            }
        })
    }

    fn extract(&self, body: &str) -> Result<Vec<ResultRecord>> {
        if body.trim().is_empty() {
            return Err(SearchError::Extraction("empty response body".into()));
        }
        let document = Html::parse_document(body);
        self.extractor.extract(&document, &self.base)
    }
}
