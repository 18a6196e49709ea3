//! Data models for search requests and their results.
//!
//! - [`SearchRequest`]: a validated query plus lookback window
//! - [`TimeWindow`]: the lookback encoded the way the search backend expects it
//! - [`ResultRecord`]: a single headline scraped from the results page
//! - [`ResultSet`]: the ordered, deduplicated, bounded list handed back to callers
//! - [`SearchReport`]: a `ResultSet` plus the request that produced it, for export

use crate::error::{Result, SearchError};
use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when a result carries no publisher information.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A validated search request.
///
/// Constructing one is the guard that runs before any network activity, so a
/// pipeline can never be handed a blank query or a non-positive window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    lookback_hours: u32,
}

impl SearchRequest {
    /// Validate and build a request.
    ///
    /// The query is trimmed; the hour count is taken as a signed value so that
    /// negative input coming from a prompt is reported rather than wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] if the trimmed query is empty or
    /// `lookback_hours` is not a positive integer that fits in a `u32`.
    pub fn new(query: &str, lookback_hours: i64) -> Result<Self> {
        let query = Self::check_query(query)?;
        if lookback_hours <= 0 {
            return Err(SearchError::InvalidRequest(
                "hours must be a positive number".into(),
            ));
        }
        let lookback_hours = u32::try_from(lookback_hours).map_err(|_| {
            SearchError::InvalidRequest(format!("hours must be at most {}", u32::MAX))
        })?;

        Ok(Self {
            query: query.to_string(),
            lookback_hours,
        })
    }

    /// Check a raw query on its own, returning it trimmed.
    ///
    /// Lets an interactive caller reject a blank query before asking for the
    /// hour count.
    pub fn check_query(query: &str) -> Result<&str> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidRequest(
                "search query cannot be empty".into(),
            ));
        }
        Ok(query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn lookback_hours(&self) -> u32 {
        self.lookback_hours
    }

    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::from_hours(self.lookback_hours)
    }
}

/// A lookback window as understood by the search backend.
///
/// Windows of up to a day are expressed in hours. Longer windows are expressed
/// in whole days; hours past the last full day are dropped, so 71 hours becomes
/// a two-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Hours(u32),
    Days(u32),
}

impl TimeWindow {
    pub fn from_hours(hours: u32) -> Self {
        if hours <= 24 {
            Self::Hours(hours)
        } else {
            Self::Days(hours / 24)
        }
    }

    /// The value of the `tbs` query parameter for this window.
    pub fn token(&self) -> String {
        match self {
            Self::Hours(n) => format!("qdr:h{n}"),
            Self::Days(d) => format!("qdr:d{d}"),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hours(1) => f.write_str("last hour"),
            Self::Hours(n) => write!(f, "last {n} hours"),
            Self::Days(1) => f.write_str("last day"),
            Self::Days(d) => write!(f, "last {d} days"),
        }
    }
}

/// A single news result scraped from the results page.
///
/// Two records refer to the same story when their `link` is equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Headline text.
    pub title: String,
    /// Absolute http(s) URL of the story.
    pub link: String,
    /// Publisher name, or [`UNKNOWN_SOURCE`].
    pub source: String,
    /// Free-text age label such as "3 hours ago". Not parsed.
    pub published_label: String,
    /// Lead text shown under the headline. Stored in full.
    pub snippet: String,
}

impl ResultRecord {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source: UNKNOWN_SOURCE.to_string(),
            published_label: String::new(),
            snippet: String::new(),
        }
    }
}

/// Ordered results, deduplicated by link and capped in length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<ResultRecord>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result set from raw candidates.
    ///
    /// The first record seen for each link wins and keeps its position; later
    /// duplicates are dropped. At most `max_results` records are kept.
    pub fn from_candidates(candidates: Vec<ResultRecord>, max_results: usize) -> Self {
        let records = candidates
            .into_iter()
            .unique_by(|r| r.link.clone())
            .take(max_results)
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A finished search, as written by the JSON exporter.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub query: String,
    pub lookback_hours: u32,
    /// The `tbs` token actually sent, e.g. `qdr:d2`.
    pub time_window: String,
    pub searched_at: DateTime<Local>,
    pub results: ResultSet,
}

impl SearchReport {
    pub fn new(request: &SearchRequest, results: ResultSet) -> Self {
        Self {
            query: request.query().to_string(),
            lookback_hours: request.lookback_hours(),
            time_window: request.time_window().token(),
            searched_at: Local::now(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, link: &str) -> ResultRecord {
        ResultRecord::new(title, link)
    }

    #[test]
    fn test_window_uses_hours_up_to_a_day() {
        for h in 1..=24 {
            assert_eq!(TimeWindow::from_hours(h), TimeWindow::Hours(h));
            assert_eq!(TimeWindow::from_hours(h).token(), format!("qdr:h{h}"));
        }
    }

    #[test]
    fn test_window_uses_whole_days_past_a_day() {
        assert_eq!(TimeWindow::from_hours(25), TimeWindow::Days(1));
        assert_eq!(TimeWindow::from_hours(30), TimeWindow::Days(1));
        assert_eq!(TimeWindow::from_hours(48), TimeWindow::Days(2));
        assert_eq!(TimeWindow::from_hours(71), TimeWindow::Days(2));
        assert_eq!(TimeWindow::from_hours(71).token(), "qdr:d2");
        assert_eq!(TimeWindow::from_hours(168).token(), "qdr:d7");
    }

    #[test]
    fn test_window_display() {
        assert_eq!(TimeWindow::Hours(1).to_string(), "last hour");
        assert_eq!(TimeWindow::Hours(12).to_string(), "last 12 hours");
        assert_eq!(TimeWindow::Days(1).to_string(), "last day");
        assert_eq!(TimeWindow::Days(3).to_string(), "last 3 days");
    }

    #[test]
    fn test_request_trims_query() {
        let req = SearchRequest::new("  Acme Corp \n", 6).unwrap();
        assert_eq!(req.query(), "Acme Corp");
        assert_eq!(req.lookback_hours(), 6);
        assert_eq!(req.time_window(), TimeWindow::Hours(6));
    }

    #[test]
    fn test_request_rejects_blank_query() {
        let err = SearchRequest::new("   ", 6).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_check_query() {
        assert_eq!(SearchRequest::check_query(" acme ").unwrap(), "acme");
        assert!(SearchRequest::check_query("\t\n").is_err());
    }

    #[test]
    fn test_request_rejects_non_positive_hours() {
        assert!(SearchRequest::new("acme", 0).is_err());
        let err = SearchRequest::new("acme", -3).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_request_rejects_oversized_hours() {
        let err = SearchRequest::new("acme", i64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRequest(_)));
    }

    #[test]
    fn test_record_defaults() {
        let r = record("Title", "https://example.com/a");
        assert_eq!(r.source, UNKNOWN_SOURCE);
        assert!(r.published_label.is_empty());
        assert!(r.snippet.is_empty());
    }

    #[test]
    fn test_result_set_keeps_first_record_per_link() {
        let set = ResultSet::from_candidates(
            vec![
                record("First", "https://example.com/a"),
                record("Second", "https://example.com/a"),
            ],
            10,
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].title, "First");
    }

    #[test]
    fn test_result_set_preserves_first_seen_order() {
        let set = ResultSet::from_candidates(
            vec![
                record("C", "https://c.example"),
                record("A", "https://a.example"),
                record("C again", "https://c.example"),
                record("B", "https://b.example"),
            ],
            10,
        );
        let titles: Vec<&str> = set.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_result_set_is_capped() {
        let candidates = (0..25)
            .map(|i| record(&format!("T{i}"), &format!("https://example.com/{i}")))
            .collect();
        let set = ResultSet::from_candidates(candidates, 10);
        assert_eq!(set.len(), 10);
        assert_eq!(set.records()[9].title, "T9");
    }

    #[test]
    fn test_cap_applies_after_dedup() {
        let set = ResultSet::from_candidates(
            vec![
                record("A", "https://a.example"),
                record("A dup", "https://a.example"),
                record("B", "https://b.example"),
            ],
            2,
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[1].link, "https://b.example");
    }

    #[test]
    fn test_report_serialization() {
        let req = SearchRequest::new("acme", 30).unwrap();
        let set = ResultSet::from_candidates(vec![record("A", "https://a.example")], 10);
        let report = SearchReport::new(&req, set);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"time_window\":\"qdr:d1\""));
        assert!(json.contains("\"results\":[{"));
        assert!(json.contains("https://a.example"));
    }
}
