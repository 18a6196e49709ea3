//! Extraction of news records from a parsed results page.
//!
//! Every strategy implements [`Extractor`]. Two are provided:
//!
//! | Strategy | Module | Looks for |
//! |----------|--------|-----------|
//! | Primary | [`markers`] | headings/containers whose class carries a known layout marker |
//! | Fallback | [`anchors`] | any `<a>` that wraps an `<h3>` |
//!
//! [`LayeredExtractor`] runs the primary strategy and consults the fallback
//! only when the primary one comes up short. The markers are tied to the
//! engine's current markup; replacing them should not require touching the
//! pipeline.

pub mod anchors;
pub mod links;
pub mod markers;

use crate::error::SearchError;
use crate::models::ResultRecord;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

pub use anchors::AnchorHeadingExtractor;
pub use markers::MarkerExtractor;

/// A strategy for pulling candidate records out of a results page.
///
/// Candidates may contain duplicate links; deduplication and capping happen
/// when the [`ResultSet`](crate::models::ResultSet) is built.
pub trait Extractor {
    /// Short name used in log records.
    fn name(&self) -> &'static str;

    /// Extract candidates in document order.
    ///
    /// `base` is the engine origin, used to resolve site-relative links.
    fn extract(&self, document: &Html, base: &Url) -> Result<Vec<ResultRecord>, SearchError>;
}

/// Primary strategy with a fallback for thin results.
pub struct LayeredExtractor {
    primary: Box<dyn Extractor + Send + Sync>,
    fallback: Box<dyn Extractor + Send + Sync>,
    fallback_threshold: usize,
}

impl LayeredExtractor {
    pub fn new(
        primary: Box<dyn Extractor + Send + Sync>,
        fallback: Box<dyn Extractor + Send + Sync>,
        fallback_threshold: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            fallback_threshold,
        }
    }

    /// The marker scan backed by the anchor/heading scan.
    pub fn standard(fallback_threshold: usize) -> Self {
        Self::new(
            Box::new(MarkerExtractor::default()),
            Box::new(AnchorHeadingExtractor),
            fallback_threshold,
        )
    }
}

impl Extractor for LayeredExtractor {
    fn name(&self) -> &'static str {
        "layered"
    }

    /// Primary candidates first, then fallback candidates when the primary
    /// strategy found fewer than `fallback_threshold` distinct links.
    fn extract(&self, document: &Html, base: &Url) -> Result<Vec<ResultRecord>, SearchError> {
        let mut candidates = self.primary.extract(document, base)?;
        let distinct = candidates.iter().map(|r| &r.link).unique().count();
        debug!(
            strategy = self.primary.name(),
            count = candidates.len(),
            distinct,
            "Primary extraction finished"
        );

        if distinct < self.fallback_threshold {
            let extra = self.fallback.extract(document, base)?;
            debug!(
                strategy = self.fallback.name(),
                count = extra.len(),
                threshold = self.fallback_threshold,
                "Primary came up short; ran fallback extraction"
            );
            candidates.extend(extra);
        }

        Ok(candidates)
    }
}

/// Parse a CSS selector, reporting failures as extraction errors.
pub(crate) fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css)
        .map_err(|e| SearchError::Extraction(format!("invalid selector {css:?}: {e:?}")))
}

/// Visible text of an element with whitespace collapsed.
///
/// Text nodes are concatenated as-is, so inline markup such as
/// `<b>Acme</b>'s` reads back as `Acme's`.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let raw = element.text().collect::<String>();
    crate::utils::normalize_whitespace(&raw)
}
