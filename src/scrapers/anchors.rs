//! Fallback extraction: any anchor that wraps a heading.
//!
//! Used when the layout markers have drifted. This strategy is strict about
//! links: an href must be, or unwrap to, an absolute http(s) URL.

use super::links::{LinkPolicy, resolve_href};
use super::{Extractor, element_text, selector};
use crate::error::SearchError;
use crate::models::ResultRecord;
use scraper::Html;
use url::Url;

/// Scans every `<a>` for a nested `<h3>` and uses the heading as the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorHeadingExtractor;

impl Extractor for AnchorHeadingExtractor {
    fn name(&self) -> &'static str {
        "anchor-headings"
    }

    fn extract(&self, document: &Html, base: &Url) -> Result<Vec<ResultRecord>, SearchError> {
        let anchor_sel = selector("a")?;
        let heading_sel = selector("h3")?;

        let records = document
            .select(&anchor_sel)
            .filter_map(|anchor| {
                let heading = anchor.select(&heading_sel).next()?;
                let title = element_text(heading);
                if title.is_empty() {
                    return None;
                }
                let href = anchor.value().attr("href")?;
                let link = resolve_href(href, base, LinkPolicy::AbsoluteOnly)?;
                Some(ResultRecord::new(title, link))
            })
            .collect();

        Ok(records)
    }
}
