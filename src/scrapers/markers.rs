//! Primary extraction: scan for the engine's result-layout class markers.
//!
//! News results are rendered as an `<h3>` or `<div>` whose class list carries
//! one of a handful of layout markers, wrapped in (or wrapping) the outbound
//! anchor. Publisher, age label and snippet are looked up inside the anchor
//! first, then in the surrounding result container when that container holds
//! this result only.
//!
//! # Markup handled
//!
//! ```text
//! <div>                                  <- container
//!   <a href="/url?q=https://...">         <- link (enclosing anchor)
//!     <div class="n0jPhd ynAwRc">Title</div>
//!     <div class="news-source">Reuters</div>
//!     <div class="pub-time">2 hours ago</div>
//!   </a>
//!   <div class="snippet">Lead text</div>
//! </div>
//! ```

use super::links::{LinkPolicy, resolve_href};
use super::{Extractor, element_text, selector};
use crate::error::SearchError;
use crate::models::{ResultRecord, UNKNOWN_SOURCE};
use scraper::{ElementRef, Html, Selector};
use tracing::trace;
use url::Url;

/// Class substrings used by the engine's result layouts.
pub const DEFAULT_CLASS_MARKERS: &[&str] = &["LC20lb", "BNeawe", "n0jPhd", "ynAwRc"];

/// Element names that may carry a marker.
const MARKED_TAGS: &[&str] = &["h3", "div"];

/// Scans for marked headings and harvests the fields around them.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    markers: Vec<String>,
}

impl Default for MarkerExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_MARKERS.iter().map(|m| m.to_string()).collect())
    }
}

/// Selectors compiled once per extraction.
struct Selectors {
    headline: Selector,
    anchor: Selector,
    source: Selector,
    time: Selector,
    snippet: Selector,
}

impl MarkerExtractor {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    fn selectors(&self) -> Result<Selectors, SearchError> {
        if self.markers.is_empty() {
            return Err(SearchError::Extraction("no class markers configured".into()));
        }
        let headline = MARKED_TAGS
            .iter()
            .flat_map(|tag| {
                self.markers
                    .iter()
                    .map(move |marker| format!(r#"{tag}[class*="{marker}"]"#))
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Selectors {
            headline: selector(&headline)?,
            anchor: selector("a[href]")?,
            source: selector(r#"[class*="source"], [class*="publisher"]"#)?,
            time: selector(r#"[class*="time"]"#)?,
            snippet: selector(r#"[class*="snippet"]"#)?,
        })
    }
}

impl Extractor for MarkerExtractor {
    fn name(&self) -> &'static str {
        "class-markers"
    }

    fn extract(&self, document: &Html, base: &Url) -> Result<Vec<ResultRecord>, SearchError> {
        let sel = self.selectors()?;
        let mut records = Vec::new();

        for element in document.select(&sel.headline) {
            let title = element_text(element);
            if title.is_empty() {
                continue;
            }

            let Some((anchor, container)) = locate_anchor(element, &sel.anchor) else {
                trace!(%title, "Marked headline has no anchor; skipping");
                continue;
            };
            let Some(link) = anchor
                .value()
                .attr("href")
                .and_then(|href| resolve_href(href, base, LinkPolicy::ResolveRelative))
            else {
                trace!(%title, "Marked headline has no usable link; skipping");
                continue;
            };

            let scopes: Vec<ElementRef<'_>> = std::iter::once(anchor).chain(container).collect();
            let mut record = ResultRecord::new(title, link);
            record.source = first_text(&scopes, &sel.source)
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());
            record.published_label = first_text(&scopes, &sel.time).unwrap_or_default();
            record.snippet = first_text(&scopes, &sel.snippet)
                .or_else(|| container.and_then(|c| following_block_text(c, &sel.anchor)))
                .unwrap_or_default();
            records.push(record);
        }

        Ok(records)
    }
}

/// Find the anchor for a marked element and the container holding the result.
///
/// The nearest enclosing `<a href>` wins and its parent is the candidate
/// container. Failing that, the first descendant `<a href>` is used and the
/// marked element's parent is the candidate. The candidate is only returned
/// when it holds no other result link; in a flat list of anchors sharing one
/// parent, fields are read from the anchor alone.
fn locate_anchor<'a>(
    element: ElementRef<'a>,
    anchor_sel: &Selector,
) -> Option<(ElementRef<'a>, Option<ElementRef<'a>>)> {
    let enclosing = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a" && e.value().attr("href").is_some());

    let (anchor, candidate) = match enclosing {
        Some(anchor) => (anchor, parent_element(anchor)),
        None => (element.select(anchor_sel).next()?, parent_element(element)),
    };
    let container = candidate.filter(|c| c.select(anchor_sel).take(2).count() == 1);
    Some((anchor, container))
}

fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Text of the first element matching `sel` that has any, searching each
/// scope in turn.
fn first_text(scopes: &[ElementRef<'_>], sel: &Selector) -> Option<String> {
    scopes.iter().find_map(|scope| {
        scope
            .select(sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// Text of the first non-empty element following `container`.
///
/// A sibling that holds a link of its own is taken to be the next result and
/// ends the search.
fn following_block_text(container: ElementRef<'_>, anchor_sel: &Selector) -> Option<String> {
    for sibling in container.next_siblings().filter_map(ElementRef::wrap) {
        if sibling.value().name() == "a" || sibling.select(anchor_sel).next().is_some() {
            return None;
        }
        let text = element_text(sibling);
        if !text.is_empty() {
            return Some(text);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google() -> Url {
        Url::parse("https://www.google.com").unwrap()
    }

    fn extract(html: &str) -> Vec<ResultRecord> {
        MarkerExtractor::default()
            .extract(&Html::parse_document(html), &google())
            .unwrap()
    }

    const NEWS_LAYOUT: &str = r#"<html><body><div id="search">
<div class="SoaBEf">
  <a class="WlydOe" href="https://www.reuters.com/business/acme-profit/">
    <div class="MgUUmf news-source"><span>Reuters</span></div>
    <div class="n0jPhd ynAwRc MBeuO nDgy9d" role="heading">Acme posts record quarterly profit</div>
    <div class="GI74Re nDgy9d snippet-text">Acme Corp reported its best quarter ever on Tuesday.</div>
    <div class="OSrXXb rbYSKb LfVVr pub-time"><span>3 hours ago</span></div>
  </a>
</div>
<div class="SoaBEf">
  <a class="WlydOe" href="/url?q=https://apnews.com/article/acme-ceo&amp;sa=U&amp;ved=abc">
    <div class="n0jPhd ynAwRc MBeuO nDgy9d" role="heading">Acme CEO steps down</div>
  </a>
</div>
</div></body></html>"#;

    #[test]
    fn extracts_news_layout_fields() {
        let records = extract(NEWS_LAYOUT);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.title, "Acme posts record quarterly profit");
        assert_eq!(first.link, "https://www.reuters.com/business/acme-profit/");
        assert_eq!(first.source, "Reuters");
        assert_eq!(first.published_label, "3 hours ago");
        assert_eq!(
            first.snippet,
            "Acme Corp reported its best quarter ever on Tuesday."
        );

        let second = &records[1];
        assert_eq!(second.title, "Acme CEO steps down");
        assert_eq!(second.link, "https://apnews.com/article/acme-ceo");
        assert_eq!(second.source, UNKNOWN_SOURCE);
        assert!(second.published_label.is_empty());
        assert!(second.snippet.is_empty());
    }

    #[test]
    fn h3_title_inside_redirect_anchor() {
        let html = r#"<div><a href="/url?q=https://example.com/a&amp;sa=U"><h3 class="LC20lb MBeuO">Example headline</h3></a></div>"#;
        let records = extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Example headline");
        assert_eq!(records[0].link, "https://example.com/a");
    }

    #[test]
    fn relative_link_resolved_against_origin() {
        let html = r#"<div><a href="/something"><h3 class="LC20lb">Internal</h3></a></div>"#;
        let records = extract(html);
        assert_eq!(records[0].link, "https://www.google.com/something");
    }

    #[test]
    fn descendant_anchor_used_when_not_enclosed() {
        let html = r#"<div class="g">
  <div class="ynAwRc"><a href="https://example.com/story">Story title</a></div>
  <div class="story-time">1 day ago</div>
</div>"#;
        let records = extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Story title");
        assert_eq!(records[0].link, "https://example.com/story");
        assert_eq!(records[0].published_label, "1 day ago");
    }

    #[test]
    fn headline_without_link_is_skipped() {
        let html = r#"<div><h3 class="LC20lb">Orphan headline</h3></div>
<div><a href="javascript:void(0)"><h3 class="LC20lb">Script link</h3></a></div>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn empty_headline_is_skipped() {
        let html = r#"<div><a href="https://example.com/x"><h3 class="LC20lb">   </h3></a></div>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn unmarked_headings_are_ignored() {
        let html = r#"<div><a href="https://example.com/x"><h3 class="other">Not marked</h3></a></div>"#;
        assert!(extract(html).is_empty());
    }

    #[test]
    fn snippet_taken_from_following_block() {
        let html = r#"<div id="r">
  <div class="Gx5Zad"><a href="/url?q=https://example.com/one&amp;sa=U"><h3><div class="BNeawe vvjwJb">First</div></h3></a></div>
  <div class="kCrYT"><div>Lead text for the first story.</div></div>
</div>"#;
        let records = extract(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].snippet, "Lead text for the first story.");
    }

    #[test]
    fn following_result_is_not_taken_as_snippet() {
        let html = r#"<div id="r">
  <div class="Gx5Zad"><a href="https://example.com/one"><h3 class="LC20lb">One</h3></a></div>
  <div class="Gx5Zad"><a href="https://example.com/two"><h3 class="LC20lb">Two</h3></a></div>
</div>"#;
        let records = extract(html);
        assert_eq!(records.len(), 2);
        assert!(records[0].snippet.is_empty());
    }

    #[test]
    fn flat_list_reads_fields_per_anchor() {
        let html = r#"<div id="rso">
  <a href="https://www.reuters.com/acme"><div class="n0jPhd">Acme beats estimates</div><span class="news-source">Reuters</span><span class="pub-time">1 hour ago</span></a>
  <a href="https://apnews.com/acme"><div class="n0jPhd">Acme shares rise</div><span class="news-source">AP</span><span class="pub-time">5 hours ago</span></a>
  <div>Footer text that belongs to no result</div>
</div>"#;
        let records = extract(html);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].source, "Reuters");
        assert_eq!(records[0].published_label, "1 hour ago");
        assert_eq!(records[1].source, "AP");
        assert_eq!(records[1].published_label, "5 hours ago");
        assert!(records.iter().all(|r| r.snippet.is_empty()));
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let html = r#"<div class="SoaBEf"><a href="https://example.com/acme">
  <div class="n0jPhd"><b>Acme</b>'s profit jumps</div>
  <div class="snippet">Shares of <em>Acme</em>, the widget maker, rose.</div>
</a></div>"#;
        let records = extract(html);
        assert_eq!(records[0].title, "Acme's profit jumps");
        assert_eq!(records[0].snippet, "Shares of Acme, the widget maker, rose.");
    }

    #[test]
    fn results_keep_document_order() {
        let html = r#"
<div><a href="https://example.com/1"><h3 class="LC20lb">One</h3></a></div>
<div><a href="https://example.com/2"><div class="n0jPhd">Two</div></a></div>
<div><a href="https://example.com/3"><h3 class="LC20lb">Three</h3></a></div>"#;
        let titles: Vec<String> = extract(html).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn custom_markers() {
        let html = r#"<div><a href="https://example.com/x"><h3 class="headline-x">Custom</h3></a></div>"#;
        let records = MarkerExtractor::new(vec!["headline-x".into()])
            .extract(&Html::parse_document(html), &google())
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn no_markers_is_an_error() {
        let err = MarkerExtractor::new(vec![])
            .extract(&Html::parse_document(""), &google())
            .unwrap_err();
        assert!(matches!(err, SearchError::Extraction(_)));
    }
}
