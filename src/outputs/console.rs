//! Console rendering of search results.
//!
//! Rendering is kept separate from printing so it can be tested; `main`
//! prints whatever these functions return.

use crate::models::{ResultSet, SearchRequest, UNKNOWN_SOURCE};
use crate::utils::truncate_for_display;

/// Maximum snippet length shown under a headline.
pub const SNIPPET_DISPLAY_CHARS: usize = 150;

const RULE_WIDTH: usize = 60;

/// A horizontal rule of `ch`.
pub fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Title banner printed at startup.
pub fn banner() -> String {
    format!("{}\nNews Time Filter\n{}", rule('='), rule('='))
}

/// Line announcing a search that is about to run.
pub fn searching_line(request: &SearchRequest) -> String {
    format!(
        "\nSearching for '{}' in the last {} hours...\n{}",
        request.query(),
        request.lookback_hours(),
        rule('-')
    )
}

/// Numbered result list, or a "no results" message with hints.
pub fn render_results(request: &SearchRequest, results: &ResultSet) -> String {
    if results.is_empty() {
        return render_no_results(request);
    }

    let mut out = format!(
        "\nFound {} results from the last {} hours:\n\n",
        results.len(),
        request.lookback_hours()
    );

    for (i, record) in results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, record.title));
        out.push_str(&format!("   {}\n", record.link));

        let mut meta = Vec::new();
        if record.source != UNKNOWN_SOURCE && !record.source.is_empty() {
            meta.push(format!("Source: {}", record.source));
        }
        if !record.published_label.is_empty() {
            meta.push(format!("Published: {}", record.published_label));
        }
        if !meta.is_empty() {
            out.push_str(&format!("   {}\n", meta.join(" | ")));
        }
        if !record.snippet.is_empty() {
            out.push_str(&format!(
                "   {}\n",
                truncate_for_display(&record.snippet, SNIPPET_DISPLAY_CHARS)
            ));
        }
        out.push('\n');
    }

    out.push_str(&rule('-'));
    out
}

fn render_no_results(request: &SearchRequest) -> String {
    let mut out = format!(
        "\nNo results found for '{}' in the last {} hours\n",
        request.query(),
        request.lookback_hours()
    );
    out.push_str("\nPossible reasons:\n");
    out.push_str("- The search engine may be blocking automated requests\n");
    out.push_str("- No news articles in the specified time frame\n");
    out.push_str("- Rate limiting or CAPTCHA required\n");
    out.push_str("\nTips:\n");
    out.push_str("- Try a wider time range\n");
    out.push_str("- Check the log file for request errors\n");
    out.push_str("- Wait a few minutes, or use a VPN or proxy\n");
    out.push_str(&rule('-'));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultRecord;

    fn request() -> SearchRequest {
        SearchRequest::new("Acme", 12).unwrap()
    }

    #[test]
    fn test_renders_numbered_list() {
        let mut rich = ResultRecord::new("Acme posts profit", "https://example.com/a");
        rich.source = "Reuters".into();
        rich.published_label = "2 hours ago".into();
        rich.snippet = "word ".repeat(60);
        let plain = ResultRecord::new("Acme CEO resigns", "https://example.com/b");
        let set = ResultSet::from_candidates(vec![rich, plain], 10);

        let out = render_results(&request(), &set);
        assert!(out.contains("Found 2 results from the last 12 hours"));
        assert!(out.contains("1. Acme posts profit\n   https://example.com/a\n"));
        assert!(out.contains("   Source: Reuters | Published: 2 hours ago\n"));
        assert!(out.contains("..."));
        assert!(out.contains("2. Acme CEO resigns\n   https://example.com/b\n\n"));
        assert!(!out.contains("Source: Unknown"));
    }

    #[test]
    fn test_renders_no_results_hints() {
        let out = render_results(&request(), &ResultSet::empty());
        assert!(out.contains("No results found for 'Acme' in the last 12 hours"));
        assert!(out.contains("Possible reasons:"));
        assert!(out.contains("Try a wider time range"));
        assert!(out.contains("log file"));
    }

    #[test]
    fn test_searching_line_and_banner() {
        assert!(searching_line(&request()).contains("Searching for 'Acme' in the last 12 hours..."));
        assert!(banner().starts_with(&"=".repeat(60)));
    }
}
