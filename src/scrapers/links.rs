//! Turning raw `href` attributes from the results page into story links.
//!
//! The engine wraps outbound links in a redirect such as
//! `/url?q=https://example.com/story&sa=U&ved=...`; the target is pulled out
//! of the query string (and percent-decoded). Other site-relative paths are
//! either resolved against the engine origin or rejected, depending on the
//! [`LinkPolicy`] of the extractor asking.

use url::Url;

/// Path of the engine's outbound redirect wrapper.
const REDIRECT_PATH: &str = "/url";
/// Query keys that carry the redirect target, in order of preference.
const REDIRECT_KEYS: &[&str] = &["q", "url"];

/// How site-relative hrefs are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Resolve `/path` against the engine origin.
    ResolveRelative,
    /// Keep only hrefs that are (or unwrap to) absolute http(s) URLs.
    AbsoluteOnly,
}

/// Resolve a raw `href` into an absolute http(s) link.
///
/// Returns `None` for empty hrefs, non-web schemes (`javascript:`,
/// `mailto:`), redirect wrappers without a usable target and, under
/// [`LinkPolicy::AbsoluteOnly`], plain relative paths.
pub fn resolve_href(href: &str, base: &Url, policy: LinkPolicy) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if redirect_wrapper(href, base).is_some() {
        return unwrap_redirect(href, base).filter(|target| is_web_url(target));
    }

    match Url::parse(href) {
        Ok(absolute) => matches!(absolute.scheme(), "http" | "https").then(|| href.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => match policy {
            LinkPolicy::ResolveRelative => base.join(href).ok().map(String::from),
            LinkPolicy::AbsoluteOnly => None,
        },
        Err(_) => None,
    }
}

/// Extract the target of a redirect-wrapper href, if `href` is one.
///
/// Both the site-relative form (`/url?q=...`) and the absolute form on the
/// engine's own host are recognised.
pub fn unwrap_redirect(href: &str, base: &Url) -> Option<String> {
    let wrapper = redirect_wrapper(href, base)?;
    let pairs: Vec<(String, String)> = wrapper.query_pairs().into_owned().collect();
    REDIRECT_KEYS
        .iter()
        .find_map(|key| pairs.iter().find(|(k, _)| k == key))
        .map(|(_, v)| v.clone())
        .filter(|v| !v.is_empty())
}

/// `href` joined onto `base`, if it points at the redirect wrapper.
fn redirect_wrapper(href: &str, base: &Url) -> Option<Url> {
    let joined = base.join(href).ok()?;
    (joined.path() == REDIRECT_PATH && joined.host_str() == base.host_str()).then_some(joined)
}

fn is_web_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
