//! Small text and URL helpers shared by the page parsers.
//!
//! Everything here is pure: no I/O, no state. Parsing helpers return
//! `None` instead of failing so callers can treat a bad value as "unknown".

use std::sync::LazyLock;

use regex::Regex;

pub(crate) const BASE_URL: &str = "https://www.vlr.gg";

static RE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+").expect("invalid regex: integer"));

static RE_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d*\.?\d+").expect("invalid regex: float"));

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve `href` against `base`.
///
/// Protocol-relative links get `https:`, root-relative links are appended to
/// `base`, anything else is returned unchanged.
pub fn join_url(base: &str, href: &str) -> String {
    if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("{}{href}", base.trim_end_matches('/'))
    } else {
        href.to_string()
    }
}

/// Resolve a possibly relative vlr.gg link into an absolute URL.
pub fn absolute_url(href: &str) -> String {
    join_url(BASE_URL, href)
}

/// Parse an integer out of noisy page text.
///
/// Thousands separators are ignored and an explicit `+` sign is accepted,
/// so `"+3"`, `" 1,024 "` and `"12 kills"` all yield a value.
pub fn parse_int(text: &str) -> Option<i64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok().or_else(|| {
        RE_INTEGER
            .find(&cleaned)
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Parse a floating point number out of noisy page text, e.g. `"Rating: 1.23"`.
pub fn parse_float(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok().or_else(|| {
        RE_FLOAT
            .find(&cleaned)
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Extract the numeric id following `/{segment}/` in a link.
///
/// Works for both relative (`/team/2/sentinels`) and absolute links.
pub fn extract_id_from_url(url: &str, segment: &str) -> Option<u32> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let mut parts = path.split('/');
    parts.find(|part| *part == segment)?;
    parts.next()?.parse().ok()
}
