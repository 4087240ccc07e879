pub(crate) mod series;

use std::time::Duration;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::error::{Result, VlrError};
use crate::util::normalize_whitespace;

/// Fetch a URL and return the response body as text.
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    debug!(url, ?timeout, "fetching page");

    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| VlrError::Http {
            url: url.to_owned(),
            source: e,
        })?;

    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(VlrError::RateLimited {
            url: url.to_owned(),
        });
    }
    if !status.is_success() {
        return Err(VlrError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| VlrError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| element_text(&e))
        .unwrap_or_default()
}

/// All visible text below `element`, whitespace-normalized.
pub(crate) fn element_text(element: &ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// The first non-empty text node that is a direct child of `element`.
///
/// Text inside nested elements (team tags, popovers) is not considered.
pub(crate) fn direct_text(element: &ElementRef) -> Option<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Attribute value of `element`, `None` when absent or blank.
pub(crate) fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
