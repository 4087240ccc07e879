use scraper::error::SelectorErrorKind;

/// Failures while fetching or reading a vlr.gg series page.
///
/// [`crate::VlrClient::get_series_performance`] never returns these; they are
/// logged and turned into empty or partial results where they occur.
#[derive(thiserror::Error, Debug)]
pub enum VlrError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// HTTP 429 from the site.
    #[error("rate limited by {url}")]
    RateLimited { url: String },

    /// Any other status outside 2xx.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    #[error("invalid CSS selector: {0}")]
    Selector(String),
}

impl<'a> From<SelectorErrorKind<'a>> for VlrError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        VlrError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VlrError>;
