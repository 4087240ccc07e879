use std::time::Duration;

use tracing::{debug, instrument};

use crate::model::MapPerformance;
use crate::util::{join_url, BASE_URL};
use crate::vlr_scraper;

/// Per-request timeout used when a call does not pass its own.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The main entry point for reading series statistics from VLR.gg.
///
/// `VlrClient` wraps a [`reqwest::Client`] and the site root it talks to.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use vlr_performance::VlrClient;
///
/// let client = VlrClient::new();
/// let maps = client.get_series_performance(542210, None, None).await;
/// for map in &maps {
///     println!("{:?}: {} kill pairs", map.map_name, map.kill_matrix.len());
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VlrClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for VlrClient {
    fn default() -> Self {
        Self::new()
    }
}

impl VlrClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, a user agent, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at another site root, e.g. a local mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The site root requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the performance tab of a series and return one entry per map
    /// (plus the "All Maps" aggregate when the series has several maps).
    ///
    /// Failures never surface as errors: an unreachable page yields an empty
    /// list and a failed overview fetch only leaves team ids unresolved.
    /// `limit` caps the number of maps returned, `Some(0)` skips the request.
    #[instrument(skip(self))]
    pub async fn get_series_performance(
        &self,
        series_id: u32,
        limit: Option<usize>,
        timeout: Option<Duration>,
    ) -> Vec<MapPerformance> {
        vlr_scraper::series::performance::get_series_performance(
            &self.http,
            &self.base_url,
            series_id,
            limit,
            timeout.unwrap_or(DEFAULT_TIMEOUT),
        )
        .await
    }

    /// Whether the site answers a HEAD request with a 2xx or 3xx status.
    #[instrument(skip(self))]
    pub async fn check_status(&self, timeout: Option<Duration>) -> bool {
        let url = join_url(&self.base_url, "/");
        match self
            .http
            .head(&url)
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                debug!(%status, "status probe answered");
                status.is_success() || status.is_redirection()
            }
            Err(e) => {
                debug!(error = %e, "status probe failed");
                false
            }
        }
    }
}
