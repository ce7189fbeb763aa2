use crate::error::ScrapeError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Origin site every page and AJAX call goes to
pub const BASE_URL: &str = "https://otakudesu.best";

/// WordPress AJAX endpoint used by the streaming player
pub const AJAX_PATH: &str = "/wp-admin/admin-ajax.php";

/// Per-request timeout for both page fetches and AJAX posts
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Network boundary of the scraper.
///
/// Page parsers only need `get_html`; the streaming resolver only needs
/// `post_form`. Tests swap in canned implementations.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GET a page and return its body
    async fn get_html(&self, url: &str) -> Result<String, ScrapeError>;

    /// POST an urlencoded form and return the response body
    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<String, ScrapeError>;
}

/// HTTP client with the fixed browser-like header set.
///
/// There are no retries: one failed request is one failed API call.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::ACCEPT, reqwest::header::HeaderValue::from_static(ACCEPT));
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static(ACCEPT_LANGUAGE),
        );

        let client = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .gzip(true)
            .brotli(true)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for Fetcher {
    async fn get_html(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            log::warn!("Request failed for {}: {}", url, e);
            ScrapeError::upstream(url)
        })?;

        let response = response.error_for_status().map_err(|e| {
            log::warn!("Upstream returned {:?} for {}", e.status(), url);
            ScrapeError::upstream(url)
        })?;

        response.text().await.map_err(|e| {
            log::warn!("Failed to read body from {}: {}", url, e);
            ScrapeError::upstream(url)
        })
    }

    async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<String, ScrapeError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                log::warn!("POST to {} failed: {}", url, e);
                ScrapeError::upstream(url)
            })?;

        response.text().await.map_err(|e| {
            log::warn!("Failed to read body from {}: {}", url, e);
            ScrapeError::upstream(url)
        })
    }
}
