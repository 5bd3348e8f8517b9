//! Page fetching
//!
//! The page-rendering collaborator sits behind the [`PageFetcher`] trait:
//! given a URL it returns the page's HTML, or a failure the retry policy can
//! act on. Production uses a plain reqwest client configured to look like a
//! browser; JavaScript rendering, cookie-consent handling, and fingerprint
//! shaping are outside this crate and may be layered in by swapping the
//! fetcher implementation.

use crate::config::Config;
use crate::{Result, ScrapeError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Browser-like identity; the site serves its English-language date formats
/// and full markup to this profile.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Seam to the external page-rendering layer.
pub trait PageFetcher {
    /// Fetches `url` and returns the page HTML.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Builds the HTTP client used by [`HttpFetcher`]: browser-like user agent,
/// English `Accept-Language`, compressed transfer, the configured fetch
/// timeout, and the configured upstream proxy when one is set.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_millis(config.crawl.fetch_timeout_ms))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);

    if let Some(proxy_config) = &config.proxy {
        let mut proxy = reqwest::Proxy::all(&proxy_config.url)?;
        if let (Some(user), Some(pass)) = (&proxy_config.username, &proxy_config.password) {
            proxy = proxy.basic_auth(user, pass);
        }
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// Production fetcher backed by reqwest.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send {
        let request = self.client.get(url);
        let url = url.to_string();
        async move {
            let response = request.send().await.map_err(|err| classify(&url, err))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ScrapeError::Status {
                    url,
                    status: status.as_u16(),
                });
            }

            response.text().await.map_err(|err| classify(&url, err))
        }
    }
}

/// Maps a reqwest error to the crate taxonomy: timeouts are their own
/// retryable variant, everything else keeps the underlying error.
fn classify(url: &str, err: reqwest::Error) -> ScrapeError {
    if err.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Http {
            url: url.to_string(),
            source: err,
        }
    }
}
