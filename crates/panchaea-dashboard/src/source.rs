use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use panchaea_common::StatusReport;

use crate::error::FetchError;

/// Where the poller gets its snapshots from.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch(&self) -> Result<StatusReport, FetchError>;
}

#[async_trait]
impl<T: StatusSource + ?Sized> StatusSource for Arc<T> {
    async fn fetch(&self) -> Result<StatusReport, FetchError> {
        (**self).fetch().await
    }
}

/// Join the server base URL and the API path.
pub fn api_url(server_url: &str, api_path: &str) -> String {
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        api_path.trim_start_matches('/')
    )
}

/// Fetches the status document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStatusSource {
    url: String,
    http: reqwest::Client,
}

impl HttpStatusSource {
    /// Without `timeout` a request waits for as long as the transport lets it.
    pub fn new(
        server_url: &str,
        api_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build()?;
        Ok(Self {
            url: api_url(server_url, api_path),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self) -> Result<StatusReport, FetchError> {
        let report = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<StatusReport>()
            .await?;
        Ok(report)
    }
}
