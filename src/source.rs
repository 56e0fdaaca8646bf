use async_trait::async_trait;
use tracing::debug;

use crate::config::SyncConfig;
use crate::error::SyncError;

/// Remote point source. Implementations return the fully-read response body.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// `GET /data`: every row, row encoding.
    async fn get_data(&self) -> Result<String, SyncError>;

    /// `GET /data/Sample/{rate}`: server-side sampled series, map encoding.
    async fn get_sampled(&self, rate: u32) -> Result<String, SyncError>;
}

/// [`SeriesSource`] over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn data_url(&self) -> String {
        format!("{}/data", self.base_url)
    }

    pub fn sampled_url(&self, rate: u32) -> String {
        format!("{}/data/Sample/{}", self.base_url, rate.max(1))
    }

    async fn get_text(&self, url: String) -> Result<String, SyncError> {
        debug!(%url, "fetching series");
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        debug!(%url, bytes = body.len(), "series body read");
        Ok(body)
    }
}

#[async_trait]
impl SeriesSource for HttpSource {
    async fn get_data(&self) -> Result<String, SyncError> {
        self.get_text(self.data_url()).await
    }

    async fn get_sampled(&self, rate: u32) -> Result<String, SyncError> {
        self.get_text(self.sampled_url(rate)).await
    }
}
