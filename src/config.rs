use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::decimation::{effective_rate, SamplingMode};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_COLOR_SEED: u64 = 42;

/// Host-supplied knobs for one synchronization core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub base_url: String,
    /// 0 is accepted and treated as 1.
    pub sample_rate: u32,
    /// Incremental ("new rows only") instead of full reload.
    pub new_only: bool,
    pub sampling_mode: SamplingMode,
    pub color_seed: u64,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sample_rate: 1,
            new_only: false,
            sampling_mode: SamplingMode::Stride,
            color_seed: DEFAULT_COLOR_SEED,
            request_timeout_ms: 10_000,
            user_agent: concat!("chart-sync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SyncConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_new_only(mut self, new_only: bool) -> Self {
        self.new_only = new_only;
        self
    }

    pub fn with_sampling_mode(mut self, mode: SamplingMode) -> Self {
        self.sampling_mode = mode;
        self
    }

    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = seed;
        self
    }

    pub fn effective_sample_rate(&self) -> u32 {
        effective_rate(self.sample_rate) as u32
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Loads a JSON config file; missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&raw).wrap_err_with(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let cfg: SyncConfig = serde_json::from_str(raw)?;
        Ok(cfg)
    }

    /// Defaults overridden by `CHART_SYNC_BASE_URL`, `CHART_SYNC_SAMPLE_RATE`
    /// and `CHART_SYNC_NEW_ONLY`.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CHART_SYNC_BASE_URL") {
            self.base_url = url;
        }
        if let Some(rate) = lookup("CHART_SYNC_SAMPLE_RATE") {
            self.sample_rate = rate
                .trim()
                .parse()
                .wrap_err_with(|| format!("CHART_SYNC_SAMPLE_RATE={rate:?} is not a rate"))?;
        }
        if let Some(flag) = lookup("CHART_SYNC_NEW_ONLY") {
            self.new_only = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => eyre::bail!("CHART_SYNC_NEW_ONLY={other:?} is not a boolean"),
            };
        }
        Ok(self)
    }
}
