#![allow(dead_code)]

use async_trait::async_trait;
use chart_sync::data_types::{ChartConfig, Ticks};
use chart_sync::error::{RenderError, SyncError};
use chart_sync::render::{RenderCommand, RenderEngine};
use chart_sync::source::SeriesSource;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Builds a row-encoded body.
pub fn rows(rows: &[(&str, Ticks, f64)]) -> String {
    let mut body = String::from("label,x,y\n");
    for (label, x, y) in rows {
        body.push_str(&format!("{label},{x},{y}\n"));
    }
    body
}

#[derive(Default)]
struct SourceState {
    data: Mutex<String>,
    sampled: Mutex<String>,
    fail: AtomicBool,
    data_calls: AtomicUsize,
    sampled_rates: Mutex<Vec<u32>>,
}

/// In-memory source; clones share state so tests can swap bodies while a
/// core owns the source.
#[derive(Clone, Default)]
pub struct FakeSource {
    state: Arc<SourceState>,
}

impl FakeSource {
    pub fn with_data(body: impl Into<String>) -> Self {
        let src = Self::default();
        src.set_data(body);
        src
    }

    pub fn set_data(&self, body: impl Into<String>) {
        *self.state.data.lock() = body.into();
    }

    pub fn set_sampled(&self, body: impl Into<String>) {
        *self.state.sampled.lock() = body.into();
    }

    pub fn set_failing(&self, fail: bool) {
        self.state.fail.store(fail, Ordering::SeqCst);
    }

    pub fn data_calls(&self) -> usize {
        self.state.data_calls.load(Ordering::SeqCst)
    }

    pub fn sampled_rates(&self) -> Vec<u32> {
        self.state.sampled_rates.lock().clone()
    }

    fn check(&self, url: &str) -> Result<(), SyncError> {
        if self.state.fail.load(Ordering::SeqCst) {
            return Err(SyncError::Status {
                url: url.to_string(),
                status: 503,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SeriesSource for FakeSource {
    async fn get_data(&self) -> Result<String, SyncError> {
        self.state.data_calls.fetch_add(1, Ordering::SeqCst);
        self.check("fake://data")?;
        Ok(self.state.data.lock().clone())
    }

    async fn get_sampled(&self, rate: u32) -> Result<String, SyncError> {
        self.state.sampled_rates.lock().push(rate);
        self.check("fake://data/Sample")?;
        Ok(self.state.sampled.lock().clone())
    }
}

#[derive(Default)]
struct EngineState {
    calls: Mutex<Vec<(RenderCommand, ChartConfig)>>,
    fail: AtomicBool,
}

/// Records every engine call; can be told to reject them.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    state: Arc<EngineState>,
}

impl RecordingEngine {
    pub fn set_failing(&self, fail: bool) {
        self.state.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(RenderCommand, ChartConfig)> {
        self.state.calls.lock().clone()
    }

    pub fn commands(&self) -> Vec<RenderCommand> {
        self.state.calls.lock().iter().map(|(c, _)| *c).collect()
    }

    pub fn last(&self) -> Option<(RenderCommand, ChartConfig)> {
        self.state.calls.lock().last().cloned()
    }

    fn record(&self, command: RenderCommand, config: &ChartConfig) -> Result<(), RenderError> {
        self.state.calls.lock().push((command, config.clone()));
        if self.state.fail.load(Ordering::SeqCst) {
            return Err(RenderError::Rejected {
                command: command.name(),
                reason: "canvas detached".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RenderEngine for RecordingEngine {
    async fn setup_chart(&self, config: &ChartConfig) -> Result<(), RenderError> {
        self.record(RenderCommand::Setup, config)
    }

    async fn load_chart_data(&self, config: &ChartConfig) -> Result<(), RenderError> {
        self.record(RenderCommand::Load, config)
    }

    async fn update_chart_data(&self, config: &ChartConfig) -> Result<(), RenderError> {
        self.record(RenderCommand::Update, config)
    }
}
