use std::time::Instant;
use tracing::{debug, warn};

use crate::activity::ActivityLog;
use crate::config::SyncConfig;
use crate::data_types::{ChartConfig, Color, Cursor, FetchMode, Point, RenderDataset, RenderedSeries, Series};
use crate::error::SyncError;
use crate::model::{ChartModelBuilder, MergeOutcome, Telemetry};
use crate::player::StreamPlayer;
use crate::reader::SeriesReader;
use crate::render::{RenderCommand, RenderEngine};
use crate::source::{HttpSource, SeriesSource};
use crate::utils::format_ticks;

/// One synchronization core: cursor, palette and playback queue for a
/// single chart. Every cycle takes `&mut self`, so cycles never overlap.
pub struct ChartSync<S, R> {
    reader: SeriesReader<S>,
    engine: R,
    builder: ChartModelBuilder,
    player: StreamPlayer,
    cursor: Cursor,
    chart: ChartConfig,
    activity: ActivityLog,
    sample_rate: u32,
    new_only: bool,
}

impl<R: RenderEngine> ChartSync<HttpSource, R> {
    /// Core reading from the HTTP source described by `config`.
    pub fn connect(config: &SyncConfig, engine: R) -> Result<Self, SyncError> {
        Ok(Self::new(HttpSource::new(config)?, engine, config))
    }
}

impl<S: SeriesSource, R: RenderEngine> ChartSync<S, R> {
    pub fn new(source: S, engine: R, config: &SyncConfig) -> Self {
        Self {
            reader: SeriesReader::new(source).with_sampling_mode(config.sampling_mode),
            engine,
            builder: ChartModelBuilder::with_seed(config.color_seed),
            player: StreamPlayer::new(),
            cursor: Cursor::MIN,
            chart: ChartConfig::default(),
            activity: ActivityLog::new(),
            sample_rate: config.sample_rate,
            new_only: config.new_only,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn set_new_only(&mut self, new_only: bool) {
        self.new_only = new_only;
    }

    pub fn new_only(&self) -> bool {
        self.new_only
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn chart_config(&self) -> &ChartConfig {
        &self.chart
    }

    pub fn activity_log(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn player(&self) -> &StreamPlayer {
        &self.player
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    pub async fn setup(&self) {
        self.render(RenderCommand::Setup, &self.chart).await;
    }

    /// Full reload, or "new rows only" when `new_only` is set.
    pub async fn update_chart(&mut self) -> Result<Telemetry, SyncError> {
        let started = Instant::now();
        let mode = FetchMode::for_new_only(self.new_only, self.cursor);
        let snapshot = self.reader.fetch(mode, self.sample_rate).await?;
        let outcome = self.builder.merge(snapshot, self.cursor, mode, started);
        Ok(self.publish(outcome, mode).await)
    }

    /// Same cycle against the server-side sampling endpoint.
    pub async fn update_chart_on_server(&mut self) -> Result<Telemetry, SyncError> {
        let started = Instant::now();
        let mode = FetchMode::for_new_only(self.new_only, self.cursor);
        let snapshot = self.reader.fetch_presampled(mode, self.sample_rate).await?;
        let outcome = self.builder.merge(snapshot, self.cursor, mode, started);
        Ok(self.publish(outcome, mode).await)
    }

    /// One playback tick. Pushes the emitted point to the chart as a
    /// one-point incremental update.
    pub async fn stream_chart(&mut self) -> Result<Option<Point>, SyncError> {
        let Some(point) = self
            .player
            .step(&self.reader, self.sample_rate, &mut self.cursor)
            .await?
        else {
            debug!(newest = %format_ticks(self.cursor.newest()), "no point to play");
            return Ok(None);
        };

        self.activity.add("Last Updated:", format_ticks(self.cursor.newest()));

        let label = self.player.source_label().unwrap_or_default().to_string();
        let frame = RenderDataset::new(vec![RenderedSeries::new(
            Series::new(label, vec![point]),
            Color::HIGHLIGHT,
        )]);
        self.render(RenderCommand::Update, &self.chart.with_data(frame)).await;
        Ok(Some(point))
    }

    async fn publish(&mut self, outcome: MergeOutcome, mode: FetchMode) -> Telemetry {
        let MergeOutcome {
            dataset,
            cursor,
            telemetry,
        } = outcome;

        self.cursor = cursor;
        self.chart.data = dataset;
        telemetry.record(&self.activity);

        let command = if mode.is_incremental() {
            RenderCommand::Update
        } else {
            RenderCommand::Load
        };
        self.render(command, &self.chart).await;
        telemetry
    }

    async fn render(&self, command: RenderCommand, config: &ChartConfig) {
        if let Err(err) = command.send(&self.engine, config).await {
            warn!(command = command.name(), error = %err, "render call failed");
        }
    }
}
