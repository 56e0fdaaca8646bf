use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::activity::ActivityLog;
use crate::colors::ColorAssigner;
use crate::data_types::{Cursor, FetchMode, RenderDataset, RenderedSeries, Snapshot};
use crate::utils::{format_elapsed, format_ticks};

/// Advisory numbers from one merge. Never feeds back into control flow.
#[derive(Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub elapsed: Duration,
    pub newest: Cursor,
    /// Rows in the primary (last) dataset.
    pub updated_rows: usize,
    pub incremental: bool,
}

impl Telemetry {
    pub fn record(&self, log: &ActivityLog) {
        log.add("Newest Timestamp:", format_ticks(self.newest.newest()));
        log.add("Execution Time:", format_elapsed(self.elapsed));
        log.add("Updated Rows:", self.updated_rows);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    pub dataset: RenderDataset,
    pub cursor: Cursor,
    pub telemetry: Telemetry,
}

/// Turns snapshots into render datasets, owning the color assignment.
#[derive(Clone, Debug, Default)]
pub struct ChartModelBuilder {
    colors: ColorAssigner,
}

impl ChartModelBuilder {
    pub fn new(colors: ColorAssigner) -> Self {
        Self { colors }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(ColorAssigner::new(seed))
    }

    /// One dataset per series, in snapshot order, last one highlighted.
    ///
    /// The new cursor comes from the last point of the primary series only,
    /// not from the maximum over every series; other series may hold newer
    /// points. An empty snapshot, or an empty primary series, leaves the
    /// cursor where it was.
    pub fn merge(
        &mut self,
        snapshot: Snapshot,
        prior: Cursor,
        mode: FetchMode,
        started: Instant,
    ) -> MergeOutcome {
        if snapshot.is_empty() {
            warn!(incremental = mode.is_incremental(), "empty snapshot, nothing to merge");
        }

        let labels: Vec<&str> = snapshot.labels().collect();
        let colors = self.colors.assign(&labels);

        let mut dataset = RenderDataset::new(
            snapshot
                .into_series()
                .into_iter()
                .zip(colors)
                .map(|(series, color)| RenderedSeries::new(series, color))
                .collect(),
        );
        dataset.apply_highlight();

        let primary_last = dataset
            .primary()
            .and_then(|d| d.points.last())
            .map(|p| p.x);
        let cursor = match primary_last {
            Some(x) => prior.advance_to(x),
            None => prior,
        };

        let telemetry = Telemetry {
            elapsed: started.elapsed(),
            newest: cursor,
            updated_rows: dataset.primary().map_or(0, RenderedSeries::row_count),
            incremental: mode.is_incremental(),
        };

        info!(
            datasets = dataset.len(),
            primary = dataset.primary_series_label().unwrap_or("-"),
            rows = telemetry.updated_rows,
            newest = %format_ticks(cursor.newest()),
            "merged snapshot"
        );

        MergeOutcome {
            dataset,
            cursor,
            telemetry,
        }
    }
}
