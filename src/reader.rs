use std::collections::HashMap;
use tracing::debug;

use crate::data_types::{ticks_from_f64, Cursor, FetchMode, Point, Series, Snapshot, Ticks};
use crate::decimation::{effective_rate, sample_series, SamplingMode};
use crate::error::SyncError;
use crate::source::SeriesSource;

/// Fetches series from a [`SeriesSource`] and turns them into snapshots.
/// Holds no state between calls; the cursor is always supplied by the caller.
pub struct SeriesReader<S> {
    source: S,
    sampling: SamplingMode,
}

impl<S: SeriesSource> SeriesReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            sampling: SamplingMode::default(),
        }
    }

    pub fn with_sampling_mode(mut self, mode: SamplingMode) -> Self {
        self.sampling = mode;
        self
    }

    pub fn sampling_mode(&self) -> SamplingMode {
        self.sampling
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Row endpoint. Incremental mode never lets a point at or before the
    /// cursor through; sampling runs on what is left.
    pub async fn fetch(&self, mode: FetchMode, sample_rate: u32) -> Result<Snapshot, SyncError> {
        let body = self.source.get_data().await?;
        let mut snapshot = parse_rows(&body, mode.since())?;
        sample_series(snapshot.series_mut(), sample_rate, self.sampling);
        debug!(
            series = snapshot.len(),
            points = snapshot.point_count(),
            incremental = mode.is_incremental(),
            rate = effective_rate(sample_rate),
            "rows read"
        );
        Ok(snapshot)
    }

    /// Pre-sampled endpoint. The server samples; the reader only sorts and
    /// applies the incremental filter.
    pub async fn fetch_presampled(
        &self,
        mode: FetchMode,
        sample_rate: u32,
    ) -> Result<Snapshot, SyncError> {
        let rate = effective_rate(sample_rate) as u32;
        let body = self.source.get_sampled(rate).await?;
        let mut snapshot = parse_sampled(&body)?;
        if let FetchMode::IncrementalSince(cursor) = mode {
            snapshot.retain_newer_than(cursor.newest());
        }
        debug!(
            series = snapshot.len(),
            points = snapshot.point_count(),
            incremental = mode.is_incremental(),
            rate,
            "sampled series read"
        );
        Ok(snapshot)
    }
}

/// Parses the row encoding (`label,x,y` per line), keeping only rows newer
/// than `since`. Labels keep their first-appearance order.
pub fn parse_rows(body: &str, since: Cursor) -> Result<Snapshot, SyncError> {
    let mut series: Vec<Series> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, raw) in body.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || is_header(line) {
            continue;
        }

        let (label, point) = parse_row(line).map_err(|reason| SyncError::parse(line_no, reason))?;
        if !since.admits(point.x) {
            continue;
        }

        match index.get(label) {
            Some(&slot) => series[slot].points.push(point),
            None => {
                index.insert(label.to_string(), series.len());
                series.push(Series::new(label, vec![point]));
            }
        }
    }

    let mut snapshot = Snapshot::new(series);
    snapshot.sort_series();
    Ok(snapshot)
}

/// Parses the map encoding served by the sampling endpoint.
pub fn parse_sampled(body: &str) -> Result<Snapshot, SyncError> {
    let mut snapshot: Snapshot = serde_json::from_str(body)?;
    snapshot.sort_series();
    Ok(snapshot)
}

fn is_header(line: &str) -> bool {
    let mut fields = line.split(',').map(str::trim);
    matches!(
        (fields.next(), fields.next(), fields.next(), fields.next()),
        (Some(l), Some(x), Some(y), None)
            if l.eq_ignore_ascii_case("label") && x.eq_ignore_ascii_case("x") && y.eq_ignore_ascii_case("y")
    )
}

// Split from the right: labels may contain commas.
fn parse_row(line: &str) -> Result<(&str, Point), String> {
    let mut fields = line.rsplitn(3, ',');
    let (Some(y), Some(x), Some(label)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(format!("expected `label,x,y`, got {line:?}"));
    };

    let label = label.trim();
    if label.is_empty() {
        return Err("empty series label".to_string());
    }
    let x = parse_ticks(x.trim())?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad y value {:?}: {e}", y.trim()))?;

    Ok((label, Point::new(x, y)))
}

fn parse_ticks(raw: &str) -> Result<Ticks, String> {
    if let Ok(ticks) = raw.parse::<Ticks>() {
        return Ok(ticks);
    }
    match raw.parse::<f64>() {
        Ok(v) => ticks_from_f64(v).ok_or_else(|| format!("x value {raw:?} out of range")),
        Err(_) => Err(format!("bad x value {raw:?}")),
    }
}
