pub mod common;
pub mod lttb;
pub mod min_max;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data_types::{Point, Series};

pub use common::{effective_rate, find_extrema_indices, target_len};
pub use lttb::decimate_lttb;
pub use min_max::decimate_min_max;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    #[default]
    Stride, // every n-th point
    MinMax, // 2 points per bucket of 2n; an all-NaN bucket keeps its first point
    Lttb,   // Largest-Triangle-Three-Buckets
}

/// Downsamples one x-ascending sequence. A rate of 0 or 1 returns the input.
pub fn sample(points: &[Point], rate: u32, mode: SamplingMode) -> Vec<Point> {
    let rate = effective_rate(rate);
    if rate == 1 {
        return points.to_vec();
    }

    match mode {
        SamplingMode::Stride => points.iter().step_by(rate).copied().collect(),
        SamplingMode::MinMax => decimate_min_max(points, rate),
        SamplingMode::Lttb => decimate_lttb(points, target_len(points.len(), rate).max(3)),
    }
}

/// Samples every series in parallel; series order is kept.
pub fn sample_series(series: &mut [Series], rate: u32, mode: SamplingMode) {
    if effective_rate(rate) == 1 {
        return;
    }
    series
        .par_iter_mut()
        .for_each(|s| s.points = sample(&s.points, rate, mode));
}
