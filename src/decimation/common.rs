use crate::data_types::Point;

/// `sampleRate` as received from the host; anything below 1 means no sampling.
pub fn effective_rate(rate: u32) -> usize {
    rate.max(1) as usize
}

/// Number of points a series of `len` points keeps at `rate`.
pub fn target_len(len: usize, rate: usize) -> usize {
    len.div_ceil(rate.max(1))
}

/// Scans a slice to find the indices of the minimum and maximum `y`.
/// NaN values are skipped. Returns `None` when every value is NaN.
#[inline]
pub fn find_extrema_indices(chunk: &[Point]) -> Option<(usize, usize)> {
    let mut iter = chunk
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.y.is_nan());

    let (first, p) = iter.next()?;
    let (mut min_idx, mut max_idx) = (first, first);
    let (mut min_y, mut max_y) = (p.y, p.y);

    for (i, p) in iter {
        if p.y < min_y {
            min_y = p.y;
            min_idx = i;
        } else if p.y > max_y {
            max_y = p.y;
            max_idx = i;
        }
    }

    Some((min_idx, max_idx))
}
