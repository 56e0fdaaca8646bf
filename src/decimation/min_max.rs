use crate::data_types::Point;
use super::common::find_extrema_indices;

/// Keeps the minimum and maximum of every bucket of `2 * rate` points,
/// emitted in x order. A bucket whose extrema coincide contributes one point.
/// A bucket whose `y` values are all NaN keeps its first point, so its x-span
/// does not vanish from the output.
pub fn decimate_min_max(points: &[Point], rate: usize) -> Vec<Point> {
    if rate <= 1 || points.len() <= 2 {
        return points.to_vec();
    }

    let bucket_len = rate * 2;
    let mut output = Vec::with_capacity(points.len().div_ceil(rate));

    for chunk in points.chunks(bucket_len) {
        let Some((min_idx, max_idx)) = find_extrema_indices(chunk) else {
            output.push(chunk[0]);
            continue;
        };

        if min_idx == max_idx {
            output.push(chunk[min_idx]);
            continue;
        }

        // Input is x-ascending, so index order is x order.
        let (p1, p2) = (chunk[min_idx], chunk[max_idx]);
        if min_idx < max_idx {
            output.push(p1);
            output.push(p2);
        } else {
            output.push(p2);
            output.push(p1);
        }
    }

    output
}
