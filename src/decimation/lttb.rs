use crate::data_types::Point;

/// Largest-Triangle-Three-Buckets down to `max_points`. First and last
/// points are always kept; x is used as a plain f64 coordinate.
pub fn decimate_lttb(points: &[Point], max_points: usize) -> Vec<Point> {
    let n = points.len();
    if n <= max_points || max_points < 3 {
        return points.to_vec();
    }

    // Inner range only: first and last points are fixed.
    let inner_len = n - 2;
    let n_buckets = max_points - 2;
    let buckets: Vec<std::ops::Range<usize>> = (0..n_buckets)
        .map(|i| {
            let start = 1 + i * inner_len / n_buckets;
            let end = 1 + (i + 1) * inner_len / n_buckets;
            start..end
        })
        .filter(|r| !r.is_empty())
        .collect();

    let averages: Vec<(f64, f64)> = buckets
        .iter()
        .map(|range| {
            let count = range.len() as f64;
            let (sum_x, sum_y) = points[range.clone()]
                .iter()
                .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y));
            (sum_x / count, sum_y / count)
        })
        .collect();

    let mut sampled = Vec::with_capacity(buckets.len() + 2);
    sampled.push(points[0]);

    let last = points[n - 1];
    let mut a_idx = 0;
    for (i, range) in buckets.iter().enumerate() {
        let (c_x, c_y) = averages
            .get(i + 1)
            .copied()
            .unwrap_or((last.x as f64, last.y));

        let p_a_x = points[a_idx].x as f64;
        let p_a_y = points[a_idx].y;

        let mut max_area = -1.0;
        let mut next_a_idx = range.start;
        for j in range.clone() {
            let p_b_x = points[j].x as f64;
            let p_b_y = points[j].y;
            let area = (p_a_x * (p_b_y - c_y) + p_b_x * (c_y - p_a_y) + c_x * (p_a_y - p_b_y)).abs();
            if area > max_area {
                max_area = area;
                next_a_idx = j;
            }
        }

        a_idx = next_a_idx;
        sampled.push(points[a_idx]);
    }

    sampled.push(last);
    sampled
}
