use chart_sync::data_types::Point;
use chart_sync::decimation::{decimate_lttb, decimate_min_max, sample, SamplingMode};

fn line(ys: &[f64]) -> Vec<Point> {
    ys.iter()
        .enumerate()
        .map(|(i, y)| Point::new(i as i64, *y))
        .collect()
}

#[test]
fn test_lttb_sine_wave() {
    let count = 100;
    let data: Vec<Point> = (0..count)
        .map(|i| Point::new(i, (i as f64 * 0.1).sin()))
        .collect();

    let max_points = 10;
    let decimated = decimate_lttb(&data, max_points);

    assert_eq!(decimated.len(), max_points);
    assert_eq!(decimated[0].x, 0);
    assert_eq!(decimated[max_points - 1].x, count - 1);

    // Check monotony of X
    let mut last_x = -1;
    for p in &decimated {
        assert!(p.x > last_x);
        last_x = p.x;
    }
}

#[test]
fn test_lttb_small_data() {
    let data = line(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(decimate_lttb(&data, 10).len(), 5);
}

#[test]
fn test_lttb_preserves_peak() {
    // 0, 0, 100, 0, 0
    // LTTB with 3 points should keep (0,0), (2,100), (4,0)
    let data = line(&[0.0, 0.0, 100.0, 0.0, 0.0]);
    let decimated = decimate_lttb(&data, 3);

    assert_eq!(
        decimated,
        vec![Point::new(0, 0.0), Point::new(2, 100.0), Point::new(4, 0.0)]
    );
}

#[test]
fn test_min_max_keeps_bucket_extrema_in_x_order() {
    let data = line(&[0.0, 5.0, -3.0, 2.0, 8.0, 1.0]);
    let decimated = decimate_min_max(&data, 2);

    let xs: Vec<_> = decimated.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![1, 2, 4, 5]);
    assert_eq!(decimated[0].y, 5.0);
    assert_eq!(decimated[1].y, -3.0);
}

#[test]
fn test_min_max_flat_bucket_collapses() {
    let data = line(&[1.0, 1.0, 1.0, 1.0]);
    assert_eq!(decimate_min_max(&data, 2), vec![Point::new(0, 1.0)]);
}

#[test]
fn test_min_max_all_nan_bucket_keeps_first_point() {
    let data = line(&[f64::NAN, f64::NAN, f64::NAN, f64::NAN, 2.0, 7.0, 3.0, 1.0]);
    let decimated = decimate_min_max(&data, 2);

    let xs: Vec<_> = decimated.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0, 5, 7]);
    assert!(decimated[0].y.is_nan());
}

#[test]
fn test_stride_keeps_every_nth_from_first() {
    let data = line(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let xs: Vec<_> = sample(&data, 3, SamplingMode::Stride)
        .iter()
        .map(|p| p.x)
        .collect();
    assert_eq!(xs, vec![0, 3, 6]);
}

#[test]
fn test_rate_zero_and_one_are_identity_for_every_mode() {
    let data = line(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
    for mode in [SamplingMode::Stride, SamplingMode::MinMax, SamplingMode::Lttb] {
        assert_eq!(sample(&data, 0, mode), data, "{mode:?}");
        assert_eq!(sample(&data, 1, mode), data, "{mode:?}");
    }
}

#[test]
fn test_sampled_output_stays_sorted() {
    let data: Vec<Point> = (0..1000)
        .map(|i| Point::new(i * 10, ((i * 37) % 101) as f64))
        .collect();
    for mode in [SamplingMode::Stride, SamplingMode::MinMax, SamplingMode::Lttb] {
        let out = sample(&data, 7, mode);
        assert!(!out.is_empty());
        assert!(out.windows(2).all(|w| w[0].x < w[1].x), "{mode:?}");
    }
}
