mod common;

use chart_sync::config::SyncConfig;
use chart_sync::data_types::{Color, Cursor, Point};
use chart_sync::render::RenderCommand;
use chart_sync::sync::ChartSync;
use common::{rows, FakeSource, RecordingEngine};

fn build_core(data: String) -> (ChartSync<FakeSource, RecordingEngine>, FakeSource, RecordingEngine) {
    let source = FakeSource::with_data(data);
    let engine = RecordingEngine::default();
    let sync = ChartSync::new(source.clone(), engine.clone(), &SyncConfig::default());
    (sync, source, engine)
}

fn two_series() -> String {
    rows(&[
        ("bid", 1, 1.0),
        ("ask", 1, 1.1),
        ("bid", 2, 1.2),
        ("ask", 3, 1.3),
    ])
}

#[tokio::test]
async fn test_setup_sends_chart_config() {
    let (sync, _, engine) = build_core(String::new());
    sync.setup().await;

    let (cmd, cfg) = engine.last().unwrap();
    assert_eq!(cmd, RenderCommand::Setup);
    assert_eq!(cfg.canvas_id, "Scatter");
    assert!(!cfg.options.tooltips_enabled);
}

#[tokio::test]
async fn test_full_update_loads_chart() {
    let (mut sync, _, engine) = build_core(two_series());

    let telemetry = sync.update_chart().await.unwrap();

    assert_eq!(sync.cursor().newest(), 3);
    assert_eq!(telemetry.updated_rows, 2);
    assert_eq!(engine.commands(), vec![RenderCommand::Load]);

    let (_, cfg) = engine.last().unwrap();
    assert_eq!(cfg.data.len(), 2);
    assert_eq!(cfg.data.primary_series_label(), Some("ask"));
    assert_eq!(cfg.data.primary().unwrap().color, Color::HIGHLIGHT);
    assert_eq!(&cfg, sync.chart_config());

    let labels: Vec<_> = sync
        .activity_log()
        .entries()
        .into_iter()
        .map(|e| e.label)
        .collect();
    assert_eq!(labels, vec!["Newest Timestamp:", "Execution Time:", "Updated Rows:"]);
}

#[tokio::test]
async fn test_new_only_update_appends_newer_rows() {
    let (mut sync, source, engine) = build_core(two_series());
    sync.update_chart().await.unwrap();

    source.set_data(rows(&[
        ("bid", 1, 1.0),
        ("ask", 1, 1.1),
        ("bid", 2, 1.2),
        ("ask", 3, 1.3),
        ("bid", 4, 1.4),
        ("ask", 5, 1.5),
    ]));
    sync.set_new_only(true);
    let telemetry = sync.update_chart().await.unwrap();

    assert!(telemetry.incremental);
    assert_eq!(engine.commands(), vec![RenderCommand::Load, RenderCommand::Update]);

    let data = &sync.chart_config().data;
    for ds in &data.datasets {
        assert!(ds.points.iter().all(|p| p.x > 3), "{} leaked old rows", ds.label);
    }
    assert_eq!(data.primary().unwrap().points, vec![Point::new(5, 1.5)]);
    assert_eq!(sync.cursor().newest(), 5);
}

#[tokio::test]
async fn test_new_only_with_nothing_new_keeps_cursor() {
    let (mut sync, _, engine) = build_core(two_series());
    sync.update_chart().await.unwrap();
    sync.set_new_only(true);

    let telemetry = sync.update_chart().await.unwrap();
    assert_eq!(telemetry.updated_rows, 0);
    assert_eq!(sync.cursor().newest(), 3);
    assert!(sync.chart_config().data.is_empty());
    assert_eq!(engine.commands().len(), 2);
}

#[tokio::test]
async fn test_fetch_error_aborts_cycle_without_mutation() {
    let (mut sync, source, engine) = build_core(two_series());
    sync.update_chart().await.unwrap();
    let before_cfg = sync.chart_config().clone();
    let before_log = sync.activity_log().len();

    source.set_failing(true);
    let err = sync.update_chart().await.unwrap_err();

    assert!(err.is_fetch());
    assert_eq!(sync.cursor().newest(), 3);
    assert_eq!(sync.chart_config(), &before_cfg);
    assert_eq!(sync.activity_log().len(), before_log);
    assert_eq!(engine.commands(), vec![RenderCommand::Load]);
}

#[tokio::test]
async fn test_parse_error_aborts_cycle_without_mutation() {
    let (mut sync, source, engine) = build_core(two_series());
    sync.update_chart().await.unwrap();

    source.set_data("bid,1,1.0\nthis is not a row\n");
    let err = sync.update_chart().await.unwrap_err();

    assert!(err.is_parse());
    assert_eq!(sync.cursor().newest(), 3);
    assert_eq!(sync.chart_config().data.len(), 2);
    assert_eq!(engine.commands().len(), 1);
}

#[tokio::test]
async fn test_render_failure_is_swallowed() {
    let (mut sync, _, engine) = build_core(two_series());
    engine.set_failing(true);

    let telemetry = sync.update_chart().await.unwrap();
    assert_eq!(telemetry.newest, Cursor::at(3));
    assert_eq!(sync.cursor().newest(), 3);
    assert_eq!(sync.chart_config().data.len(), 2);
}

#[tokio::test]
async fn test_sample_rate_zero_matches_one() {
    let pts: Vec<_> = (0..12).map(|i| ("s", i as i64, i as f64)).collect();

    let (mut zero, _, _) = build_core(rows(&pts));
    zero.set_sample_rate(0);
    zero.update_chart().await.unwrap();

    let (mut one, _, _) = build_core(rows(&pts));
    one.set_sample_rate(1);
    one.update_chart().await.unwrap();

    assert_eq!(zero.chart_config(), one.chart_config());
    assert_eq!(zero.cursor(), one.cursor());
}

#[tokio::test]
async fn test_update_on_server_uses_sampling_endpoint() {
    let (mut sync, source, engine) = build_core(String::new());
    source.set_sampled(r#"{"bid":[{"x":1,"y":1.0}],"ask":[{"x":4,"y":2.0},{"x":2,"y":1.5}]}"#);
    sync.set_sample_rate(0);

    let telemetry = sync.update_chart_on_server().await.unwrap();

    assert_eq!(source.sampled_rates(), vec![1]);
    assert_eq!(source.data_calls(), 0);
    assert_eq!(telemetry.updated_rows, 2);
    assert_eq!(sync.cursor().newest(), 4);
    assert_eq!(engine.commands(), vec![RenderCommand::Load]);
}

#[tokio::test]
async fn test_stream_chart_plays_one_point_per_tick() {
    let (mut sync, _, engine) = build_core(two_series());

    let first = sync.stream_chart().await.unwrap();
    assert_eq!(first, Some(Point::new(1, 1.1)));
    assert_eq!(sync.cursor().newest(), 1);

    let (cmd, cfg) = engine.last().unwrap();
    assert_eq!(cmd, RenderCommand::Update);
    assert_eq!(cfg.data.len(), 1);
    assert_eq!(cfg.data.primary_series_label(), Some("ask"));
    assert_eq!(cfg.data.primary().unwrap().points, vec![Point::new(1, 1.1)]);
    assert_eq!(cfg.data.primary().unwrap().color, Color::HIGHLIGHT);

    let second = sync.stream_chart().await.unwrap();
    assert_eq!(second, Some(Point::new(3, 1.3)));
    assert_eq!(sync.cursor().newest(), 3);

    assert_eq!(sync.stream_chart().await.unwrap(), None);
    assert_eq!(engine.commands().len(), 2);

    let last = sync.activity_log().last().unwrap();
    assert_eq!(last.label, "Last Updated:");
}

#[tokio::test]
async fn test_stream_after_full_update_only_plays_newer_points() {
    let (mut sync, source, _) = build_core(two_series());
    sync.update_chart().await.unwrap();
    assert_eq!(sync.stream_chart().await.unwrap(), None);

    source.set_data(rows(&[("ask", 3, 1.3), ("ask", 6, 1.6), ("ask", 7, 1.7)]));
    assert_eq!(sync.stream_chart().await.unwrap(), Some(Point::new(6, 1.6)));
    assert_eq!(sync.stream_chart().await.unwrap(), Some(Point::new(7, 1.7)));
}

#[tokio::test]
async fn test_same_seed_gives_same_colors() {
    let (mut a, _, _) = build_core(two_series());
    let (mut b, _, _) = build_core(two_series());
    a.update_chart().await.unwrap();
    b.update_chart().await.unwrap();
    assert_eq!(a.chart_config(), b.chart_config());
}
