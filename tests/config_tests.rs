use std::time::Duration;

use chartboard::api::{AnimationTimings, ChartLayout, MetricCatalog};
use chartboard::core::Viewport;
use chartboard::{ChartError, Dashboard, DashboardConfig};

#[test]
fn default_layout_matches_board_geometry() {
    let layout = ChartLayout::default();
    assert_eq!(layout.viewport(), Viewport::new(1200, 600));
    assert_eq!(layout.plot_width(), 720.0);
    assert_eq!(layout.plot_height(), 400.0);
    assert_eq!(layout.plot_origin(), (170.0, 90.0));
    layout.validate().expect("default layout is valid");
}

#[test]
fn default_animation_timings() {
    let timings = AnimationTimings::default();
    assert_eq!(timings.redraw(), Duration::from_millis(750));
    assert_eq!(timings.legend_toggle(), Duration::from_millis(100));
}

#[test]
fn empty_json_document_yields_defaults() {
    let config = DashboardConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn json_round_trip_preserves_config() {
    let config = DashboardConfig::default()
        .with_tick_count(8)
        .with_animation(AnimationTimings {
            redraw_ms: 300,
            legend_toggle_ms: 50,
        })
        .with_metric_catalog(MetricCatalog::empty().with_unit("p99", "ms"));

    let json = config.to_json_pretty().expect("serialize");
    let restored = DashboardConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
    assert_eq!(restored.metric_catalog.unit("p99"), Some("ms"));
}

#[test]
fn partial_layout_keeps_remaining_defaults() {
    let config = DashboardConfig::from_json_str(r#"{ "layout": { "canvas_width": 900 } }"#)
        .expect("parse");
    assert_eq!(config.layout.canvas_width, 900);
    assert_eq!(config.layout.canvas_height, 600);
    assert_eq!(config.tick_count, 5);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(matches!(
        DashboardConfig::from_json_str(r#"{ "tick_count": 0 }"#),
        Err(ChartError::Config(_))
    ));
    assert!(matches!(
        DashboardConfig::from_json_str(r#"{ "animation": { "redraw_ms": 0 } }"#),
        Err(ChartError::Config(_))
    ));
    assert!(matches!(
        DashboardConfig::from_json_str("not json"),
        Err(ChartError::Config(_))
    ));

    let zero_canvas = ChartLayout {
        canvas_width: 0,
        ..ChartLayout::default()
    };
    assert!(matches!(
        Dashboard::new(DashboardConfig::default().with_layout(zero_canvas)),
        Err(ChartError::InvalidViewport { .. })
    ));
}

#[test]
fn metric_catalog_falls_back_to_metric_name() {
    let catalog = MetricCatalog::default();
    assert_eq!(catalog.axis_label("throughput"), "ops/s");
    assert_eq!(catalog.axis_label("bandwidth"), "MB/s");
    assert_eq!(catalog.axis_label("p99"), "p99");
    assert_eq!(catalog.len(), 4);
    assert!(MetricCatalog::empty().is_empty());
}

#[test]
fn metric_catalog_serializes_as_plain_map() {
    let catalog: MetricCatalog = [("iops", "ops/s")].into_iter().collect();
    let json = serde_json::to_string(&catalog).expect("serialize");
    assert_eq!(json, r#"{"iops":"ops/s"}"#);
}
