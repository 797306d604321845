use chartboard::api::{
    ChartExports, PNG_DATA_URL_PREFIX, SVG_DATA_URL_PREFIX, document_id, scale_switch_text,
    series_path_id,
};
use chartboard::core::{Axis, MetricBucket, RawSeries, ScaleMode, Viewport};
use chartboard::render::{
    Color, PolylinePrimitive, RenderFrame, Renderer, SvgRenderer, TextHAlign, TextPrimitive,
    path_data,
};
use chartboard::{ChartError, Dashboard, DashboardConfig};

fn drawn_dashboard() -> Dashboard {
    let mut dashboard = Dashboard::new(DashboardConfig::default()).expect("dashboard init");
    let mut bucket = MetricBucket::new();
    bucket.insert(
        "p99".to_owned(),
        vec![
            RawSeries::from_pairs("w1", &[(0.0, 10.0), (5.0, 20.0)]).with_sentinel(),
            RawSeries::from_pairs("w2", &[(0.0, 5.0), (5.0, 15.0)]).with_sentinel(),
        ],
    );
    dashboard
        .update("latency", Some(&bucket), Some("p99"))
        .expect("update");
    dashboard
}

#[test]
fn exports_carry_board_file_names_and_prefixes() {
    let dashboard = drawn_dashboard();
    let exports = dashboard.exports("latency").expect("exports");

    assert_eq!(document_id("latency"), "chartboard-latency");
    assert_eq!(exports.svg_file_name, "chartboard-latency.svg");
    assert_eq!(exports.png_file_name, "chartboard-latency.png");
    assert!(exports.svg_data_url.starts_with(SVG_DATA_URL_PREFIX));
    if let Some(png) = &exports.png_data_url {
        assert!(png.starts_with(PNG_DATA_URL_PREFIX));
    }
}

#[test]
fn svg_document_is_standalone_with_xlink_namespace() {
    let dashboard = drawn_dashboard();
    let document = dashboard
        .exports("latency")
        .expect("exports")
        .svg_document()
        .expect("decode");

    assert!(document.starts_with(r#"<?xml version="1.0" standalone="no"?>"#));
    assert!(document.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
    assert!(document.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
    assert!(document.contains(r#"id="chartboard-latency""#));
    assert!(document.contains(r#"width="1200""#));
    assert!(document.contains(r#"height="600""#));
}

#[test]
fn svg_document_contains_series_paths_and_controls() {
    let dashboard = drawn_dashboard();
    let document = dashboard
        .exports("latency")
        .expect("exports")
        .svg_document()
        .expect("decode");

    let id = series_path_id("latency", "p99", "w1");
    assert!(document.contains(&format!(r#"id="{id}""#)));
    assert!(document.contains(r#"d="M170,290 L890,90""#));
    assert!(document.contains(&scale_switch_text(ScaleMode::Linear, Axis::X)));
    assert!(document.contains("linear y scale"));
    assert!(document.contains("t[s]"));
    assert!(document.contains("w2"));
    assert!(document.contains(r#"text-decoration="underline""#));
}

#[test]
fn exports_follow_toggle_and_scale_switch() {
    let mut dashboard = drawn_dashboard();
    let before = dashboard.exports("latency").expect("exports").clone();

    dashboard.toggle_series("latency", "w2").expect("toggle");
    let toggled = dashboard.exports("latency").expect("exports").clone();
    assert_ne!(before.svg_data_url, toggled.svg_data_url);
    assert!(
        toggled
            .svg_document()
            .expect("decode")
            .contains(r#"stroke-opacity="0.2""#)
    );

    dashboard
        .click_scale_switch("latency", Axis::Y)
        .expect("switch");
    let switched = dashboard
        .exports("latency")
        .expect("exports")
        .svg_document()
        .expect("decode");
    assert!(switched.contains("log y scale"));
    assert!(!switched.contains("linear y scale"));
}

#[test]
fn exports_before_first_draw_are_an_error() {
    let dashboard = Dashboard::new(DashboardConfig::default()).expect("dashboard init");
    assert!(matches!(
        dashboard.exports("latency"),
        Err(ChartError::UnknownBoard(_))
    ));
}

#[test]
fn text_content_is_escaped() {
    let frame = RenderFrame::new(Viewport::new(100, 50), "escape").with_text(TextPrimitive::new(
        "a<b & c",
        10.0,
        10.0,
        12.0,
        Color::BLACK,
        TextHAlign::Left,
    ));
    let document = SvgRenderer::serialize(&frame).expect("serialize");
    assert!(document.contains("a&lt;b &amp; c"));
}

#[test]
fn svg_renderer_keeps_last_document() {
    let frame = RenderFrame::new(Viewport::new(200, 100), "doc").with_polyline(
        PolylinePrimitive::new(
            "line",
            vec![(0.0, 0.0), (10.5, 20.25)],
            1.0,
            Color::rgb(0.0, 0.0, 1.0),
        ),
    );
    let mut renderer = SvgRenderer::new();
    renderer.render(&frame).expect("render");

    assert_eq!(renderer.frames_rendered(), 1);
    let document = renderer.document().expect("document");
    assert!(document.contains(&format!(r#"d="{}""#, path_data(&frame.polylines[0].points))));
    assert!(document.contains(r#"d="M0,0 L10.5,20.25""#));
}

#[test]
fn svg_data_url_round_trips_through_decoding() {
    let frame = RenderFrame::new(Viewport::new(100, 50), "round trip");
    let exports = ChartExports::from_frame("round trip", &frame).expect("exports");
    assert!(!exports.svg_data_url.contains(' '));
    let decoded = exports.svg_document().expect("decode");
    assert_eq!(decoded, SvgRenderer::serialize(&frame).expect("serialize"));
    assert_eq!(exports.svg_file_name, "chartboard-round trip.svg");
}
