use approx::assert_relative_eq;
use chartboard::api::{INSTANT_X_LABEL, series_path_id};
use chartboard::core::{
    Axis, CATEGORY10, MetricBucket, PathPoint, RawPoint, RawSeries, Snapshot, TimeUnit,
};
use chartboard::{ChartError, ChartKind, Dashboard, DashboardConfig};

fn bucket(metric: &str, series: &[(&str, &[(f64, f64)])]) -> MetricBucket {
    let mut bucket = MetricBucket::new();
    bucket.insert(
        metric.to_owned(),
        series
            .iter()
            .map(|(name, points)| RawSeries::from_pairs(*name, points).with_sentinel())
            .collect(),
    );
    bucket
}

fn dashboard() -> Dashboard {
    Dashboard::new(DashboardConfig::default()).expect("dashboard init")
}

fn assert_path(actual: &[PathPoint], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "vertex count");
    for (vertex, &(x, y)) in actual.iter().zip(expected) {
        assert_relative_eq!(vertex.x, x, epsilon = 1e-9);
        assert_relative_eq!(vertex.y, y, epsilon = 1e-9);
    }
}

#[test]
fn first_update_draws_board_end_to_end() {
    let mut dashboard = dashboard();
    let data = bucket("p99", &[("w1", &[(0.0, 10.0), (5.0, 20.0)])]);

    let drawn = dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");
    assert!(drawn);

    assert_eq!(dashboard.domain("latency", Axis::X).expect("x"), (0.0, 5.0));
    assert_eq!(dashboard.domain("latency", Axis::Y).expect("y"), (0.0, 20.0));
    assert_eq!(dashboard.time_unit("latency").expect("unit"), TimeUnit::Seconds);

    let view = dashboard.view("latency").expect("view");
    let y_labels: Vec<&str> = view
        .ticks(Axis::Y)
        .iter()
        .map(|tick| tick.label.as_str())
        .collect();
    assert_eq!(y_labels, vec!["0", "5", "10", "15", "20"]);
    let x_values: Vec<f64> = view.ticks(Axis::X).iter().map(|tick| tick.value).collect();
    assert_eq!(x_values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    assert_eq!(view.axis_label(Axis::X), "t[s]");
    assert_eq!(view.axis_label(Axis::Y), "p99");
    assert_path(
        view.target_path("w1").expect("target"),
        &[(0.0, 200.0), (720.0, 0.0)],
    );
    assert_path(
        &view.displayed_path("w1").expect("displayed"),
        &[(0.0, 200.0), (720.0, 0.0)],
    );
    assert!(!dashboard.is_animating());
}

#[test]
fn missing_inputs_are_silent_no_ops() {
    let mut dashboard = dashboard();
    let data = bucket("p99", &[("w1", &[(0.0, 1.0)])]);

    assert!(!dashboard.update("latency", None, Some("p99")).expect("no bucket"));
    assert!(!dashboard.update("latency", Some(&data), None).expect("no metric"));
    assert!(!dashboard.update("", Some(&data), Some("p99")).expect("no board"));
    assert!(
        !dashboard
            .update("latency", Some(&data), Some("p50"))
            .expect("metric absent")
    );
    assert_eq!(dashboard.board_names().count(), 0);
}

#[test]
fn colors_stay_stable_across_redraws() {
    let mut dashboard = dashboard();
    let first = bucket(
        "p99",
        &[
            ("A", &[(0.0, 1.0)]),
            ("B", &[(0.0, 2.0)]),
            ("C", &[(0.0, 3.0)]),
        ],
    );
    dashboard
        .update("latency", Some(&first), Some("p99"))
        .expect("first update");
    for (index, name) in ["A", "B", "C"].into_iter().enumerate() {
        assert_eq!(
            dashboard.series_color("latency", name).expect("color"),
            CATEGORY10[index]
        );
    }

    let second = bucket("p99", &[("C", &[(0.0, 3.0)]), ("B", &[(0.0, 2.0)])]);
    dashboard
        .update("latency", Some(&second), Some("p99"))
        .expect("second update");
    assert_eq!(dashboard.series_color("latency", "B").expect("B"), CATEGORY10[1]);
    assert_eq!(dashboard.series_color("latency", "C").expect("C"), CATEGORY10[2]);

    let legend = dashboard.legend("latency").expect("legend");
    let names: Vec<&str> = legend.entries().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["C", "B"]);
}

#[test]
fn toggling_one_series_leaves_others_visible() {
    let mut dashboard = dashboard();
    let data = bucket(
        "p99",
        &[("A", &[(0.0, 1.0), (1.0, 2.0)]), ("B", &[(0.0, 2.0), (1.0, 3.0)])],
    );
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");

    let visible = dashboard.toggle_series("latency", "B").expect("toggle");
    assert!(!visible);
    let legend = dashboard.legend("latency").expect("legend");
    assert!(legend.is_visible("A"));
    assert!(!legend.is_visible("B"));

    let frame = dashboard.settled_frame("latency").expect("frame");
    let a = frame
        .polyline(&series_path_id("latency", "p99", "A"))
        .expect("A path");
    let b = frame
        .polyline(&series_path_id("latency", "p99", "B"))
        .expect("B path");
    assert_relative_eq!(a.color.alpha, 1.0);
    assert_relative_eq!(b.color.alpha, 0.2);

    assert!(dashboard.toggle_series("latency", "B").expect("toggle back"));
}

#[test]
fn hidden_series_stays_hidden_after_redraw() {
    let mut dashboard = dashboard();
    let data = bucket(
        "p99",
        &[("A", &[(0.0, 1.0), (1.0, 2.0)]), ("B", &[(0.0, 2.0), (1.0, 3.0)])],
    );
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");
    dashboard.toggle_series("latency", "B").expect("toggle");

    let next = bucket(
        "p99",
        &[("A", &[(0.0, 1.0), (2.0, 4.0)]), ("B", &[(0.0, 2.0), (2.0, 5.0)])],
    );
    dashboard
        .update("latency", Some(&next), Some("p99"))
        .expect("redraw");

    assert!(!dashboard.legend("latency").expect("legend").is_visible("B"));
    assert!(dashboard.legend("latency").expect("legend").is_visible("A"));
}

#[test]
fn toggling_unknown_targets_reports_errors() {
    let mut dashboard = dashboard();
    assert!(matches!(
        dashboard.toggle_series("latency", "A"),
        Err(ChartError::UnknownBoard(_))
    ));

    let data = bucket("p99", &[("A", &[(0.0, 1.0)])]);
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");
    assert!(matches!(
        dashboard.toggle_series("latency", "Z"),
        Err(ChartError::UnknownSeries { .. })
    ));
}

#[test]
fn time_unit_is_tracked_per_board() {
    let mut dashboard = dashboard();
    let long = bucket("p99", &[("w1", &[(0.0, 1.0), (301.0, 2.0)])]);
    let short = bucket("p99", &[("w1", &[(0.0, 1.0), (10.0, 2.0)])]);

    dashboard
        .update("latency", Some(&long), Some("p99"))
        .expect("long");
    dashboard
        .update("throughput", Some(&short), Some("p99"))
        .expect("short");

    assert_eq!(dashboard.time_unit("latency").expect("unit"), TimeUnit::Minutes);
    assert_eq!(dashboard.time_unit("throughput").expect("unit"), TimeUnit::Seconds);
    assert_eq!(
        dashboard.view("latency").expect("view").axis_label(Axis::X),
        "t[m]"
    );
    let (_, x_max) = dashboard.domain("latency", Axis::X).expect("x");
    assert_relative_eq!(x_max, 301.0 / 60.0, epsilon = 1e-9);
}

#[test]
fn time_unit_does_not_regress_on_shorter_data() {
    let mut dashboard = dashboard();
    let long = bucket("p99", &[("w1", &[(0.0, 1.0), (301.0, 2.0)])]);
    let short = bucket("p99", &[("w1", &[(0.0, 1.0), (10.0, 2.0)])]);
    dashboard
        .update("latency", Some(&long), Some("p99"))
        .expect("long");
    dashboard
        .update("latency", Some(&short), Some("p99"))
        .expect("short");
    assert_eq!(dashboard.time_unit("latency").expect("unit"), TimeUnit::Minutes);
}

#[test]
fn mid_series_null_fails_and_leaves_marker_settled() {
    let mut dashboard = dashboard();
    let mut data = MetricBucket::new();
    data.insert(
        "p99".to_owned(),
        vec![RawSeries::new(
            "w1",
            vec![Some(RawPoint::new(0.0, 1.0)), None, Some(RawPoint::new(2.0, 3.0))],
        )],
    );

    let err = dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect_err("mid-series null must fail");
    assert!(matches!(err, ChartError::InvalidSeries { .. }));
    assert!(dashboard.is_settled());
    assert!(!dashboard.has_board("latency"));
}

#[test]
fn settled_marker_is_set_after_successful_update() {
    let mut dashboard = dashboard();
    assert!(dashboard.is_settled());
    let data = bucket("p99", &[("w1", &[(0.0, 1.0), (1.0, 2.0)])]);
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");
    assert!(dashboard.is_settled());
}

#[test]
fn process_draws_only_boards_of_requested_kind() {
    let mut dashboard = dashboard();
    let snapshot: Snapshot = [
        (
            "latency".to_owned(),
            bucket("p99", &[("w1", &[(0.0, 1.0), (4.0, 3.0)])]),
        ),
        (
            "8-16".to_owned(),
            bucket("p99", &[("w1", &[(8.0, 1.0), (16.0, 3.0)])]),
        ),
    ]
    .into_iter()
    .collect();

    let selected = dashboard
        .process(Some(snapshot), Some("p99"), ChartKind::TimeSeries)
        .expect("time series pass");
    assert_eq!(selected, vec!["latency"]);
    assert!(dashboard.has_board("latency"));
    assert!(!dashboard.has_board("8-16"));

    let selected = dashboard
        .process(None, None, ChartKind::Instant)
        .expect("instant pass");
    assert_eq!(selected, vec!["8-16"]);

    let instant = dashboard.view("8-16").expect("instant view");
    assert_eq!(instant.kind(), ChartKind::Instant);
    assert_eq!(instant.axis_label(Axis::X), INSTANT_X_LABEL);
    assert_eq!(dashboard.domain("8-16", Axis::X).expect("x"), (8.0, 16.0));
}

fn null_gap_bucket() -> MetricBucket {
    let mut data = MetricBucket::new();
    data.insert(
        "p99".to_owned(),
        vec![RawSeries::new(
            "w1",
            vec![Some(RawPoint::new(0.0, 1.0)), None, Some(RawPoint::new(2.0, 3.0))],
        )],
    );
    data
}

#[test]
fn process_keeps_drawing_boards_after_a_failing_board() {
    let mut dashboard = dashboard();
    let snapshot: Snapshot = [
        ("broken".to_owned(), null_gap_bucket()),
        (
            "latency".to_owned(),
            bucket("p99", &[("w1", &[(0.0, 1.0), (5.0, 2.0)])]),
        ),
    ]
    .into_iter()
    .collect();

    let err = dashboard
        .process(Some(snapshot), Some("p99"), ChartKind::TimeSeries)
        .expect_err("broken board must be reported");
    assert!(matches!(err, ChartError::InvalidSeries { .. }));
    assert!(dashboard.is_settled());
    assert!(!dashboard.has_board("broken"));
    assert!(dashboard.has_board("latency"));
    assert_eq!(dashboard.domain("latency", Axis::X).expect("x"), (0.0, 5.0));
    assert!(dashboard.exports("latency").is_ok());
}

#[test]
fn failed_update_leaves_existing_board_untouched() {
    let mut dashboard = dashboard();
    let data = bucket("p99", &[("w1", &[(0.0, 10.0), (5.0, 20.0)])]);
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");
    let before = dashboard.settled_frame("latency").expect("frame");

    dashboard
        .update("latency", Some(&null_gap_bucket()), Some("p99"))
        .expect_err("mid-series null must fail");

    assert_eq!(dashboard.domain("latency", Axis::Y).expect("y"), (0.0, 20.0));
    assert_eq!(dashboard.view("latency").expect("view").series().len(), 1);
    assert_eq!(dashboard.settled_frame("latency").expect("frame"), before);
}

#[test]
fn values_near_f64_max_keep_the_raw_y_extent() {
    let mut dashboard = dashboard();
    let data = bucket("p99", &[("w1", &[(0.0, 1.0), (5.0, 1.7e308)])]);

    let drawn = dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");
    assert!(drawn);
    assert_eq!(
        dashboard.domain("latency", Axis::Y).expect("y"),
        (0.0, 1.7e308)
    );
    assert_eq!(dashboard.domain("latency", Axis::X).expect("x"), (0.0, 5.0));

    let view = dashboard.view("latency").expect("view");
    let path = view.target_path("w1").expect("path");
    assert_eq!(path.len(), 2);
    assert!(path.iter().all(|vertex| vertex.x.is_finite() && vertex.y.is_finite()));
    assert!(dashboard.exports("latency").is_ok());
}

#[test]
fn metric_catalog_labels_the_y_axis() {
    let mut dashboard = dashboard();
    let data = bucket("throughput", &[("w1", &[(0.0, 1.0), (1.0, 2.0)])]);
    dashboard
        .update("ops", Some(&data), Some("throughput"))
        .expect("update");
    assert_eq!(
        dashboard.view("ops").expect("view").axis_label(Axis::Y),
        "ops/s"
    );
}

#[test]
fn degenerate_extent_keeps_previous_domain() {
    let mut dashboard = dashboard();
    let data = bucket("p99", &[("w1", &[(0.0, 10.0), (5.0, 20.0)])]);
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");

    let flat = bucket("p99", &[("w1", &[(0.0, 0.0), (5.0, 0.0)])]);
    dashboard
        .update("latency", Some(&flat), Some("p99"))
        .expect("flat update");
    assert_eq!(dashboard.domain("latency", Axis::Y).expect("y"), (0.0, 20.0));
}

#[test]
fn switching_scales_redraws_board() {
    let mut dashboard = dashboard();
    let data = bucket("p99", &[("w1", &[(0.0, 10.0), (5.0, 20.0)])]);
    dashboard
        .update("latency", Some(&data), Some("p99"))
        .expect("update");

    let mode = dashboard
        .click_scale_switch("latency", Axis::Y)
        .expect("switch y");
    assert_eq!(mode.name(), "log");
    assert_eq!(dashboard.domain("latency", Axis::Y).expect("y"), (10.0, 100.0));
    assert_eq!(dashboard.domain("latency", Axis::X).expect("x"), (0.0, 5.0));

    dashboard
        .click_scale_switch("latency", Axis::Y)
        .expect("switch back");
    assert_eq!(dashboard.domain("latency", Axis::Y).expect("y"), (0.0, 20.0));

    dashboard
        .click_scale_switch("latency", Axis::X)
        .expect("switch x");
    let (x_min, x_max) = dashboard.domain("latency", Axis::X).expect("x");
    assert_relative_eq!(x_min, 0.1);
    assert_relative_eq!(x_max, 5.0);
    assert_eq!(
        dashboard.view("latency").expect("view").scales().min_threads(),
        1.0
    );
}

#[test]
fn switching_scale_on_unknown_board_fails() {
    let mut dashboard = dashboard();
    assert!(matches!(
        dashboard.click_scale_switch("latency", Axis::X),
        Err(ChartError::UnknownBoard(_))
    ));
    assert!(dashboard.is_settled());
}
