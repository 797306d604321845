use crate::core::{Axis, PathPoint, ScaleMode, TickList};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RenderFrame, TextHAlign,
    TextPrimitive,
};

use super::export::document_id;
use super::{BoardView, ChartLayout, DashboardConfig};

const AXIS_STROKE_WIDTH: f64 = 1.0;
const SERIES_STROKE_WIDTH: f64 = 1.0;
const GRID_OPACITY: f64 = 0.2;
const TICK_PADDING: f64 = 10.0;
const TICK_FONT_PX: f64 = 10.0;
const LABEL_FONT_PX: f64 = 12.0;
const TITLE_FONT_PX: f64 = 16.0;
const SWITCH_LINEAR_FILL: Color = Color::from_rgb_u32(0xECE9E9);
const SWITCH_LOG_FILL: Color = Color::BLACK;

/// Which point of the running transitions a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Interpolated values at the current animation clock.
    Displayed,
    /// Transition targets, as if every animation had finished.
    Settled,
}

/// Text of the scale switch for `axis` in `mode`, e.g. `linear x scale`.
#[must_use]
pub fn scale_switch_text(mode: ScaleMode, axis: Axis) -> String {
    format!("{} {} scale", mode.name(), axis.name())
}

/// Id of a series path, e.g. `id-latency-p99-w1-line`.
#[must_use]
pub fn series_path_id(board: &str, metric: &str, series: &str) -> String {
    format!("id-{board}-{metric}-{series}-line")
}

pub(super) struct FrameBuilder;

impl FrameBuilder {
    pub(super) fn build(
        view: &BoardView,
        config: &DashboardConfig,
        state: FrameState,
    ) -> RenderFrame {
        let layout = config.layout;
        let mut frame = RenderFrame::new(layout.viewport(), document_id(view.name()));
        let origin = layout.plot_origin();

        push_title(&mut frame, view, layout, origin);
        push_axes(&mut frame, view, layout, origin);
        push_series(&mut frame, view, layout, origin, state);
        push_legend(&mut frame, view, layout, origin, state);
        push_scale_switches(&mut frame, view, layout, origin);
        frame
    }
}

fn push_title(frame: &mut RenderFrame, view: &BoardView, layout: ChartLayout, origin: (f64, f64)) {
    if view.name().is_empty() {
        return;
    }
    frame.texts.push(
        TextPrimitive::new(
            view.name(),
            origin.0 + layout.plot_width() / 2.0,
            origin.1 - layout.margin_top / 2.0,
            TITLE_FONT_PX,
            Color::BLACK,
            TextHAlign::Center,
        )
        .with_underline(),
    );
}

fn push_axes(frame: &mut RenderFrame, view: &BoardView, layout: ChartLayout, origin: (f64, f64)) {
    let (left, top) = origin;
    let width = layout.plot_width();
    let height = layout.plot_height();
    let bottom = top + height;
    let right = left + width;
    let grid = Color::GREY.with_alpha(GRID_OPACITY);

    frame.lines.push(LinePrimitive::new(
        left,
        bottom,
        right,
        bottom,
        AXIS_STROKE_WIDTH,
        Color::GREY,
    ));
    frame.lines.push(LinePrimitive::new(
        left,
        top,
        left,
        bottom,
        AXIS_STROKE_WIDTH,
        Color::GREY,
    ));

    let x_scale = view.scales().scale(Axis::X);
    for (pixel, label) in tick_pixels(view.ticks(Axis::X), |value| x_scale.map(value).ok()) {
        let x = left + pixel;
        frame
            .lines
            .push(LinePrimitive::new(x, top, x, bottom, AXIS_STROKE_WIDTH, grid));
        if !label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                label,
                x,
                bottom + TICK_PADDING + TICK_FONT_PX,
                TICK_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            ));
        }
    }

    let y_scale = view.scales().scale(Axis::Y);
    for (pixel, label) in tick_pixels(view.ticks(Axis::Y), |value| y_scale.map(value).ok()) {
        let y = top + pixel;
        frame
            .lines
            .push(LinePrimitive::new(left, y, right, y, AXIS_STROKE_WIDTH, grid));
        if !label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                label,
                left - TICK_PADDING,
                y + TICK_FONT_PX / 3.0,
                TICK_FONT_PX,
                Color::BLACK,
                TextHAlign::Right,
            ));
        }
    }

    let x_label = view.axis_label(Axis::X);
    if !x_label.is_empty() {
        frame.texts.push(TextPrimitive::new(
            x_label,
            left + width / 2.0,
            bottom + layout.margin_bottom / 3.0,
            LABEL_FONT_PX,
            Color::BLACK,
            TextHAlign::Center,
        ));
    }

    let y_label = view.axis_label(Axis::Y);
    if !y_label.is_empty() {
        frame.texts.push(
            TextPrimitive::new(
                y_label,
                left - (layout.margin_left * 1.5).round() + LABEL_FONT_PX,
                top + height / 2.0,
                LABEL_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_rotation(-90.0),
        );
    }
}

fn tick_pixels<'a, F>(ticks: &'a TickList, map: F) -> impl Iterator<Item = (f64, &'a str)> + 'a
where
    F: Fn(f64) -> Option<f64> + 'a,
{
    ticks.iter().filter_map(move |tick| {
        map(tick.value)
            .filter(|pixel| pixel.is_finite())
            .map(|pixel| (pixel, tick.label.as_str()))
    })
}

fn push_series(
    frame: &mut RenderFrame,
    view: &BoardView,
    layout: ChartLayout,
    origin: (f64, f64),
    state: FrameState,
) {
    let metric = view.metric().unwrap_or_default();
    for series in view.series() {
        let Some(color) = view.colors().color_of(&series.name) else {
            continue;
        };
        let opacity = series_opacity(view, &series.name, state);
        let color = Color::from_rgb_u32(color).with_alpha(opacity);
        let vertices: Vec<PathPoint> = match state {
            FrameState::Displayed => view.displayed_path(&series.name).unwrap_or_default(),
            FrameState::Settled => view
                .target_path(&series.name)
                .map(<[PathPoint]>::to_vec)
                .unwrap_or_default(),
        };
        let points: Vec<(f64, f64)> = vertices
            .iter()
            .map(|vertex| (origin.0 + vertex.x, origin.1 + vertex.y))
            .collect();

        if view.kind().draws_markers() {
            frame.circles.extend(
                points
                    .iter()
                    .map(|&(cx, cy)| CirclePrimitive::new(cx, cy, layout.marker_radius, color)),
            );
        }
        frame.polylines.push(PolylinePrimitive::new(
            series_path_id(view.name(), metric, &series.name),
            points,
            SERIES_STROKE_WIDTH,
            color,
        ));
    }
}

fn push_legend(
    frame: &mut RenderFrame,
    view: &BoardView,
    layout: ChartLayout,
    origin: (f64, f64),
    state: FrameState,
) {
    let swatch_x = origin.0 + layout.plot_width() + 30.0;
    let text_x = origin.0 + layout.plot_width() + 45.0;
    for (row, (name, _)) in view.legend().entries().enumerate() {
        let Some(color) = view.colors().color_of(name) else {
            continue;
        };
        let opacity = series_opacity(view, name, state);
        let y = origin.1 + row as f64 * layout.legend_row_spacing;
        frame.circles.push(CirclePrimitive::new(
            swatch_x,
            y,
            layout.legend_swatch_radius,
            Color::from_rgb_u32(color).with_alpha(opacity),
        ));
        if !name.is_empty() {
            frame.texts.push(TextPrimitive::new(
                name,
                text_x,
                y,
                LABEL_FONT_PX,
                Color::BLACK.with_alpha(opacity),
                TextHAlign::Left,
            ));
        }
    }
}

fn push_scale_switches(
    frame: &mut RenderFrame,
    view: &BoardView,
    layout: ChartLayout,
    origin: (f64, f64),
) {
    let base_y = origin.1 + layout.plot_height() + layout.margin_bottom / 3.0;
    for (index, axis) in Axis::ALL.into_iter().enumerate() {
        let mode = view.scales().mode(axis);
        let y = base_y + index as f64 * layout.scale_switch_spacing;
        let fill = match mode {
            ScaleMode::Linear => SWITCH_LINEAR_FILL,
            ScaleMode::Log => SWITCH_LOG_FILL,
        };
        frame.circles.push(
            CirclePrimitive::new(origin.0 + 15.0, y, layout.scale_switch_radius, fill)
                .with_stroke(Color::BLACK, 1.0),
        );
        frame.texts.push(TextPrimitive::new(
            scale_switch_text(mode, axis),
            origin.0 + 30.0,
            y,
            LABEL_FONT_PX,
            Color::BLACK,
            TextHAlign::Left,
        ));
    }
}

fn series_opacity(view: &BoardView, series: &str, state: FrameState) -> f64 {
    view.legend()
        .entry(series)
        .map_or(1.0, |entry| match state {
            FrameState::Displayed => entry.opacity(),
            FrameState::Settled => entry.target_opacity(),
        })
}
