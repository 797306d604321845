use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Canvas geometry of one chart board, in pixels.
///
/// Everything inside the plot is positioned relative to `plot_origin()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_margin_top")]
    pub margin_top: f64,
    #[serde(default = "default_margin_right")]
    pub margin_right: f64,
    #[serde(default = "default_margin_bottom")]
    pub margin_bottom: f64,
    #[serde(default = "default_margin_left")]
    pub margin_left: f64,
    #[serde(default = "default_plot_offset")]
    pub plot_offset: f64,
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f64,
    #[serde(default = "default_swatch_radius")]
    pub legend_swatch_radius: f64,
    #[serde(default = "default_row_spacing")]
    pub legend_row_spacing: f64,
    #[serde(default = "default_swatch_radius")]
    pub scale_switch_radius: f64,
    #[serde(default = "default_row_spacing")]
    pub scale_switch_spacing: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            margin_top: default_margin_top(),
            margin_right: default_margin_right(),
            margin_bottom: default_margin_bottom(),
            margin_left: default_margin_left(),
            plot_offset: default_plot_offset(),
            marker_radius: default_marker_radius(),
            legend_swatch_radius: default_swatch_radius(),
            legend_row_spacing: default_row_spacing(),
            scale_switch_radius: default_swatch_radius(),
            scale_switch_spacing: default_row_spacing(),
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.canvas_width, self.canvas_height)
    }

    /// Width of the x axis: two thirds of the inner canvas width, rounded.
    #[must_use]
    pub fn plot_width(self) -> f64 {
        ((f64::from(self.canvas_width) - self.margin_left - self.margin_right) / 1.5).round()
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        f64::from(self.canvas_height) - self.margin_top - self.margin_bottom
    }

    /// Canvas position of the plot's top-left corner.
    #[must_use]
    pub fn plot_origin(self) -> (f64, f64) {
        (
            self.margin_left + self.plot_offset,
            self.margin_top + self.plot_offset,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.viewport().is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        for (name, value) in [
            ("margin_top", self.margin_top),
            ("margin_right", self.margin_right),
            ("margin_bottom", self.margin_bottom),
            ("margin_left", self.margin_left),
            ("plot_offset", self.plot_offset),
            ("legend_row_spacing", self.legend_row_spacing),
            ("scale_switch_spacing", self.scale_switch_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::Config(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("marker_radius", self.marker_radius),
            ("legend_swatch_radius", self.legend_swatch_radius),
            ("scale_switch_radius", self.scale_switch_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::Config(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(ChartError::Config(format!(
                "margins leave no plot area: {}x{}",
                self.plot_width(),
                self.plot_height()
            )));
        }
        Ok(())
    }
}

/// Transition durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationTimings {
    #[serde(default = "default_redraw_ms")]
    pub redraw_ms: u64,
    #[serde(default = "default_legend_toggle_ms")]
    pub legend_toggle_ms: u64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            redraw_ms: default_redraw_ms(),
            legend_toggle_ms: default_legend_toggle_ms(),
        }
    }
}

impl AnimationTimings {
    #[must_use]
    pub fn redraw(self) -> Duration {
        Duration::from_millis(self.redraw_ms)
    }

    #[must_use]
    pub fn legend_toggle(self) -> Duration {
        Duration::from_millis(self.legend_toggle_ms)
    }
}

/// Metric name -> display unit used as the y-axis label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricCatalog {
    units: IndexMap<String, String>,
}

impl Default for MetricCatalog {
    fn default() -> Self {
        [
            ("throughput", "ops/s"),
            ("bandwidth", "MB/s"),
            ("latency", "us"),
            ("duration", "us"),
        ]
        .into_iter()
        .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetricCatalog {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            units: iter
                .into_iter()
                .map(|(metric, unit)| (metric.into(), unit.into()))
                .collect(),
        }
    }
}

impl MetricCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            units: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, metric: impl Into<String>, unit: impl Into<String>) -> Self {
        self.units.insert(metric.into(), unit.into());
        self
    }

    #[must_use]
    pub fn unit(&self, metric: &str) -> Option<&str> {
        self.units.get(metric).map(String::as_str)
    }

    /// Y-axis label for `metric`; unknown metrics are labeled with their own name.
    #[must_use]
    pub fn axis_label<'a>(&'a self, metric: &'a str) -> &'a str {
        self.unit(metric).unwrap_or(metric)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Dashboard-wide configuration.
///
/// Every field has a serde default, so `{}` is a valid config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub animation: AnimationTimings,
    #[serde(default)]
    pub metric_catalog: MetricCatalog,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            layout: ChartLayout::default(),
            tick_count: default_tick_count(),
            animation: AnimationTimings::default(),
            metric_catalog: MetricCatalog::default(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationTimings) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_metric_catalog(mut self, metric_catalog: MetricCatalog) -> Self {
        self.metric_catalog = metric_catalog;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.validate()?;
        if self.tick_count == 0 {
            return Err(ChartError::Config("`tick_count` must be > 0".to_owned()));
        }
        if self.animation.redraw_ms == 0 || self.animation.legend_toggle_ms == 0 {
            return Err(ChartError::Config(
                "animation durations must be > 0 ms".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::Config(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_canvas_width() -> u32 {
    1200
}

fn default_canvas_height() -> u32 {
    600
}

fn default_margin_top() -> f64 {
    20.0
}

fn default_margin_right() -> f64 {
    20.0
}

fn default_margin_bottom() -> f64 {
    180.0
}

fn default_margin_left() -> f64 {
    100.0
}

fn default_plot_offset() -> f64 {
    70.0
}

fn default_marker_radius() -> f64 {
    3.0
}

fn default_swatch_radius() -> f64 {
    7.0
}

fn default_row_spacing() -> f64 {
    30.0
}

fn default_tick_count() -> usize {
    5
}

fn default_redraw_ms() -> u64 {
    750
}

fn default_legend_toggle_ms() -> u64 {
    100
}
