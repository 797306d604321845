use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{
    Axis, ColorAssigner, PathPoint, ScaleMode, Series, TickList, TimeUnit, TimeUnitTracker,
    Transition, deep_extent, is_renderable_domain,
};
use crate::error::ChartResult;

use super::{ChartExports, ChartKind, DashboardConfig, Legend, ScaleManager};

/// X-axis label of instant boards.
pub const INSTANT_X_LABEL: &str = "threads";

/// In-memory state of one drawn chart board.
///
/// Created lazily the first time a board is updated and reused afterwards;
/// rendered output is a projection of this record.
#[derive(Debug, Clone)]
pub struct BoardView {
    name: String,
    kind: ChartKind,
    scales: ScaleManager,
    time_unit: TimeUnitTracker,
    colors: ColorAssigner,
    legend: Legend,
    paths: IndexMap<String, Transition<Vec<PathPoint>>>,
    x_ticks: TickList,
    y_ticks: TickList,
    x_label: String,
    y_label: String,
    metric: Option<String>,
    series: Vec<Series>,
    exports: Option<ChartExports>,
}

impl BoardView {
    pub fn new(name: &str, config: &DashboardConfig) -> ChartResult<Self> {
        let kind = ChartKind::classify(name);
        let scales = ScaleManager::new(
            kind,
            config.layout.plot_width(),
            config.layout.plot_height(),
            config.tick_count,
        )?;
        let time_unit = TimeUnitTracker::new();
        debug!(board = name, kind = %kind, "created chart board view");
        Ok(Self {
            name: name.to_owned(),
            kind,
            scales,
            time_unit,
            colors: ColorAssigner::new(),
            legend: Legend::new(),
            paths: IndexMap::new(),
            x_ticks: TickList::new(),
            y_ticks: TickList::new(),
            x_label: x_label_for(kind, time_unit.current()).to_owned(),
            y_label: String::new(),
            metric: None,
            series: Vec::new(),
            exports: None,
        })
    }

    /// Redraws the board for freshly sanitized `series` of `metric`.
    ///
    /// Axes whose extent is degenerate keep their previous domain.
    pub fn apply(
        &mut self,
        series: Vec<Series>,
        metric: &str,
        config: &DashboardConfig,
    ) -> ChartResult<()> {
        self.colors
            .assign_all(series.iter().map(|item| item.name.as_str()));
        self.legend.sync(series.iter().map(|item| item.name.as_str()));

        if self.kind.uses_time_axis() {
            let max_seconds = deep_extent(&series, |point| point.x).map(|(_, max)| max);
            if let Some(max_seconds) = max_seconds {
                if self.time_unit.tune(max_seconds) {
                    debug!(
                        board = %self.name,
                        unit = self.time_unit.label(),
                        max_seconds,
                        "escalated time unit"
                    );
                }
                self.scales.set_time_unit(self.time_unit.current());
            }
        }

        self.rescale_x(&series)?;
        self.rescale_y(&series)?;
        self.refresh_ticks();
        self.retarget_paths(&series, config.animation.redraw())?;

        self.x_label = x_label_for(self.kind, self.time_unit.current()).to_owned();
        self.y_label = config.metric_catalog.axis_label(metric).to_owned();
        self.metric = Some(metric.to_owned());
        self.series = series;
        Ok(())
    }

    /// Redraws from the series kept by the last `apply`.
    pub fn reapply(&mut self, config: &DashboardConfig) -> ChartResult<()> {
        let Some(metric) = self.metric.clone() else {
            self.refresh_ticks();
            return Ok(());
        };
        let series = std::mem::take(&mut self.series);
        self.apply(series, &metric, config)
    }

    pub fn switch_scale(&mut self, axis: Axis, mode: ScaleMode) {
        self.scales
            .switch_scale(axis, mode, self.time_unit.current());
    }

    pub fn toggle_series(&mut self, series: &str, duration: Duration) -> Option<bool> {
        self.legend.toggle(series, duration)
    }

    pub fn advance(&mut self, elapsed: Duration) {
        for path in self.paths.values_mut() {
            path.advance(elapsed);
        }
        self.legend.advance(elapsed);
    }

    pub(super) fn set_exports(&mut self, exports: ChartExports) {
        self.exports = Some(exports);
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn scales(&self) -> &ScaleManager {
        &self.scales
    }

    #[must_use]
    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit.current()
    }

    #[must_use]
    pub fn colors(&self) -> &ColorAssigner {
        &self.colors
    }

    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    #[must_use]
    pub fn ticks(&self, axis: Axis) -> &TickList {
        match axis {
            Axis::X => &self.x_ticks,
            Axis::Y => &self.y_ticks,
        }
    }

    #[must_use]
    pub fn axis_label(&self, axis: Axis) -> &str {
        match axis {
            Axis::X => &self.x_label,
            Axis::Y => &self.y_label,
        }
    }

    #[must_use]
    pub fn metric(&self) -> Option<&str> {
        self.metric.as_deref()
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn exports(&self) -> Option<&ChartExports> {
        self.exports.as_ref()
    }

    /// Path vertices currently displayed for `series`.
    #[must_use]
    pub fn displayed_path(&self, series: &str) -> Option<Vec<PathPoint>> {
        self.paths.get(series).map(Transition::current)
    }

    /// Path vertices `series` is animating toward.
    #[must_use]
    pub fn target_path(&self, series: &str) -> Option<&[PathPoint]> {
        self.paths
            .get(series)
            .map(|path| path.target().as_slice())
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.paths.values().all(Transition::is_finished) && self.legend.is_settled()
    }

    fn rescale_x(&mut self, series: &[Series]) -> ChartResult<()> {
        let accessor = self.scales.accessor(Axis::X);
        let Some((mut min, max)) = deep_extent(series, |point| accessor.value(point)) else {
            debug!(board = %self.name, axis = "x", "no x extent, keeping previous domain");
            return Ok(());
        };
        if self.kind.applies_min_threads_floor() && self.scales.min_threads() < min {
            min = self.scales.min_threads();
        }
        self.install_domain(Axis::X, (min, max), false)
    }

    fn rescale_y(&mut self, series: &[Series]) -> ChartResult<()> {
        let accessor = self.scales.accessor(Axis::Y);
        let Some((mut min, max)) = deep_extent(series, |point| accessor.value(point)) else {
            debug!(board = %self.name, axis = "y", "no y extent, keeping previous domain");
            return Ok(());
        };
        if self.scales.mode(Axis::Y) == ScaleMode::Linear {
            min = accessor.floor();
        }
        self.install_domain(Axis::Y, (min, max), true)
    }

    fn install_domain(&mut self, axis: Axis, domain: (f64, f64), nice: bool) -> ChartResult<()> {
        let mode = self.scales.mode(axis);
        if !is_renderable_domain(domain, mode) {
            warn!(
                board = %self.name,
                axis = axis.name(),
                mode = mode.name(),
                min = domain.0,
                max = domain.1,
                "degenerate extent, keeping previous domain"
            );
            return Ok(());
        }
        self.scales.set_domain(axis, domain)?;
        if nice && let Err(err) = self.scales.nice_domain(axis) {
            warn!(
                board = %self.name,
                axis = axis.name(),
                error = %err,
                "nice domain not renderable, keeping raw extent"
            );
        }
        Ok(())
    }

    fn refresh_ticks(&mut self) {
        self.x_ticks = self
            .scales
            .tick_generator(Axis::X)
            .ticks(self.scales.domain(Axis::X));
        self.y_ticks = self
            .scales
            .tick_generator(Axis::Y)
            .ticks(self.scales.domain(Axis::Y));
    }

    fn retarget_paths(&mut self, series: &[Series], duration: Duration) -> ChartResult<()> {
        let projected = self.scales.line_generator().project_all(series)?;
        let mut next = IndexMap::with_capacity(series.len());
        for (item, target) in series.iter().zip(projected) {
            let path = match self.paths.swap_remove(&item.name) {
                Some(mut path) => {
                    path.retarget(target, duration);
                    path
                }
                None => Transition::settled(target),
            };
            next.insert(item.name.clone(), path);
        }
        self.paths = next;
        debug!(
            board = %self.name,
            series_count = series.len(),
            x_domain = ?self.scales.domain(Axis::X),
            y_domain = ?self.scales.domain(Axis::Y),
            "retargeted series paths"
        );
        Ok(())
    }
}

fn x_label_for(kind: ChartKind, unit: TimeUnit) -> &'static str {
    if kind.uses_time_axis() {
        unit.label()
    } else {
        INSTANT_X_LABEL
    }
}
