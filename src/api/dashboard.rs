use std::time::Duration;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{Axis, MetricBucket, ScaleMode, Snapshot};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::frame_builder::{FrameBuilder, FrameState};
use super::render_coordinator::RenderCoordinator;
use super::{BoardView, ChartBoardRegistry, ChartKind, DashboardConfig};

/// Main orchestration facade fed by the metrics poller and by user clicks.
///
/// `Dashboard` owns the board registry and one `BoardView` per drawn board.
/// All operations run to completion; animations progress only through
/// `advance`.
#[derive(Debug)]
pub struct Dashboard {
    pub(super) config: DashboardConfig,
    pub(super) registry: ChartBoardRegistry,
    pub(super) views: IndexMap<String, BoardView>,
    pub(super) settled: bool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry: ChartBoardRegistry::new(),
            views: IndexMap::new(),
            settled: true,
        })
    }

    /// Poll entry point: stores `snapshot`/`metric` when given, then updates
    /// every stored board of `kind`.
    ///
    /// A board that fails to update keeps its previous state and does not
    /// stop the remaining boards; the first such error is returned once all
    /// of them were processed. Otherwise returns the selected board names.
    pub fn process(
        &mut self,
        snapshot: Option<Snapshot>,
        metric: Option<&str>,
        kind: ChartKind,
    ) -> ChartResult<Vec<String>> {
        let selected = self.registry.ingest(snapshot, metric, kind);
        let mut first_error = None;
        for board in &selected {
            self.settled = false;
            let result = RenderCoordinator::update(
                &mut self.views,
                &self.config,
                board,
                self.registry.board(board),
                self.registry.metric(),
            );
            self.settled = true;
            if let Err(err) = result {
                warn!(board = %board, error = %err, "chart board update failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(selected),
        }
    }

    /// Redraws `board` from `bucket[metric]`.
    ///
    /// Missing board name, bucket or metric is a silent no-op; the return
    /// value tells whether anything was drawn.
    pub fn update(
        &mut self,
        board: &str,
        bucket: Option<&MetricBucket>,
        metric: Option<&str>,
    ) -> ChartResult<bool> {
        self.settled = false;
        let result =
            RenderCoordinator::update(&mut self.views, &self.config, board, bucket, metric);
        self.settled = true;
        result
    }

    /// Flips visibility of one series; other series are untouched.
    ///
    /// Returns the new visibility.
    pub fn toggle_series(&mut self, board: &str, series: &str) -> ChartResult<bool> {
        let duration = self.config.animation.legend_toggle();
        let mut view = self.view(board)?.clone();
        let visible = view
            .toggle_series(series, duration)
            .ok_or_else(|| ChartError::UnknownSeries {
                board: board.to_owned(),
                series: series.to_owned(),
            })?;
        RenderCoordinator::refresh_exports(&mut view, &self.config)?;
        debug!(board, series, visible, "toggled series visibility");
        self.views.insert(board.to_owned(), view);
        Ok(visible)
    }

    /// Cycles the mode of `axis` on `board`, as a click on its switch does.
    ///
    /// Returns the new mode.
    pub fn click_scale_switch(&mut self, board: &str, axis: Axis) -> ChartResult<ScaleMode> {
        let mode = self.view(board)?.scales().mode(axis).toggled();
        self.switch_scale(board, axis, mode)?;
        Ok(mode)
    }

    /// Puts `axis` of `board` into `mode` and redraws the board.
    pub fn switch_scale(&mut self, board: &str, axis: Axis, mode: ScaleMode) -> ChartResult<()> {
        self.settled = false;
        let result = self.switch_scale_inner(board, axis, mode);
        self.settled = true;
        result
    }

    fn switch_scale_inner(&mut self, board: &str, axis: Axis, mode: ScaleMode) -> ChartResult<()> {
        let mut view = self.view(board)?.clone();
        view.switch_scale(axis, mode);
        RenderCoordinator::rerender(&mut view, &self.config)?;
        debug!(board, axis = axis.name(), mode = mode.name(), "switched board scale");
        self.views.insert(board.to_owned(), view);
        Ok(())
    }

    /// Progresses every running transition by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        for view in self.views.values_mut() {
            view.advance(elapsed);
        }
    }

    /// Frame of `board` as currently displayed, mid-animation values included.
    pub fn frame(&self, board: &str) -> ChartResult<RenderFrame> {
        Ok(FrameBuilder::build(
            self.view(board)?,
            &self.config,
            FrameState::Displayed,
        ))
    }

    /// Frame of `board` with every transition at its target.
    pub fn settled_frame(&self, board: &str) -> ChartResult<RenderFrame> {
        Ok(FrameBuilder::build(
            self.view(board)?,
            &self.config,
            FrameState::Settled,
        ))
    }

    /// Draws the displayed frame of `board` with `renderer`.
    pub fn render_board<R: Renderer>(&self, board: &str, renderer: &mut R) -> ChartResult<()> {
        let frame = self.frame(board)?;
        renderer.render(&frame)
    }
}
