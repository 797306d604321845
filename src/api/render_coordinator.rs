use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{MetricBucket, sanitize_bucket};
use crate::error::ChartResult;

use super::frame_builder::{FrameBuilder, FrameState};
use super::{BoardView, ChartExports, DashboardConfig};

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    /// Full board update: sanitize, lazily create the view, redraw, refresh exports.
    ///
    /// The redraw runs on a copy of the view that replaces the stored one only
    /// once every step succeeded.
    ///
    /// Returns `false` when there was nothing to draw yet.
    pub(super) fn update(
        views: &mut IndexMap<String, BoardView>,
        config: &DashboardConfig,
        board: &str,
        bucket: Option<&MetricBucket>,
        metric: Option<&str>,
    ) -> ChartResult<bool> {
        let (Some(bucket), Some(metric)) = (bucket, metric) else {
            trace!(board, "no bucket or metric yet, skipping update");
            return Ok(false);
        };
        if board.is_empty() {
            trace!("empty board name, skipping update");
            return Ok(false);
        }
        let Some(raw_series) = bucket.get(metric) else {
            debug!(board, metric, "metric missing from bucket, skipping update");
            return Ok(false);
        };

        let series = sanitize_bucket(raw_series)?;
        let mut view = match views.get(board) {
            Some(existing) => existing.clone(),
            None => BoardView::new(board, config)?,
        };
        view.apply(series, metric, config)?;
        Self::refresh_exports(&mut view, config)?;
        debug!(
            board,
            metric,
            series_count = view.series().len(),
            unit = view.time_unit().label(),
            "updated chart board"
        );
        views.insert(board.to_owned(), view);
        Ok(true)
    }

    /// Redraws a board from its retained series after a scale change.
    pub(super) fn rerender(view: &mut BoardView, config: &DashboardConfig) -> ChartResult<()> {
        view.reapply(config)?;
        Self::refresh_exports(view, config)
    }

    pub(super) fn refresh_exports(view: &mut BoardView, config: &DashboardConfig) -> ChartResult<()> {
        let frame = FrameBuilder::build(view, config, FrameState::Settled);
        let exports = ChartExports::from_frame(view.name(), &frame)?;
        view.set_exports(exports);
        Ok(())
    }
}
