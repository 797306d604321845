use crate::core::{Axis, TimeUnit};
use crate::error::{ChartError, ChartResult};

use super::{
    AxisScaleState, BoardView, ChartBoardRegistry, ChartExports, Dashboard, DashboardConfig,
    Legend,
};

impl Dashboard {
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ChartBoardRegistry {
        &self.registry
    }

    /// Advisory update marker: `false` only while a board update runs.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Whether any board still has a transition in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.views.values().any(|view| !view.is_settled())
    }

    /// Names of drawn boards, in creation order.
    pub fn board_names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    pub fn view(&self, board: &str) -> ChartResult<&BoardView> {
        self.views
            .get(board)
            .ok_or_else(|| ChartError::UnknownBoard(board.to_owned()))
    }

    #[must_use]
    pub fn has_board(&self, board: &str) -> bool {
        self.views.contains_key(board)
    }

    pub fn axis_state(&self, board: &str) -> ChartResult<AxisScaleState> {
        Ok(self.view(board)?.scales().state())
    }

    pub fn domain(&self, board: &str, axis: Axis) -> ChartResult<(f64, f64)> {
        Ok(self.view(board)?.scales().domain(axis))
    }

    pub fn time_unit(&self, board: &str) -> ChartResult<TimeUnit> {
        Ok(self.view(board)?.time_unit())
    }

    /// `0xRRGGBB` color assigned to `series` on `board`.
    pub fn series_color(&self, board: &str, series: &str) -> ChartResult<u32> {
        self.view(board)?
            .colors()
            .color_of(series)
            .ok_or_else(|| ChartError::UnknownSeries {
                board: board.to_owned(),
                series: series.to_owned(),
            })
    }

    pub fn legend(&self, board: &str) -> ChartResult<&Legend> {
        Ok(self.view(board)?.legend())
    }

    pub fn exports(&self, board: &str) -> ChartResult<&ChartExports> {
        self.view(board)?
            .exports()
            .ok_or_else(|| ChartError::Export(format!("board `{board}` has not been drawn yet")))
    }
}
