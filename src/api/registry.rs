use tracing::debug;

use crate::core::{MetricBucket, RawSeries, Snapshot};

use super::ChartKind;

/// Tracks the latest board snapshot and the selected metric.
///
/// Boards and metric are overridable independently, so a caller can switch
/// metric without resending data and vice versa.
#[derive(Debug, Clone, Default)]
pub struct ChartBoardRegistry {
    boards: Option<Snapshot>,
    metric: Option<String>,
}

impl ChartBoardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores whichever of `boards`/`metric` is given and returns the names of
    /// the stored boards matching `kind`, in arrival order.
    pub fn ingest(
        &mut self,
        boards: Option<Snapshot>,
        metric: Option<&str>,
        kind: ChartKind,
    ) -> Vec<String> {
        if let Some(boards) = boards {
            self.boards = Some(boards);
        }
        if let Some(metric) = metric {
            self.metric = Some(metric.to_owned());
        }

        let selected: Vec<String> = self
            .select_for_kind(kind)
            .into_iter()
            .map(str::to_owned)
            .collect();
        debug!(
            kind = %kind,
            metric = self.metric.as_deref().unwrap_or_default(),
            board_count = self.boards.as_ref().map_or(0, Snapshot::len),
            selected_count = selected.len(),
            "ingested chart boards"
        );
        selected
    }

    #[must_use]
    pub fn classify(board_name: &str) -> ChartKind {
        ChartKind::classify(board_name)
    }

    #[must_use]
    pub fn select_for_kind(&self, kind: ChartKind) -> Vec<&str> {
        self.boards
            .iter()
            .flat_map(|boards| boards.keys())
            .filter(|name| ChartKind::classify(name) == kind)
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub fn boards(&self) -> Option<&Snapshot> {
        self.boards.as_ref()
    }

    #[must_use]
    pub fn board(&self, name: &str) -> Option<&MetricBucket> {
        self.boards.as_ref()?.get(name)
    }

    #[must_use]
    pub fn metric(&self) -> Option<&str> {
        self.metric.as_deref()
    }

    /// Series of the selected metric on `board`, when both exist.
    #[must_use]
    pub fn selected_series(&self, board: &str) -> Option<&[RawSeries]> {
        let metric = self.metric.as_deref()?;
        self.board(board)?.get(metric).map(Vec::as_slice)
    }
}
